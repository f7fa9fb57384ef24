//! Stable identities used as hash keys throughout the analyzer.

use std::fmt;

use serde::Serialize;

/// A package identified by its module-relative import string.
///
/// Total order is the lexicographic order of the underlying string, which
/// is what makes import lists and provider lists deterministic to emit.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PackagePath(String);

impl PackagePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last `/`-delimited segment, used as the short package identifier
    /// in qualified names (`packageNameOf` in the façade contract).
    pub fn last_segment(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for PackagePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PackagePath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PackagePath {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// Stable identity for a named type: `(package, name)`.
///
/// Two `TypeId`s are equal iff both components are equal. Used as the
/// hash key for every map in the symbol index and the plan.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct TypeId {
    pub package: PackagePath,
    pub name: String,
}

impl TypeId {
    pub fn new(package: impl Into<PackagePath>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

/// Identity of a top-level provider function: `(package, function name)`.
///
/// Method providers are out of scope (spec.md §1 Non-goals).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ProviderId {
    pub package: PackagePath,
    pub function: String,
}

impl ProviderId {
    pub fn new(package: impl Into<PackagePath>, function: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            function: function.into(),
        }
    }

    /// `<last segment of package path>.<function name>`, the qualified
    /// name form used by the code emitter (spec.md §4.G).
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.package.last_segment(), self.function)
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.function)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_path_orders_lexicographically() {
        let mut paths = vec![
            PackagePath::new("b/pkg"),
            PackagePath::new("a/pkg"),
            PackagePath::new("a/aaa"),
        ];
        paths.sort();
        assert_eq!(
            paths,
            vec![
                PackagePath::new("a/aaa"),
                PackagePath::new("a/pkg"),
                PackagePath::new("b/pkg"),
            ]
        );
    }

    #[test]
    fn last_segment_splits_on_slash() {
        assert_eq!(PackagePath::new("example.com/app/h").last_segment(), "h");
        assert_eq!(PackagePath::new("h").last_segment(), "h");
    }

    #[test]
    fn qualified_name_uses_last_segment() {
        let id = ProviderId::new("example.com/app/h", "NewH");
        assert_eq!(id.qualified_name(), "h.NewH");
    }

    #[test]
    fn type_id_equality_is_componentwise() {
        let a = TypeId::new("pkg", "Foo");
        let b = TypeId::new("pkg", "Foo");
        let c = TypeId::new("pkg", "Bar");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
