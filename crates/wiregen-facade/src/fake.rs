//! A hand-rolled `TypeUniverse` test double (spec.md §4.A): lets the rest
//! of the workspace unit-test the analyzer, index, and validator against
//! synthetic universes without a real host-language parser.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use wiregen_common::{Field, PackagePath, ProviderId, TypeId, WireError};

use crate::{FunctionSig, NamedTypeDecl, TypeUniverse, Underlying};

/// A universe built by hand, one function/struct/interface at a time.
///
/// `load_module` always succeeds and returns the whole universe: a fake
/// has no notion of "packages reachable from a directory" — tests
/// populate exactly the declarations a scenario needs.
#[derive(Default)]
pub struct FakeUniverse {
    functions: Vec<FunctionSig>,
    named_types: Vec<NamedTypeDecl>,
    implements: FxHashSet<(TypeId, TypeId)>,
    file_packages: Vec<(PathBuf, PackagePath)>,
    file_structs: Vec<(PathBuf, TypeId)>,
}

impl FakeUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_function(mut self, sig: FunctionSig) -> Self {
        self.functions.push(sig);
        self
    }

    #[must_use]
    pub fn with_struct(mut self, id: TypeId, fields: Vec<Field>) -> Self {
        self.named_types.push(NamedTypeDecl {
            id,
            underlying: Underlying::Struct(fields),
        });
        self
    }

    #[must_use]
    pub fn with_interface(mut self, id: TypeId) -> Self {
        self.named_types.push(NamedTypeDecl {
            id,
            underlying: Underlying::Interface,
        });
        self
    }

    /// Declare that the struct `struct_id`'s method set satisfies
    /// `iface_id` — the fake never computes method sets, so tests state
    /// assignability directly.
    #[must_use]
    pub fn with_implements(mut self, struct_id: TypeId, iface_id: TypeId) -> Self {
        self.implements.insert((struct_id, iface_id));
        self
    }

    pub fn provider_named(&self, package: &str, function: &str) -> ProviderId {
        ProviderId::new(package, function)
    }

    /// Declare which package a given input-file path belongs to, for
    /// `package_of_file`.
    #[must_use]
    pub fn with_file_package(mut self, file: impl Into<PathBuf>, package: PackagePath) -> Self {
        self.file_packages.push((file.into(), package));
        self
    }

    /// Declare that `struct_id` is one of the top-level structs declared
    /// in `file`, for `structs_in_file`. A struct can be declared in one
    /// file and referenced as a field/provider result from another — only
    /// `with_struct` makes it visible to the index; this additionally
    /// marks it as a root candidate for that specific file.
    #[must_use]
    pub fn with_struct_in_file(mut self, file: impl Into<PathBuf>, struct_id: TypeId) -> Self {
        self.file_structs.push((file.into(), struct_id));
        self
    }
}

impl TypeUniverse for FakeUniverse {
    type PackageSet = ();

    fn load_module(&self, _dir: &Path) -> Result<Self::PackageSet, WireError> {
        Ok(())
    }

    fn package_of_file(&self, file: &Path) -> Result<PackagePath, WireError> {
        self.file_packages
            .iter()
            .find(|(path, _)| path == file)
            .map(|(_, package)| package.clone())
            .ok_or_else(|| WireError::LoadFailure {
                message: format!("no package declared for fake file {}", file.display()),
            })
    }

    fn structs_in_file(&self, file: &Path) -> Result<Vec<TypeId>, WireError> {
        Ok(self
            .file_structs
            .iter()
            .filter(|(path, _)| path == file)
            .map(|(_, id)| id.clone())
            .collect())
    }

    fn iter_functions(&self, _packages: &Self::PackageSet) -> Vec<FunctionSig> {
        self.functions.clone()
    }

    fn iter_named_types(&self, _packages: &Self::PackageSet) -> Vec<NamedTypeDecl> {
        self.named_types.clone()
    }

    fn implements(&self, struct_id: &TypeId, iface_id: &TypeId) -> bool {
        self.implements
            .contains(&(struct_id.clone(), iface_id.clone()))
    }

    fn fields(&self, struct_id: &TypeId) -> Vec<Field> {
        self.named_types
            .iter()
            .find(|decl| &decl.id == struct_id)
            .and_then(|decl| match &decl.underlying {
                Underlying::Struct(fields) => Some(fields.clone()),
                Underlying::Interface => None,
            })
            .unwrap_or_default()
    }

    fn package_name_of(&self, package: &PackagePath) -> String {
        package.last_segment().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiregen_common::{NamedKind, TypeRef};

    #[test]
    fn fields_returns_declared_fields_for_struct_only() {
        let struct_id = TypeId::new("h", "H");
        let iface_id = TypeId::new("s", "S");
        let universe = FakeUniverse::new()
            .with_struct(
                struct_id.clone(),
                vec![Field {
                    name: "s".into(),
                    type_ref: TypeRef::Named {
                        id: iface_id.clone(),
                        kind: NamedKind::Interface,
                    },
                    pointer: false,
                }],
            )
            .with_interface(iface_id.clone());

        assert_eq!(universe.fields(&struct_id).len(), 1);
        assert!(universe.fields(&iface_id).is_empty());
    }

    #[test]
    fn implements_reflects_declared_assignability() {
        let struct_id = TypeId::new("s", "SImpl");
        let iface_id = TypeId::new("s", "S");
        let universe = FakeUniverse::new().with_implements(struct_id.clone(), iface_id.clone());
        assert!(universe.implements(&struct_id, &iface_id));
        assert!(!universe.implements(&iface_id, &struct_id));
    }
}
