//! The provider/struct/interface data model (spec.md §3).

use serde::Serialize;

use crate::ids::{ProviderId, TypeId};

/// Which nominal kind a `Named` type reference points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NamedKind {
    Struct,
    Interface,
}

/// A type reference as it appears in a field or a provider's signature.
///
/// Pointers are always stripped before a `TypeRef` is formed; see
/// `Field::pointer` for where that information is preserved for emission.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum TypeRef {
    Named { id: TypeId, kind: NamedKind },
    Builtin { name: String },
    /// Function, map, slice, array, channel, or generic — resolution
    /// terminates here with a skip.
    Unsupported,
}

impl TypeRef {
    pub fn named_id(&self) -> Option<&TypeId> {
        match self {
            TypeRef::Named { id, .. } => Some(id),
            _ => None,
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, TypeRef::Builtin { .. })
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, TypeRef::Unsupported)
    }
}

/// One parameter of a provider function, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: String,
    pub type_ref: TypeRef,
}

/// A top-level function eligible to supply instances of its produced type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Provider {
    pub id: ProviderId,
    pub parameters: Vec<ParamSpec>,
    pub produces: TypeRef,
}

/// A field as declared in a struct, in declaration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub type_ref: TypeRef,
    pub pointer: bool,
}

/// A named struct type and its declared fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Struct {
    pub id: TypeId,
    pub fields: Vec<Field>,
}

/// A named interface type. Method-set details live behind the façade;
/// this layer only needs identity for index lookups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Interface {
    pub id: TypeId,
}

/// Choose a provider's produced type from its result list, per spec.md §3:
/// scan left-to-right, pick the first result that is (after pointer-strip
/// and alias resolution) a named struct or interface; every other result
/// — before or after that one — must be the conventional error type.
///
/// `results` is already in the shape the façade hands back: each entry is
/// a resolved `TypeRef` plus whether it is the conventional error type.
pub fn choose_produced_type(results: &[(TypeRef, bool)]) -> Option<TypeRef> {
    let chosen_index = results
        .iter()
        .position(|(type_ref, is_error_type)| !is_error_type && matches!(type_ref, TypeRef::Named { .. }))?;
    let all_others_are_errors = results
        .iter()
        .enumerate()
        .all(|(i, (_, is_error_type))| i == chosen_index || *is_error_type);
    if !all_others_are_errors {
        return None;
    }
    Some(results[chosen_index].0.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(pkg: &str, name: &str, kind: NamedKind) -> TypeRef {
        TypeRef::Named {
            id: TypeId::new(pkg, name),
            kind,
        }
    }

    #[test]
    fn chooses_first_named_result() {
        let results = vec![
            (named("s", "S"), false),
            (TypeRef::Builtin { name: "error".into() }, true),
        ];
        let produced = choose_produced_type(&results);
        assert_eq!(produced, Some(named("s", "S")));
    }

    #[test]
    fn rejects_function_with_two_named_results() {
        let results = vec![
            (named("s", "S"), false),
            (named("t", "T"), false),
        ];
        // first named result is chosen; a second non-error result after it
        // disqualifies the function entirely.
        assert_eq!(choose_produced_type(&results), None);
    }

    #[test]
    fn no_qualifying_result_yields_none() {
        let results = vec![(TypeRef::Unsupported, false)];
        assert_eq!(choose_produced_type(&results), None);
    }
}
