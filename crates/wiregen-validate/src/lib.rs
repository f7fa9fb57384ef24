//! The Plan Validator (spec.md §4.E): three independent sets computed
//! over a finished `Plan`, re-deriving the `ambiguous` and `duplicates`
//! checks straight from the index rather than trusting the analyzer's own
//! skip reasons — a belt-and-braces pass, not a re-statement of §4.D.

use rustc_hash::FxHashMap;

use wiregen_common::{ProviderId, TypeId};
use wiregen_index::Index;

pub use wiregen_common::Plan;
use wiregen_common::PlanNode;

/// One offending node, with enough context for the reporter and the
/// orchestrator's summary printer to describe it without re-querying
/// the plan or the index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Offense {
    pub type_id: TypeId,
    pub reason: String,
}

/// The validator's verdict for one `Plan`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Diagnostic {
    pub root: Option<TypeId>,
    pub skipped: Vec<Offense>,
    pub ambiguous: Vec<Offense>,
    pub duplicates: Vec<Offense>,
}

impl Diagnostic {
    /// A plan is satisfiable iff all three sets are empty (spec.md §4.E).
    pub fn is_satisfiable(&self) -> bool {
        self.skipped.is_empty() && self.ambiguous.is_empty() && self.duplicates.is_empty()
    }
}

/// Validate `plan` against `index`, per spec.md §4.E.
pub fn validate(plan: &Plan, index: &Index) -> Diagnostic {
    let mut diagnostic = Diagnostic {
        root: Some(plan.root.clone()),
        ..Diagnostic::default()
    };

    for (type_id, node) in &plan.nodes {
        if let PlanNode::Skipped { reason, .. } = node {
            diagnostic.skipped.push(Offense {
                type_id: type_id.clone(),
                reason: reason.clone(),
            });
        }
    }

    for type_id in plan.nodes.keys() {
        if type_id == &plan.root {
            continue;
        }
        if let Some(providers) = ambiguous_providers(index, type_id) {
            diagnostic.ambiguous.push(Offense {
                type_id: type_id.clone(),
                reason: format!("{} providers in index: {}", providers.len(), join(&providers)),
            });
        }
    }

    diagnostic.duplicates = find_duplicate_producers(plan);

    diagnostic
}

/// `Some(providers)` iff `type_id` is a struct or interface with two or
/// more providers registered in the index — the literal meaning of
/// "ambiguous", as opposed to zero providers (a legitimate `Leaf`).
fn ambiguous_providers(index: &Index, type_id: &TypeId) -> Option<Vec<ProviderId>> {
    let providers = if index.is_struct(type_id) {
        index.lookup_struct_providers(type_id)
    } else if index.is_interface(type_id) {
        index.lookup_interface_providers(type_id)
    } else {
        return None;
    };
    (providers.len() >= 2).then_some(providers)
}

/// Scan for a produced type claimed by two different `Resolved` nodes.
/// With `plan.nodes` keyed by `TypeId` and every node's `produced_type`
/// set equal to its own key, this can never trip — the check stays in
/// place as the spec's own "should be impossible if §4.D is correct"
/// belt-and-braces guard, in case that keying invariant is ever broken.
fn find_duplicate_producers(plan: &Plan) -> Vec<Offense> {
    let mut seen: FxHashMap<&TypeId, &TypeId> = FxHashMap::default();
    let mut offenses = Vec::new();
    for (key, node) in &plan.nodes {
        if let PlanNode::Resolved { produced_type, .. } = node {
            if let Some(first_key) = seen.insert(produced_type, key) {
                if first_key != key {
                    offenses.push(Offense {
                        type_id: produced_type.clone(),
                        reason: "produced by two different resolved nodes".to_string(),
                    });
                }
            }
        }
    }
    offenses
}

fn join(providers: &[ProviderId]) -> String {
    providers
        .iter()
        .map(ProviderId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use wiregen_analyze::analyze;
    use wiregen_common::{NamedKind, TypeRef};
    use wiregen_facade::{FakeUniverse, FunctionSig};
    use wiregen_index::index_module;

    fn named(package: &str, name: &str, kind: NamedKind) -> TypeRef {
        TypeRef::Named {
            id: TypeId::new(package, name),
            kind,
        }
    }

    #[test]
    fn satisfiable_plan_has_empty_sets() {
        let root = TypeId::new("a", "Root");
        let universe = FakeUniverse::new().with_struct(root.clone(), vec![]);
        let index = index_module(&universe, &PathBuf::from(".")).unwrap();
        let plan = analyze(&root, &index).unwrap();

        let diagnostic = validate(&plan, &index);
        assert!(diagnostic.is_satisfiable());
    }

    #[test]
    fn unresolved_dependency_is_reported_as_skipped() {
        let root = TypeId::new("a", "Root");
        let universe = FakeUniverse::new().with_struct(
            root.clone(),
            vec![wiregen_common::Field {
                name: "m".into(),
                type_ref: named("a", "Missing", NamedKind::Struct),
                pointer: false,
            }],
        );
        let index = index_module(&universe, &PathBuf::from(".")).unwrap();
        let plan = analyze(&root, &index).unwrap();

        let diagnostic = validate(&plan, &index);
        assert!(!diagnostic.is_satisfiable());
        assert_eq!(diagnostic.skipped.len(), 1);
        assert_eq!(diagnostic.skipped[0].type_id, TypeId::new("a", "Missing"));
    }

    #[test]
    fn ambiguous_interface_is_reported_independently_of_the_analyzer() {
        let root = TypeId::new("a", "Root");
        let svc = TypeId::new("svc", "Svc");
        let universe = FakeUniverse::new()
            .with_struct(
                root.clone(),
                vec![wiregen_common::Field {
                    name: "svc".into(),
                    type_ref: named("svc", "Svc", NamedKind::Interface),
                    pointer: false,
                }],
            )
            .with_interface(svc.clone())
            .with_function(FunctionSig {
                id: ProviderId::new("svc", "NewSvc"),
                parameters: vec![],
                results: vec![(named("svc", "Svc", NamedKind::Interface), false)],
            })
            .with_function(FunctionSig {
                id: ProviderId::new("svc", "NewAltSvc"),
                parameters: vec![],
                results: vec![(named("svc", "Svc", NamedKind::Interface), false)],
            });
        let index = index_module(&universe, &PathBuf::from(".")).unwrap();
        let plan = analyze(&root, &index).unwrap();

        let diagnostic = validate(&plan, &index);
        assert!(!diagnostic.is_satisfiable());
        assert_eq!(diagnostic.ambiguous.len(), 1);
        assert_eq!(diagnostic.ambiguous[0].type_id, svc);
    }

    #[test]
    fn leaf_struct_with_zero_providers_is_not_ambiguous() {
        let root = TypeId::new("a", "Root");
        let plain = TypeId::new("a", "Plain");
        let universe = FakeUniverse::new()
            .with_struct(
                root.clone(),
                vec![wiregen_common::Field {
                    name: "p".into(),
                    type_ref: named("a", "Plain", NamedKind::Struct),
                    pointer: false,
                }],
            )
            .with_struct(plain, vec![]);
        let index = index_module(&universe, &PathBuf::from(".")).unwrap();
        let plan = analyze(&root, &index).unwrap();

        let diagnostic = validate(&plan, &index);
        assert!(diagnostic.is_satisfiable());
    }
}
