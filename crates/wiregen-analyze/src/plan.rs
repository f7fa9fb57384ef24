//! The Dependency Analyzer (spec.md §4.D): recursive depth-first walk
//! with memoization, producing a `Plan` for one root.
//!
//! The analyzer is total — it never raises, beyond the one catastrophic
//! case of the root itself being absent from the index. Every per-node
//! problem becomes a `Skipped` node instead.

use rustc_hash::FxHashSet;

use wiregen_common::{Field, Plan, PlanNode, ProviderId, TypeId, TypeRef, WireError};
use wiregen_index::Index;

/// `analyze(root, index) -> Plan`, per spec.md §4.D.
pub fn analyze(root: &TypeId, index: &Index) -> Result<Plan, WireError> {
    if !index.is_struct(root) {
        return Err(WireError::RootNotFound { root: root.clone() });
    }

    let mut plan = Plan::new(root.clone());
    let mut in_progress: FxHashSet<TypeId> = FxHashSet::default();
    let mut memo: FxHashSet<TypeId> = FxHashSet::default();
    visit(root, root, index, &mut plan, &mut in_progress, &mut memo);
    Ok(plan)
}

fn visit(
    target: &TypeId,
    root: &TypeId,
    index: &Index,
    plan: &mut Plan,
    in_progress: &mut FxHashSet<TypeId>,
    memo: &mut FxHashSet<TypeId>,
) {
    if memo.contains(target) {
        return;
    }
    if in_progress.contains(target) {
        plan.nodes.insert(
            target.clone(),
            PlanNode::Skipped {
                produced_type: target.clone(),
                reason: "cycle".to_string(),
            },
        );
        return;
    }
    in_progress.insert(target.clone());

    if target == root {
        resolve_leaf(target, index, plan, in_progress, memo, root);
    } else if index.is_struct(target) {
        resolve_struct(target, index, plan, in_progress, memo, root);
    } else if index.is_interface(target) {
        resolve_interface(target, index, plan, in_progress, memo, root);
    } else {
        plan.nodes.insert(
            target.clone(),
            PlanNode::Skipped {
                produced_type: target.clone(),
                reason: "no provider".to_string(),
            },
        );
    }

    in_progress.remove(target);
    memo.insert(target.clone());
}

/// Struct with zero providers, or the root: satisfied by field-wise
/// construction. Descend into every `Named` field; record an unsupported
/// field as its own `Skipped` child; builtin fields are neither recorded
/// nor descended into (the emitter treats them as zero-valued/external).
fn resolve_leaf(
    target: &TypeId,
    index: &Index,
    plan: &mut Plan,
    in_progress: &mut FxHashSet<TypeId>,
    memo: &mut FxHashSet<TypeId>,
    root: &TypeId,
) {
    plan.nodes.insert(
        target.clone(),
        PlanNode::Leaf {
            produced_type: target.clone(),
        },
    );
    let Some(strukt) = index.lookup_struct(target) else {
        return;
    };
    for field in &strukt.fields {
        match &field.type_ref {
            TypeRef::Named { id, .. } => visit(id, root, index, plan, in_progress, memo),
            TypeRef::Builtin { .. } => {}
            TypeRef::Unsupported => record_unsupported_field(target, field, plan),
        }
    }
}

fn resolve_struct(
    target: &TypeId,
    index: &Index,
    plan: &mut Plan,
    in_progress: &mut FxHashSet<TypeId>,
    memo: &mut FxHashSet<TypeId>,
    root: &TypeId,
) {
    let providers = index.lookup_struct_providers(target);
    match providers.len() {
        0 => resolve_leaf(target, index, plan, in_progress, memo, root),
        1 => resolve_provider(target, &providers[0], index, plan, in_progress, memo, root),
        _ => {
            plan.nodes.insert(
                target.clone(),
                PlanNode::Skipped {
                    produced_type: target.clone(),
                    reason: format!("multiple providers: {}", join_providers(&providers)),
                },
            );
        }
    }
}

fn resolve_interface(
    target: &TypeId,
    index: &Index,
    plan: &mut Plan,
    in_progress: &mut FxHashSet<TypeId>,
    memo: &mut FxHashSet<TypeId>,
    root: &TypeId,
) {
    let providers = index.lookup_interface_providers(target);
    match providers.len() {
        0 => {
            plan.nodes.insert(
                target.clone(),
                PlanNode::Skipped {
                    produced_type: target.clone(),
                    reason: "no provider for interface".to_string(),
                },
            );
        }
        1 => resolve_provider(target, &providers[0], index, plan, in_progress, memo, root),
        _ => {
            plan.nodes.insert(
                target.clone(),
                PlanNode::Skipped {
                    produced_type: target.clone(),
                    reason: format!("multiple providers: {}", join_providers(&providers)),
                },
            );
        }
    }
}

/// Emit a `Resolved` node for `target` via its single `provider`, then
/// recurse into the provider's non-builtin, non-unsupported parameters in
/// declaration order.
fn resolve_provider(
    target: &TypeId,
    provider_id: &ProviderId,
    index: &Index,
    plan: &mut Plan,
    in_progress: &mut FxHashSet<TypeId>,
    memo: &mut FxHashSet<TypeId>,
    root: &TypeId,
) {
    let provider = index
        .provider(provider_id)
        .expect("provider id came from the index's own lookup tables");
    let mut param_edges = Vec::with_capacity(provider.parameters.len());
    for param in &provider.parameters {
        if let TypeRef::Named { id, .. } = &param.type_ref {
            visit(id, root, index, plan, in_progress, memo);
            param_edges.push(id.clone());
        }
    }
    plan.nodes.insert(
        target.clone(),
        PlanNode::Resolved {
            produced_type: target.clone(),
            provider: provider_id.clone(),
            param_edges,
        },
    );
}

fn join_providers(providers: &[ProviderId]) -> String {
    providers
        .iter()
        .map(ProviderId::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Unsupported-typed fields have no `TypeId` of their own to key a plan
/// node by — synthesize one scoped to the owning struct so the Skipped
/// node still has a stable, unique identity in `plan.nodes`.
fn record_unsupported_field(owner: &TypeId, field: &Field, plan: &mut Plan) {
    let synthetic = TypeId::new(owner.package.clone(), format!("{}#{}", owner.name, field.name));
    plan.nodes.insert(
        synthetic.clone(),
        PlanNode::Skipped {
            produced_type: synthetic,
            reason: "unsupported field type".to_string(),
        },
    );
}
