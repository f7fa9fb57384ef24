//! The resolved dependency graph for one root (spec.md §3, "Plan").

use indexmap::IndexMap;
use serde::Serialize;

use crate::ids::{ProviderId, TypeId};

/// One node of a `Plan`.
///
/// A closed, tagged-variant set — spec.md §9 calls for exhaustive
/// visitors over these cases rather than open inheritance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "node")]
pub enum PlanNode {
    /// `target` is produced by exactly one provider.
    Resolved {
        produced_type: TypeId,
        provider: ProviderId,
        param_edges: Vec<TypeId>,
    },
    /// `target` is satisfied entirely by field-wise construction: the
    /// root itself, or any struct with zero providers that the target
    /// framework can build by tag injection.
    Leaf { produced_type: TypeId },
    /// Resolution could not proceed: unsupported type, missing provider,
    /// ambiguity, or a cycle.
    Skipped { produced_type: TypeId, reason: String },
}

impl PlanNode {
    pub fn produced_type(&self) -> &TypeId {
        match self {
            PlanNode::Resolved { produced_type, .. }
            | PlanNode::Leaf { produced_type }
            | PlanNode::Skipped { produced_type, .. } => produced_type,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, PlanNode::Skipped { .. })
    }
}

/// The output of the dependency analyzer for one root.
///
/// `nodes` is an insertion-ordered map: insertion order is the order the
/// depth-first search first *entered* each type, which is also the
/// deterministic order used for emission (spec.md §3 invariant 5).
#[derive(Clone, Debug, Serialize)]
pub struct Plan {
    pub root: TypeId,
    pub nodes: IndexMap<TypeId, PlanNode>,
}

impl Plan {
    pub fn new(root: TypeId) -> Self {
        Self {
            root,
            nodes: IndexMap::new(),
        }
    }

    /// Discovery-order iterator over the plan's nodes, the order used by
    /// everything downstream of the analyzer.
    pub fn order(&self) -> impl Iterator<Item = &TypeId> {
        self.nodes.keys()
    }

    pub fn root_node(&self) -> Option<&PlanNode> {
        self.nodes.get(&self.root)
    }

    pub fn resolved_nodes(&self) -> impl Iterator<Item = (&TypeId, &ProviderId, &[TypeId])> {
        self.nodes.values().filter_map(|node| match node {
            PlanNode::Resolved {
                produced_type,
                provider,
                param_edges,
            } => Some((produced_type, provider, param_edges.as_slice())),
            _ => None,
        })
    }

    pub fn skipped_nodes(&self) -> impl Iterator<Item = &PlanNode> {
        self.nodes.values().filter(|node| node.is_skipped())
    }
}
