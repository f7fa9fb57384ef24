//! The YAML/JSON Reporter (spec.md §4.F, **added**: JSON sibling).
//!
//! Both formats walk the same `ReportNode` tree and differ only in the
//! serializer invoked at the end, so the two wire formats cannot drift
//! from each other.

use serde::Serialize;

use wiregen_common::{Plan, PlanNode, Provider, TypeId, TypeRef};
use wiregen_index::Index;
use wiregen_validate::Diagnostic;

/// One provider qualified name + its declaring package, per spec.md §4.F.
#[derive(Clone, Debug, Serialize)]
pub struct InitFunction {
    pub name: String,
    pub package_path: String,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Struct,
    Interface,
    Builtin,
}

/// A single entry of the report tree. Root entries and field entries
/// share this shape; a field entry additionally carries `field_name`,
/// `type`, and `node_type` (spec.md §4.F: "field_node is the same shape
/// plus ..."). Empty lists, `false`, and empty strings are omitted.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ReportNode {
    pub struct_name: String,
    pub package_path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub init_functions: Vec<InitFunction>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<ReportNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<ReportNode>,
    #[serde(skip_serializing_if = "is_false")]
    pub skipped: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub skip_reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    pub type_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_type: Option<NodeType>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// The report's top-level shape: one entry per analyzed root.
#[derive(Clone, Debug, Default, Serialize)]
pub struct Report {
    pub root: Vec<ReportNode>,
}

/// Build the report for every `(plan, diagnostic)` pair produced by one
/// orchestrator run.
pub fn build_report(runs: &[(Plan, Diagnostic)], index: &Index) -> Report {
    Report {
        root: runs
            .iter()
            .map(|(plan, diagnostic)| build_root_node(plan, diagnostic, index))
            .collect(),
    }
}

fn build_root_node(plan: &Plan, diagnostic: &Diagnostic, index: &Index) -> ReportNode {
    node_for(&plan.root, plan, diagnostic, index)
}

fn node_for(type_id: &TypeId, plan: &Plan, diagnostic: &Diagnostic, index: &Index) -> ReportNode {
    let mut node = ReportNode {
        struct_name: type_id.name.clone(),
        package_path: type_id.package.as_str().to_string(),
        ..ReportNode::default()
    };

    match plan.nodes.get(type_id) {
        Some(PlanNode::Resolved { provider, param_edges, .. }) => {
            let Some(provider_record) = index.provider(provider) else {
                return node;
            };
            node.init_functions.push(init_function(provider_record));
            // `param_edges` only records the provider's Named parameters,
            // in declaration order (see wiregen_analyze::plan::resolve_provider),
            // so zipping it against the same filter over `parameters` pairs
            // each edge back up with the parameter it came from.
            let named_params = provider_record
                .parameters
                .iter()
                .filter(|param| matches!(param.type_ref, TypeRef::Named { .. }));
            node.dependencies = param_edges
                .iter()
                .zip(named_params)
                .map(|(edge, param)| field_node_for_dependency(edge, param, plan, diagnostic, index))
                .collect();
        }
        Some(PlanNode::Leaf { .. }) => {
            node.fields = fields_of(type_id, plan, diagnostic, index);
        }
        Some(PlanNode::Skipped { reason, .. }) => {
            node.skipped = true;
            node.skip_reason = reason.clone();
        }
        None => {
            node.skipped = true;
            node.skip_reason = "not present in plan".to_string();
        }
    }

    node
}

/// A `Resolved` node's dependency entry: the same shape as `node_for`
/// plus `field_name`/`type`/`node_type` for the parameter it satisfies
/// (spec.md §4.F: a `field_node` is "the same shape plus ..."), mirroring
/// what `field_node` does for struct fields below.
fn field_node_for_dependency(
    edge: &TypeId,
    param: &wiregen_common::ParamSpec,
    plan: &Plan,
    diagnostic: &Diagnostic,
    index: &Index,
) -> ReportNode {
    let mut node = node_for(edge, plan, diagnostic, index);
    node.field_name = Some(param.name.clone());
    node.type_name = Some(edge.name.clone());
    if let TypeRef::Named { kind, .. } = &param.type_ref {
        node.node_type = Some(match kind {
            wiregen_common::NamedKind::Struct => NodeType::Struct,
            wiregen_common::NamedKind::Interface => NodeType::Interface,
        });
    }
    node
}

fn fields_of(type_id: &TypeId, plan: &Plan, diagnostic: &Diagnostic, index: &Index) -> Vec<ReportNode> {
    let Some(strukt) = index.lookup_struct(type_id) else {
        return Vec::new();
    };
    strukt
        .fields
        .iter()
        .map(|field| field_node(type_id, field, plan, diagnostic, index))
        .collect()
}

fn field_node(
    owner: &TypeId,
    field: &wiregen_common::Field,
    plan: &Plan,
    diagnostic: &Diagnostic,
    index: &Index,
) -> ReportNode {
    match &field.type_ref {
        TypeRef::Named { id, kind } => {
            let mut node = node_for(id, plan, diagnostic, index);
            node.field_name = Some(field.name.clone());
            node.type_name = Some(id.name.clone());
            node.node_type = Some(match kind {
                wiregen_common::NamedKind::Struct => NodeType::Struct,
                wiregen_common::NamedKind::Interface => NodeType::Interface,
            });
            node
        }
        TypeRef::Builtin { name } => ReportNode {
            struct_name: owner.name.clone(),
            package_path: owner.package.as_str().to_string(),
            field_name: Some(field.name.clone()),
            type_name: Some(name.clone()),
            node_type: Some(NodeType::Builtin),
            ..ReportNode::default()
        },
        TypeRef::Unsupported => {
            let reason = diagnostic
                .skipped
                .iter()
                .find(|offense| offense.type_id.name == format!("{}#{}", owner.name, field.name))
                .map(|offense| offense.reason.clone())
                .unwrap_or_else(|| "unsupported field type".to_string());
            ReportNode {
                struct_name: owner.name.clone(),
                package_path: owner.package.as_str().to_string(),
                field_name: Some(field.name.clone()),
                skipped: true,
                skip_reason: reason,
                ..ReportNode::default()
            }
        }
    }
}

fn init_function(provider: &Provider) -> InitFunction {
    InitFunction {
        name: provider.id.qualified_name(),
        package_path: provider.id.package.as_str().to_string(),
    }
}

/// Serialize per spec.md §4.F: UTF-8, LF line endings, two-space indent.
/// `serde_yaml` already emits two-space indentation and LF by default.
pub fn to_yaml(report: &Report) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(report)
}

pub fn to_json(report: &Report) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
