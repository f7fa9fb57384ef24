//! The Code Emitter (spec.md §4.G): renders a batch of satisfiable
//! `Plan`s into the target framework's generated source file.
//!
//! The literal template text is not the spec — the output data model and
//! the five rendering rules are. `render_source` below is one concrete
//! rendering of that model, grounded in the original tool's
//! `wire.go` template (package clause, import block, one function per
//! provider set).

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use wiregen_common::{PackagePath, Plan, PlanNode, WireError};

/// Fixed output filename established by the target framework, matching
/// the original tool's own convention.
const OUTPUT_FILE_NAME: &str = "wire.go";

/// One provider set: the providers a single root's plan resolved to, in
/// sorted (stable-diff) order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderSet {
    pub root_struct_name: String,
    pub providers: Vec<String>,
}

/// The emitter's output data model (spec.md §4.G) — not the template
/// text, the spec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmitModel {
    pub package_name: String,
    pub imports: Vec<PackagePath>,
    pub provider_sets: Vec<ProviderSet>,
}

/// Build the output model from every satisfiable plan in one orchestrator
/// run. Callers must only pass plans that validated (spec.md §4.H).
pub fn build_model(plans: &[Plan], package_name: &str) -> EmitModel {
    let mut imports: Vec<PackagePath> = Vec::new();
    let mut provider_sets = Vec::with_capacity(plans.len());

    for plan in plans {
        let mut providers = Vec::new();
        for node in plan.nodes.values() {
            if let PlanNode::Resolved { produced_type, provider, .. } = node {
                imports.push(produced_type.package.clone());
                imports.push(provider.package.clone());
                providers.push(provider.qualified_name());
            }
        }
        providers.sort();
        provider_sets.push(ProviderSet {
            root_struct_name: plan.root.name.clone(),
            providers,
        });
    }

    imports.sort();
    imports.dedup();

    EmitModel {
        package_name: package_name.to_string(),
        imports,
        provider_sets,
    }
}

/// Render `model` into source text (spec.md §4.G rendering rules 1-2;
/// rule 3's pretty-print step happens separately, see `PrettyPrinter`).
pub fn render_source(model: &EmitModel) -> String {
    let mut out = String::new();
    out.push_str(&format!("package {}\n\n", model.package_name));

    if !model.imports.is_empty() {
        out.push_str("import (\n");
        for import in &model.imports {
            out.push_str(&format!("\t\"{}\"\n", import.as_str()));
        }
        out.push_str(")\n\n");
    }

    for set in &model.provider_sets {
        out.push_str(&format!(
            "// Initialize{} wires up a {} using the providers discovered for it.\n",
            set.root_struct_name, set.root_struct_name
        ));
        out.push_str(&format!("func Initialize{}() (*{}, error) {{\n", set.root_struct_name, set.root_struct_name));
        for provider in &set.providers {
            out.push_str(&format!("\t_ = {}\n", provider));
        }
        out.push_str("\tpanic(\"wiregen: generated injector body omitted\")\n");
        out.push_str("}\n\n");
    }

    out
}

/// Failure of the host language's pretty printer (rendering rule 3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrettyPrintError(pub String);

impl fmt::Display for PrettyPrintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pretty-print failed: {}", self.0)
    }
}

impl std::error::Error for PrettyPrintError {}

/// Abstracts the target framework's own formatter (`go/format.Source` in
/// the original tool). Kept behind a trait since the concrete formatter
/// is, per spec.md §1, external to this design.
pub trait PrettyPrinter {
    fn format(&self, source: &str) -> Result<String, PrettyPrintError>;
}

/// The default printer: returns its input unchanged. A real integration
/// supplies a `PrettyPrinter` that shells out to the target language's
/// formatter.
pub struct PassthroughPrinter;

impl PrettyPrinter for PassthroughPrinter {
    fn format(&self, source: &str) -> Result<String, PrettyPrintError> {
        Ok(source.to_string())
    }
}

/// Render, pretty-print (falling back to the raw text on failure per
/// rule 3), and write to the fixed sibling path of `input_file`.
pub fn emit(
    plans: &[Plan],
    package_name: &str,
    input_file: &Path,
    printer: &dyn PrettyPrinter,
) -> Result<PathBuf, WireError> {
    let model = build_model(plans, package_name);
    let raw = render_source(&model);
    let formatted = printer.format(&raw).unwrap_or(raw);

    let output_path = input_file
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(OUTPUT_FILE_NAME);

    fs::write(&output_path, formatted).map_err(|err| WireError::WriteFailure {
        path: output_path.clone(),
        message: err.to_string(),
    })?;

    Ok(output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use wiregen_analyze::analyze;
    use wiregen_common::{Field, NamedKind, ProviderId, TypeId, TypeRef};
    use wiregen_facade::{FakeUniverse, FunctionSig};
    use wiregen_index::index_module;

    fn named(package: &str, name: &str, kind: NamedKind) -> TypeRef {
        TypeRef::Named {
            id: TypeId::new(package, name),
            kind,
        }
    }

    fn sample_plan() -> Plan {
        let root = TypeId::new("a", "Root");
        let h = TypeId::new("h", "H");
        let universe = FakeUniverse::new()
            .with_struct(root.clone(), vec![Field { name: "h".into(), type_ref: named("h", "H", NamedKind::Struct), pointer: false }])
            .with_struct(h, vec![])
            .with_function(FunctionSig {
                id: ProviderId::new("h", "NewH"),
                parameters: vec![],
                results: vec![(named("h", "H", NamedKind::Struct), false)],
            });
        let index = index_module(&universe, &PathBuf::from(".")).unwrap();
        analyze(&root, &index).unwrap()
    }

    #[test]
    fn model_sorts_and_dedups_providers_and_imports() {
        let plan = sample_plan();
        let model = build_model(&[plan], "app");
        assert_eq!(model.package_name, "app");
        assert_eq!(model.provider_sets.len(), 1);
        assert_eq!(model.provider_sets[0].root_struct_name, "Root");
        assert_eq!(model.provider_sets[0].providers, vec!["h.NewH".to_string()]);
        assert_eq!(model.imports, vec![PackagePath::new("h")]);
    }

    #[test]
    fn rendered_source_contains_package_clause_and_injector() {
        let plan = sample_plan();
        let model = build_model(&[plan], "app");
        let source = render_source(&model);
        assert!(source.starts_with("package app"));
        assert!(source.contains("func InitializeRoot()"));
        assert!(source.contains("h.NewH"));
    }

    #[test]
    fn emit_writes_sibling_file_with_fixed_name() {
        let dir = tempfile::tempdir().unwrap();
        let input_file = dir.path().join("root.go");
        fs::write(&input_file, "package app\n").unwrap();

        let plan = sample_plan();
        let output_path = emit(&[plan], "app", &input_file, &PassthroughPrinter).unwrap();

        assert_eq!(output_path, dir.path().join(OUTPUT_FILE_NAME));
        assert!(output_path.exists());
    }

    struct FailingPrinter;
    impl PrettyPrinter for FailingPrinter {
        fn format(&self, _source: &str) -> Result<String, PrettyPrintError> {
            Err(PrettyPrintError("simulated formatter crash".to_string()))
        }
    }

    #[test]
    fn pretty_print_failure_falls_back_to_raw_text() {
        let dir = tempfile::tempdir().unwrap();
        let input_file = dir.path().join("root.go");
        fs::write(&input_file, "package app\n").unwrap();

        let plan = sample_plan();
        let output_path = emit(&[plan], "app", &input_file, &FailingPrinter).unwrap();

        let written = fs::read_to_string(&output_path).unwrap();
        assert!(written.starts_with("package app"));
    }
}
