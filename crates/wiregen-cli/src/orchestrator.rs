//! The Orchestrator (spec.md §4.H): the single entry point gluing root
//! discovery, the analyzer, the validator, the reporter, and the emitter
//! together for one input file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, info_span};

use wiregen_analyze::{analyze, discover_roots};
use wiregen_common::WireError;
use wiregen_emit::{emit, PassthroughPrinter};
use wiregen_facade::TypeUniverse;
use wiregen_index::index_module;
use wiregen_report::{build_report, to_json, to_yaml};
use wiregen_validate::{validate, Diagnostic};

pub use crate::args::ReportFormat;

pub struct RunInput<'a> {
    pub input_path: &'a Path,
    /// `Some` requests a report even on success; a validation failure
    /// always writes one regardless of this field (spec.md §6.2).
    pub emit_report: Option<ReportFormat>,
}

/// What one orchestrator invocation produced.
#[derive(Debug, Default)]
pub struct RunOutcome {
    pub succeeded: bool,
    pub output_path: Option<PathBuf>,
    pub report_path: Option<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

/// `run({ inputPath, emitReport })`, per spec.md §4.H steps 1-6.
pub fn run<U: TypeUniverse>(universe: &U, input: RunInput) -> Result<RunOutcome> {
    let _span = info_span!("orchestrator::run", file = %input.input_path.display()).entered();

    // Step 1: resolve package, load module, build the index.
    let module_dir = input.input_path.parent().unwrap_or_else(|| Path::new("."));
    let index = index_module(universe, module_dir).context("failed to build symbol index")?;
    let package_name = universe.package_name_of(&universe.package_of_file(input.input_path)?);

    // Step 2: discover roots.
    let roots = discover_roots(universe, &index, input.input_path)?;
    info!(count = roots.len(), "discovered roots");

    // Step 3: analyze + validate every root, continuing past a missing root.
    let mut plans = Vec::with_capacity(roots.len());
    let mut diagnostics = Vec::with_capacity(roots.len());
    for root in &roots {
        match analyze(root, &index) {
            Ok(plan) => {
                diagnostics.push(validate(&plan, &index));
                plans.push(plan);
            }
            Err(WireError::RootNotFound { root }) => {
                diagnostics.push(Diagnostic {
                    root: Some(root.clone()),
                    skipped: vec![wiregen_validate::Offense {
                        type_id: root,
                        reason: "root not found in index".to_string(),
                    }],
                    ..Diagnostic::default()
                });
            }
            Err(other) => return Err(other.into()),
        }
    }

    let any_unsatisfiable = diagnostics.iter().any(|d| !d.is_satisfiable());

    // Step 4: write the report if requested, or unconditionally on failure.
    let mut report_path = None;
    if input.emit_report.is_some() || any_unsatisfiable {
        let format = input.emit_report.unwrap_or(ReportFormat::Yaml);
        let report = build_report(&plans.iter().cloned().zip(diagnostics.iter().cloned()).collect::<Vec<_>>(), &index);
        let (contents, extension) = match format {
            ReportFormat::Yaml => (to_yaml(&report).expect("ReportNode always serializes"), "yaml"),
            ReportFormat::Json => (to_json(&report).expect("ReportNode always serializes"), "json"),
        };
        let path = module_dir.join(format!("wire_report.{extension}"));
        std::fs::write(&path, contents).map_err(|err| WireError::WriteFailure {
            path: path.clone(),
            message: err.to_string(),
        })?;
        report_path = Some(path);
    }

    // Step 5: any failing root blocks emission for the whole invocation.
    if any_unsatisfiable {
        return Ok(RunOutcome {
            succeeded: false,
            output_path: None,
            report_path,
            diagnostics,
        });
    }

    // Step 6: emit the generated file.
    let output_path = emit(&plans, &package_name, input.input_path, &PassthroughPrinter)?;

    Ok(RunOutcome {
        succeeded: true,
        output_path: Some(output_path),
        report_path,
        diagnostics,
    })
}
