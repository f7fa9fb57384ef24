//! `wiregen generate --file <path> [--json|--yaml]` (spec.md §6.2).
//!
//! The binary owns process concerns only: argument parsing, tracing
//! initialization, and exit-code mapping. Everything else lives in
//! `wiregen_cli::orchestrator`, which is generic over `TypeUniverse` and
//! has no knowledge of the process it runs in.
//!
//! This binary is wired to `UnavailableUniverse`, a façade stub: the
//! host language's real parser/type-checker is out of scope for this
//! design (spec.md §1) and must be supplied by whoever integrates
//! `wiregen` with a specific language front end. Swap it for a real
//! `TypeUniverse` implementation to make `generate` actually load files.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use wiregen_cli::args::Command;
use wiregen_cli::{run, CliArgs, RunInput};
use wiregen_common::{tracing_setup, Field, PackagePath, TypeId, WireError};
use wiregen_facade::{FunctionSig, NamedTypeDecl, TypeUniverse};

/// Stand-in `TypeUniverse` for the binary entry point; every operation
/// that can fail returns `LoadFailure` pointing at the missing
/// integration. Unit and integration tests exercise the orchestrator
/// against `wiregen_facade::FakeUniverse` instead.
struct UnavailableUniverse;

impl TypeUniverse for UnavailableUniverse {
    type PackageSet = ();

    fn load_module(&self, dir: &Path) -> Result<Self::PackageSet, WireError> {
        Err(WireError::LoadFailure {
            message: format!(
                "no TypeUniverse implementation is wired up for {} — plug in a language front end",
                dir.display()
            ),
        })
    }

    fn package_of_file(&self, file: &Path) -> Result<PackagePath, WireError> {
        Err(WireError::LoadFailure {
            message: format!("no TypeUniverse implementation is wired up for {}", file.display()),
        })
    }

    fn iter_functions(&self, _packages: &Self::PackageSet) -> Vec<FunctionSig> {
        Vec::new()
    }

    fn iter_named_types(&self, _packages: &Self::PackageSet) -> Vec<NamedTypeDecl> {
        Vec::new()
    }

    fn implements(&self, _struct_id: &TypeId, _iface_id: &TypeId) -> bool {
        false
    }

    fn fields(&self, _struct_id: &TypeId) -> Vec<Field> {
        Vec::new()
    }

    fn package_name_of(&self, package: &PackagePath) -> String {
        package.last_segment().to_string()
    }
}

fn main() -> ExitCode {
    tracing_setup::init_tracing();

    let args = CliArgs::parse();
    let Command::Generate(generate_args) = args.command;

    let universe = UnavailableUniverse;
    let outcome = run(
        &universe,
        RunInput {
            input_path: &generate_args.file,
            emit_report: generate_args.report_format(),
        },
    );

    match outcome {
        Ok(outcome) if outcome.succeeded => {
            if let Some(path) = &outcome.output_path {
                tracing::info!(path = %path.display(), "generated wire file");
            }
            ExitCode::from(0)
        }
        Ok(outcome) => {
            eprintln!("wiregen: dependency tree is not satisfiable:");
            for diagnostic in &outcome.diagnostics {
                for offense in diagnostic.skipped.iter().chain(&diagnostic.ambiguous).chain(&diagnostic.duplicates) {
                    eprintln!("  {}: {}", offense.type_id, offense.reason);
                }
            }
            if let Some(path) = &outcome.report_path {
                eprintln!("report written to {}", path.display());
            }
            ExitCode::from(1)
        }
        Err(err) => {
            eprintln!("wiregen: {err:#}");
            let exit_code = err.downcast_ref::<WireError>().map(WireError::exit_code).unwrap_or(2);
            ExitCode::from(exit_code as u8)
        }
    }
}
