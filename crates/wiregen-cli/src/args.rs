//! CLI arguments (spec.md §6.2): one `generate` subcommand, doc comments
//! become `--help` text (the teacher's `CliArgs` convention).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "wiregen", version, about = "Compile-time dependency-injection code generator")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze one input file's root structs and emit a generated wiring file.
    Generate(GenerateArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Path to an input source file containing one or more root struct
    /// declarations. Expected to be gated by a build tag so its contents
    /// are invisible to normal compilation.
    #[arg(long)]
    pub file: PathBuf,

    /// Also write a dependency-tree report in JSON, alongside the
    /// generated file. Mutually exclusive with `--yaml`. The report is
    /// written unconditionally on validation failure regardless of this
    /// flag.
    #[arg(long, conflicts_with = "yaml")]
    pub json: bool,

    /// Also write a dependency-tree report in YAML, alongside the
    /// generated file. Mutually exclusive with `--json`.
    #[arg(long, conflicts_with = "json")]
    pub yaml: bool,
}

impl GenerateArgs {
    pub fn report_format(&self) -> Option<ReportFormat> {
        if self.json {
            Some(ReportFormat::Json)
        } else if self.yaml {
            Some(ReportFormat::Yaml)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ReportFormat {
    Yaml,
    Json,
}
