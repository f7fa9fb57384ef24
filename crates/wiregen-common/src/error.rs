//! The error taxonomy surfaced to the user (spec.md §7).
//!
//! Per-node problems during analysis are never raised as errors — they are
//! recorded as `Skipped` plan nodes (see `plan::PlanNode`) and only reach
//! this taxonomy once the validator classifies a plan as unsatisfiable.

use std::fmt;
use std::path::PathBuf;

use crate::ids::{ProviderId, TypeId};

/// A taxonomy of failures a `wiregen` run can report, independent of how
/// they are packaged for the CLI's exit code (see `exit_code`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// The module does not parse/type-check at all, or the input file is
    /// missing. Fatal: the whole invocation aborts.
    LoadFailure { message: String },
    /// The input file contains zero struct declarations.
    NoRoots,
    /// The orchestrator asked the index for a root `TypeId` that isn't
    /// present. Fatal for that root; other roots continue.
    RootNotFound { root: TypeId },
    /// A required `TypeId` has zero providers.
    UnresolvedDependency { type_id: TypeId },
    /// A required `TypeId` has two or more providers.
    AmbiguousProvider {
        type_id: TypeId,
        providers: Vec<ProviderId>,
    },
    /// A field's type is a slice/map/channel/function/generic.
    UnsupportedType { type_id: TypeId, field_name: String },
    /// The DFS re-entered a `TypeId` that is still in progress.
    Cycle { type_id: TypeId },
    /// Writing the generated file or the diagnostic report failed.
    WriteFailure { path: PathBuf, message: String },
}

impl WireError {
    /// Exit code per spec.md §6.2: `0` success, `1` validation failure,
    /// `2` I/O or load failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            WireError::LoadFailure { .. } | WireError::WriteFailure { .. } => 2,
            _ => 1,
        }
    }
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::LoadFailure { message } => write!(f, "load failure: {message}"),
            WireError::NoRoots => write!(f, "input file contains zero struct declarations"),
            WireError::RootNotFound { root } => write!(f, "root not found in index: {root}"),
            WireError::UnresolvedDependency { type_id } => {
                write!(f, "no provider for {type_id}")
            }
            WireError::AmbiguousProvider { type_id, providers } => {
                let names: Vec<String> = providers.iter().map(ProviderId::to_string).collect();
                write!(
                    f,
                    "multiple providers for {type_id}: {}",
                    names.join(", ")
                )
            }
            WireError::UnsupportedType { type_id, field_name } => {
                write!(f, "unsupported type on field {field_name:?} of {type_id}")
            }
            WireError::Cycle { type_id } => write!(f, "cycle detected at {type_id}"),
            WireError::WriteFailure { path, message } => {
                write!(f, "failed to write {}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for WireError {}
