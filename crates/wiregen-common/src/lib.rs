//! Shared data model for `wiregen`, a compile-time dependency-injection
//! code generator.
//!
//! This crate provides the types every other `wiregen` crate builds on:
//! - Stable identities (`PackagePath`, `TypeId`, `ProviderId`)
//! - The provider/struct/interface data model (`TypeRef`, `Provider`, `Struct`)
//! - The resolved dependency graph (`Plan`, `PlanNode`)
//! - The error taxonomy (`WireError`)
//! - Tracing setup shared by the CLI binary

pub mod error;
pub mod ids;
pub mod plan;
pub mod tracing_setup;
pub mod types;

pub use error::WireError;
pub use ids::{PackagePath, ProviderId, TypeId};
pub use plan::{Plan, PlanNode};
pub use types::{Field, Interface, NamedKind, ParamSpec, Provider, Struct, TypeRef};
