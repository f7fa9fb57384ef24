//! The `TypeUniverse` façade (spec.md §4.A, §6.1): a thin read-only view
//! over the host language's own parser and type checker.
//!
//! The core analyzer never parses source itself — it only calls through
//! this trait. That keeps the interesting graph algorithms (symbol
//! indexing, dependency resolution, plan validation) testable against a
//! hand-rolled fake instead of a real compiler front end.

pub mod fake;

use std::path::Path;

use wiregen_common::{Field, ParamSpec, PackagePath, TypeId, TypeRef, WireError};

pub use fake::FakeUniverse;

/// A function signature as the façade reports it: parameters in
/// declaration order, and a result list already classified into
/// `TypeRef`s with pointer-stripping and alias resolution applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionSig {
    pub id: wiregen_common::ProviderId,
    pub parameters: Vec<ParamSpec>,
    /// Each result paired with whether it is the conventional error type.
    pub results: Vec<(TypeRef, bool)>,
}

/// The underlying shape of a named type, as reported by `iterNamedTypes`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Underlying {
    Struct(Vec<Field>),
    Interface,
}

/// One named type declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedTypeDecl {
    pub id: TypeId,
    pub underlying: Underlying,
}

/// Pure query surface over a loaded module. Every operation is a pure
/// total function except `load_module`, which does I/O and may fail.
pub trait TypeUniverse {
    /// Opaque handle to the set of packages reachable from a directory,
    /// returned by `load_module` and threaded through the other queries.
    type PackageSet;

    /// Parse and type-check every package reachable from `dir`. Packages
    /// containing type errors are dropped with a warning, not a failure —
    /// this only fails if nothing loads at all.
    fn load_module(&self, dir: &Path) -> Result<Self::PackageSet, WireError>;

    /// A syntax-only package-clause read of `file` (spec.md §4.C's "parse
    /// the supplied file"), used to name the package the generated file
    /// belongs to without re-running the full type checker.
    fn package_of_file(&self, file: &Path) -> Result<PackagePath, WireError>;

    /// A syntax-only read of every top-level struct declared in `file`
    /// itself (spec.md §4.C: "every top-level struct declaration" in the
    /// *supplied file*, not its whole package) — mirrors the original
    /// tool's single-file AST walk (`ParseWireFileStructs`) rather than
    /// scanning every file in the package.
    fn structs_in_file(&self, file: &Path) -> Result<Vec<TypeId>, WireError>;

    /// Every top-level function in the package set, already classified
    /// into a `FunctionSig`.
    fn iter_functions(&self, packages: &Self::PackageSet) -> Vec<FunctionSig>;

    /// Every named struct/interface declaration in the package set.
    fn iter_named_types(&self, packages: &Self::PackageSet) -> Vec<NamedTypeDecl>;

    /// True iff `struct_id`'s method set (value- and/or pointer-receiver,
    /// per whatever the façade implementation decides — spec.md §9 Open
    /// Questions) is a superset of `iface_id`'s.
    fn implements(&self, struct_id: &TypeId, iface_id: &TypeId) -> bool;

    /// Declared fields of a struct, in declaration order.
    fn fields(&self, struct_id: &TypeId) -> Vec<Field>;

    /// Short identifier used in generated qualified names.
    fn package_name_of(&self, package: &PackagePath) -> String;
}
