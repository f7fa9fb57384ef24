//! Root Discovery (spec.md §4.C).
//!
//! Lists every top-level struct declaration in the *supplied file* as a
//! candidate root — not its whole package, which may have other files
//! declaring unrelated structs. A non-struct type declaration (alias,
//! interface) is ignored, not an error; zero struct declarations is a
//! fatal `NoRoots`.

use std::path::Path;

use wiregen_common::{TypeId, WireError};
use wiregen_facade::TypeUniverse;
use wiregen_index::Index;

pub fn discover_roots<U: TypeUniverse>(
    universe: &U,
    index: &Index,
    file: &Path,
) -> Result<Vec<TypeId>, WireError> {
    let mut roots: Vec<TypeId> = universe
        .structs_in_file(file)?
        .into_iter()
        .filter(|id| index.is_struct(id))
        .collect();
    roots.sort();
    if roots.is_empty() {
        return Err(WireError::NoRoots);
    }
    Ok(roots)
}
