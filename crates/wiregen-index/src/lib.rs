//! The Symbol Index (spec.md §4.B): two lookup tables built in one pass
//! over every top-level declaration in every loaded package.

use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::warn;

use wiregen_common::{Interface, NamedKind, PackagePath, Provider, ProviderId, Struct, TypeId, TypeRef, WireError};
use wiregen_facade::{TypeUniverse, Underlying};

/// `providersByStructType`, `providersByInterfaceType`, and
/// `structsByName` from spec.md §4.B, plus the provider records
/// themselves keyed by `ProviderId` so callers don't need to re-derive a
/// `Provider` from a `FunctionSig`.
#[derive(Default, Debug)]
pub struct Index {
    providers_by_struct_type: FxHashMap<TypeId, FxHashSet<ProviderId>>,
    providers_by_interface_type: FxHashMap<TypeId, FxHashSet<ProviderId>>,
    structs_by_name: FxHashMap<TypeId, Struct>,
    providers_by_id: FxHashMap<ProviderId, Provider>,
    interfaces: FxHashMap<TypeId, Interface>,
}

impl Index {
    /// Providers whose produced type is the struct `id`, sorted by
    /// `ProviderId` so callers that feed this into emitted output stay
    /// deterministic without re-sorting themselves.
    pub fn lookup_struct_providers(&self, id: &TypeId) -> Vec<ProviderId> {
        sorted(self.providers_by_struct_type.get(id))
    }

    /// Providers whose produced type implements interface `id`, sorted.
    pub fn lookup_interface_providers(&self, id: &TypeId) -> Vec<ProviderId> {
        sorted(self.providers_by_interface_type.get(id))
    }

    pub fn lookup_struct(&self, id: &TypeId) -> Option<&Struct> {
        self.structs_by_name.get(id)
    }

    pub fn provider(&self, id: &ProviderId) -> Option<&Provider> {
        self.providers_by_id.get(id)
    }

    pub fn is_interface(&self, id: &TypeId) -> bool {
        self.interfaces.contains_key(id)
    }

    pub fn is_struct(&self, id: &TypeId) -> bool {
        self.structs_by_name.contains_key(id)
    }
}

fn sorted(set: Option<&FxHashSet<ProviderId>>) -> Vec<ProviderId> {
    let mut ids: Vec<ProviderId> = set.map(|s| s.iter().cloned().collect()).unwrap_or_default();
    ids.sort();
    ids
}

/// Build the symbol index by walking every top-level declaration in
/// every package reachable from `root` (spec.md §4.B algorithm).
pub fn index_module<U: TypeUniverse>(universe: &U, root: &Path) -> Result<Index, WireError> {
    let packages = universe.load_module(root)?;
    let mut index = Index::default();

    for decl in universe.iter_named_types(&packages) {
        match decl.underlying {
            Underlying::Struct(fields) => {
                index
                    .structs_by_name
                    .insert(decl.id.clone(), Struct { id: decl.id, fields });
            }
            Underlying::Interface => {
                index
                    .interfaces
                    .insert(decl.id.clone(), Interface { id: decl.id });
            }
        }
    }

    for sig in universe.iter_functions(&packages) {
        let Some(produced) = wiregen_common::types::choose_produced_type(&sig.results) else {
            continue;
        };
        let provider = Provider {
            id: sig.id.clone(),
            parameters: sig.parameters.clone(),
            produces: produced.clone(),
        };
        match &produced {
            TypeRef::Named { id, kind: NamedKind::Struct } => {
                index
                    .providers_by_struct_type
                    .entry(id.clone())
                    .or_default()
                    .insert(sig.id.clone());
            }
            TypeRef::Named { id, kind: NamedKind::Interface } => {
                index
                    .providers_by_interface_type
                    .entry(id.clone())
                    .or_default()
                    .insert(sig.id.clone());
            }
            TypeRef::Builtin { .. } | TypeRef::Unsupported => {
                // choose_produced_type only ever returns a Named ref; this
                // arm exists so the match stays exhaustive.
                continue;
            }
        }
        index.providers_by_id.insert(sig.id.clone(), provider);
    }

    // Step 4: every struct-producing provider whose produced struct is
    // assignable to some indexed interface also counts as a provider of
    // that interface.
    let struct_providers: Vec<(TypeId, ProviderId)> = index
        .providers_by_struct_type
        .iter()
        .flat_map(|(struct_id, providers)| {
            providers
                .iter()
                .map(move |p| (struct_id.clone(), p.clone()))
        })
        .collect();
    let interface_ids: Vec<TypeId> = index.interfaces.keys().cloned().collect();
    for iface_id in interface_ids {
        for (struct_id, provider_id) in &struct_providers {
            if universe.implements(struct_id, &iface_id) {
                index
                    .providers_by_interface_type
                    .entry(iface_id.clone())
                    .or_default()
                    .insert(provider_id.clone());
            }
        }
    }

    Ok(index)
}

/// Warn (but don't fail) when the façade reports that a package was
/// dropped for failing to type-check — spec.md §4.B "Failure model".
pub fn warn_dropped_package(package: &PackagePath, reason: &str) {
    warn!(package = %package, reason, "package dropped: failed to type-check");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use wiregen_common::{Field, NamedKind, ParamSpec};
    use wiregen_facade::{FakeUniverse, FunctionSig};

    fn named(package: &str, name: &str, kind: NamedKind) -> TypeRef {
        TypeRef::Named {
            id: TypeId::new(package, name),
            kind,
        }
    }

    #[test]
    fn indexes_struct_provider_by_produced_type() {
        let h = TypeId::new("h", "H");
        let universe = FakeUniverse::new().with_struct(h.clone(), vec![]).with_function(FunctionSig {
            id: ProviderId::new("h", "NewH"),
            parameters: vec![],
            results: vec![(named("h", "H", NamedKind::Struct), false)],
        });

        let index = index_module(&universe, &PathBuf::from(".")).unwrap();
        assert_eq!(index.lookup_struct_providers(&h), vec![ProviderId::new("h", "NewH")]);
    }

    #[test]
    fn struct_provider_also_counts_for_assignable_interface() {
        let s_iface = TypeId::new("s", "S");
        let s_impl = TypeId::new("s", "SImpl");
        let universe = FakeUniverse::new()
            .with_interface(s_iface.clone())
            .with_struct(s_impl.clone(), vec![])
            .with_implements(s_impl.clone(), s_iface.clone())
            .with_function(FunctionSig {
                id: ProviderId::new("s", "NewS"),
                parameters: vec![],
                results: vec![(named("s", "SImpl", NamedKind::Struct), false)],
            });

        let index = index_module(&universe, &PathBuf::from(".")).unwrap();
        assert_eq!(
            index.lookup_interface_providers(&s_iface),
            vec![ProviderId::new("s", "NewS")]
        );
    }

    #[test]
    fn detects_ambiguous_interface_providers() {
        let svc = TypeId::new("svc", "Svc");
        let universe = FakeUniverse::new()
            .with_interface(svc.clone())
            .with_function(FunctionSig {
                id: ProviderId::new("svc", "NewSvc"),
                parameters: vec![],
                results: vec![(named("svc", "Svc", NamedKind::Interface), false)],
            })
            .with_function(FunctionSig {
                id: ProviderId::new("svc", "NewAltSvc"),
                parameters: vec![],
                results: vec![(named("svc", "Svc", NamedKind::Interface), false)],
            });

        let index = index_module(&universe, &PathBuf::from(".")).unwrap();
        assert_eq!(index.lookup_interface_providers(&svc).len(), 2);
    }

    #[test]
    fn functions_with_no_qualifying_result_are_not_providers() {
        let universe = FakeUniverse::new().with_function(FunctionSig {
            id: ProviderId::new("p", "DoThing"),
            parameters: vec![ParamSpec {
                name: "x".into(),
                type_ref: TypeRef::Builtin { name: "int".into() },
            }],
            results: vec![(TypeRef::Unsupported, false)],
        });

        let index = index_module(&universe, &PathBuf::from(".")).unwrap();
        assert!(index.provider(&ProviderId::new("p", "DoThing")).is_none());
    }

    #[test]
    fn lookup_struct_returns_declared_fields() {
        let h = TypeId::new("h", "H");
        let field = Field {
            name: "dsn".into(),
            type_ref: TypeRef::Builtin { name: "string".into() },
            pointer: false,
        };
        let universe = FakeUniverse::new().with_struct(h.clone(), vec![field.clone()]);
        let index = index_module(&universe, &PathBuf::from(".")).unwrap();
        assert_eq!(index.lookup_struct(&h).unwrap().fields, vec![field]);
    }
}
