//! Read-only index from type identities to their loaded definitions.
//!
//! Built once per client over every loaded dictionary and shared by reference
//! across searches (and across workers under a parallel scan). Resolution is
//! a map lookup, never a graph traversal.

use rustc_hash::FxHashMap;
use sigfind_model::{
    ApiDictionary, FullTypeDefinition, Identity, LowType, TypeAbbreviationDefinition,
};

#[derive(Debug, Default)]
pub struct TypeIndex {
    definitions: Vec<FullTypeDefinition>,
    abbreviations: Vec<TypeAbbreviationDefinition>,
    /// Keyed by (lower-cased innermost display name, generic arity).
    by_inner_name: FxHashMap<(String, usize), Vec<usize>>,
}

impl TypeIndex {
    pub fn build(dictionaries: &[ApiDictionary]) -> TypeIndex {
        let mut index = TypeIndex::default();
        for dictionary in dictionaries {
            for definition in &dictionary.type_definitions {
                let Some(inner) = definition.name.first() else {
                    continue;
                };
                let key = (
                    inner.part.display().to_ascii_lowercase(),
                    definition.generic_parameters.len(),
                );
                index.by_inner_name.entry(key).or_default().push(index.definitions.len());
                index.definitions.push(definition.clone());
            }
            index
                .abbreviations
                .extend(dictionary.type_abbreviations.iter().cloned());
        }
        index
    }

    /// Resolve a type reference to its definition, honoring the tail-wildcard
    /// semantics of partial identities.
    pub fn resolve(&self, identity: &Identity, ignore_case: bool) -> Option<&FullTypeDefinition> {
        let items = identity.name_items()?;
        let inner = items.first()?;
        let key = (
            inner.part.display().to_ascii_lowercase(),
            identity.generic_parameter_count(),
        );
        let candidates = self.by_inner_name.get(&key)?;
        candidates.iter().map(|&i| &self.definitions[i]).find(|definition| {
            if items.len() > definition.name.len() {
                return false;
            }
            items.iter().zip(definition.name.iter()).all(|(a, b)| {
                let (x, y) = (a.part.display(), b.part.display());
                if ignore_case {
                    x.eq_ignore_ascii_case(y)
                } else {
                    x == y
                }
            })
        })
    }

    /// Resolve the nominal head of a low type: an identity directly, or the
    /// constructor of an applied generic.
    pub fn resolve_low_type(&self, t: &LowType, ignore_case: bool) -> Option<&FullTypeDefinition> {
        match t {
            LowType::Identity(identity) => self.resolve(identity, ignore_case),
            LowType::Generic(constructor, arguments) => match constructor.as_ref() {
                LowType::Identity(identity) => {
                    // The constructor position may carry arity 0 when it was
                    // written bare; fall back to the argument count.
                    self.resolve(identity, ignore_case).or_else(|| {
                        let adjusted = match identity {
                            Identity::Partial(partial) => {
                                let mut partial = partial.clone();
                                partial.generic_parameter_count = arguments.len();
                                Identity::Partial(partial)
                            }
                            full @ Identity::Full(_) => full.clone(),
                        };
                        self.resolve(&adjusted, ignore_case)
                    })
                }
                _ => None,
            },
            LowType::TypeAbbreviation { original, .. } => {
                self.resolve_low_type(original, ignore_case)
            }
            _ => None,
        }
    }

    pub fn abbreviations(&self) -> &[TypeAbbreviationDefinition] {
        &self.abbreviations
    }
}
