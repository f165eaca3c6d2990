//! Inheritance Resolver
//!
//! Maps the declaration's base-type list onto a single `extends` slot and
//! its capabilities onto the `implements` list, in declaration order.
//! More than one base type is rejected with `MultipleBaseTypes`.
//!
//! Override markers follow the IR's flag. When an `AncestorIndex` is
//! available the resolver also looks for the flagged signature among the
//! known ancestors and records where it was found; a miss is logged and the
//! marker is kept.

use crate::transforms::ir::{ClassDecl, ClassMember, DesugaredType, OverrideSource};
use classport_common::ConvertError;
use classport_ir::{Signature, TypeDeclaration};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use tracing::{debug, trace};

#[derive(Debug, Default)]
struct KnownType {
    parents: Vec<String>,
    signatures: FxHashSet<Signature>,
}

/// Method and constructor signatures of types the caller knows about, plus
/// their declared parents. Used for best-effort override confirmation only.
#[derive(Debug, Default)]
pub struct AncestorIndex {
    types: FxHashMap<String, KnownType>,
}

impl AncestorIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_declarations<'d>(decls: impl IntoIterator<Item = &'d TypeDeclaration>) -> Self {
        let mut index = Self::new();
        for decl in decls {
            index.insert_declaration(decl);
        }
        index
    }

    pub fn insert_declaration(&mut self, decl: &TypeDeclaration) {
        let entry = self.types.entry(decl.name.clone()).or_default();
        entry.parents.extend(decl.base_types.iter().cloned());
        entry.parents.extend(decl.capabilities.iter().cloned());
        entry.signatures.extend(decl.signatures());
    }

    /// Record a signature for a type declared outside the current batch.
    pub fn insert_signature(&mut self, type_name: impl Into<String>, signature: Signature) {
        self.types
            .entry(type_name.into())
            .or_default()
            .signatures
            .insert(signature);
    }

    pub fn contains_type(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Breadth-first search over the given parents and their recorded
    /// parents. Returns the first ancestor declaring `signature`.
    pub fn find_declaring_ancestor<'a>(
        &'a self,
        parents: impl IntoIterator<Item = &'a str>,
        signature: &Signature,
    ) -> Option<&'a str> {
        let mut queue: VecDeque<&str> = parents.into_iter().collect();
        let mut seen: FxHashSet<&str> = FxHashSet::default();

        while let Some(name) = queue.pop_front() {
            if !seen.insert(name) {
                continue;
            }
            let Some(known) = self.types.get(name) else {
                continue;
            };
            if known.signatures.contains(signature) {
                return Some(name);
            }
            queue.extend(known.parents.iter().map(String::as_str));
        }
        None
    }
}

pub struct InheritanceResolver<'a> {
    ancestors: Option<&'a AncestorIndex>,
}

impl<'a> InheritanceResolver<'a> {
    pub const fn new(ancestors: Option<&'a AncestorIndex>) -> Self {
        Self { ancestors }
    }

    pub fn resolve(&self, desugared: DesugaredType) -> Result<ClassDecl, ConvertError> {
        let DesugaredType {
            name,
            access,
            special,
            scope,
            mut base_types,
            capabilities,
            mut members,
        } = desugared;

        if base_types.len() > 1 {
            return Err(ConvertError::MultipleBaseTypes {
                type_name: name,
                member: None,
                bases: base_types,
            });
        }
        let extends = base_types.pop();

        let parents: Vec<&str> = extends
            .iter()
            .chain(capabilities.iter())
            .map(String::as_str)
            .collect();

        for member in &mut members {
            let (signature, overrides) = match member {
                ClassMember::Method(method) => (&method.signature, &mut method.overrides),
                ClassMember::Constructor(ctor) => (&ctor.signature, &mut ctor.overrides),
                ClassMember::Field(_) => continue,
            };
            if overrides.is_none() {
                continue;
            }
            *overrides = Some(self.confirm(&name, &parents, signature));
        }

        Ok(ClassDecl {
            name,
            access,
            special,
            scope,
            extends,
            implements: capabilities,
            members,
        })
    }

    fn confirm(&self, type_name: &str, parents: &[&str], signature: &Signature) -> OverrideSource {
        let Some(index) = self.ancestors else {
            return OverrideSource::Declared;
        };
        match index.find_declaring_ancestor(parents.iter().copied(), signature) {
            Some(ancestor) => {
                trace!(type_name, %signature, ancestor, "override confirmed");
                OverrideSource::Confirmed {
                    ancestor: ancestor.to_string(),
                }
            }
            None => {
                debug!(
                    type_name,
                    %signature,
                    "no known ancestor declares overridden signature; keeping IR flag"
                );
                OverrideSource::Declared
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/inheritance.rs"]
mod tests;
