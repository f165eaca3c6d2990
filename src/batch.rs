//! Batch translation.
//!
//! Every declaration is translated on its own rayon worker. The only data
//! shared between workers is read-only: the profile, the ancestor index built
//! from the whole batch, and the batch's type names (each type may refer to
//! its siblings).

use classport_common::TranslateError;
use classport_emitter::{AncestorIndex, TargetProfile, TranslatedType, TypeTranslator};
use classport_ir::TypeDeclaration;
use rayon::prelude::*;
use tracing::{debug, warn};

/// Per-declaration results, in input order.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub results: Vec<Result<TranslatedType, TranslateError>>,
}

impl BatchOutcome {
    pub fn succeeded(&self) -> impl Iterator<Item = &TranslatedType> {
        self.results.iter().filter_map(|result| result.as_ref().ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &TranslateError> {
        self.results.iter().filter_map(|result| result.as_ref().err())
    }

    pub fn is_complete(&self) -> bool {
        self.results.iter().all(Result::is_ok)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Translate every declaration independently. A failure only affects its own
/// entry.
pub fn translate_batch(decls: &[TypeDeclaration], profile: &TargetProfile) -> BatchOutcome {
    let ancestors = AncestorIndex::from_declarations(decls);
    let names: Vec<&str> = decls.iter().map(|decl| decl.name.as_str()).collect();
    debug!(count = decls.len(), target = %profile.target, "translating batch");

    let results = decls
        .par_iter()
        .map(|decl| {
            let result = TypeTranslator::new(profile)
                .with_ancestors(&ancestors)
                .with_known_types(names.iter().copied())
                .translate(decl.clone());
            if let Err(err) = &result {
                warn!(
                    type_name = %decl.name,
                    stage = %err.stage,
                    member = err.error.member().unwrap_or_default(),
                    "translation failed: {err}"
                );
            }
            result
        })
        .collect();

    BatchOutcome { results }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classport_ir::Member;

    #[test]
    fn empty_batch_is_complete() {
        let outcome = translate_batch(&[], &TargetProfile::java());
        assert!(outcome.is_empty());
        assert!(outcome.is_complete());
    }

    #[test]
    fn siblings_are_known_types() {
        let decls = [
            TypeDeclaration::new("Order").member(Member::field("customer", "Customer")),
            TypeDeclaration::new("Customer").member(Member::field("orders", "Order[]")),
        ];
        let outcome = translate_batch(&decls, &TargetProfile::java());
        assert!(outcome.is_complete(), "{:?}", outcome.failed().collect::<Vec<_>>());
        let texts: Vec<&str> = outcome.succeeded().map(|t| t.text.as_str()).collect();
        assert!(texts[0].contains("private Customer customer;"), "{}", texts[0]);
        assert!(texts[1].contains("private Order[] orders;"), "{}", texts[1]);
    }
}
