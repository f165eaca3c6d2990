//! Type Translator
//!
//! Drives one `TypeDeclaration` through the pipeline as an explicit state
//! machine:
//!
//! ```text
//! Loaded -> ModifiersMapped -> Desugared -> InheritanceResolved -> Emitted
//! ```
//!
//! Each `advance` runs exactly one stage. A failure aborts the declaration
//! and reports the stage it happened in; no partial text is ever returned.

use crate::emitter::{ClassPrinter, TypeMapper};
use crate::profile::TargetProfile;
use crate::transforms::ir::{ClassDecl, DesugaredType, MappedType};
use crate::transforms::{AncestorIndex, InheritanceResolver, ModifierMapper, PropertyDesugarer};
use classport_common::{ConvertError, PipelineStage, TranslateError};
use classport_ir::TypeDeclaration;
use tracing::debug;

/// Rendered output for one declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedType {
    pub name: String,
    pub file_stem: String,
    pub extension: String,
    /// Always ends with a newline.
    pub text: String,
}

impl TranslatedType {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.file_stem, self.extension)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationState {
    Loaded(TypeDeclaration),
    ModifiersMapped(MappedType),
    Desugared(DesugaredType),
    InheritanceResolved(ClassDecl),
    Emitted(TranslatedType),
}

impl TranslationState {
    pub fn type_name(&self) -> &str {
        match self {
            Self::Loaded(decl) => &decl.name,
            Self::ModifiersMapped(mapped) => &mapped.name,
            Self::Desugared(desugared) => &desugared.name,
            Self::InheritanceResolved(class) => &class.name,
            Self::Emitted(output) => &output.name,
        }
    }

    /// Stage that moves out of this state; `None` once emitted.
    pub const fn next_stage(&self) -> Option<PipelineStage> {
        match self {
            Self::Loaded(_) => Some(PipelineStage::ModifierMapping),
            Self::ModifiersMapped(_) => Some(PipelineStage::PropertyDesugaring),
            Self::Desugared(_) => Some(PipelineStage::InheritanceResolution),
            Self::InheritanceResolved(_) => Some(PipelineStage::MemberEmission),
            Self::Emitted(_) => None,
        }
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Emitted(_))
    }
}

pub struct TypeTranslator<'a> {
    profile: &'a TargetProfile,
    ancestors: Option<&'a AncestorIndex>,
    known_types: Vec<&'a str>,
}

impl<'a> TypeTranslator<'a> {
    pub const fn new(profile: &'a TargetProfile) -> Self {
        Self {
            profile,
            ancestors: None,
            known_types: Vec::new(),
        }
    }

    /// Known ancestors used to confirm override flags.
    pub const fn with_ancestors(mut self, ancestors: &'a AncestorIndex) -> Self {
        self.ancestors = Some(ancestors);
        self
    }

    /// Extra type names that translate to themselves (e.g. sibling types in
    /// a batch).
    pub fn with_known_types(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.known_types.extend(names);
        self
    }

    /// Run the stage that follows `state`. An emitted state is returned as is.
    pub fn advance(&self, state: TranslationState) -> Result<TranslationState, TranslateError> {
        let Some(stage) = state.next_stage() else {
            return Ok(state);
        };
        let type_name = state.type_name().to_string();
        let next = match state {
            TranslationState::Loaded(decl) => ModifierMapper::new(self.profile)
                .map_type(decl)
                .map(TranslationState::ModifiersMapped),
            TranslationState::ModifiersMapped(mapped) => PropertyDesugarer::new(self.profile)
                .desugar(mapped)
                .map(TranslationState::Desugared),
            TranslationState::Desugared(desugared) => InheritanceResolver::new(self.ancestors)
                .resolve(desugared)
                .map(TranslationState::InheritanceResolved),
            TranslationState::InheritanceResolved(class) => self
                .emit(&class)
                .map(TranslationState::Emitted),
            TranslationState::Emitted(output) => return Ok(TranslationState::Emitted(output)),
        }
        .map_err(|error| TranslateError::new(stage, error))?;

        debug!(type_name = %type_name, stage = %stage, "stage complete");
        Ok(next)
    }

    fn emit(&self, class: &ClassDecl) -> Result<TranslatedType, ConvertError> {
        let own = std::iter::once(class.name.as_str())
            .chain(class.extends.as_deref())
            .chain(class.implements.iter().map(String::as_str));
        let types = TypeMapper::new(self.profile)
            .with_known(self.known_types.iter().copied())
            .with_known(own);
        let text = ClassPrinter::new(self.profile, types).emit_file(class)?;
        Ok(TranslatedType {
            name: class.name.clone(),
            file_stem: class.name.clone(),
            extension: self.profile.file_extension.clone(),
            text,
        })
    }

    /// Run every stage in order.
    pub fn translate(&self, decl: TypeDeclaration) -> Result<TranslatedType, TranslateError> {
        let mut state = TranslationState::Loaded(decl);
        loop {
            match self.advance(state)? {
                TranslationState::Emitted(output) => return Ok(output),
                next => state = next,
            }
        }
    }
}

/// Translate a single declaration with no ancestor information.
pub fn translate(
    decl: TypeDeclaration,
    profile: &TargetProfile,
) -> Result<TranslatedType, TranslateError> {
    TypeTranslator::new(profile).translate(decl)
}

#[cfg(test)]
#[path = "tests/translator.rs"]
mod tests;
