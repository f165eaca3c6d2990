//! Declaration translation pipeline.
//!
//! ```text
//! TypeDeclaration
//!   -> ModifierMapper       (source visibility -> target access level)
//!   -> PropertyDesugarer    (property -> backing field + accessors)
//!   -> InheritanceResolver  (extends / implements, override markers)
//!   -> ClassPrinter         (target text)
//! ```
//!
//! `TypeTranslator` runs the stages in order for one declaration. Every
//! stage takes the `TargetProfile` by reference; nothing here is global, so
//! separate declarations can be translated on separate threads.

pub mod emitter;
pub mod profile;
pub mod transforms;
pub mod translator;

pub use emitter::{ClassPrinter, TypeMapper};
pub use profile::{
    AccessLevel, FallbackPolicy, MethodCase, NamingRules, SyntaxRules, Target, TargetProfile,
};
pub use transforms::{AncestorIndex, InheritanceResolver, ModifierMapper, PropertyDesugarer};
pub use translator::{TranslatedType, TranslationState, TypeTranslator, translate};
