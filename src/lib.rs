//! classport: translates object-oriented type declarations into the idiom of
//! another language.
//!
//! ```no_run
//! use classport::{TargetProfile, TypeDeclaration, Member, Visibility, translate};
//!
//! let decl = TypeDeclaration::new("Account").member(
//!     Member::property("Balance", "int")
//!         .with_getter(Visibility::Public)
//!         .with_setter(Visibility::Protected),
//! );
//! let output = translate(decl, &TargetProfile::java())?;
//! print!("{}", output.text);
//! # Ok::<(), classport::TranslateError>(())
//! ```

pub mod batch;
pub mod config;

pub use batch::{BatchOutcome, translate_batch};
pub use classport_common::{ConvertError, ErrorKind, PipelineStage, TranslateError};
pub use classport_emitter::{
    AccessLevel, AncestorIndex, FallbackPolicy, MethodCase, NamingRules, Target, TargetProfile,
    TranslatedType, TranslationState, TypeTranslator, translate,
};
pub use classport_ir::{
    Accessor, Body, Constructor, Field, Member, MemberKind, Method, Mutability, Parameter,
    Property, Signature, SpecialModifier, TypeDeclaration, Visibility,
};
pub use config::{ProfileConfig, load_profile};
