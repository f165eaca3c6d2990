//! Translation failures.
//!
//! Every failure names the type declaration it happened in and, where one
//! exists, the member. Failures are deterministic: translating the same
//! declaration with the same profile reproduces the same error.

use std::fmt;
use thiserror::Error;

/// Stages of the per-type translation pipeline, in execution order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PipelineStage {
    ModifierMapping,
    PropertyDesugaring,
    InheritanceResolution,
    MemberEmission,
}

impl PipelineStage {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ModifierMapping => "modifier mapping",
            Self::PropertyDesugaring => "property desugaring",
            Self::InheritanceResolution => "inheritance resolution",
            Self::MemberEmission => "member emission",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fieldless view of a `ConvertError`, for matching without destructuring.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnmappableModifier,
    NameCollision,
    MultipleBaseTypes,
    UnknownType,
}

/// A structured translation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// The profile's modifier table has no entry for a source modifier and
    /// its fallback policy refuses to pick one.
    #[error("{type_name}{}: no target modifier for `{modifier}`", member_suffix(member))]
    UnmappableModifier {
        type_name: String,
        member: Option<String>,
        modifier: String,
    },

    /// A generated backing field or accessor would reuse a name that the
    /// declaration already uses.
    #[error("{type_name}.{member}: generated name `{generated}` collides with existing {existing}")]
    NameCollision {
        type_name: String,
        member: String,
        generated: String,
        existing: String,
    },

    /// The declaration lists more than one base type.
    #[error("{type_name}: multiple base types are not supported ({})", bases.join(", "))]
    MultipleBaseTypes {
        type_name: String,
        member: Option<String>,
        bases: Vec<String>,
    },

    /// A source type name has no target equivalent.
    #[error("{type_name}{}: unknown type `{source_type}`", member_suffix(member))]
    UnknownType {
        type_name: String,
        member: Option<String>,
        source_type: String,
    },
}

fn member_suffix(member: &Option<String>) -> String {
    member
        .as_ref()
        .map(|m| format!(".{m}"))
        .unwrap_or_default()
}

impl ConvertError {
    pub fn unmappable_modifier(
        type_name: impl Into<String>,
        member: Option<&str>,
        modifier: impl Into<String>,
    ) -> Self {
        Self::UnmappableModifier {
            type_name: type_name.into(),
            member: member.map(str::to_string),
            modifier: modifier.into(),
        }
    }

    pub fn name_collision(
        type_name: impl Into<String>,
        member: impl Into<String>,
        generated: impl Into<String>,
        existing: impl Into<String>,
    ) -> Self {
        Self::NameCollision {
            type_name: type_name.into(),
            member: member.into(),
            generated: generated.into(),
            existing: existing.into(),
        }
    }

    pub fn unknown_type(
        type_name: impl Into<String>,
        member: Option<&str>,
        source_type: impl Into<String>,
    ) -> Self {
        Self::UnknownType {
            type_name: type_name.into(),
            member: member.map(str::to_string),
            source_type: source_type.into(),
        }
    }

    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnmappableModifier { .. } => ErrorKind::UnmappableModifier,
            Self::NameCollision { .. } => ErrorKind::NameCollision,
            Self::MultipleBaseTypes { .. } => ErrorKind::MultipleBaseTypes,
            Self::UnknownType { .. } => ErrorKind::UnknownType,
        }
    }

    /// Name of the type declaration the failure belongs to.
    pub fn type_name(&self) -> &str {
        match self {
            Self::UnmappableModifier { type_name, .. }
            | Self::NameCollision { type_name, .. }
            | Self::MultipleBaseTypes { type_name, .. }
            | Self::UnknownType { type_name, .. } => type_name,
        }
    }

    /// Name of the offending member, if the failure is tied to one.
    pub fn member(&self) -> Option<&str> {
        match self {
            Self::NameCollision { member, .. } => Some(member),
            Self::UnmappableModifier { member, .. }
            | Self::MultipleBaseTypes { member, .. }
            | Self::UnknownType { member, .. } => member.as_deref(),
        }
    }
}

/// A `ConvertError` tagged with the pipeline stage that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{stage} failed: {error}")]
pub struct TranslateError {
    pub stage: PipelineStage,
    #[source]
    pub error: ConvertError,
}

impl TranslateError {
    pub const fn new(stage: PipelineStage, error: ConvertError) -> Self {
        Self { stage, error }
    }

    pub const fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    pub fn type_name(&self) -> &str {
        self.error.type_name()
    }
}
