//! Lowered forms produced by the pipeline stages.
//!
//! Each stage consumes the previous stage's form and produces the next:
//!
//! ```text
//! TypeDeclaration --map--> MappedType --desugar--> DesugaredType --resolve--> ClassDecl
//! ```
//!
//! `ClassMember` has no property variant: once a type is desugared, the
//! printer has no way to see a property.

use crate::profile::AccessLevel;
use classport_ir::{
    Body, Constructor, Field, Method, Mutability, Parameter, Signature, SpecialModifier,
};

/// File-level context of a declaration, carried unchanged to the printer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileScope {
    pub container: Option<String>,
    pub imports: Vec<String>,
}

// =============================================================================
// After modifier mapping
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedType {
    pub name: String,
    pub access: AccessLevel,
    pub special: Option<SpecialModifier>,
    pub scope: FileScope,
    pub base_types: Vec<String>,
    pub capabilities: Vec<String>,
    pub members: Vec<MappedMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedMember {
    pub name: String,
    pub access: AccessLevel,
    pub is_static: bool,
    pub is_override: bool,
    pub special: Option<SpecialModifier>,
    pub kind: MappedKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappedKind {
    Field(Field),
    Property(MappedProperty),
    Method(Method),
    Constructor(Constructor),
}

/// Property with both accessor levels already mapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappedProperty {
    pub ty: String,
    pub getter: AccessLevel,
    pub setter: Option<AccessLevel>,
    pub default: Option<String>,
}

// =============================================================================
// After property desugaring
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesugaredType {
    pub name: String,
    pub access: AccessLevel,
    pub special: Option<SpecialModifier>,
    pub scope: FileScope,
    pub base_types: Vec<String>,
    pub capabilities: Vec<String>,
    pub members: Vec<ClassMember>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassMember {
    Field(FieldDecl),
    Method(MethodDecl),
    Constructor(ConstructorDecl),
}

impl ClassMember {
    /// Target-side name. Constructors report the name they were declared with.
    pub fn name(&self) -> &str {
        match self {
            Self::Field(field) => &field.name,
            Self::Method(method) => &method.name,
            Self::Constructor(ctor) => &ctor.signature.name,
        }
    }

    pub const fn access(&self) -> AccessLevel {
        match self {
            Self::Field(field) => field.access,
            Self::Method(method) => method.access,
            Self::Constructor(ctor) => ctor.access,
        }
    }

    pub const fn origin(&self) -> &Origin {
        match self {
            Self::Field(field) => &field.origin,
            Self::Method(method) => &method.origin,
            Self::Constructor(_) => &Origin::Declared,
        }
    }

    pub const fn is_field(&self) -> bool {
        matches!(self, Self::Field(_))
    }
}

/// Whether a member was written in the source or generated from a property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Declared,
    Generated { property: String },
}

impl Origin {
    /// Name to report in diagnostics: the property for generated members.
    pub fn report_name<'a>(&'a self, own: &'a str) -> &'a str {
        match self {
            Self::Declared => own,
            Self::Generated { property } => property,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: String,
    pub access: AccessLevel,
    pub is_static: bool,
    pub ty: String,
    pub default: Option<String>,
    pub mutability: Mutability,
    pub origin: Origin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDecl {
    /// Target-side name (after the profile's method naming rule).
    pub name: String,
    /// Source-side signature, used for ancestor matching.
    pub signature: Signature,
    pub access: AccessLevel,
    pub is_static: bool,
    pub overrides: Option<OverrideSource>,
    pub special: Option<SpecialModifier>,
    pub return_type: String,
    pub params: Vec<Parameter>,
    pub body: MethodBody,
    pub origin: Origin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorDecl {
    pub signature: Signature,
    pub access: AccessLevel,
    /// Static initializer rather than an instance constructor.
    pub is_static: bool,
    pub overrides: Option<OverrideSource>,
    pub params: Vec<Parameter>,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodBody {
    /// Source body, copied line by line.
    Verbatim(Body),
    /// Abstract member: signature only.
    Abstract,
    /// Generated getter: return the backing field.
    ReadField { field: String },
    /// Generated setter: assign the parameter to the backing field.
    WriteField { field: String, param: String },
}

/// Why a member carries an override marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideSource {
    /// Flagged by the IR; no known ancestor declares the signature.
    Declared,
    /// Flagged by the IR and confirmed against a known ancestor.
    Confirmed { ancestor: String },
}

// =============================================================================
// After inheritance resolution
// =============================================================================

/// Fully lowered class, ready for the printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDecl {
    pub name: String,
    pub access: AccessLevel,
    pub special: Option<SpecialModifier>,
    pub scope: FileScope,
    pub extends: Option<String>,
    pub implements: Vec<String>,
    pub members: Vec<ClassMember>,
}
