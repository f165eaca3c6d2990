use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Modifiers
// =============================================================================

/// Source-side access modifier.
///
/// Covers every access level the supported source languages can express;
/// the modifier table of a target profile decides what each one becomes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    Public,
    Protected,
    #[default]
    Private,
    /// Java-style package access (no keyword).
    Package,
    Internal,
    ProtectedInternal,
    PrivateProtected,
}

impl Visibility {
    pub const ALL: [Self; 7] = [
        Self::Public,
        Self::Protected,
        Self::Private,
        Self::Package,
        Self::Internal,
        Self::ProtectedInternal,
        Self::PrivateProtected,
    ];

    /// Source spelling, as used in diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
            Self::Package => "package",
            Self::Internal => "internal",
            Self::ProtectedInternal => "protected internal",
            Self::PrivateProtected => "private protected",
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Visibility {
    type Err = String;

    /// Accepts both the source spelling (`protected internal`) and the
    /// camelCase JSON spelling (`protectedInternal`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "public" => Ok(Self::Public),
            "protected" => Ok(Self::Protected),
            "private" => Ok(Self::Private),
            "package" => Ok(Self::Package),
            "internal" => Ok(Self::Internal),
            "protectedInternal" | "protected internal" => Ok(Self::ProtectedInternal),
            "privateProtected" | "private protected" => Ok(Self::PrivateProtected),
            other => Err(format!("unknown visibility '{other}'")),
        }
    }
}

/// Field mutability.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Mutability {
    #[default]
    Mutable,
    /// Assigned once, at declaration or in a constructor.
    ReadOnly,
    /// Compile-time constant; implicitly shared by all instances.
    Const,
}

/// Inheritance-related modifier beyond access and `static`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecialModifier {
    /// No implementation; subclasses must provide one.
    Abstract,
    /// Overridable method.
    Virtual,
    /// Cannot be subclassed or overridden further.
    Sealed,
}

impl SpecialModifier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Abstract => "abstract",
            Self::Virtual => "virtual",
            Self::Sealed => "sealed",
        }
    }
}

impl fmt::Display for SpecialModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Declarations
// =============================================================================

/// One type declaration and its members, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TypeDeclaration {
    pub name: String,
    #[serde(default = "public_visibility")]
    pub visibility: Visibility,
    #[serde(default)]
    pub special: Option<SpecialModifier>,
    /// Enclosing namespace or package, dot-separated.
    #[serde(default)]
    pub container: Option<String>,
    /// Modules the declaration's file imports, dot-separated.
    #[serde(default)]
    pub imports: Vec<String>,
    /// Base types as supplied by the front end. More than one is rejected
    /// during inheritance resolution.
    #[serde(default)]
    pub base_types: Vec<String>,
    /// Implemented capabilities (interfaces). Ordered and unique; duplicates
    /// collapse onto their first occurrence.
    #[serde(default)]
    pub capabilities: IndexSet<String>,
    #[serde(default)]
    pub members: Vec<Member>,
}

const fn public_visibility() -> Visibility {
    Visibility::Public
}

impl TypeDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
            special: None,
            container: None,
            imports: Vec::new(),
            base_types: Vec::new(),
            capabilities: IndexSet::new(),
            members: Vec::new(),
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_special(mut self, special: SpecialModifier) -> Self {
        self.special = Some(special);
        self
    }

    pub fn in_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    pub fn imports(mut self, module: impl Into<String>) -> Self {
        self.imports.push(module.into());
        self
    }

    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.base_types.push(base.into());
        self
    }

    pub fn implements(mut self, capability: impl Into<String>) -> Self {
        self.capabilities.insert(capability.into());
        self
    }

    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn has_properties(&self) -> bool {
        self.members
            .iter()
            .any(|m| matches!(m.kind, MemberKind::Property(_)))
    }

    /// Signatures of every method and constructor, in declaration order.
    pub fn signatures(&self) -> impl Iterator<Item = Signature> + '_ {
        self.members.iter().filter_map(Member::signature)
    }
}

/// A single member. Attributes shared by every kind live here; the rest
/// is in `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub name: String,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Upstream-resolved override flag. Honored as given.
    #[serde(default, rename = "override")]
    pub is_override: bool,
    #[serde(default)]
    pub special: Option<SpecialModifier>,
    #[serde(flatten)]
    pub kind: MemberKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MemberKind {
    Field(Field),
    Property(Property),
    Method(Method),
    Constructor(Constructor),
}

impl MemberKind {
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Field(_) => "field",
            Self::Property(_) => "property",
            Self::Method(_) => "method",
            Self::Constructor(_) => "constructor",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Field {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub mutability: Mutability,
}

/// Auto-implemented property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Property {
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub getter: Accessor,
    /// `None` means the property is read-only.
    #[serde(default)]
    pub setter: Option<Accessor>,
    #[serde(default)]
    pub default: Option<String>,
}

/// One property accessor. Without an explicit visibility the accessor
/// takes the property's own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Accessor {
    #[serde(default)]
    pub visibility: Option<Visibility>,
}

impl Accessor {
    pub const fn with_visibility(visibility: Visibility) -> Self {
        Self {
            visibility: Some(visibility),
        }
    }

    pub fn resolve(&self, declared: Visibility) -> Visibility {
        self.visibility.unwrap_or(declared)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Method {
    #[serde(default = "void_type")]
    pub return_type: String,
    #[serde(default)]
    pub params: Vec<Parameter>,
    #[serde(default)]
    pub body: Body,
}

fn void_type() -> String {
    "void".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Constructor {
    #[serde(default)]
    pub params: Vec<Parameter>,
    #[serde(default)]
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
        }
    }
}

/// Opaque body payload, copied verbatim line by line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Body {
    pub lines: Vec<String>,
}

impl Body {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Name plus parameter-type sequence. Overloads are told apart by this.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub name: String,
    pub param_types: SmallVec<[String; 4]>,
}

impl Signature {
    pub fn new<I, S>(name: impl Into<String>, param_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            param_types: param_types.into_iter().map(Into::into).collect(),
        }
    }

    pub fn of(name: &str, params: &[Parameter]) -> Self {
        Self::new(name, params.iter().map(|p| p.ty.as_str()))
    }

    pub fn arity(&self) -> usize {
        self.param_types.len()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.param_types.join(", "))
    }
}

// =============================================================================
// Member builders
// =============================================================================

impl Member {
    fn with_kind(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Private,
            is_static: false,
            is_override: false,
            special: None,
            kind,
        }
    }

    pub fn field(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            MemberKind::Field(Field {
                ty: ty.into(),
                default: None,
                mutability: Mutability::Mutable,
            }),
        )
    }

    /// Read-write property whose accessors share the property's visibility.
    pub fn property(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            MemberKind::Property(Property {
                ty: ty.into(),
                getter: Accessor::default(),
                setter: Some(Accessor::default()),
                default: None,
            }),
        )
    }

    pub fn method(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self::with_kind(
            name,
            MemberKind::Method(Method {
                return_type: return_type.into(),
                params: Vec::new(),
                body: Body::default(),
            }),
        )
    }

    pub fn constructor(type_name: impl Into<String>) -> Self {
        Self::with_kind(type_name, MemberKind::Constructor(Constructor::default()))
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn as_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn overriding(mut self) -> Self {
        self.is_override = true;
        self
    }

    pub fn with_special(mut self, special: SpecialModifier) -> Self {
        self.special = Some(special);
        self
    }

    /// Default value for a field or property.
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        match &mut self.kind {
            MemberKind::Field(field) => field.default = Some(value.into()),
            MemberKind::Property(prop) => prop.default = Some(value.into()),
            MemberKind::Method(_) | MemberKind::Constructor(_) => {}
        }
        self
    }

    pub fn with_mutability(mut self, mutability: Mutability) -> Self {
        if let MemberKind::Field(field) = &mut self.kind {
            field.mutability = mutability;
        }
        self
    }

    pub fn with_getter(mut self, visibility: Visibility) -> Self {
        if let MemberKind::Property(prop) = &mut self.kind {
            prop.getter = Accessor::with_visibility(visibility);
        }
        self
    }

    pub fn with_setter(mut self, visibility: Visibility) -> Self {
        if let MemberKind::Property(prop) = &mut self.kind {
            prop.setter = Some(Accessor::with_visibility(visibility));
        }
        self
    }

    pub fn read_only(mut self) -> Self {
        if let MemberKind::Property(prop) = &mut self.kind {
            prop.setter = None;
        }
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        let param = Parameter::new(name, ty);
        match &mut self.kind {
            MemberKind::Method(method) => method.params.push(param),
            MemberKind::Constructor(ctor) => ctor.params.push(param),
            MemberKind::Field(_) | MemberKind::Property(_) => {}
        }
        self
    }

    pub fn with_body<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let body = Body::new(lines);
        match &mut self.kind {
            MemberKind::Method(method) => method.body = body,
            MemberKind::Constructor(ctor) => ctor.body = body,
            MemberKind::Field(_) | MemberKind::Property(_) => {}
        }
        self
    }

    pub fn signature(&self) -> Option<Signature> {
        match &self.kind {
            MemberKind::Method(method) => Some(Signature::of(&self.name, &method.params)),
            MemberKind::Constructor(ctor) => Some(Signature::of(&self.name, &ctor.params)),
            MemberKind::Field(_) | MemberKind::Property(_) => None,
        }
    }
}
