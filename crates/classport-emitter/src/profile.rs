//! Target profiles.
//!
//! A `TargetProfile` is a plain value describing one output language: its
//! modifier table and fallback policy, its type-name table, its naming
//! conventions for generated members and the syntax rules the printer
//! follows. Profiles are passed by reference through the pipeline; nothing
//! in this crate keeps process-wide state.

use classport_ir::{SpecialModifier, Visibility};
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt;
use std::str::FromStr;

/// Built-in output languages.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Java,
    Cpp,
    Python,
}

impl Target {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Cpp => "cpp",
            Self::Python => "python",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "java" => Ok(Self::Java),
            "cpp" | "c++" => Ok(Self::Cpp),
            "python" | "py" => Ok(Self::Python),
            other => Err(format!(
                "unknown target '{other}'. Expected 'java', 'cpp' or 'python'"
            )),
        }
    }
}

/// Target-side access level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AccessLevel {
    Public,
    Protected,
    Private,
    /// Package/default access; has no keyword.
    Package,
}

impl AccessLevel {
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Self::Public => Some("public"),
            Self::Protected => Some("protected"),
            Self::Private => Some("private"),
            Self::Package => None,
        }
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "public" => Ok(Self::Public),
            "protected" => Ok(Self::Protected),
            "private" => Ok(Self::Private),
            "package" => Ok(Self::Package),
            other => Err(format!("unknown access level '{other}'")),
        }
    }
}

/// What the modifier mapper does with a source modifier the table lacks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Most restrictive: every gap becomes `private`.
    Private,
    /// Every gap becomes the given level.
    Fixed(AccessLevel),
    /// Gaps are reported as `UnmappableModifier`.
    Reject,
}

// =============================================================================
// Naming
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MethodCase {
    Preserve,
    /// First character lower-cased: `Func1` -> `func1`.
    LowerCamel,
}

/// Naming conventions for generated members and renamed methods.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamingRules {
    pub backing_field_prefix: String,
    pub backing_field_suffix: String,
    /// Lower-case the first character of the property name inside the
    /// backing field name.
    pub lower_first_backing_field: bool,
    pub getter_prefix: String,
    pub setter_prefix: String,
    pub setter_parameter: String,
    pub method_case: MethodCase,
}

impl Default for NamingRules {
    fn default() -> Self {
        Self {
            backing_field_prefix: String::new(),
            backing_field_suffix: "BackingField".to_string(),
            lower_first_backing_field: true,
            getter_prefix: "get".to_string(),
            setter_prefix: "set".to_string(),
            setter_parameter: "value".to_string(),
            method_case: MethodCase::LowerCamel,
        }
    }
}

impl NamingRules {
    pub fn backing_field(&self, property: &str) -> String {
        let stem = if self.lower_first_backing_field {
            lower_first(property)
        } else {
            property.to_string()
        };
        format!(
            "{}{}{}",
            self.backing_field_prefix, stem, self.backing_field_suffix
        )
    }

    pub fn getter(&self, property: &str) -> String {
        format!("{}{}", self.getter_prefix, property)
    }

    pub fn setter(&self, property: &str) -> String {
        format!("{}{}", self.setter_prefix, property)
    }

    pub fn method(&self, name: &str) -> String {
        match self.method_case {
            MethodCase::Preserve => name.to_string(),
            MethodCase::LowerCamel => lower_first(name),
        }
    }
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

// =============================================================================
// Syntax
// =============================================================================

/// Where a declared type goes relative to the declared name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeclarationStyle {
    /// `int count`, `int add(int a)`
    TypeFirst,
    /// `count: int`, `def add(self, a: int) -> int`
    Annotated,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AccessStyle {
    /// Keyword in front of every member (`public void run()`).
    Keyword,
    /// Section labels (`public:`) emitted whenever the level changes.
    Sections,
    /// No access syntax at all.
    Implicit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StaticStyle {
    /// Keyword in front of the member. Fields may need a different spelling
    /// (`inline static`) to allow an in-class initializer.
    Keyword { method: String, field: String },
    /// Decorator on methods, type wrapper on fields (`ClassVar[{}]`).
    Decorated {
        method_decorator: String,
        field_wrapper: String,
    },
}

/// How a static constructor is rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StaticInitializer {
    /// Keyword plus a block: `static { ... }`.
    Block(String),
    /// Body statements placed directly in the class body.
    ClassBody,
    /// The target has no static initializer.
    Unsupported,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MutabilityStyle {
    /// `final int x`, `static final int X`
    Keyword { read_only: String, constant: String },
    /// Type wrapper: `x: Final[int]`
    Annotation { wrapper: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OverrideMarker {
    /// Annotation on its own line before the declaration (`@Override`).
    Annotation(String),
    /// Keyword after the parameter list (`void f() override`).
    Trailing(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeritageStyle {
    /// `extends Base implements A, B`
    Keywords { extends: String, implements: String },
    /// `: public Base, public A`
    BaseList { access: Option<String> },
    /// `(Base, A)`
    Parenthesized,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockStyle {
    /// Braces on their own lines.
    Braces,
    /// Colon plus indentation; empty blocks hold `empty_body`.
    Indented { empty_body: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConstructorName {
    TypeName,
    Fixed(String),
}

/// Parameters and generated getter results of non-scalar types are passed
/// by reference: `std::string` becomes `const std::string&`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ByReference {
    pub format: String,
    /// Target types that stay by value.
    pub by_value: FxHashSet<String>,
}

impl ByReference {
    pub fn apply(&self, ty: &str) -> String {
        if self.by_value.contains(ty) {
            ty.to_string()
        } else {
            self.format.replace("{}", ty)
        }
    }
}

/// Spelling of one special modifier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpecialForm {
    /// Line before the declaration (`@abstractmethod`).
    pub decorator: Option<String>,
    /// Keyword before the declaration (`abstract`, `virtual`).
    pub prefix: Option<String>,
    /// Text after the parameter list or class name (`= 0`, `final`).
    pub suffix: Option<String>,
}

impl SpecialForm {
    pub fn decorator(text: &str) -> Self {
        Self {
            decorator: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn prefix(text: &str) -> Self {
        Self {
            prefix: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn suffix(text: &str) -> Self {
        Self {
            suffix: Some(text.to_string()),
            ..Self::default()
        }
    }
}

/// Special modifiers the target can express. A modifier missing from a
/// table is rejected; an empty form means the target needs no spelling.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpecialRules {
    pub methods: FxHashMap<SpecialModifier, SpecialForm>,
    pub classes: FxHashMap<SpecialModifier, SpecialForm>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContainerStyle {
    /// The target has no in-file container.
    Omitted,
    /// Single statement before the imports: `package a.b;`.
    Statement { format: String, separator: String },
    /// Block around the class: `namespace a::b { ... }`.
    Block { format: String, separator: String },
}

/// Import emitted when any of its trigger tokens appears in the class text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeatureImport {
    pub module: String,
    pub name: Option<String>,
    pub triggers: Vec<String>,
}

impl FeatureImport {
    fn new(module: &str, name: Option<&str>, triggers: &[&str]) -> Self {
        Self {
            module: module.to_string(),
            name: name.map(str::to_string),
            triggers: triggers.iter().map(|t| (*t).to_string()).collect(),
        }
    }
}

/// Everything printed around the class: header lines, container and imports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreambleRules {
    pub header: Vec<String>,
    pub container: ContainerStyle,
    /// Declared import, `{}` standing for the module path.
    pub import_format: String,
    /// Replaces `.` in declared import paths.
    pub import_separator: String,
    pub feature_imports: Vec<FeatureImport>,
    /// `{module}` and `{names}` placeholders. Imports of one module share a line.
    pub feature_import_format: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxRules {
    pub declarations: DeclarationStyle,
    pub access: AccessStyle,
    pub statics: StaticStyle,
    pub static_initializer: StaticInitializer,
    pub mutability: MutabilityStyle,
    pub override_marker: OverrideMarker,
    pub heritage: HeritageStyle,
    pub blocks: BlockStyle,
    pub statement_terminator: String,
    /// Explicit receiver (`self`) for instance members, if the language
    /// requires one.
    pub receiver: Option<String>,
    /// Keyword introducing a method (`def`), if any.
    pub method_keyword: Option<String>,
    pub constructor_name: ConstructorName,
    pub class_decorators: Vec<String>,
    pub class_terminator: String,
    pub indent: String,
    pub by_reference: Option<ByReference>,
    pub special: SpecialRules,
    pub preamble: PreambleRules,
}

// =============================================================================
// Profile
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetProfile {
    pub target: Target,
    pub visibility: FxHashMap<Visibility, AccessLevel>,
    pub fallback: FallbackPolicy,
    pub types: FxHashMap<String, String>,
    /// Array format with `{}` standing for the element type.
    pub array_format: String,
    /// Type names passed through unchanged.
    pub known_types: FxHashSet<String>,
    pub naming: NamingRules,
    pub syntax: SyntaxRules,
    pub file_extension: String,
}

fn forms(entries: Vec<(SpecialModifier, SpecialForm)>) -> FxHashMap<SpecialModifier, SpecialForm> {
    entries.into_iter().collect()
}

fn table(entries: &[(&str, &str)]) -> FxHashMap<String, String> {
    entries
        .iter()
        .map(|(from, to)| ((*from).to_string(), (*to).to_string()))
        .collect()
}

impl TargetProfile {
    pub fn builtin(target: Target) -> Self {
        match target {
            Target::Java => Self::java(),
            Target::Cpp => Self::cpp(),
            Target::Python => Self::python(),
        }
    }

    pub fn java() -> Self {
        let visibility = [
            (Visibility::Public, AccessLevel::Public),
            (Visibility::Protected, AccessLevel::Protected),
            (Visibility::Private, AccessLevel::Private),
            (Visibility::Package, AccessLevel::Package),
            (Visibility::Internal, AccessLevel::Package),
            (Visibility::ProtectedInternal, AccessLevel::Protected),
        ]
        .into_iter()
        .collect();

        Self {
            target: Target::Java,
            visibility,
            fallback: FallbackPolicy::Private,
            types: table(&[
                ("void", "void"),
                ("bool", "boolean"),
                ("byte", "byte"),
                ("sbyte", "byte"),
                ("char", "char"),
                ("short", "short"),
                ("ushort", "int"),
                ("int", "int"),
                ("uint", "long"),
                ("long", "long"),
                ("ulong", "long"),
                ("float", "float"),
                ("double", "double"),
                ("decimal", "java.math.BigDecimal"),
                ("object", "Object"),
                ("string", "String"),
            ]),
            array_format: "{}[]".to_string(),
            known_types: FxHashSet::default(),
            naming: NamingRules::default(),
            syntax: SyntaxRules {
                declarations: DeclarationStyle::TypeFirst,
                access: AccessStyle::Keyword,
                statics: StaticStyle::Keyword {
                    method: "static".to_string(),
                    field: "static".to_string(),
                },
                static_initializer: StaticInitializer::Block("static".to_string()),
                mutability: MutabilityStyle::Keyword {
                    read_only: "final".to_string(),
                    constant: "static final".to_string(),
                },
                override_marker: OverrideMarker::Annotation("@Override".to_string()),
                heritage: HeritageStyle::Keywords {
                    extends: "extends".to_string(),
                    implements: "implements".to_string(),
                },
                blocks: BlockStyle::Braces,
                statement_terminator: ";".to_string(),
                receiver: None,
                method_keyword: None,
                constructor_name: ConstructorName::TypeName,
                class_decorators: Vec::new(),
                class_terminator: String::new(),
                indent: "    ".to_string(),
                by_reference: None,
                special: SpecialRules {
                    methods: forms(vec![
                        (SpecialModifier::Abstract, SpecialForm::prefix("abstract")),
                        (SpecialModifier::Virtual, SpecialForm::default()),
                        (SpecialModifier::Sealed, SpecialForm::prefix("final")),
                    ]),
                    classes: forms(vec![
                        (SpecialModifier::Abstract, SpecialForm::prefix("abstract")),
                        (SpecialModifier::Sealed, SpecialForm::prefix("final")),
                    ]),
                },
                preamble: PreambleRules {
                    header: Vec::new(),
                    container: ContainerStyle::Statement {
                        format: "package {};".to_string(),
                        separator: ".".to_string(),
                    },
                    import_format: "import {}.*;".to_string(),
                    import_separator: ".".to_string(),
                    feature_imports: Vec::new(),
                    feature_import_format: "import {module}.{names};".to_string(),
                },
            },
            file_extension: "java".to_string(),
        }
    }

    pub fn cpp() -> Self {
        let visibility = [
            (Visibility::Public, AccessLevel::Public),
            (Visibility::Protected, AccessLevel::Protected),
            (Visibility::Private, AccessLevel::Private),
        ]
        .into_iter()
        .collect();

        Self {
            target: Target::Cpp,
            visibility,
            fallback: FallbackPolicy::Private,
            types: table(&[
                ("void", "void"),
                ("bool", "bool"),
                ("sbyte", "int8_t"),
                ("char", "char"),
                ("short", "int16_t"),
                ("int", "int32_t"),
                ("long", "int64_t"),
                ("byte", "uint8_t"),
                ("ushort", "uint16_t"),
                ("uint", "uint32_t"),
                ("ulong", "uint64_t"),
                ("float", "float"),
                ("double", "double"),
                ("object", "void*"),
                ("string", "std::string"),
            ]),
            array_format: "std::vector<{}>".to_string(),
            known_types: FxHashSet::default(),
            naming: NamingRules::default(),
            syntax: SyntaxRules {
                declarations: DeclarationStyle::TypeFirst,
                access: AccessStyle::Sections,
                statics: StaticStyle::Keyword {
                    method: "static".to_string(),
                    field: "inline static".to_string(),
                },
                static_initializer: StaticInitializer::Unsupported,
                mutability: MutabilityStyle::Keyword {
                    read_only: "const".to_string(),
                    constant: "inline static const".to_string(),
                },
                override_marker: OverrideMarker::Trailing("override".to_string()),
                heritage: HeritageStyle::BaseList {
                    access: Some("public".to_string()),
                },
                blocks: BlockStyle::Braces,
                statement_terminator: ";".to_string(),
                receiver: None,
                method_keyword: None,
                constructor_name: ConstructorName::TypeName,
                class_decorators: Vec::new(),
                class_terminator: ";".to_string(),
                indent: "    ".to_string(),
                by_reference: Some(ByReference {
                    format: "const {}&".to_string(),
                    by_value: [
                        "bool", "char", "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t",
                        "uint16_t", "uint32_t", "uint64_t", "float", "double", "void", "void*",
                    ]
                    .into_iter()
                    .map(str::to_string)
                    .collect(),
                }),
                special: SpecialRules {
                    methods: forms(vec![
                        (
                            SpecialModifier::Abstract,
                            SpecialForm {
                                prefix: Some("virtual".to_string()),
                                suffix: Some("= 0".to_string()),
                                decorator: None,
                            },
                        ),
                        (SpecialModifier::Virtual, SpecialForm::prefix("virtual")),
                        (SpecialModifier::Sealed, SpecialForm::suffix("final")),
                    ]),
                    classes: forms(vec![
                        (SpecialModifier::Abstract, SpecialForm::default()),
                        (SpecialModifier::Sealed, SpecialForm::suffix("final")),
                    ]),
                },
                preamble: PreambleRules {
                    header: vec!["#pragma once".to_string()],
                    container: ContainerStyle::Block {
                        format: "namespace {}".to_string(),
                        separator: "::".to_string(),
                    },
                    import_format: "#include \"{}.hpp\"".to_string(),
                    import_separator: "/".to_string(),
                    feature_imports: vec![
                        FeatureImport::new(
                            "cstdint",
                            None,
                            &[
                                "int8_t", "int16_t", "int32_t", "int64_t", "uint8_t", "uint16_t",
                                "uint32_t", "uint64_t",
                            ],
                        ),
                        FeatureImport::new("string", None, &["std::string"]),
                        FeatureImport::new("vector", None, &["std::vector"]),
                    ],
                    feature_import_format: "#include <{module}>".to_string(),
                },
            },
            file_extension: "hpp".to_string(),
        }
    }

    /// Python has no enforced access control, so every source modifier maps
    /// to public; backing fields carry the conventional `_` prefix instead.
    pub fn python() -> Self {
        let visibility = Visibility::ALL
            .into_iter()
            .map(|v| (v, AccessLevel::Public))
            .collect();

        Self {
            target: Target::Python,
            visibility,
            fallback: FallbackPolicy::Private,
            types: table(&[
                ("void", "None"),
                ("bool", "bool"),
                ("sbyte", "int"),
                ("byte", "int"),
                ("short", "int"),
                ("ushort", "int"),
                ("int", "int"),
                ("uint", "int"),
                ("long", "int"),
                ("ulong", "int"),
                ("float", "float"),
                ("double", "float"),
                ("decimal", "Decimal"),
                ("char", "str"),
                ("string", "str"),
                ("object", "object"),
            ]),
            array_format: "list[{}]".to_string(),
            known_types: FxHashSet::default(),
            naming: NamingRules {
                backing_field_prefix: "_".to_string(),
                ..NamingRules::default()
            },
            syntax: SyntaxRules {
                declarations: DeclarationStyle::Annotated,
                access: AccessStyle::Implicit,
                statics: StaticStyle::Decorated {
                    method_decorator: "@staticmethod".to_string(),
                    field_wrapper: "ClassVar[{}]".to_string(),
                },
                static_initializer: StaticInitializer::ClassBody,
                mutability: MutabilityStyle::Annotation {
                    wrapper: "Final[{}]".to_string(),
                },
                override_marker: OverrideMarker::Annotation("@override".to_string()),
                heritage: HeritageStyle::Parenthesized,
                blocks: BlockStyle::Indented {
                    empty_body: "pass".to_string(),
                },
                statement_terminator: String::new(),
                receiver: Some("self".to_string()),
                method_keyword: Some("def".to_string()),
                constructor_name: ConstructorName::Fixed("__init__".to_string()),
                class_decorators: vec!["@dataclass".to_string()],
                class_terminator: String::new(),
                indent: "    ".to_string(),
                by_reference: None,
                special: SpecialRules {
                    methods: forms(vec![
                        (
                            SpecialModifier::Abstract,
                            SpecialForm::decorator("@abstractmethod"),
                        ),
                        (SpecialModifier::Virtual, SpecialForm::default()),
                        (SpecialModifier::Sealed, SpecialForm::decorator("@final")),
                    ]),
                    classes: forms(vec![
                        (SpecialModifier::Abstract, SpecialForm::default()),
                        (SpecialModifier::Sealed, SpecialForm::decorator("@final")),
                    ]),
                },
                preamble: PreambleRules {
                    header: Vec::new(),
                    container: ContainerStyle::Omitted,
                    import_format: "from {} import *".to_string(),
                    import_separator: ".".to_string(),
                    feature_imports: vec![
                        FeatureImport::new("dataclasses", Some("dataclass"), &["@dataclass"]),
                        FeatureImport::new("decimal", Some("Decimal"), &["Decimal"]),
                        FeatureImport::new("typing", Some("ClassVar"), &["ClassVar"]),
                        FeatureImport::new("typing", Some("Final"), &["Final"]),
                        FeatureImport::new("typing", Some("final"), &["@final"]),
                        FeatureImport::new("typing", Some("override"), &["@override"]),
                        FeatureImport::new("abc", Some("abstractmethod"), &["@abstractmethod"]),
                    ],
                    feature_import_format: "from {module} import {names}".to_string(),
                },
            },
            file_extension: "py".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "tests/profile.rs"]
mod tests;
