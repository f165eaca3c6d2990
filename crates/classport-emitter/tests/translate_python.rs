//! Python rendering: annotated declarations, indentation blocks.

use classport_emitter::{TargetProfile, translate};
use classport_ir::{Member, Mutability, SpecialModifier, TypeDeclaration, Visibility};

#[test]
fn from_csharp_renders_dataclass() {
    let decl = TypeDeclaration::new("FromCSharp")
        .extends("Base")
        .implements("IInterface")
        .member(
            Member::property("IntProperty", "int")
                .with_visibility(Visibility::Public)
                .with_getter(Visibility::Public)
                .with_setter(Visibility::Protected)
                .with_default("0"),
        )
        .member(
            Member::method("func1", "void")
                .with_visibility(Visibility::Public)
                .overriding()
                .with_param("obj", "int"),
        );
    let output = translate(decl, &TargetProfile::python()).expect("translates");
    let expected = "\
from dataclasses import dataclass
from typing import override

@dataclass
class FromCSharp(Base, IInterface):
    _intPropertyBackingField: int = 0

    def getIntProperty(self) -> int:
        return self._intPropertyBackingField

    def setIntProperty(self, value: int) -> None:
        self._intPropertyBackingField = value

    @override
    def func1(self, obj: int) -> None:
        pass
";
    assert_eq!(output.text, expected, "got output:\n{}", output.text);
    assert_eq!(output.file_name(), "FromCSharp.py");
}

#[test]
fn constructor_becomes_init() {
    let decl = TypeDeclaration::new("Point")
        .member(Member::field("x", "double").with_visibility(Visibility::Public))
        .member(
            Member::constructor("Point")
                .with_visibility(Visibility::Public)
                .with_param("x", "double")
                .with_body(["self.x = x"]),
        );
    let output = translate(decl, &TargetProfile::python()).expect("translates");
    assert!(
        output.text.contains("    def __init__(self, x: float) -> None:\n        self.x = x\n"),
        "{}",
        output.text
    );
}

#[test]
fn statics_use_decorators_and_class_vars() {
    let decl = TypeDeclaration::new("Counter")
        .member(Member::field("total", "int").as_static().with_default("0"))
        .member(
            Member::field("Limit", "int")
                .with_mutability(Mutability::Const)
                .with_default("100"),
        )
        .member(
            Member::method("Reset", "void")
                .as_static()
                .with_body(["Counter.total = 0"]),
        );
    let output = translate(decl, &TargetProfile::python()).expect("translates");
    let text = &output.text;
    assert!(
        text.starts_with(
            "from dataclasses import dataclass\nfrom typing import ClassVar, Final\n\n"
        ),
        "{text}"
    );
    assert!(text.contains("    total: ClassVar[int] = 0\n"), "{text}");
    assert!(text.contains("    Limit: Final[int] = 100\n"), "{text}");
    assert!(
        text.contains("    @staticmethod\n    def reset() -> None:\n        Counter.total = 0\n"),
        "{text}"
    );
}

#[test]
fn class_without_parents_has_no_parentheses() {
    let decl = TypeDeclaration::new("Plain").member(Member::field("tags", "string[]"));
    let output = translate(decl, &TargetProfile::python()).expect("translates");
    assert_eq!(
        output.text,
        "from dataclasses import dataclass\n\n@dataclass\nclass Plain:\n    tags: list[str]\n"
    );
}

#[test]
fn static_constructor_runs_in_class_body() {
    let decl = TypeDeclaration::new("Registry")
        .member(Member::field("count", "int").as_static().with_default("0"))
        .member(
            Member::constructor("Registry")
                .as_static()
                .with_body(["count = 10"]),
        );
    let output = translate(decl, &TargetProfile::python()).expect("translates");
    let text = &output.text;
    assert!(text.ends_with("    count: ClassVar[int] = 0\n\n    count = 10\n"), "{text}");
    assert!(!text.contains("__init__"), "{text}");
}

#[test]
fn special_modifiers_become_decorators_with_imports() {
    let decl = TypeDeclaration::new("Shape")
        .with_special(SpecialModifier::Sealed)
        .imports("geometry.core")
        .member(Member::method("Area", "double").with_special(SpecialModifier::Abstract))
        .member(Member::method("Name", "string").with_special(SpecialModifier::Virtual));
    let output = translate(decl, &TargetProfile::python()).expect("translates");
    let expected = "\
from dataclasses import dataclass
from typing import final
from abc import abstractmethod

from geometry.core import *

@dataclass
@final
class Shape:
    @abstractmethod
    def area(self) -> float:
        pass

    def name(self) -> str:
        pass
";
    assert_eq!(output.text, expected, "got output:\n{}", output.text);
}
