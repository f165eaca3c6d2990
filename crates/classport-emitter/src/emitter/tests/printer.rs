use super::*;
use crate::transforms::ir::{FileScope, OverrideSource};
use classport_common::ErrorKind;
use classport_ir::{Body, Signature, SpecialModifier};

fn field(name: &str, ty: &str, access: AccessLevel) -> ClassMember {
    ClassMember::Field(FieldDecl {
        name: name.to_string(),
        access,
        is_static: false,
        ty: ty.to_string(),
        default: None,
        mutability: Mutability::Mutable,
        origin: Origin::Declared,
    })
}

fn method(name: &str, access: AccessLevel, body: MethodBody) -> MethodDecl {
    MethodDecl {
        name: name.to_string(),
        signature: Signature::new(name, std::iter::empty::<&str>()),
        access,
        is_static: false,
        overrides: None,
        special: None,
        return_type: "void".to_string(),
        params: Vec::new(),
        body,
        origin: Origin::Declared,
    }
}

fn class(members: Vec<ClassMember>) -> ClassDecl {
    ClassDecl {
        name: "Widget".to_string(),
        access: AccessLevel::Public,
        special: None,
        scope: FileScope::default(),
        extends: None,
        implements: Vec::new(),
        members,
    }
}

fn print(profile: &TargetProfile, class: &ClassDecl) -> String {
    ClassPrinter::new(profile, TypeMapper::new(profile).with_known([class.name.as_str()]))
        .emit_class(class)
        .expect("class prints")
}

#[test]
fn empty_java_class_has_bare_braces() {
    let output = print(&TargetProfile::java(), &class(vec![]));
    assert_eq!(output, "public class Widget\n{\n}\n");
}

#[test]
fn empty_python_class_holds_pass() {
    let output = print(&TargetProfile::python(), &class(vec![]));
    assert_eq!(output, "@dataclass\nclass Widget:\n    pass\n");
}

#[test]
fn cpp_class_ends_with_semicolon() {
    let output = print(&TargetProfile::cpp(), &class(vec![]));
    assert!(output.ends_with("};\n"), "{output}");
}

#[test]
fn adjacent_fields_are_not_separated() {
    let output = print(
        &TargetProfile::java(),
        &class(vec![
            field("a", "int", AccessLevel::Private),
            field("b", "string", AccessLevel::Private),
        ]),
    );
    assert!(
        output.contains("    private int a;\n    private String b;\n"),
        "{output}"
    );
}

#[test]
fn cpp_sections_follow_access_changes() {
    let output = print(
        &TargetProfile::cpp(),
        &class(vec![
            field("a", "int", AccessLevel::Private),
            field("b", "int", AccessLevel::Private),
            ClassMember::Method(method(
                "run",
                AccessLevel::Public,
                MethodBody::Verbatim(Body::default()),
            )),
            field("c", "int", AccessLevel::Private),
        ]),
    );
    assert_eq!(output.matches("private:").count(), 2, "{output}");
    assert_eq!(output.matches("public:").count(), 1, "{output}");
    assert!(
        output.contains("private:\n    int32_t a;\n    int32_t b;\n\npublic:\n"),
        "{output}"
    );
}

#[test]
fn constants_and_static_fields() {
    let mut constant = FieldDecl {
        name: "LIMIT".to_string(),
        access: AccessLevel::Public,
        is_static: true,
        ty: "int".to_string(),
        default: Some("10".to_string()),
        mutability: Mutability::Const,
        origin: Origin::Declared,
    };
    let members = vec![ClassMember::Field(constant.clone())];
    let java = print(&TargetProfile::java(), &class(members.clone()));
    assert!(java.contains("public static final int LIMIT = 10;"), "{java}");

    let cpp = print(&TargetProfile::cpp(), &class(members.clone()));
    assert!(cpp.contains("    inline static const int32_t LIMIT = 10;\n"), "{cpp}");

    let python = print(&TargetProfile::python(), &class(members));
    assert!(python.contains("    LIMIT: Final[int] = 10\n"), "{python}");

    constant.mutability = Mutability::Mutable;
    let python = print(&TargetProfile::python(), &class(vec![ClassMember::Field(constant)]));
    assert!(python.contains("    LIMIT: ClassVar[int] = 10\n"), "{python}");
}

#[test]
fn static_accessor_reads_through_class_name_in_python() {
    let mut getter = method(
        "getCount",
        AccessLevel::Public,
        MethodBody::ReadField {
            field: "_countBackingField".to_string(),
        },
    );
    getter.is_static = true;
    getter.return_type = "int".to_string();
    let output = print(&TargetProfile::python(), &class(vec![ClassMember::Method(getter)]));
    assert!(
        output.contains(
            "    @staticmethod\n    def getCount() -> int:\n        return Widget._countBackingField\n"
        ),
        "{output}"
    );
}

#[test]
fn override_markers_per_target() {
    let mut run = method("run", AccessLevel::Public, MethodBody::Verbatim(Body::default()));
    run.overrides = Some(OverrideSource::Declared);
    let members = vec![ClassMember::Method(run)];

    let java = print(&TargetProfile::java(), &class(members.clone()));
    assert!(java.contains("    @Override\n    public void run()\n"), "{java}");

    let cpp = print(&TargetProfile::cpp(), &class(members.clone()));
    assert!(cpp.contains("    void run() override\n"), "{cpp}");

    let python = print(&TargetProfile::python(), &class(members));
    assert!(
        python.contains("    @override\n    def run(self) -> None:\n        pass\n"),
        "{python}"
    );
}

#[test]
fn verbatim_body_lines_are_copied() {
    let body = Body::new(["int x = 1;", "System.out.println(x);"]);
    let output = print(
        &TargetProfile::java(),
        &class(vec![ClassMember::Method(method(
            "run",
            AccessLevel::Public,
            MethodBody::Verbatim(body),
        ))]),
    );
    assert!(
        output.contains("    {\n        int x = 1;\n        System.out.println(x);\n    }\n"),
        "{output}"
    );
}

#[test]
fn constructors_use_profile_naming() {
    let ctor = ClassMember::Constructor(ConstructorDecl {
        signature: Signature::new("Widget", ["int"]),
        access: AccessLevel::Public,
        is_static: false,
        overrides: None,
        params: vec![Parameter::new("size", "int")],
        body: Body::default(),
    });
    let java = print(&TargetProfile::java(), &class(vec![ctor.clone()]));
    assert!(java.contains("public Widget(int size)"), "{java}");
    let python = print(&TargetProfile::python(), &class(vec![ctor]));
    assert!(python.contains("def __init__(self, size: int) -> None:"), "{python}");
}

#[test]
fn unknown_type_on_generated_member_names_the_property() {
    let profile = TargetProfile::java();
    let generated = ClassMember::Field(FieldDecl {
        name: "ownerBackingField".to_string(),
        access: AccessLevel::Private,
        is_static: false,
        ty: "Customer".to_string(),
        default: None,
        mutability: Mutability::Mutable,
        origin: Origin::Generated {
            property: "Owner".to_string(),
        },
    });
    let err = ClassPrinter::new(&profile, TypeMapper::new(&profile))
        .emit_class(&class(vec![generated]))
        .expect_err("Customer is unknown");
    assert_eq!(err.kind(), ErrorKind::UnknownType);
    assert_eq!(err.type_name(), "Widget");
    assert_eq!(err.member(), Some("Owner"));
}

fn static_initializer(lines: &[&str]) -> ClassMember {
    ClassMember::Constructor(ConstructorDecl {
        signature: Signature::new("Widget", std::iter::empty::<&str>()),
        access: AccessLevel::Private,
        is_static: true,
        overrides: None,
        params: Vec::new(),
        body: Body::new(lines.iter().copied()),
    })
}

#[test]
fn static_initializer_per_target() {
    let members = vec![static_initializer(&["ready = true;"])];
    let java = print(&TargetProfile::java(), &class(members.clone()));
    assert!(
        java.contains("    static\n    {\n        ready = true;\n    }\n"),
        "{java}"
    );

    let python = print(&TargetProfile::python(), &class(vec![static_initializer(&[])]));
    assert_eq!(python, "@dataclass\nclass Widget:\n    pass\n");

    let profile = TargetProfile::cpp();
    let err = ClassPrinter::new(&profile, TypeMapper::new(&profile))
        .emit_class(&class(members))
        .expect_err("C++ has no static initializer");
    assert_eq!(err.kind(), ErrorKind::UnmappableModifier);
    assert_eq!(err.member(), Some("Widget"));
}

#[test]
fn cpp_getter_returns_class_types_by_const_reference() {
    let mut name = method(
        "getName",
        AccessLevel::Public,
        MethodBody::ReadField {
            field: "nameBackingField".to_string(),
        },
    );
    name.return_type = "string".to_string();
    let mut size = method(
        "getSize",
        AccessLevel::Public,
        MethodBody::ReadField {
            field: "sizeBackingField".to_string(),
        },
    );
    size.return_type = "int".to_string();
    let output = print(
        &TargetProfile::cpp(),
        &class(vec![ClassMember::Method(name), ClassMember::Method(size)]),
    );
    assert!(output.contains("    const std::string& getName()\n"), "{output}");
    assert!(output.contains("    int32_t getSize()\n"), "{output}");
}

#[test]
fn abstract_members_have_no_body_in_brace_targets() {
    let mut area = method("area", AccessLevel::Public, MethodBody::Abstract);
    area.special = Some(SpecialModifier::Abstract);
    let members = vec![ClassMember::Method(area)];

    let java = print(&TargetProfile::java(), &class(members.clone()));
    assert!(java.contains("    public abstract void area();\n"), "{java}");

    let cpp = print(&TargetProfile::cpp(), &class(members.clone()));
    assert!(cpp.contains("    virtual void area() = 0;\n"), "{cpp}");

    let python = print(&TargetProfile::python(), &class(members));
    assert!(
        python.contains("    @abstractmethod\n    def area(self) -> None:\n        pass\n"),
        "{python}"
    );
}

#[test]
fn file_without_container_or_imports_is_just_the_class() {
    let profile = TargetProfile::java();
    let widget = class(vec![]);
    let file = ClassPrinter::new(&profile, TypeMapper::new(&profile).with_known(["Widget"]))
        .emit_file(&widget)
        .expect("file prints");
    assert_eq!(file, print(&profile, &widget));
}

#[test]
fn cpp_file_has_pragma_and_includes_for_used_types() {
    let profile = TargetProfile::cpp();
    let mut widget = class(vec![field("name", "string", AccessLevel::Private)]);
    widget.scope = FileScope {
        container: None,
        imports: vec!["ui.Base".to_string()],
    };
    let file = ClassPrinter::new(&profile, TypeMapper::new(&profile).with_known(["Widget"]))
        .emit_file(&widget)
        .expect("file prints");
    let preamble = "#pragma once\n\n#include <string>\n\n#include \"ui/Base.hpp\"\n\n";
    assert!(file.starts_with(preamble), "{file}");
    assert!(file[preamble.len()..].starts_with("class Widget\n"), "{file}");
}
