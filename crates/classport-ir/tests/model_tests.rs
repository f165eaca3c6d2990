use classport_ir::{
    MemberKind, Mutability, Signature, SpecialModifier, TypeDeclaration, Visibility,
};

const FROM_CSHARP: &str = r#"{
    "name": "FromCSharp",
    "baseTypes": ["Base"],
    "capabilities": ["IInterface", "IDisposable", "IInterface"],
    "members": [
        { "kind": "field", "name": "number", "visibility": "public", "type": "int", "default": "0" },
        { "kind": "property", "name": "StringProperty", "visibility": "public", "type": "string",
          "setter": { "visibility": "protected" }, "default": "\"NULL\"" },
        { "kind": "property", "name": "Id", "visibility": "public", "type": "int" },
        { "kind": "method", "name": "Func1", "visibility": "protected", "override": true,
          "params": [{ "name": "obj", "type": "int" }] },
        { "kind": "constructor", "name": "FromCSharp", "visibility": "public",
          "params": [{ "name": "str", "type": "string" }],
          "body": ["StringProperty = str;"] }
    ]
}"#;

#[test]
fn deserializes_tagged_members_in_order() {
    let decl: TypeDeclaration = serde_json::from_str(FROM_CSHARP).expect("valid IR");

    assert_eq!(decl.name, "FromCSharp");
    assert_eq!(decl.visibility, Visibility::Public);
    assert_eq!(decl.base_types, vec!["Base".to_string()]);
    let kinds: Vec<_> = decl.members.iter().map(|m| m.kind.describe()).collect();
    assert_eq!(
        kinds,
        vec!["field", "property", "property", "method", "constructor"]
    );
}

#[test]
fn duplicate_capabilities_collapse_in_first_seen_order() {
    let decl: TypeDeclaration = serde_json::from_str(FROM_CSHARP).expect("valid IR");
    let caps: Vec<_> = decl.capabilities.iter().map(String::as_str).collect();
    assert_eq!(caps, vec!["IInterface", "IDisposable"]);
}

#[test]
fn property_without_setter_entry_is_read_only() {
    let decl: TypeDeclaration = serde_json::from_str(FROM_CSHARP).expect("valid IR");
    let MemberKind::Property(id) = &decl.members[2].kind else {
        panic!("expected property, got {:?}", decl.members[2].kind);
    };
    assert!(id.setter.is_none());
    assert_eq!(id.getter.resolve(decl.members[2].visibility), Visibility::Public);
}

#[test]
fn accessor_visibility_overrides_declared_visibility() {
    let decl: TypeDeclaration = serde_json::from_str(FROM_CSHARP).expect("valid IR");
    let member = &decl.members[1];
    let MemberKind::Property(prop) = &member.kind else {
        panic!("expected property");
    };
    let setter = prop.setter.as_ref().expect("setter present");
    assert_eq!(setter.resolve(member.visibility), Visibility::Protected);
    assert_eq!(prop.default.as_deref(), Some("\"NULL\""));
}

#[test]
fn omitted_modifiers_use_source_defaults() {
    let json = r#"{ "name": "Plain", "members": [
        { "kind": "field", "name": "count", "type": "int" },
        { "kind": "method", "name": "Run" }
    ] }"#;
    let decl: TypeDeclaration = serde_json::from_str(json).expect("valid IR");

    let field = &decl.members[0];
    assert_eq!(field.visibility, Visibility::Private);
    assert!(!field.is_static);
    let MemberKind::Field(f) = &field.kind else {
        panic!("expected field");
    };
    assert_eq!(f.mutability, Mutability::Mutable);

    let MemberKind::Method(run) = &decl.members[1].kind else {
        panic!("expected method");
    };
    assert_eq!(run.return_type, "void");
    assert!(run.body.is_empty());
}

#[test]
fn unknown_member_fields_are_rejected() {
    let json = r#"{ "name": "Bad", "members": [
        { "kind": "field", "name": "x", "type": "int", "volatile": true }
    ] }"#;
    assert!(serde_json::from_str::<TypeDeclaration>(json).is_err());
}

#[test]
fn signatures_distinguish_overloads() {
    let decl: TypeDeclaration = serde_json::from_str(FROM_CSHARP).expect("valid IR");
    let sigs: Vec<Signature> = decl.signatures().collect();
    assert_eq!(sigs.len(), 2);
    assert_eq!(sigs[0], Signature::new("Func1", ["int"]));
    assert_eq!(sigs[1].to_string(), "FromCSharp(string)");
    assert_ne!(
        Signature::new("Add", ["int"]),
        Signature::new("Add", ["int", "int"])
    );
}

#[test]
fn visibility_parses_source_and_json_spellings() {
    for vis in Visibility::ALL {
        assert_eq!(vis.as_str().parse::<Visibility>(), Ok(vis));
    }
    assert_eq!(
        "protectedInternal".parse::<Visibility>(),
        Ok(Visibility::ProtectedInternal)
    );
    assert!("friend".parse::<Visibility>().is_err());
}

#[test]
fn file_scope_and_special_modifiers_deserialize() {
    let decl: TypeDeclaration = serde_json::from_str(
        r#"{
            "name": "Shape",
            "special": "abstract",
            "container": "Geometry.Shapes",
            "imports": ["Geometry.Core"],
            "members": [
                { "kind": "method", "name": "Area", "special": "abstract", "returnType": "double" },
                { "kind": "constructor", "name": "Shape", "static": true }
            ]
        }"#,
    )
    .expect("valid IR");

    assert_eq!(decl.special, Some(SpecialModifier::Abstract));
    assert_eq!(decl.container.as_deref(), Some("Geometry.Shapes"));
    assert_eq!(decl.imports, vec!["Geometry.Core"]);
    assert_eq!(decl.members[0].special, Some(SpecialModifier::Abstract));
    assert!(decl.members[1].is_static);
    assert_eq!(decl.members[1].special, None);
}
