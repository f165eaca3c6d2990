//! Property Desugarer
//!
//! Expands each auto-implemented property into a private backing field, a
//! getter and (when the property has one) a setter:
//!
//! ```text
//! public string Name { get; protected set; } = "NULL";
//! ```
//!
//! becomes, in the property's slot and in this order:
//!
//! ```text
//! private String nameBackingField = "NULL";
//! public String getName() { return nameBackingField; }
//! protected void setName(String value) { nameBackingField = value; }
//! ```
//!
//! An abstract property has no storage: only its accessors are generated,
//! without bodies. The property's override flag and special modifier are
//! carried onto every accessor.
//!
//! Declared methods are renamed with the profile's method rule in the same
//! pass, so collision checks compare target-side names. A generated name
//! that is already taken fails with `NameCollision`; nothing is renamed to
//! dodge a clash.

use crate::profile::{AccessLevel, TargetProfile};
use crate::transforms::ir::{
    ClassMember, ConstructorDecl, DesugaredType, FieldDecl, MappedKind, MappedMember,
    MappedProperty, MappedType, MethodBody, MethodDecl, Origin, OverrideSource,
};
use classport_common::ConvertError;
use classport_ir::{Body, Mutability, Parameter, Signature, SpecialModifier};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use tracing::trace;

/// What already occupies a target-side name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Occupant {
    Field,
    Property,
    Method,
    Generated,
}

impl Occupant {
    const fn describe(self) -> &'static str {
        match self {
            Self::Field => "field",
            Self::Property => "property",
            Self::Method => "method",
            Self::Generated => "generated member",
        }
    }
}

type ParamTypes = SmallVec<[String; 4]>;

/// Target-side names in use within one declaration.
#[derive(Default)]
struct NameTable {
    names: FxHashMap<String, Occupant>,
    /// Method name plus parameter types; overloads share a name.
    methods: FxHashSet<(String, ParamTypes)>,
}

impl NameTable {
    fn claim(&mut self, name: &str, occupant: Occupant) {
        self.names.entry(name.to_string()).or_insert(occupant);
    }

    fn claim_method(&mut self, name: &str, param_types: ParamTypes) {
        self.claim(name, Occupant::Method);
        self.methods.insert((name.to_string(), param_types));
    }

    /// A generated field may not share its name with anything.
    fn field_clash(&self, name: &str) -> Option<Occupant> {
        self.names.get(name).copied()
    }

    /// A generated accessor clashes with any non-method of the same name and
    /// with a method of the same name and parameter types.
    fn accessor_clash(&self, name: &str, param_types: &ParamTypes) -> Option<Occupant> {
        match self.names.get(name).copied() {
            None => None,
            Some(Occupant::Method) => self
                .methods
                .contains(&(name.to_string(), param_types.clone()))
                .then_some(Occupant::Method),
            Some(other) => Some(other),
        }
    }
}

pub struct PropertyDesugarer<'a> {
    profile: &'a TargetProfile,
}

impl<'a> PropertyDesugarer<'a> {
    pub const fn new(profile: &'a TargetProfile) -> Self {
        Self { profile }
    }

    pub fn desugar(&self, mapped: MappedType) -> Result<DesugaredType, ConvertError> {
        let MappedType {
            name: type_name,
            access,
            special: type_special,
            scope,
            base_types,
            capabilities,
            members,
        } = mapped;

        let mut table = self.collect_names(&members);
        let mut lowered = Vec::with_capacity(members.len());

        for member in members {
            let MappedMember {
                name,
                access,
                is_static,
                is_override,
                special,
                kind,
            } = member;
            let overrides = is_override.then_some(OverrideSource::Declared);

            match kind {
                MappedKind::Field(field) => lowered.push(ClassMember::Field(FieldDecl {
                    name,
                    access,
                    is_static,
                    ty: field.ty,
                    default: field.default,
                    mutability: field.mutability,
                    origin: Origin::Declared,
                })),
                MappedKind::Method(method) => {
                    lowered.push(ClassMember::Method(MethodDecl {
                        name: self.profile.naming.method(&name),
                        signature: Signature::of(&name, &method.params),
                        access,
                        is_static,
                        overrides,
                        special,
                        return_type: method.return_type,
                        params: method.params,
                        body: body_for(special, method.body),
                        origin: Origin::Declared,
                    }));
                }
                MappedKind::Constructor(ctor) => {
                    lowered.push(ClassMember::Constructor(ConstructorDecl {
                        signature: Signature::of(&name, &ctor.params),
                        access,
                        is_static,
                        overrides,
                        params: ctor.params,
                        body: ctor.body,
                    }));
                }
                MappedKind::Property(prop) => {
                    let flags = AccessorFlags {
                        is_static,
                        overrides,
                        special,
                    };
                    self.expand_property(&type_name, &name, flags, prop, &mut table, &mut lowered)?;
                }
            }
        }

        Ok(DesugaredType {
            name: type_name,
            access,
            special: type_special,
            scope,
            base_types,
            capabilities,
            members: lowered,
        })
    }

    fn collect_names(&self, members: &[MappedMember]) -> NameTable {
        let mut table = NameTable::default();
        for member in members {
            match &member.kind {
                MappedKind::Field(_) => table.claim(&member.name, Occupant::Field),
                MappedKind::Property(_) => table.claim(&member.name, Occupant::Property),
                MappedKind::Method(method) => table.claim_method(
                    &self.profile.naming.method(&member.name),
                    method.params.iter().map(|p| p.ty.clone()).collect(),
                ),
                MappedKind::Constructor(_) => {}
            }
        }
        table
    }

    /// Replace one property with field, getter and optional setter, pushed in
    /// that order so they occupy the property's slot.
    fn expand_property(
        &self,
        type_name: &str,
        property: &str,
        flags: AccessorFlags,
        prop: MappedProperty,
        table: &mut NameTable,
        out: &mut Vec<ClassMember>,
    ) -> Result<(), ConvertError> {
        let AccessorFlags {
            is_static,
            overrides,
            special,
        } = flags;
        let naming = &self.profile.naming;
        let field_name = naming.backing_field(property);
        let getter_name = naming.getter(property);
        let is_abstract = special == Some(SpecialModifier::Abstract);

        if !is_abstract && let Some(existing) = table.field_clash(&field_name) {
            return Err(collision(type_name, property, &field_name, existing));
        }
        if let Some(existing) = table.accessor_clash(&getter_name, &SmallVec::new()) {
            return Err(collision(type_name, property, &getter_name, existing));
        }
        if !is_abstract {
            table.claim(&field_name, Occupant::Generated);
        }
        table.claim_method(&getter_name, SmallVec::new());

        let setter = match prop.setter {
            Some(setter_access) => {
                let setter_name = naming.setter(property);
                let param_types: ParamTypes = std::iter::once(prop.ty.clone()).collect();
                if let Some(existing) = table.accessor_clash(&setter_name, &param_types) {
                    return Err(collision(type_name, property, &setter_name, existing));
                }
                table.claim_method(&setter_name, param_types);
                Some((setter_name, setter_access))
            }
            None => None,
        };

        trace!(
            type_name,
            property,
            backing_field = %field_name,
            read_only = setter.is_none(),
            is_abstract,
            "desugared property"
        );

        let origin = Origin::Generated {
            property: property.to_string(),
        };

        if !is_abstract {
            out.push(ClassMember::Field(FieldDecl {
                name: field_name.clone(),
                access: AccessLevel::Private,
                is_static,
                ty: prop.ty.clone(),
                default: prop.default,
                mutability: Mutability::Mutable,
                origin: origin.clone(),
            }));
        }

        out.push(ClassMember::Method(MethodDecl {
            signature: Signature::new(getter_name.as_str(), std::iter::empty::<String>()),
            name: getter_name,
            access: prop.getter,
            is_static,
            overrides: overrides.clone(),
            special,
            return_type: prop.ty.clone(),
            params: Vec::new(),
            body: if is_abstract {
                MethodBody::Abstract
            } else {
                MethodBody::ReadField {
                    field: field_name.clone(),
                }
            },
            origin: origin.clone(),
        }));

        if let Some((setter_name, setter_access)) = setter {
            let param = Parameter::new(naming.setter_parameter.as_str(), prop.ty.as_str());
            out.push(ClassMember::Method(MethodDecl {
                signature: Signature::of(&setter_name, std::slice::from_ref(&param)),
                name: setter_name,
                access: setter_access,
                is_static,
                overrides,
                special,
                return_type: "void".to_string(),
                params: vec![param],
                body: if is_abstract {
                    MethodBody::Abstract
                } else {
                    MethodBody::WriteField {
                        field: field_name,
                        param: naming.setter_parameter.clone(),
                    }
                },
                origin,
            }));
        }

        Ok(())
    }
}

/// Member-level flags a property hands down to its accessors.
struct AccessorFlags {
    is_static: bool,
    overrides: Option<OverrideSource>,
    special: Option<SpecialModifier>,
}

fn body_for(special: Option<SpecialModifier>, body: Body) -> MethodBody {
    match special {
        Some(SpecialModifier::Abstract) => MethodBody::Abstract,
        _ => MethodBody::Verbatim(body),
    }
}

fn collision(type_name: &str, property: &str, generated: &str, existing: Occupant) -> ConvertError {
    ConvertError::name_collision(
        type_name,
        property,
        generated,
        format!("{} `{generated}`", existing.describe()),
    )
}

#[cfg(test)]
#[path = "tests/property_desugar.rs"]
mod tests;
