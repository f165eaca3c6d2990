//! Modifier Mapper
//!
//! Maps source access modifiers onto the target's access levels using the
//! profile's table. A modifier missing from the table goes through the
//! profile's fallback policy; only `FallbackPolicy::Reject` turns a gap into
//! `UnmappableModifier`.
//!
//! Special modifiers (`abstract`, `virtual`, `sealed`) and static
//! constructors are checked here too, against what the target can spell.

use crate::profile::{AccessLevel, FallbackPolicy, StaticInitializer, TargetProfile};
use crate::transforms::ir::{FileScope, MappedKind, MappedMember, MappedProperty, MappedType};
use classport_common::ConvertError;
use classport_ir::{Member, MemberKind, SpecialModifier, TypeDeclaration, Visibility};
use tracing::trace;

pub struct ModifierMapper<'a> {
    profile: &'a TargetProfile,
}

impl<'a> ModifierMapper<'a> {
    pub const fn new(profile: &'a TargetProfile) -> Self {
        Self { profile }
    }

    /// Table lookup, then fallback. `None` only under `FallbackPolicy::Reject`.
    pub fn lookup(&self, visibility: Visibility) -> Option<AccessLevel> {
        if let Some(&level) = self.profile.visibility.get(&visibility) {
            return Some(level);
        }
        let fallback = match self.profile.fallback {
            FallbackPolicy::Private => Some(AccessLevel::Private),
            FallbackPolicy::Fixed(level) => Some(level),
            FallbackPolicy::Reject => None,
        };
        trace!(
            target_lang = %self.profile.target,
            modifier = %visibility,
            ?fallback,
            "modifier not in table, applying fallback"
        );
        fallback
    }

    fn map(
        &self,
        type_name: &str,
        member: Option<&str>,
        visibility: Visibility,
    ) -> Result<AccessLevel, ConvertError> {
        self.lookup(visibility).ok_or_else(|| {
            ConvertError::unmappable_modifier(type_name, member, visibility.as_str())
        })
    }

    fn check_class_special(
        &self,
        type_name: &str,
        special: Option<SpecialModifier>,
    ) -> Result<(), ConvertError> {
        match special {
            Some(special) if !self.profile.syntax.special.classes.contains_key(&special) => Err(
                ConvertError::unmappable_modifier(type_name, None, special.as_str()),
            ),
            _ => Ok(()),
        }
    }

    /// Special modifiers are only meaningful on methods and properties.
    fn check_member_special(&self, type_name: &str, member: &Member) -> Result<(), ConvertError> {
        let Some(special) = member.special else {
            return Ok(());
        };
        let applies = matches!(
            member.kind,
            MemberKind::Method(_) | MemberKind::Property(_)
        );
        if applies && self.profile.syntax.special.methods.contains_key(&special) {
            return Ok(());
        }
        Err(ConvertError::unmappable_modifier(
            type_name,
            Some(&member.name),
            special.as_str(),
        ))
    }

    /// A static constructor takes no parameters and needs a target spelling.
    fn check_static_constructor(
        &self,
        type_name: &str,
        member: &Member,
    ) -> Result<(), ConvertError> {
        let MemberKind::Constructor(ctor) = &member.kind else {
            return Ok(());
        };
        if !member.is_static {
            return Ok(());
        }
        if self.profile.syntax.static_initializer == StaticInitializer::Unsupported
            || !ctor.params.is_empty()
        {
            return Err(ConvertError::unmappable_modifier(
                type_name,
                Some(&member.name),
                "static",
            ));
        }
        Ok(())
    }

    /// Map the type's own modifier and every member's modifiers.
    pub fn map_type(&self, decl: TypeDeclaration) -> Result<MappedType, ConvertError> {
        let TypeDeclaration {
            name,
            visibility,
            special,
            container,
            imports,
            base_types,
            capabilities,
            members,
        } = decl;

        let access = self.map(&name, None, visibility)?;
        self.check_class_special(&name, special)?;
        let mut mapped = Vec::with_capacity(members.len());

        for member in members {
            let access = self.map(&name, Some(&member.name), member.visibility)?;
            self.check_member_special(&name, &member)?;
            self.check_static_constructor(&name, &member)?;
            let kind = match member.kind {
                MemberKind::Field(field) => MappedKind::Field(field),
                MemberKind::Method(method) => MappedKind::Method(method),
                MemberKind::Constructor(ctor) => MappedKind::Constructor(ctor),
                MemberKind::Property(prop) => {
                    let getter_visibility = prop.getter.resolve(member.visibility);
                    let getter = self.map(&name, Some(&member.name), getter_visibility)?;
                    let setter = prop
                        .setter
                        .as_ref()
                        .map(|setter| {
                            self.map(&name, Some(&member.name), setter.resolve(member.visibility))
                        })
                        .transpose()?;
                    MappedKind::Property(MappedProperty {
                        ty: prop.ty,
                        getter,
                        setter,
                        default: prop.default,
                    })
                }
            };
            mapped.push(MappedMember {
                name: member.name,
                access,
                is_static: member.is_static,
                is_override: member.is_override,
                special: member.special,
                kind,
            });
        }

        Ok(MappedType {
            name,
            access,
            special,
            scope: FileScope { container, imports },
            base_types,
            capabilities: capabilities.into_iter().collect(),
            members: mapped,
        })
    }
}

#[cfg(test)]
#[path = "tests/modifier_map.rs"]
mod tests;
