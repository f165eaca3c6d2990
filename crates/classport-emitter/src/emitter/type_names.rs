//! Source-to-target type-name lookup.
//!
//! Resolution order: the profile's type table, then `T[]` arrays (element
//! translated, wrapped in the profile's array format), then names known to
//! pass through unchanged. Anything else is unknown.

use crate::profile::TargetProfile;
use rustc_hash::FxHashSet;

pub struct TypeMapper<'a> {
    profile: &'a TargetProfile,
    known: FxHashSet<&'a str>,
}

impl<'a> TypeMapper<'a> {
    pub fn new(profile: &'a TargetProfile) -> Self {
        Self {
            profile,
            known: FxHashSet::default(),
        }
    }

    /// Add names that translate to themselves, on top of the profile's
    /// `known_types`.
    pub fn with_known(mut self, names: impl IntoIterator<Item = &'a str>) -> Self {
        self.known.extend(names);
        self
    }

    pub fn translate(&self, source: &str) -> Option<String> {
        let source = source.trim();
        if let Some(mapped) = self.profile.types.get(source) {
            return Some(mapped.clone());
        }
        if let Some(element) = source.strip_suffix("[]") {
            let element = self.translate(element)?;
            return Some(self.profile.array_format.replace("{}", &element));
        }
        if self.known.contains(source) || self.profile.known_types.contains(source) {
            return Some(source.to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables() {
        let java = TargetProfile::java();
        let cpp = TargetProfile::cpp();
        let python = TargetProfile::python();
        assert_eq!(TypeMapper::new(&java).translate("string").as_deref(), Some("String"));
        assert_eq!(TypeMapper::new(&java).translate("bool").as_deref(), Some("boolean"));
        assert_eq!(TypeMapper::new(&cpp).translate("int").as_deref(), Some("int32_t"));
        assert_eq!(TypeMapper::new(&python).translate("void").as_deref(), Some("None"));
    }

    #[test]
    fn arrays_translate_element_wise() {
        let java = TargetProfile::java();
        let cpp = TargetProfile::cpp();
        let python = TargetProfile::python();
        assert_eq!(TypeMapper::new(&java).translate("int[]").as_deref(), Some("int[]"));
        assert_eq!(
            TypeMapper::new(&cpp).translate("string[]").as_deref(),
            Some("std::vector<std::string>")
        );
        assert_eq!(
            TypeMapper::new(&python).translate("int[][]").as_deref(),
            Some("list[list[int]]")
        );
    }

    #[test]
    fn known_names_pass_through() {
        let mut java = TargetProfile::java();
        java.known_types.insert("java.util.UUID".to_string());
        let mapper = TypeMapper::new(&java).with_known(["Base"]);
        assert_eq!(mapper.translate("Base").as_deref(), Some("Base"));
        assert_eq!(mapper.translate("Base[]").as_deref(), Some("Base[]"));
        assert_eq!(
            mapper.translate("java.util.UUID").as_deref(),
            Some("java.util.UUID")
        );
    }

    #[test]
    fn unknown_names_miss() {
        let java = TargetProfile::java();
        let mapper = TypeMapper::new(&java);
        assert_eq!(mapper.translate("Customer"), None);
        assert_eq!(mapper.translate("Customer[]"), None);
    }
}
