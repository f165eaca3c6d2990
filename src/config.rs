//! Profile configuration files.
//!
//! A JSON file names a built-in target and overlays it:
//!
//! ```json
//! {
//!   "target": "java",
//!   "typeMap": { "Guid": "java.util.UUID" },
//!   "knownTypes": ["Customer"],
//!   "visibility": { "privateProtected": "package" },
//!   "fallback": { "fixed": "protected" },
//!   "naming": { "backingFieldPrefix": "m_", "backingFieldSuffix": "", "lowerFirstBackingField": "yes" }
//! }
//! ```

use anyhow::{Context, Result, bail};
use classport_emitter::profile::AccessStyle;
use classport_emitter::{AccessLevel, FallbackPolicy, MethodCase, Target, TargetProfile};
use classport_ir::Visibility;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use std::path::Path;

fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Int(i64),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::Int(1)) => Ok(Some(true)),
        Some(BoolOrString::Int(0)) => Ok(Some(false)),
        Some(BoolOrString::Int(n)) => Err(Error::custom(format!(
            "invalid boolean value: {n}. Expected true, false, 0 or 1"
        ))),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileConfig {
    pub target: String,
    #[serde(default)]
    pub type_map: IndexMap<String, String>,
    #[serde(default)]
    pub known_types: Vec<String>,
    #[serde(default)]
    pub visibility: IndexMap<String, String>,
    #[serde(default)]
    pub fallback: Option<FallbackConfig>,
    #[serde(default)]
    pub naming: Option<NamingConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FallbackConfig {
    Private,
    Reject,
    Fixed(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NamingConfig {
    #[serde(default)]
    pub backing_field_prefix: Option<String>,
    #[serde(default)]
    pub backing_field_suffix: Option<String>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub lower_first_backing_field: Option<bool>,
    #[serde(default)]
    pub getter_prefix: Option<String>,
    #[serde(default)]
    pub setter_prefix: Option<String>,
    #[serde(default)]
    pub method_case: Option<String>,
}

impl ProfileConfig {
    pub fn parse(source: &str) -> Result<Self> {
        serde_json::from_str(source).context("failed to parse profile configuration")
    }

    /// Overlay this configuration on the built-in profile it names.
    pub fn into_profile(self) -> Result<TargetProfile> {
        let target: Target = self.target.parse().map_err(anyhow::Error::msg)?;
        let mut profile = TargetProfile::builtin(target);

        profile.types.extend(self.type_map);
        profile.known_types.extend(self.known_types);

        for (modifier, access) in self.visibility {
            let visibility: Visibility = modifier
                .parse()
                .map_err(anyhow::Error::msg)
                .with_context(|| format!("invalid visibility key '{modifier}'"))?;
            let level = parse_access(&access, &profile)
                .with_context(|| format!("invalid visibility.{modifier}"))?;
            profile.visibility.insert(visibility, level);
        }

        match self.fallback {
            None | Some(FallbackConfig::Private) => {}
            Some(FallbackConfig::Reject) => profile.fallback = FallbackPolicy::Reject,
            Some(FallbackConfig::Fixed(access)) => {
                let level = parse_access(&access, &profile).context("invalid fallback.fixed")?;
                profile.fallback = FallbackPolicy::Fixed(level);
            }
        }

        if let Some(naming) = self.naming {
            apply_naming(&mut profile, naming)?;
        }
        Ok(profile)
    }
}

fn parse_access(value: &str, profile: &TargetProfile) -> Result<AccessLevel> {
    let level: AccessLevel = value.parse().map_err(anyhow::Error::msg)?;
    if level == AccessLevel::Package && profile.syntax.access != AccessStyle::Keyword {
        bail!(
            "access level 'package' has no spelling for target '{}'",
            profile.target
        );
    }
    Ok(level)
}

fn apply_naming(profile: &mut TargetProfile, naming: NamingConfig) -> Result<()> {
    let rules = &mut profile.naming;
    if let Some(prefix) = naming.backing_field_prefix {
        rules.backing_field_prefix = prefix;
    }
    if let Some(suffix) = naming.backing_field_suffix {
        rules.backing_field_suffix = suffix;
    }
    if let Some(lower) = naming.lower_first_backing_field {
        rules.lower_first_backing_field = lower;
    }
    if let Some(prefix) = naming.getter_prefix {
        rules.getter_prefix = prefix;
    }
    if let Some(prefix) = naming.setter_prefix {
        rules.setter_prefix = prefix;
    }
    if let Some(case) = naming.method_case {
        rules.method_case = match case.as_str() {
            "preserve" => MethodCase::Preserve,
            "lowerCamel" => MethodCase::LowerCamel,
            other => bail!("unsupported naming.methodCase '{other}'"),
        };
    }

    if rules.backing_field_prefix.is_empty() && rules.backing_field_suffix.is_empty() {
        bail!("naming.backingFieldPrefix and naming.backingFieldSuffix cannot both be empty");
    }
    if rules.getter_prefix.is_empty() || rules.setter_prefix.is_empty() {
        bail!("naming.getterPrefix and naming.setterPrefix cannot be empty");
    }
    if rules.getter_prefix == rules.setter_prefix {
        bail!("naming.getterPrefix and naming.setterPrefix must differ");
    }
    Ok(())
}

/// Read, parse and validate a profile configuration file.
pub fn load_profile(path: &Path) -> Result<TargetProfile> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read profile configuration: {}", path.display()))?;
    let config = ProfileConfig::parse(&source)
        .with_context(|| format!("in {}", path.display()))?;
    config
        .into_profile()
        .with_context(|| format!("invalid profile configuration: {}", path.display()))
}
