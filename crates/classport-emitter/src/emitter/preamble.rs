//! File preamble: header lines, container statement and import lines.

use crate::profile::PreambleRules;
use indexmap::IndexMap;

/// True when `token` occurs in `text` and is not part of a longer identifier.
pub fn contains_token(text: &str, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    let is_ident = |c: char| c.is_alphanumeric() || c == '_';
    let starts_ident = token.starts_with(is_ident);
    let ends_ident = token.ends_with(is_ident);

    text.match_indices(token).any(|(at, _)| {
        let before = text[..at].chars().next_back();
        let after = text[at + token.len()..].chars().next();
        !(starts_ident && before.is_some_and(is_ident))
            && !(ends_ident && after.is_some_and(is_ident))
    })
}

/// Import lines for library features the rendered class uses, one line per
/// module, in the order the profile lists them.
pub fn feature_imports(rules: &PreambleRules, class_text: &str) -> Vec<String> {
    let mut modules: IndexMap<&str, Vec<&str>> = IndexMap::new();
    for feature in &rules.feature_imports {
        if !feature
            .triggers
            .iter()
            .any(|trigger| contains_token(class_text, trigger))
        {
            continue;
        }
        let names = modules.entry(feature.module.as_str()).or_default();
        if let Some(name) = &feature.name
            && !names.contains(&name.as_str())
        {
            names.push(name.as_str());
        }
    }
    modules
        .into_iter()
        .map(|(module, names)| {
            rules
                .feature_import_format
                .replace("{module}", module)
                .replace("{names}", &names.join(", "))
        })
        .collect()
}

/// Import lines for the modules a declaration names, in declaration order.
pub fn declared_imports(rules: &PreambleRules, imports: &[String]) -> Vec<String> {
    let mut seen = Vec::with_capacity(imports.len());
    for import in imports {
        let path = import.trim().replace('.', &rules.import_separator);
        if !path.is_empty() && !seen.contains(&path) {
            seen.push(path);
        }
    }
    seen.into_iter()
        .map(|path| rules.import_format.replace("{}", &path))
        .collect()
}
