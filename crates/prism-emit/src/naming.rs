use crate::warning::EmitWarning;
use heck::ToKebabCase;
use prism_core::ResolvedTokens;
use std::collections::BTreeMap;

/// Kebab-cases one path segment; separators other than letters and digits collapse to `-`.
pub fn kebab_segment(segment: &str) -> String {
    segment.to_kebab_case()
}

/// `color.brand.700` -> `--{prefix-}color-brand-700`.
pub fn css_variable_name(path: &str, prefix: &str) -> String {
    let parts: Vec<String> = std::iter::once(prefix)
        .chain(path.split('.'))
        .map(kebab_segment)
        .filter(|s| !s.is_empty())
        .collect();
    format!("--{}", parts.join("-"))
}

/// A CSS custom property and the token path it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssName {
    pub name: String,
    pub path: String,
}

/// The emitted CSS names, sorted by name.
///
/// When two paths map to one name the first path (in path order) is kept.
pub fn css_names(tokens: &ResolvedTokens, prefix: &str) -> (Vec<CssName>, Vec<EmitWarning>) {
    let mut by_name: BTreeMap<String, String> = BTreeMap::new();
    let mut warnings = Vec::new();

    for token in tokens.iter() {
        let name = css_variable_name(&token.path, prefix);
        match by_name.get(&name) {
            Some(kept) => warnings.push(EmitWarning::CssNameCollision {
                name,
                kept: kept.clone(),
                dropped: token.path.clone(),
            }),
            None => {
                by_name.insert(name, token.path.clone());
            }
        }
    }

    let names = by_name
        .into_iter()
        .map(|(name, path)| CssName { name, path })
        .collect();
    (names, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_kebab_cased() {
        assert_eq!(css_variable_name("color.brand.700", ""), "--color-brand-700");
        assert_eq!(css_variable_name("fontSize.body", ""), "--font-size-body");
        assert_eq!(css_variable_name("space.2xl", ""), "--space-2xl");
        assert_eq!(css_variable_name("button.bg", "ds"), "--ds-button-bg");
        assert_eq!(css_variable_name("Button.Primary_BG", ""), "--button-primary-bg");
    }
}
