//! Alias syntax: a value of the form `{dotted.path}` refers to another token.

use once_cell::sync::Lazy;
use regex::Regex;

static ALIAS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{(.+)\}$").expect("alias pattern is a valid regex"));

/// Returns the referenced path if `value` is an alias.
pub fn parse_alias(value: &str) -> Option<&str> {
    ALIAS_RE
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn is_alias(value: &str) -> bool {
    parse_alias(value).is_some()
}

pub fn format_alias(path: &str) -> String {
    format!("{{{}}}", path)
}
