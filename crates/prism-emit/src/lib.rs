//! # Prism Emit
//!
//! Serializes resolved tokens into the artifacts consumed by the UI layer.
//!
//! ## Key Types
//! - [`Emitter`]: one output format.
//! - [`EmitContext`]: timestamp and per-format options shared by all emitters.
//! - [`Artifact`]: the emitted text plus any warnings.
//!
//! Output is deterministic: the same tokens and the same timestamp produce the
//! same bytes. The timestamp sits on a single line marked with
//! [`GENERATED_MARKER`] so it can be ignored when comparing runs.

pub mod css;
pub mod markdown;
pub mod naming;
pub mod tailwind;
pub mod typescript;
pub mod warning;

pub use css::CssEmitter;
pub use markdown::MarkdownEmitter;
pub use naming::{css_names, css_variable_name, CssName};
pub use tailwind::TailwindEmitter;
pub use typescript::TypeScriptEmitter;
pub use warning::EmitWarning;

use prism_core::ResolvedTokens;
use serde::{Deserialize, Serialize};

/// Prefix of the line that carries the generation timestamp.
pub const GENERATED_MARKER: &str = "Generated: ";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CssOptions {
    /// Inserted after `--` in every property name.
    pub prefix: String,
    pub selector: String,
}

impl Default for CssOptions {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            selector: ":root".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TailwindOptions {
    /// Emit `var(--name)` instead of the literal value.
    pub use_css_variables: bool,
}

impl Default for TailwindOptions {
    fn default() -> Self {
        Self {
            use_css_variables: true,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct EmitContext {
    pub generated_at: String,
    pub css: CssOptions,
    pub tailwind: TailwindOptions,
}

impl EmitContext {
    pub fn new(generated_at: impl Into<String>) -> Self {
        Self {
            generated_at: generated_at.into(),
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Artifact {
    pub text: String,
    pub warnings: Vec<EmitWarning>,
}

impl Artifact {
    pub fn new(text: String) -> Self {
        Self {
            text,
            warnings: Vec::new(),
        }
    }
}

/// A serializer for one output format.
pub trait Emitter {
    /// Short name used in logs and reports (`css`, `typescript`, …).
    fn name(&self) -> &'static str;

    fn emit(&self, tokens: &ResolvedTokens, ctx: &EmitContext) -> Artifact;
}

/// `/** … */` banner shared by the CSS, TypeScript and JavaScript outputs.
pub(crate) fn block_banner(ctx: &EmitContext) -> String {
    format!(
        "/**\n * Design tokens. Generated file, do not edit.\n * {}{}\n */\n",
        GENERATED_MARKER, ctx.generated_at
    )
}

/// Drops the timestamp line so two runs can be compared.
///
/// Only the first banner line (` * Generated: ` or `<!-- Generated: `) is
/// removed; the marker text anywhere else is content.
pub fn strip_timestamp(text: &str) -> String {
    let mut stripped = false;
    text.lines()
        .filter(|line| {
            if stripped || !is_timestamp_line(line) {
                return true;
            }
            stripped = true;
            false
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_timestamp_line(line: &str) -> bool {
    let banner = line
        .strip_prefix(" * ")
        .or_else(|| line.strip_prefix("<!-- "));
    banner.is_some_and(|rest| rest.starts_with(GENERATED_MARKER))
}

/// Quotes a string for JavaScript/TypeScript source.
pub(crate) fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", s))
}
