use crate::naming::{css_variable_name, kebab_segment};
use crate::{block_banner, js_string, Artifact, EmitContext, EmitWarning, Emitter};
use prism_core::{ResolvedToken, ResolvedTokens};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use tracing::debug;

/// A `theme.extend` fragment for `tailwind.config.js`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TailwindEmitter;

/// Theme section for a top-level namespace, in kebab case.
fn section_for_namespace(namespace: &str) -> Option<&'static str> {
    let section = match namespace {
        "color" | "colors" => "colors",
        "space" | "spacing" => "spacing",
        "radius" | "radii" | "border-radius" => "borderRadius",
        "border-width" => "borderWidth",
        "font-size" => "fontSize",
        "font-weight" => "fontWeight",
        "font" | "font-family" => "fontFamily",
        "line-height" => "lineHeight",
        "letter-spacing" => "letterSpacing",
        "shadow" | "shadows" | "box-shadow" => "boxShadow",
        "opacity" => "opacity",
        "z" | "z-index" => "zIndex",
        _ => return None,
    };
    Some(section)
}

fn section_for_type(ty: &str) -> Option<&'static str> {
    let section = match ty {
        "color" => "colors",
        "shadow" => "boxShadow",
        "fontFamily" => "fontFamily",
        "fontWeight" => "fontWeight",
        "opacity" => "opacity",
        _ => return None,
    };
    Some(section)
}

/// Theme section and key for a token, or `None` if it has no Tailwind home.
fn placement(token: &ResolvedToken) -> Option<(&'static str, String)> {
    let segments: Vec<String> = token.path.split('.').map(kebab_segment).collect();
    let (first, rest) = segments.split_first()?;

    let (section, key_segments) = match section_for_namespace(first) {
        Some(section) => (section, rest),
        None => (section_for_type(token.ty.as_deref()?)?, segments.as_slice()),
    };

    let key = key_segments
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("-");
    let key = if key.is_empty() {
        "DEFAULT".to_string()
    } else {
        key
    };
    Some((section, key))
}

impl Emitter for TailwindEmitter {
    fn name(&self) -> &'static str {
        "tailwind"
    }

    fn emit(&self, tokens: &ResolvedTokens, ctx: &EmitContext) -> Artifact {
        // section -> key -> (path, value)
        let mut theme: BTreeMap<&str, BTreeMap<String, (String, String)>> = BTreeMap::new();
        let mut warnings = Vec::new();

        for token in tokens.iter() {
            let Some((section, key)) = placement(token) else {
                debug!(path = %token.path, "no tailwind section for token");
                continue;
            };
            let value = if ctx.tailwind.use_css_variables {
                format!("var({})", css_variable_name(&token.path, &ctx.css.prefix))
            } else {
                token.value.clone()
            };

            let entries = theme.entry(section).or_default();
            match entries.get(&key) {
                Some((kept, _)) => warnings.push(EmitWarning::TailwindCollision {
                    section: section.to_string(),
                    key,
                    kept: kept.clone(),
                    dropped: token.path.clone(),
                }),
                None => {
                    entries.insert(key, (token.path.clone(), value));
                }
            }
        }

        let mut out = block_banner(ctx);
        out.push('\n');
        out.push_str("export default {\n  theme: {\n    extend: {\n");
        for (section, entries) in &theme {
            let _ = writeln!(out, "      {}: {{", section);
            for (key, (_, value)) in entries {
                let _ = writeln!(out, "        {}: {},", js_string(key), js_string(value));
            }
            out.push_str("      },\n");
        }
        out.push_str("    },\n  },\n};\n");

        Artifact {
            text: out,
            warnings,
        }
    }
}
