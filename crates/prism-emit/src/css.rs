use crate::naming::css_names;
use crate::{block_banner, Artifact, EmitContext, Emitter};
use prism_core::ResolvedTokens;
use std::fmt::Write as _;

/// One custom property per resolved token.
#[derive(Debug, Default, Clone, Copy)]
pub struct CssEmitter;

impl Emitter for CssEmitter {
    fn name(&self) -> &'static str {
        "css"
    }

    fn emit(&self, tokens: &ResolvedTokens, ctx: &EmitContext) -> Artifact {
        let (names, warnings) = css_names(tokens, &ctx.css.prefix);

        let mut out = block_banner(ctx);
        if tokens.unresolved_count() > 0 {
            let _ = writeln!(
                out,
                "/* {} unresolved token(s) omitted */",
                tokens.unresolved_count()
            );
        }
        out.push('\n');

        let _ = writeln!(out, "{} {{", ctx.css.selector);
        for css in &names {
            if let Some(token) = tokens.get(&css.path) {
                let _ = writeln!(out, "  {}: {};", css.name, token.value);
            }
        }
        out.push_str("}\n");

        Artifact {
            text: out,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EmitWarning;
    use prism_core::{resolve_all, FlatToken, FlatTokenMap};

    fn tokens(pairs: &[(&str, &str)]) -> ResolvedTokens {
        let map: FlatTokenMap = pairs
            .iter()
            .map(|(p, v)| (p.to_string(), FlatToken::new(*v)))
            .collect();
        resolve_all(&map)
    }

    #[test]
    fn emits_sorted_declarations() {
        let resolved = tokens(&[
            ("space.md", "16px"),
            ("color.brand.base", "#066a8d"),
            ("button.bg", "{color.brand.base}"),
        ]);
        let artifact = CssEmitter.emit(&resolved, &EmitContext::new("2024-01-01T00:00:00Z"));
        let expected = "\
/**
 * Design tokens. Generated file, do not edit.
 * Generated: 2024-01-01T00:00:00Z
 */

:root {
  --button-bg: #066a8d;
  --color-brand-base: #066a8d;
  --space-md: 16px;
}
";
        assert_eq!(artifact.text, expected);
        assert!(artifact.warnings.is_empty());
    }

    #[test]
    fn unresolved_tokens_are_omitted_and_counted() {
        let resolved = tokens(&[("a", "{missing}"), ("b", "1px")]);
        let artifact = CssEmitter.emit(&resolved, &EmitContext::new("t"));
        assert!(artifact.text.contains("/* 1 unresolved token(s) omitted */"));
        assert!(!artifact.text.contains("--a:"));
        assert!(!artifact.text.contains("undefined"));
        assert!(artifact.text.contains("  --b: 1px;"));
    }

    #[test]
    fn prefix_and_selector_apply() {
        let resolved = tokens(&[("radius.sm", "4px")]);
        let mut ctx = EmitContext::new("t");
        ctx.css.prefix = "ds".into();
        ctx.css.selector = "[data-theme=\"light\"]".into();
        let artifact = CssEmitter.emit(&resolved, &ctx);
        assert!(artifact.text.contains("[data-theme=\"light\"] {\n  --ds-radius-sm: 4px;\n}"));
    }

    #[test]
    fn collisions_warn() {
        let resolved = tokens(&[("fontSize.body", "16px"), ("font-size.body", "14px")]);
        let artifact = CssEmitter.emit(&resolved, &EmitContext::new("t"));
        assert_eq!(artifact.text.matches("--font-size-body").count(), 1);
        assert_eq!(
            artifact.warnings,
            vec![EmitWarning::CssNameCollision {
                name: "--font-size-body".into(),
                kept: "font-size.body".into(),
                dropped: "fontSize.body".into(),
            }]
        );
    }
}
