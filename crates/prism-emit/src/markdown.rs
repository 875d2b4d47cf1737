use crate::naming::css_variable_name;
use crate::{Artifact, EmitContext, Emitter, GENERATED_MARKER};
use prism_core::{ResolvedToken, ResolvedTokens};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Reference tables grouped by top-level namespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownEmitter;

fn cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

fn code(s: &str) -> String {
    if s.is_empty() {
        String::new()
    } else {
        format!("`{}`", cell(s))
    }
}

impl Emitter for MarkdownEmitter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn emit(&self, tokens: &ResolvedTokens, ctx: &EmitContext) -> Artifact {
        let mut groups: BTreeMap<&str, Vec<&ResolvedToken>> = BTreeMap::new();
        for token in tokens.iter() {
            let namespace = token.path.split('.').next().unwrap_or_default();
            groups.entry(namespace).or_default().push(token);
        }

        let mut out = String::from("# Design Tokens\n\n");
        let _ = writeln!(out, "<!-- {}{} -->\n", GENERATED_MARKER, ctx.generated_at);
        let _ = writeln!(
            out,
            "{} tokens in {} groups, {} unresolved.\n",
            tokens.resolved_count(),
            groups.len(),
            tokens.unresolved_count()
        );

        for (namespace, entries) in &groups {
            let _ = writeln!(out, "## {}\n", cell(namespace));
            out.push_str("| Token | CSS variable | Value | Alias | Type | Description |\n");
            out.push_str("| --- | --- | --- | --- | --- | --- |\n");
            for token in entries {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} | {} | {} | {} |",
                    code(&token.path),
                    code(&css_variable_name(&token.path, &ctx.css.prefix)),
                    code(&token.value),
                    code(token.alias.as_deref().unwrap_or_default()),
                    cell(token.ty.as_deref().unwrap_or_default()),
                    cell(token.description.as_deref().unwrap_or_default()),
                );
            }
            out.push('\n');
        }

        if !tokens.unresolved.is_empty() {
            out.push_str("## Unresolved\n\n");
            out.push_str("| Token | Reference | Problem |\n");
            out.push_str("| --- | --- | --- |\n");
            for u in &tokens.unresolved {
                let _ = writeln!(
                    out,
                    "| {} | {} | {} |",
                    code(&u.path),
                    code(&u.reference),
                    cell(&u.error.to_string())
                );
            }
            out.push('\n');
        }

        Artifact::new(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::{resolve_all, FlatToken, FlatTokenMap};

    #[test]
    fn groups_by_namespace() {
        let mut map = FlatTokenMap::new();
        map.insert("color.brand.700", FlatToken::new("#066a8d").with_type("color"));
        map.insert("button.bg", FlatToken::new("{color.brand.700}"));
        let mut shadow = FlatToken::new("0 1px 2px rgba(0,0,0,.2)");
        shadow.description = Some("Raised | card".into());
        map.insert("shadow.sm", shadow);
        map.insert("broken", FlatToken::new("{nope}"));

        let artifact = MarkdownEmitter.emit(&resolve_all(&map), &EmitContext::new("t"));
        let text = &artifact.text;

        assert!(text.contains("<!-- Generated: t -->"));
        assert!(text.contains("3 tokens in 3 groups, 1 unresolved."));
        let button = text.find("## button").unwrap();
        let color = text.find("## color").unwrap();
        let shadow = text.find("## shadow").unwrap();
        assert!(button < color && color < shadow);

        assert!(text.contains(
            "| `button.bg` | `--button-bg` | `#066a8d` | `{color.brand.700}` | color |  |"
        ));
        assert!(text.contains("Raised \\| card"));
        assert!(text.contains("| `broken` | `{nope}` | reference to unknown token `nope` |"));
    }
}
