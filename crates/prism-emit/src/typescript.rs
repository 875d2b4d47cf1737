use crate::naming::css_names;
use crate::{block_banner, js_string, Artifact, EmitContext, Emitter};
use prism_core::ResolvedTokens;
use std::fmt::Write as _;

/// A literal-union type of every CSS property the CSS emitter writes, plus a
/// runtime list and type guard.
#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptEmitter;

impl Emitter for TypeScriptEmitter {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn emit(&self, tokens: &ResolvedTokens, ctx: &EmitContext) -> Artifact {
        // Collisions are reported by the CSS emitter.
        let (names, _) = css_names(tokens, &ctx.css.prefix);
        let quoted: Vec<String> = names.iter().map(|n| js_string(&n.name)).collect();

        let mut out = block_banner(ctx);
        out.push('\n');

        if quoted.is_empty() {
            out.push_str("export type TokenName = never;\n\n");
            out.push_str("export const TOKEN_NAMES: readonly TokenName[] = [];\n\n");
        } else {
            out.push_str("export type TokenName =\n");
            for (i, name) in quoted.iter().enumerate() {
                let end = if i + 1 == quoted.len() { ";" } else { "" };
                let _ = writeln!(out, "  | {}{}", name, end);
            }
            out.push('\n');

            out.push_str("export const TOKEN_NAMES: readonly TokenName[] = [\n");
            for name in &quoted {
                let _ = writeln!(out, "  {},", name);
            }
            out.push_str("];\n\n");
        }

        out.push_str("export function isTokenName(value: string): value is TokenName {\n");
        out.push_str("  return (TOKEN_NAMES as readonly string[]).includes(value);\n");
        out.push_str("}\n");

        Artifact::new(out)
    }
}
