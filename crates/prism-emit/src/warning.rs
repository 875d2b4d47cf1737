use thiserror::Error;

/// A problem an emitter worked around. Surfaced to the caller, never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitWarning {
    #[error("`{kept}` and `{dropped}` both map to CSS property `{name}`; `{dropped}` was skipped")]
    CssNameCollision {
        name: String,
        kept: String,
        dropped: String,
    },
    #[error("`{kept}` and `{dropped}` both map to Tailwind key `{section}.{key}`; `{dropped}` was skipped")]
    TailwindCollision {
        section: String,
        key: String,
        kept: String,
        dropped: String,
    },
}
