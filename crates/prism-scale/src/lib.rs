//! # Prism Scale
//!
//! Perceptual color scales for design tokens.
//!
//! A family of colors (`50` … `900`) is derived from a single anchor literal
//! in OKLCH: lightness follows a caller-supplied offset table, chroma falls
//! off parabolically away from the anchor and hue can drift slightly. The
//! anchor step always reproduces the input.
//!
//! ```rust
//! use prism_scale::{generate_scale, StepTable};
//!
//! let table = StepTable::new([("700", 0.0), ("800", -8.0), ("900", -15.0)]);
//! let scale = generate_scale("#066a8d", "700", &table, 0.7, 0.0).unwrap();
//! assert_eq!(scale.steps.len(), 3);
//! ```

pub mod color;
pub mod error;
pub mod presets;
pub mod scale;

pub use color::{parse_color, ColorAnchor, ColorFormat, OklchColor};
pub use error::ScaleError;
pub use presets::{family_preset, step_table_preset, FamilyPreset};
pub use scale::{generate, generate_neutral_scale, generate_scale, ScaleParams, ScaleStep, StepTable, TonalScale};
