//! # Prism Tokens
//!
//! A design-token build pipeline. Token files in the W3C draft shape are
//! flattened into dot paths, aliases (`{color.brand.500}`) are resolved,
//! tonal color scales are generated in OKLCH from single anchor colors, and
//! the result is written as CSS custom properties, a TypeScript name union,
//! a Tailwind theme extension and a Markdown reference.
//!
//! The work is split across crates, re-exported here:
//! - [`data`]: token JSON model and parsing.
//! - [`core`]: flattening, merging and alias resolution.
//! - [`scale`]: OKLCH color parsing and tonal scale generation.
//! - [`emit`]: output serializers.
//! - [`schema`]: pipeline configuration.
//! - [`pipeline`]: the end-to-end run and its report.
//!
//! ```
//! use prism_tokens::core::{resolve, FlatToken, FlatTokenMap};
//!
//! let mut map = FlatTokenMap::new();
//! map.insert("color.brand.700", FlatToken::new("#066a8d"));
//! map.insert("button.bg", FlatToken::new("{color.brand.700}"));
//!
//! assert_eq!(resolve("{button.bg}", &map).as_deref(), Some("#066a8d"));
//! ```

pub use prism_core as core;
pub use prism_data as data;
pub use prism_emit as emit;
pub use prism_pipeline as pipeline;
pub use prism_scale as scale;
pub use prism_schema as schema;

pub use prism_core::{resolve, resolve_all, FlatTokenMap, ResolvedTokens};
pub use prism_pipeline::{Pipeline, RunReport};
pub use prism_scale::{generate_scale, TonalScale};
pub use prism_schema::PipelineConfig;

use anyhow::{Context, Result};
use std::path::Path;

/// Loads `config_path` and runs the full pipeline, writing every output.
pub fn build_from_config(config_path: &Path) -> Result<RunReport> {
    let config = PipelineConfig::load(config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    let output = Pipeline::new(config)
        .run(&pipeline::timestamp_now())
        .context("token build failed")?;
    Ok(output.report)
}
