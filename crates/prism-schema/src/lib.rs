use prism_emit::{CssOptions, TailwindOptions};
use prism_scale::{family_preset, step_table_preset, ColorFormat, ScaleParams, StepTable};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "prism.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("family `{0}` is defined more than once")]
    DuplicateFamily(String),
    #[error("family `{family}`: unknown preset `{preset}`")]
    UnknownPreset { family: String, preset: String },
    #[error("family `{family}`: unknown step table `{table}`")]
    UnknownStepTable { family: String, table: String },
    #[error("family `{family}` has no step table; set `steps` or a `preset`")]
    MissingSteps { family: String },
    #[error("family `{family}` has no anchor step; set `anchor_step` or a `preset`")]
    MissingAnchorStep { family: String },
}

/// Top-level pipeline configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory scanned recursively for `*.json` token files.
    pub source: PathBuf,
    /// Directory the outputs are written to.
    pub out_dir: PathBuf,
    pub outputs: OutputPaths,
    /// Notation of generated scale colors.
    pub color_format: ColorFormat,
    pub css: CssOptions,
    pub tailwind: TailwindOptions,
    /// Named step tables, in addition to the built-in presets.
    pub step_tables: BTreeMap<String, StepTable>,
    pub families: Vec<FamilyConfig>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from("tokens"),
            out_dir: PathBuf::from("dist"),
            outputs: OutputPaths::default(),
            color_format: ColorFormat::default(),
            css: CssOptions::default(),
            tailwind: TailwindOptions::default(),
            step_tables: BTreeMap::new(),
            families: Vec::new(),
        }
    }
}

/// Output file names relative to `out_dir`. `None` disables an output.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputPaths {
    pub css: Option<PathBuf>,
    pub typescript: Option<PathBuf>,
    pub tailwind: Option<PathBuf>,
    pub markdown: Option<PathBuf>,
    /// JSON snapshot of the generated scale tokens.
    pub scales: Option<PathBuf>,
}

impl Default for OutputPaths {
    fn default() -> Self {
        Self {
            css: Some(PathBuf::from("tokens.css")),
            typescript: Some(PathBuf::from("tokens.ts")),
            tailwind: Some(PathBuf::from("tailwind.tokens.js")),
            markdown: Some(PathBuf::from("TOKENS.md")),
            scales: None,
        }
    }
}

/// Step table reference: a preset/custom table name or an inline table.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum StepsSpec {
    Named(String),
    Inline(StepTable),
}

/// One tonal scale to generate.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FamilyConfig {
    pub name: String,
    /// Literal color or alias to an existing token.
    pub anchor: String,
    /// Family preset supplying defaults (`brand`, `accent`, `status`, `neutral`).
    /// Defaults to the preset with the family's name, if any.
    #[serde(default)]
    pub preset: Option<String>,
    /// Token path prefix of the generated steps (default `color.<name>`).
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub steps: Option<StepsSpec>,
    #[serde(default)]
    pub anchor_step: Option<String>,
    #[serde(default)]
    pub chroma_reduction: Option<f64>,
    #[serde(default)]
    pub hue_shift: Option<f64>,
    #[serde(default)]
    pub neutral: Option<bool>,
}

/// A family with every default filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedFamily {
    pub name: String,
    pub anchor: String,
    pub path: String,
    pub anchor_step: String,
    pub steps: StepTable,
    pub params: ScaleParams,
}

impl FamilyConfig {
    pub fn new(name: impl Into<String>, anchor: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            anchor: anchor.into(),
            preset: None,
            path: None,
            steps: None,
            anchor_step: None,
            chroma_reduction: None,
            hue_shift: None,
            neutral: None,
        }
    }

    /// Fills in defaults from the preset and looks up named step tables.
    pub fn resolve(
        &self,
        custom_tables: &BTreeMap<String, StepTable>,
    ) -> Result<ResolvedFamily, ConfigError> {
        let preset = match &self.preset {
            Some(name) => Some(family_preset(name).ok_or_else(|| ConfigError::UnknownPreset {
                family: self.name.clone(),
                preset: name.clone(),
            })?),
            None => family_preset(&self.name),
        };

        let steps = match (&self.steps, preset) {
            (Some(StepsSpec::Inline(table)), _) => table.clone(),
            (Some(StepsSpec::Named(name)), _) => self.lookup_table(name, custom_tables)?,
            (None, Some(p)) => self.lookup_table(p.step_table, custom_tables)?,
            (None, None) => {
                return Err(ConfigError::MissingSteps {
                    family: self.name.clone(),
                })
            }
        };

        // An explicitly chosen table supplies its own anchor: its only zero-offset step.
        let table_anchor = self.steps.as_ref().and_then(|_| zero_offset_step(&steps));
        let anchor_step = self
            .anchor_step
            .clone()
            .or(table_anchor)
            .or_else(|| preset.map(|p| p.anchor_step.to_string()))
            .ok_or_else(|| ConfigError::MissingAnchorStep {
                family: self.name.clone(),
            })?;

        let base = preset.map(|p| p.params).unwrap_or_default();
        let params = ScaleParams {
            chroma_reduction: self.chroma_reduction.unwrap_or(base.chroma_reduction),
            hue_shift: self.hue_shift.unwrap_or(base.hue_shift),
            neutral: self.neutral.unwrap_or(base.neutral),
        };

        Ok(ResolvedFamily {
            name: self.name.clone(),
            anchor: self.anchor.clone(),
            path: self
                .path
                .clone()
                .unwrap_or_else(|| format!("color.{}", self.name)),
            anchor_step,
            steps,
            params,
        })
    }

    fn lookup_table(
        &self,
        name: &str,
        custom_tables: &BTreeMap<String, StepTable>,
    ) -> Result<StepTable, ConfigError> {
        custom_tables
            .get(name)
            .cloned()
            .or_else(|| step_table_preset(name))
            .ok_or_else(|| ConfigError::UnknownStepTable {
                family: self.name.clone(),
                table: name.to_string(),
            })
    }
}

fn zero_offset_step(table: &StepTable) -> Option<String> {
    let mut zeros = table.iter().filter(|(_, offset)| *offset == 0.0);
    match (zeros.next(), zeros.next()) {
        (Some((name, _)), None) => Some(name.to_string()),
        _ => None,
    }
}

impl PipelineConfig {
    /// Loads a config file. Relative paths inside it are relative to the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json_str(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.source = base.join(&config.source);
            config.out_dir = base.join(&config.out_dir);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Checks invariants that span families. Per-family problems surface when
    /// the family is resolved so that other families still run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for family in &self.families {
            if !seen.insert(family.name.as_str()) {
                return Err(ConfigError::DuplicateFamily(family.name.clone()));
            }
        }
        Ok(())
    }

    pub fn output_path(&self, relative: &Path) -> PathBuf {
        self.out_dir.join(relative)
    }
}
