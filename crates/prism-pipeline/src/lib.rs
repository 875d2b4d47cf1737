//! # Prism Pipeline
//!
//! Runs the whole token build: load the token tree, merge it, generate the
//! configured tonal scales, resolve aliases, emit every artifact, write.
//!
//! Faults in individual files, tokens or families are accumulated into a
//! [`RunReport`] so a single bad input never hides the others. Only setup
//! failures (missing source directory, unserializable snapshot) abort.

pub mod error;
pub mod families;
pub mod loader;
pub mod report;
pub mod writer;

pub use error::{FamilyError, PipelineError, WriteError};
pub use families::{generate_families, FamilyFailure, GeneratedFamily, GeneratedTokens};
pub use loader::{load_token_dir, LoadedTokens};
pub use report::{FileIssue, RunReport};
pub use writer::{compare_output, write_atomic, FileStatus};

use prism_core::{merge, resolve_all, FlatTokenMap, ResolvedTokens};
use prism_data::TokenDocument;
use prism_emit::{
    CssEmitter, EmitContext, Emitter, MarkdownEmitter, TailwindEmitter, TypeScriptEmitter,
};
use prism_schema::PipelineConfig;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Current time in the format written to generated files.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Css,
    TypeScript,
    Tailwind,
    Markdown,
    Scales,
}

impl OutputKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputKind::Css => "css",
            OutputKind::TypeScript => "typescript",
            OutputKind::Tailwind => "tailwind",
            OutputKind::Markdown => "markdown",
            OutputKind::Scales => "scales",
        }
    }
}

/// One output file, fully rendered but not yet written.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedFile {
    pub path: PathBuf,
    pub kind: OutputKind,
    pub contents: String,
}

#[derive(Debug)]
pub struct BuildOutput {
    pub files: Vec<PlannedFile>,
    pub report: RunReport,
    pub resolved: ResolvedTokens,
    pub generated: Vec<GeneratedFamily>,
}

/// Result of comparing planned outputs with what is on disk.
#[derive(Debug)]
pub struct CheckOutcome {
    pub report: RunReport,
    pub stale: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

impl CheckOutcome {
    pub fn is_clean(&self) -> bool {
        self.stale.is_empty() && self.missing.is_empty()
    }

    pub fn is_success(&self) -> bool {
        self.is_clean() && self.report.is_success()
    }
}

/// Token map after merging and family generation, before resolution.
#[derive(Debug)]
struct Prepared {
    map: FlatTokenMap,
    generated: GeneratedTokens,
    report: RunReport,
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn scales_path(&self) -> Option<PathBuf> {
        self.config
            .outputs
            .scales
            .as_deref()
            .map(|p| self.config.output_path(p))
    }

    fn prepare(&self) -> Result<Prepared, PipelineError> {
        let exclude: Vec<PathBuf> = self.scales_path().into_iter().collect();
        let loaded = load_token_dir(&self.config.source, &exclude)?;

        let mut report = RunReport {
            files_loaded: loaded.documents.len(),
            file_errors: loaded.errors,
            ..Default::default()
        };
        for doc in &loaded.documents {
            for issue in &doc.issues {
                warn!(file = %doc.source.display(), path = %issue.path, "{}", issue.message);
                report.structural_issues.push(FileIssue {
                    file: doc.source.clone(),
                    issue: issue.clone(),
                });
            }
        }

        let merged = merge(&loaded.documents);
        report.duplicates = merged.duplicates;

        let mut generated = generate_families(
            &self.config.families,
            &self.config.step_tables,
            &merged.map,
            self.config.color_format,
        );
        report.families_generated = generated.families.iter().map(|f| f.name.clone()).collect();
        report.family_failures = std::mem::take(&mut generated.failures);

        let mut map = merged.map;
        map.extend(std::mem::take(&mut generated.tokens));

        Ok(Prepared {
            map,
            generated,
            report,
        })
    }

    /// Loaded, merged and generated tokens, without resolving them.
    pub fn token_map(&self) -> Result<(FlatTokenMap, RunReport), PipelineError> {
        let prepared = self.prepare()?;
        Ok((prepared.map, prepared.report))
    }

    /// Produces every configured output in memory.
    #[instrument(level = "info", skip(self), fields(source = %self.config.source.display()))]
    pub fn build(&self, generated_at: &str) -> Result<BuildOutput, PipelineError> {
        let Prepared {
            map,
            generated,
            mut report,
        } = self.prepare()?;

        let resolved = resolve_all(&map);
        report.resolved = resolved.resolved_count();
        report.unresolved = resolved.unresolved.clone();

        let ctx = EmitContext {
            generated_at: generated_at.to_string(),
            css: self.config.css.clone(),
            tailwind: self.config.tailwind.clone(),
        };

        let outputs = &self.config.outputs;
        let emitters: [(OutputKind, Option<&Path>, &dyn Emitter); 4] = [
            (OutputKind::Css, outputs.css.as_deref(), &CssEmitter),
            (OutputKind::TypeScript, outputs.typescript.as_deref(), &TypeScriptEmitter),
            (OutputKind::Tailwind, outputs.tailwind.as_deref(), &TailwindEmitter),
            (OutputKind::Markdown, outputs.markdown.as_deref(), &MarkdownEmitter),
        ];

        let mut files = Vec::new();
        for (kind, relative, emitter) in emitters {
            let Some(relative) = relative else {
                continue;
            };
            let artifact = emitter.emit(&resolved, &ctx);
            for warning in &artifact.warnings {
                warn!(emitter = emitter.name(), "{}", warning);
            }
            report.warnings.extend(artifact.warnings);
            files.push(PlannedFile {
                path: self.config.output_path(relative),
                kind,
                contents: artifact.text,
            });
        }

        if let Some(path) = self.scales_path() {
            let doc = TokenDocument::new(path.clone(), generated.snapshot);
            let mut contents = doc.to_json_string()?;
            contents.push('\n');
            files.push(PlannedFile {
                path,
                kind: OutputKind::Scales,
                contents,
            });
        }

        Ok(BuildOutput {
            files,
            report,
            resolved,
            generated: generated.families,
        })
    }

    /// Builds and writes every output. Write failures are recorded per file.
    pub fn run(&self, generated_at: &str) -> Result<BuildOutput, PipelineError> {
        let mut output = self.build(generated_at)?;

        for file in &output.files {
            match write_atomic(&file.path, &file.contents) {
                Ok(()) => {
                    info!(kind = file.kind.as_str(), path = %file.path.display(), "wrote output");
                    output.report.written.push(file.path.clone());
                }
                Err(e) => {
                    warn!("{}", e);
                    output.report.write_failures.push(e);
                }
            }
        }

        info!(
            resolved = output.report.resolved,
            unresolved = output.report.unresolved.len(),
            written = output.report.written.len(),
            "pipeline finished"
        );
        Ok(output)
    }

    /// Builds in memory and compares against the files on disk.
    pub fn check(&self, generated_at: &str) -> Result<CheckOutcome, PipelineError> {
        let output = self.build(generated_at)?;
        let mut outcome = CheckOutcome {
            report: output.report,
            stale: Vec::new(),
            missing: Vec::new(),
        };

        for file in &output.files {
            match compare_output(&file.path, &file.contents) {
                FileStatus::UpToDate => {}
                FileStatus::Stale => {
                    warn!(path = %file.path.display(), "output is stale");
                    outcome.stale.push(file.path.clone());
                }
                FileStatus::Missing => {
                    warn!(path = %file.path.display(), "output is missing");
                    outcome.missing.push(file.path.clone());
                }
            }
        }
        Ok(outcome)
    }
}
