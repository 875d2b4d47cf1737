use crate::error::PipelineError;
use prism_data::{DataError, TokenDocument};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

/// Documents read from a token directory, plus the files that failed.
#[derive(Debug, Default)]
pub struct LoadedTokens {
    pub documents: Vec<TokenDocument>,
    pub errors: Vec<DataError>,
}

/// Reads every `*.json` file under `dir` in sorted path order.
///
/// A malformed file is recorded and skipped; only a missing or unreadable
/// directory is fatal.
#[instrument(level = "debug", skip(exclude))]
pub fn load_token_dir(dir: &Path, exclude: &[PathBuf]) -> Result<LoadedTokens, PipelineError> {
    if !dir.is_dir() {
        return Err(PipelineError::SourceMissing(dir.to_path_buf()));
    }

    // Only outputs that already exist can show up in the walk.
    let exclude: Vec<PathBuf> = exclude
        .iter()
        .filter_map(|p| std::fs::canonicalize(p).ok())
        .collect();

    let mut loaded = LoadedTokens::default();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| PipelineError::Walk {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;
        let path = entry.path();
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        if !entry.file_type().is_file() || !is_json {
            continue;
        }
        let is_excluded = !exclude.is_empty()
            && std::fs::canonicalize(path).is_ok_and(|canonical| exclude.contains(&canonical));
        if is_excluded {
            debug!(path = %path.display(), "skipping generated file");
            continue;
        }

        match TokenDocument::from_path(path) {
            Ok(doc) => {
                debug!(path = %path.display(), issues = doc.issues.len(), "loaded token file");
                loaded.documents.push(doc);
            }
            Err(e) => {
                warn!("{}", e);
                loaded.errors.push(e);
            }
        }
    }
    Ok(loaded)
}
