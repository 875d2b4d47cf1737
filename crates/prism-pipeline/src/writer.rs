use crate::error::WriteError;
use prism_emit::strip_timestamp;
use std::io::Write as _;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

/// Replaces `path` with `contents` via a temporary file in the same directory.
///
/// Readers see either the old file or the new one, never a partial write.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), WriteError> {
    let fail = |message: String| WriteError {
        path: path.to_path_buf(),
        message,
    };

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| fail(e.to_string()))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| fail(e.to_string()))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| fail(e.to_string()))?;
    tmp.flush().map_err(|e| fail(e.to_string()))?;
    tmp.persist(path).map_err(|e| fail(e.error.to_string()))?;

    debug!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}

/// State of an output file compared to freshly generated contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    UpToDate,
    Stale,
    Missing,
}

/// Compares ignoring the timestamp line.
pub fn compare_output(path: &Path, contents: &str) -> FileStatus {
    match std::fs::read_to_string(path) {
        Ok(existing) if strip_timestamp(&existing) == strip_timestamp(contents) => {
            FileStatus::UpToDate
        }
        Ok(_) => FileStatus::Stale,
        Err(_) => FileStatus::Missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.css");

        write_atomic(&path, "a").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a");
        write_atomic(&path, "b").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "b");

        let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn compare_ignores_timestamp() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.css");
        assert_eq!(compare_output(&path, "x"), FileStatus::Missing);

        std::fs::write(&path, "/**\n * Generated: 1\n */\n:root {}\n").unwrap();
        assert_eq!(
            compare_output(&path, "/**\n * Generated: 2\n */\n:root {}\n"),
            FileStatus::UpToDate
        );
        assert_eq!(
            compare_output(&path, "/**\n * Generated: 2\n */\n:root { --a: 1; }\n"),
            FileStatus::Stale
        );
    }
}
