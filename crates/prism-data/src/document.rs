use crate::error::DataError;
use crate::model::{StructuralIssue, TokenNode};
use std::path::{Path, PathBuf};
use tracing::debug;

/// One parsed token file.
#[derive(Debug, Clone)]
pub struct TokenDocument {
    pub source: PathBuf,
    pub root: TokenNode,
    pub issues: Vec<StructuralIssue>,
}

impl TokenDocument {
    pub fn new(source: impl Into<PathBuf>, root: TokenNode) -> Self {
        Self {
            source: source.into(),
            root,
            issues: Vec::new(),
        }
    }

    /// Parses a document from JSON text. `source` is only used for reporting.
    pub fn from_json_str(source: impl Into<PathBuf>, text: &str) -> Result<Self, DataError> {
        let source = source.into();
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| DataError::Json {
                path: source.clone(),
                line: e.line(),
                column: e.column(),
                message: e.to_string(),
            })?;

        if !value.is_object() {
            debug!(path = %source.display(), "token document root is not an object");
        }

        let (root, issues) = TokenNode::from_value(&value);
        Ok(Self {
            source,
            root,
            issues,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, DataError> {
        let text = std::fs::read_to_string(path).map_err(|source| DataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(path, &text)
    }

    pub fn to_json_string(&self) -> Result<String, DataError> {
        serde_json::to_string_pretty(&self.root).map_err(|e| DataError::Json {
            path: self.source.clone(),
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        })
    }
}
