use crate::error::WriteError;
use crate::families::FamilyFailure;
use prism_core::{DuplicateToken, UnresolvedToken};
use prism_data::{DataError, StructuralIssue};
use prism_emit::EmitWarning;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct FileIssue {
    pub file: PathBuf,
    pub issue: StructuralIssue,
}

/// Everything a run found, accumulated instead of stopping at the first fault.
#[derive(Debug, Default)]
pub struct RunReport {
    pub files_loaded: usize,
    pub file_errors: Vec<DataError>,
    pub structural_issues: Vec<FileIssue>,
    pub duplicates: Vec<DuplicateToken>,
    pub families_generated: Vec<String>,
    pub family_failures: Vec<FamilyFailure>,
    pub resolved: usize,
    pub unresolved: Vec<UnresolvedToken>,
    pub warnings: Vec<EmitWarning>,
    pub written: Vec<PathBuf>,
    pub write_failures: Vec<WriteError>,
}

impl RunReport {
    /// Problems that make the run fail. Duplicates and emitter warnings do not count.
    pub fn failure_count(&self) -> usize {
        self.file_errors.len()
            + self.structural_issues.len()
            + self.family_failures.len()
            + self.unresolved.len()
            + self.write_failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failure_count() == 0
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} file(s) loaded, {} token(s) resolved, {} unresolved, {} family(ies) generated, {} failed",
            self.files_loaded,
            self.resolved,
            self.unresolved.len(),
            self.families_generated.len(),
            self.family_failures.len(),
        )?;

        if !self.file_errors.is_empty() {
            writeln!(f, "Invalid files:")?;
            for e in &self.file_errors {
                writeln!(f, "  {}", e)?;
            }
        }
        if !self.structural_issues.is_empty() {
            writeln!(f, "Structural issues:")?;
            for i in &self.structural_issues {
                writeln!(f, "  {}: {}: {}", i.file.display(), i.issue.path, i.issue.message)?;
            }
        }
        if !self.unresolved.is_empty() {
            writeln!(f, "Unresolved tokens:")?;
            for u in &self.unresolved {
                writeln!(f, "  {} = {}: {}", u.path, u.reference, u.error)?;
            }
        }
        if !self.family_failures.is_empty() {
            writeln!(f, "Failed families:")?;
            for failure in &self.family_failures {
                writeln!(f, "  {}: {}", failure.family, failure.error)?;
            }
        }
        if !self.write_failures.is_empty() {
            writeln!(f, "Write failures:")?;
            for w in &self.write_failures {
                writeln!(f, "  {}", w)?;
            }
        }
        if !self.duplicates.is_empty() {
            writeln!(f, "Overridden tokens:")?;
            for d in &self.duplicates {
                let shadowed = d
                    .shadowed
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "?".to_string());
                writeln!(
                    f,
                    "  {} ({} overrides {})",
                    d.path,
                    d.winner.display(),
                    shadowed
                )?;
            }
        }
        if !self.warnings.is_empty() {
            writeln!(f, "Warnings:")?;
            for w in &self.warnings {
                writeln!(f, "  {}", w)?;
            }
        }
        Ok(())
    }
}
