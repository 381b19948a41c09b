//! Result types returned by the controller's operations.

use crate::error::{FileUploadError, UploadError};
use serde::{Deserialize, Serialize};

/// The `data.url` value of an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UploadedUrls {
    One(String),
    Many(Vec<String>),
}

impl UploadedUrls {
    /// All URLs as a flat list.
    pub fn as_vec(&self) -> Vec<&str> {
        match self {
            UploadedUrls::One(u) => vec![u.as_str()],
            UploadedUrls::Many(us) => us.iter().map(String::as_str).collect(),
        }
    }
}

impl std::fmt::Display for UploadedUrls {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_vec().join(", "))
    }
}

/// What one AddFiles call did to the selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AddOutcome {
    /// Files appended by this call.
    pub appended: usize,
    /// Names of files rejected by this call (only ever more than one under
    /// [`crate::InvalidFilePolicy::SkipInvalid`]).
    pub rejected: Vec<String>,
    /// Selection length after the call.
    pub selected: usize,
}

/// Outcome of one file's upload attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileResult {
    /// 1-indexed position in the submitted selection.
    pub position: usize,
    pub name: String,
    pub size: usize,
    /// URL(s) returned by the endpoint; `None` on failure.
    pub urls: Option<UploadedUrls>,
    pub duration_ms: u64,
    pub error: Option<FileUploadError>,
}

impl FileResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate numbers for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub total_duration_ms: u64,
}

/// Everything one SubmitSelection produced, in selection order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionReport {
    pub files: Vec<FileResult>,
    pub stats: SubmissionStats,
    /// True when the selection was reset after the submission.
    pub cleared: bool,
}

impl SubmissionReport {
    /// True when nothing was submitted because the selection was unset.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn all_succeeded(&self) -> bool {
        self.files.iter().all(FileResult::is_success)
    }

    /// Turn any per-file failure into an error, for callers that want
    /// all-or-nothing semantics.
    pub fn into_result(self) -> Result<Self, UploadError> {
        if self.stats.failed == 0 {
            Ok(self)
        } else {
            Err(UploadError::PartialFailure {
                succeeded: self.stats.succeeded,
                failed: self.stats.failed,
                total: self.stats.total,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_deserialize_from_string_or_list() {
        let one: UploadedUrls = serde_json::from_str(r#""https://cdn/a.pdf""#).unwrap();
        assert_eq!(one, UploadedUrls::One("https://cdn/a.pdf".into()));

        let many: UploadedUrls = serde_json::from_str(r#"["u1","u2"]"#).unwrap();
        assert_eq!(many.as_vec(), vec!["u1", "u2"]);
        assert_eq!(many.to_string(), "u1, u2");
    }

    #[test]
    fn report_with_failure_into_result_errs() {
        let report = SubmissionReport {
            files: vec![],
            stats: SubmissionStats {
                total: 3,
                succeeded: 2,
                failed: 1,
                total_duration_ms: 10,
            },
            cleared: false,
        };
        let err = report.into_result().unwrap_err();
        assert!(err.to_string().contains("1/3"), "got: {err}");
    }

    #[test]
    fn add_outcome_serializes_counts_and_names_only() {
        let outcome = AddOutcome {
            appended: 1,
            rejected: vec!["b.txt".into()],
            selected: 3,
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            serde_json::json!({ "appended": 1, "rejected": ["b.txt"], "selected": 3 })
        );
    }
}
