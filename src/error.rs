//! Error types for the pdf-uploader library.
//!
//! Three error types reflect three distinct failure modes:
//!
//! * [`UploadError`] is **fatal**: the operation cannot proceed at all
//!   (a chosen path does not exist, the configuration is invalid, the HTTP
//!   client could not be built). Returned as `Err(UploadError)`.
//!
//! * [`SelectionError`] is **validation**: a picker event was rejected before
//!   any network call (nothing chosen, empty list, not a PDF). Raised as a
//!   notice and returned from [`crate::UploadController::add_files`].
//!
//! * [`FileUploadError`] is **non-fatal**: one file's upload failed but the
//!   rest of the batch is unaffected. Stored inside
//!   [`crate::output::FileResult`] so callers can inspect partial success.

use std::path::PathBuf;
use thiserror::Error;

/// Generic message shown when a failure carries no server-provided text.
pub const FALLBACK_MESSAGE: &str = "Sorry! something went wrong.";

/// All fatal errors returned by the pdf-uploader library.
#[derive(Debug, Error)]
pub enum UploadError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// A chosen file was not found at the given path.
    #[error("File not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Reading a chosen file failed for another reason.
    #[error("Failed to read '{path}': {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Submission errors ─────────────────────────────────────────────────
    /// Some files uploaded but at least one failed.
    ///
    /// Returned by [`crate::output::SubmissionReport::into_result`] when
    /// the caller wants to treat any file failure as an error.
    #[error("{failed}/{total} files failed to upload")]
    PartialFailure {
        succeeded: usize,
        failed: usize,
        total: usize,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// A picker event rejected by validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum SelectionError {
    /// The picker reported no file list at all.
    #[error("No file was chosen")]
    NoFileChosen,

    /// The picker reported a list with zero entries.
    #[error("Files list is empty")]
    EmptyFileList,

    /// A file's declared MIME type is not `application/pdf`.
    #[error("Please select a valid pdf")]
    NotAPdf { name: String, mime_type: String },
}

/// A non-fatal error for a single file's upload.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
pub enum FileUploadError {
    /// The request could not be sent or the response body could not be read.
    #[error("{name}: transport error: {detail}")]
    Transport { name: String, detail: String },

    /// The endpoint answered with `error` set or without `data`.
    #[error("{name}: rejected by server: {}", .message.as_deref().unwrap_or(FALLBACK_MESSAGE))]
    Rejected {
        name: String,
        status: u16,
        message: Option<String>,
    },

    /// The response body was not the expected `{ data, error }` envelope.
    #[error("{name}: malformed response (HTTP {status}): {detail}")]
    MalformedResponse {
        name: String,
        status: u16,
        detail: String,
    },
}

impl FileUploadError {
    /// Display name of the file this error belongs to.
    pub fn file_name(&self) -> &str {
        match self {
            FileUploadError::Transport { name, .. }
            | FileUploadError::Rejected { name, .. }
            | FileUploadError::MalformedResponse { name, .. } => name,
        }
    }

    /// The text shown to the user: the server's message when it sent one,
    /// otherwise [`FALLBACK_MESSAGE`].
    pub fn user_message(&self) -> &str {
        match self {
            FileUploadError::Rejected {
                message: Some(m), ..
            } => m,
            _ => FALLBACK_MESSAGE,
        }
    }
}
