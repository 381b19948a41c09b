//! User-facing notices raised by the controller.
//!
//! Inject an [`Arc<dyn Notifier>`] into [`crate::UploadController`] to
//! receive the blocking messages a form would show in a modal: nothing
//! chosen, empty list, not a PDF, and per-file upload failures. Successful
//! uploads are reported through [`Notifier::uploaded`], which is a no-op
//! unless overridden.
//!
//! # Example
//!
//! ```rust
//! use pdf_uploader::{Notice, Notifier};
//! use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};
//!
//! struct CountingNotifier {
//!     alerts: AtomicUsize,
//! }
//!
//! impl Notifier for CountingNotifier {
//!     fn alert(&self, notice: &Notice) {
//!         self.alerts.fetch_add(1, Ordering::SeqCst);
//!         eprintln!("{notice}");
//!     }
//! }
//!
//! let notifier: Arc<dyn Notifier> = Arc::new(CountingNotifier {
//!     alerts: AtomicUsize::new(0),
//! });
//! ```

use crate::error::{FileUploadError, SelectionError};
use crate::output::UploadedUrls;
use crate::selection::SelectedFile;
use std::fmt;
use std::sync::{Arc, Mutex};

/// A blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A picker event was rejected.
    Selection(SelectionError),
    /// One file's upload failed.
    Upload(FileUploadError),
}

impl Notice {
    /// The exact text the user sees.
    pub fn message(&self) -> String {
        match self {
            Notice::Selection(e) => e.to_string(),
            Notice::Upload(e) => e.user_message().to_string(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl From<SelectionError> for Notice {
    fn from(e: SelectionError) -> Self {
        Notice::Selection(e)
    }
}

impl From<FileUploadError> for Notice {
    fn from(e: FileUploadError) -> Self {
        Notice::Upload(e)
    }
}

/// Receives notices from the controller.
///
/// Implementations must be `Send + Sync` so a notifier can be shared with
/// whatever task drives the controller.
pub trait Notifier: Send + Sync {
    /// Show a blocking notice.
    fn alert(&self, notice: &Notice);

    /// Called once per file the endpoint accepted.
    fn uploaded(&self, file: &SelectedFile, urls: &UploadedUrls) {
        let _ = (file, urls);
    }
}

/// Discards every notice. The default when no notifier is configured.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn alert(&self, _notice: &Notice) {}
}

/// Keeps every notice and upload event in memory, in arrival order.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
    uploads: Mutex<Vec<(String, UploadedUrls)>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|n| n.clone()).unwrap_or_default()
    }

    /// Notice texts only, in arrival order.
    pub fn messages(&self) -> Vec<String> {
        self.notices().iter().map(Notice::message).collect()
    }

    /// `(file name, urls)` for every accepted upload, in arrival order.
    pub fn uploads(&self) -> Vec<(String, UploadedUrls)> {
        self.uploads.lock().map(|u| u.clone()).unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, notice: &Notice) {
        if let Ok(mut n) = self.notices.lock() {
            n.push(notice.clone());
        }
    }

    fn uploaded(&self, file: &SelectedFile, urls: &UploadedUrls) {
        if let Ok(mut u) = self.uploads.lock() {
            u.push((file.name().to_string(), urls.clone()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_notifier_does_not_panic() {
        let n = NoopNotifier;
        n.alert(&Notice::Selection(SelectionError::EmptyFileList));
        n.uploaded(
            &SelectedFile::new("a.pdf", "application/pdf", Vec::new()),
            &UploadedUrls::One("https://cdn/a.pdf".into()),
        );
    }

    #[test]
    fn recording_notifier_keeps_order() {
        let n = RecordingNotifier::new();
        n.alert(&SelectionError::NoFileChosen.into());
        n.alert(&SelectionError::EmptyFileList.into());
        assert_eq!(n.messages(), vec!["No file was chosen", "Files list is empty"]);
    }

    #[test]
    fn upload_notice_shows_user_message() {
        let notice: Notice = FileUploadError::Transport {
            name: "a.pdf".into(),
            detail: "dns".into(),
        }
        .into();
        assert_eq!(notice.to_string(), "Sorry! something went wrong.");

        let notice: Notice = FileUploadError::Rejected {
            name: "a.pdf".into(),
            status: 413,
            message: Some("File too big".into()),
        }
        .into();
        assert_eq!(notice.to_string(), "File too big");
    }

    #[test]
    fn arc_dyn_notifier_works() {
        let n: Arc<dyn Notifier> = Arc::new(NoopNotifier);
        n.alert(&SelectionError::NoFileChosen.into());
    }
}
