//! The file-picker collaborator.
//!
//! A picker holds a current value, like a native file input: either nothing
//! chosen, or a list of files. The controller reads that value on every
//! change event and then calls [`FilePicker::reset`], after which the same
//! files can be chosen again and produce a fresh change.

use crate::config::PDF_MIME;
use crate::error::UploadError;
use crate::pipeline::input;
use crate::selection::SelectedFile;
use std::path::Path;

/// Source of selected files.
pub trait FilePicker: Send {
    /// Advisory type filter. The controller re-checks every file regardless.
    fn accept(&self) -> &str {
        PDF_MIME
    }

    /// Current value: `None` when nothing was chosen.
    fn files(&self) -> Option<Vec<SelectedFile>>;

    /// Clear the current value so the same file can be chosen again.
    fn reset(&mut self);
}

/// Picker backed by local file paths.
#[derive(Debug, Default)]
pub struct PathPicker {
    accept: Option<String>,
    value: Option<Vec<SelectedFile>>,
}

impl PathPicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different advisory accept hint.
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }

    /// Load `paths` as the picker's new value.
    ///
    /// An empty slice produces an empty list, not "nothing chosen". If any
    /// path cannot be read the previous value is kept.
    pub async fn choose<I, S>(&mut self, paths: I) -> Result<(), UploadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        let mut files = Vec::new();
        for path in paths {
            files.push(input::load_file(path).await?);
        }
        self.value = Some(files);
        Ok(())
    }

    /// The dialog was dismissed without a choice.
    pub fn dismiss(&mut self) {
        self.value = None;
    }
}

impl FilePicker for PathPicker {
    fn accept(&self) -> &str {
        self.accept.as_deref().unwrap_or(PDF_MIME)
    }

    fn files(&self) -> Option<Vec<SelectedFile>> {
        self.value.clone()
    }

    fn reset(&mut self) {
        self.value = None;
    }
}

/// Picker whose value is set directly; for hosts that already hold the
/// file contents in memory.
#[derive(Debug, Default)]
pub struct MemoryPicker {
    value: Option<Vec<SelectedFile>>,
    resets: usize,
}

impl MemoryPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, value: Option<Vec<SelectedFile>>) {
        self.value = value;
    }

    /// Number of times the controller reset this picker.
    pub fn resets(&self) -> usize {
        self.resets
    }
}

impl FilePicker for MemoryPicker {
    fn files(&self) -> Option<Vec<SelectedFile>> {
        self.value.clone()
    }

    fn reset(&mut self) {
        self.value = None;
        self.resets += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn choose_then_reset_allows_same_file_again() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.pdf");
        std::fs::write(&path, b"%PDF-1.7").unwrap();

        let mut picker = PathPicker::new();
        assert!(picker.files().is_none());

        picker.choose([&path]).await.unwrap();
        assert_eq!(picker.files().unwrap().len(), 1);

        picker.reset();
        assert!(picker.files().is_none());

        picker.choose([&path]).await.unwrap();
        assert_eq!(picker.files().unwrap()[0].name(), "a.pdf");
    }

    #[tokio::test]
    async fn choose_nothing_is_empty_list() {
        let mut picker = PathPicker::new();
        picker.choose(Vec::<&Path>::new()).await.unwrap();
        assert_eq!(picker.files(), Some(vec![]));

        picker.dismiss();
        assert_eq!(picker.files(), None);
    }

    #[tokio::test]
    async fn failed_choose_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("a.pdf");
        std::fs::write(&good, b"%PDF-1.7").unwrap();

        let mut picker = PathPicker::new();
        picker.choose([&good]).await.unwrap();
        let missing = dir.path().join("missing.pdf");
        assert!(picker.choose([&good, &missing]).await.is_err());
        assert_eq!(picker.files().unwrap().len(), 1);
    }

    #[test]
    fn accept_hint_defaults_to_pdf() {
        assert_eq!(PathPicker::new().accept(), "application/pdf");
        assert_eq!(PathPicker::new().with_accept(".pdf").accept(), ".pdf");
        assert_eq!(MemoryPicker::new().accept(), "application/pdf");
    }
}
