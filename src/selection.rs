//! The controller's state: which files are currently selected.
//!
//! [`SelectionState`] is a value, not a mutable collection. Every transition
//! consumes the old state and returns a new one, so a caller holding a
//! snapshot never observes a half-applied batch.

use bytes::Bytes;
use serde::Serialize;

/// One file handed over by the picker. Immutable once created.
///
/// The bytes live in a reference-counted [`Bytes`] buffer, so cloning a
/// `SelectedFile` (into a new selection, into an upload request) never
/// copies the file contents.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    mime_type: String,
    bytes: Bytes,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Display name, as shown in the selection list and sent as the part's file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// MIME type declared by the picker.
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the declared type passes the PDF check.
    pub fn is_pdf(&self) -> bool {
        self.mime_type.starts_with(crate::config::PDF_MIME)
    }
}

impl std::fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// Either nothing selected, or an ordered, non-empty list of files.
///
/// `Unset` is deliberately not the same thing as an empty list: the cancel
/// and upload actions are enabled exactly when the state is `Populated`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SelectionState {
    #[default]
    Unset,
    Populated(Vec<SelectedFile>),
}

impl SelectionState {
    /// Returns a new state with `file` appended, creating the list if unset.
    #[must_use]
    pub fn with_appended(self, file: SelectedFile) -> Self {
        match self {
            SelectionState::Unset => SelectionState::Populated(vec![file]),
            SelectionState::Populated(files) => {
                let mut next = Vec::with_capacity(files.len() + 1);
                next.extend(files);
                next.push(file);
                SelectionState::Populated(next)
            }
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, SelectionState::Unset)
    }

    /// The selected files in selection order; empty when unset.
    pub fn files(&self) -> &[SelectedFile] {
        match self {
            SelectionState::Unset => &[],
            SelectionState::Populated(files) => files,
        }
    }

    pub fn len(&self) -> usize {
        self.files().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files().is_empty()
    }

    /// Display names in selection order, for the preview list.
    pub fn names(&self) -> Vec<&str> {
        self.files().iter().map(SelectedFile::name).collect()
    }

    /// A serialisable summary of the current selection.
    pub fn summary(&self) -> Vec<SelectionEntry> {
        self.files()
            .iter()
            .map(|f| SelectionEntry {
                name: f.name().to_string(),
                mime_type: f.mime_type().to_string(),
                size: f.size(),
            })
            .collect()
    }
}

/// One row of the selection preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionEntry {
    pub name: String,
    pub mime_type: String,
    pub size: usize,
}
