//! The upload form controller.
//!
//! [`UploadController`] owns the [`SelectionState`] and mediates between the
//! picker, the notifier and the transport. It exposes the three actions a
//! user can take on the form:
//!
//! | Action | Method | Enabled when |
//! |--------|--------|--------------|
//! | choose files | [`UploadController::picker_changed`] / [`UploadController::add_files`] | always |
//! | cancel | [`UploadController::cancel_selection`] | selection is set |
//! | upload | [`UploadController::submit_selection`] | selection is set |
//!
//! ## State machine
//!
//! ```text
//! Unset ──add(ok)──▶ Populated ──add(ok)──▶ Populated (extended)
//!   ▲                    │
//!   └──────cancel────────┘
//! ```
//!
//! Submitting never moves the state, unless `clear_on_success` is set and
//! every file in the batch was accepted.

use crate::config::{InvalidFilePolicy, UploaderConfig};
use crate::error::{FileUploadError, SelectionError, UploadError};
use crate::notice::{Notice, NoopNotifier, Notifier};
use crate::output::{AddOutcome, FileResult, SubmissionReport, SubmissionStats};
use crate::picker::{FilePicker, PathPicker};
use crate::pipeline::response::parse_response;
use crate::pipeline::transport::{HttpTransport, UploadTransport};
use crate::selection::{SelectedFile, SelectionState};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Form-state manager plus a sequential upload loop.
pub struct UploadController<P: FilePicker = PathPicker> {
    config: UploaderConfig,
    picker: P,
    transport: Arc<dyn UploadTransport>,
    notifier: Arc<dyn Notifier>,
    selection: SelectionState,
}

impl UploadController<PathPicker> {
    /// Controller with a [`PathPicker`], an [`HttpTransport`] for
    /// `config.endpoint` and no notifier.
    pub fn from_config(config: UploaderConfig) -> Result<Self, UploadError> {
        let transport = HttpTransport::new(&config)?;
        let picker = PathPicker::new().with_accept(config.accept.clone());
        Ok(Self::new(config, picker, Arc::new(transport)))
    }

    /// Choose local files and feed them through [`Self::picker_changed`].
    ///
    /// The outer `Result` fails only when a path cannot be read, in which
    /// case the selection is untouched. The inner one is the validation
    /// outcome.
    pub async fn choose_paths<I, S>(
        &mut self,
        paths: I,
    ) -> Result<Result<AddOutcome, SelectionError>, UploadError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<Path>,
    {
        self.picker.choose(paths).await?;
        Ok(self.picker_changed())
    }
}

impl<P: FilePicker> UploadController<P> {
    pub fn new(config: UploaderConfig, picker: P, transport: Arc<dyn UploadTransport>) -> Self {
        Self {
            config,
            picker,
            transport,
            notifier: Arc::new(NoopNotifier),
            selection: SelectionState::Unset,
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn config(&self) -> &UploaderConfig {
        &self.config
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn picker(&self) -> &P {
        &self.picker
    }

    pub fn picker_mut(&mut self) -> &mut P {
        &mut self.picker
    }

    /// Whether the cancel action is available.
    pub fn can_cancel(&self) -> bool {
        !self.selection.is_unset()
    }

    /// Whether the upload action is available.
    pub fn can_submit(&self) -> bool {
        !self.selection.is_unset()
    }

    /// Handle a change event: take the picker's current value and add it.
    pub fn picker_changed(&mut self) -> Result<AddOutcome, SelectionError> {
        let files = self.picker.files();
        self.add_files(files)
    }

    /// Validate and append a batch from the picker, then reset the picker.
    ///
    /// `None` means nothing was chosen; `Some(vec![])` is an empty list.
    /// Both raise a notice and leave the selection alone.
    ///
    /// Under [`InvalidFilePolicy::AbortBatch`] the first non-PDF raises a
    /// notice and ends processing; files before it remain appended and the
    /// error is returned. Under [`InvalidFilePolicy::SkipInvalid`] every
    /// non-PDF raises its own notice and is left out, and the call returns
    /// `Ok` with the rejected names listed.
    pub fn add_files(
        &mut self,
        files: Option<Vec<SelectedFile>>,
    ) -> Result<AddOutcome, SelectionError> {
        let result = self.append_batch(files);
        self.picker.reset();

        if let Err(ref e) = result {
            self.notifier.alert(&Notice::Selection(e.clone()));
        }
        result
    }

    fn append_batch(
        &mut self,
        files: Option<Vec<SelectedFile>>,
    ) -> Result<AddOutcome, SelectionError> {
        let files = files.ok_or(SelectionError::NoFileChosen)?;
        if files.is_empty() {
            return Err(SelectionError::EmptyFileList);
        }

        let mut outcome = AddOutcome::default();
        for file in files {
            if !file.is_pdf() {
                let err = SelectionError::NotAPdf {
                    name: file.name().to_string(),
                    mime_type: file.mime_type().to_string(),
                };
                warn!("Rejected '{}': declared type '{}'", file.name(), file.mime_type());

                match self.config.invalid_file_policy {
                    InvalidFilePolicy::AbortBatch => {
                        debug!(
                            "Batch aborted after {} appended file(s); {} selected",
                            outcome.appended,
                            self.selection.len()
                        );
                        return Err(err);
                    }
                    InvalidFilePolicy::SkipInvalid => {
                        self.notifier.alert(&Notice::Selection(err));
                        outcome.rejected.push(file.name().to_string());
                        continue;
                    }
                }
            }

            debug!("Selected '{}' ({} bytes)", file.name(), file.size());
            let current = std::mem::take(&mut self.selection);
            self.selection = current.with_appended(file);
            outcome.appended += 1;
        }

        outcome.selected = self.selection.len();
        info!(
            "Selection now holds {} file(s) ({} added, {} rejected)",
            outcome.selected,
            outcome.appended,
            outcome.rejected.len()
        );
        Ok(outcome)
    }

    /// Drop the whole selection. Returns false when it was already unset.
    pub fn cancel_selection(&mut self) -> bool {
        if self.selection.is_unset() {
            return false;
        }
        info!("Selection of {} file(s) cleared", self.selection.len());
        self.selection = SelectionState::Unset;
        true
    }

    /// Upload every selected file, one request at a time, in selection order.
    ///
    /// A failed file raises a notice and the loop moves on; earlier
    /// successes are kept. Nothing happens when the selection is unset.
    ///
    /// Takes `&mut self` for the whole run, so a second submission cannot
    /// start until this one has finished.
    pub async fn submit_selection(&mut self) -> SubmissionReport {
        if self.selection.is_unset() {
            debug!("Submit ignored: nothing selected");
            return SubmissionReport::default();
        }

        let total_start = Instant::now();
        let files: Vec<SelectedFile> = self.selection.files().to_vec();
        let total = files.len();
        info!("Uploading {} file(s) to {}", total, self.config.endpoint);

        let mut results = Vec::with_capacity(total);
        for (idx, file) in files.iter().enumerate() {
            results.push(self.upload_one(idx + 1, total, file).await);
        }

        let succeeded = results.iter().filter(|r| r.is_success()).count();
        let stats = SubmissionStats {
            total,
            succeeded,
            failed: total - succeeded,
            total_duration_ms: total_start.elapsed().as_millis() as u64,
        };
        info!(
            "Upload finished: {}/{} succeeded in {}ms",
            stats.succeeded, stats.total, stats.total_duration_ms
        );

        let cleared = self.config.clear_on_success && stats.failed == 0;
        if cleared {
            self.selection = SelectionState::Unset;
            debug!("Selection cleared after successful upload");
        }

        SubmissionReport {
            files: results,
            stats,
            cleared,
        }
    }

    async fn upload_one(&self, position: usize, total: usize, file: &SelectedFile) -> FileResult {
        let start = Instant::now();
        debug!("Uploading {}/{}: '{}'", position, total, file.name());

        let outcome = match self.transport.send(file).await {
            Ok(response) => parse_response(file.name(), &response),
            Err(e) => Err(FileUploadError::Transport {
                name: file.name().to_string(),
                detail: e.to_string(),
            }),
        };
        let duration_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(urls) => {
                info!("File was uploaded successfully: '{}' -> {}", file.name(), urls);
                self.notifier.uploaded(file, &urls);
                FileResult {
                    position,
                    name: file.name().to_string(),
                    size: file.size(),
                    urls: Some(urls),
                    duration_ms,
                    error: None,
                }
            }
            Err(e) => {
                warn!("Upload {}/{} failed: {}", position, total, e);
                self.notifier.alert(&Notice::Upload(e.clone()));
                FileResult {
                    position,
                    name: file.name().to_string(),
                    size: file.size(),
                    urls: None,
                    duration_ms,
                    error: Some(e),
                }
            }
        }
    }
}
