//! # pdf-uploader
//!
//! Pick PDF files, preview the selection, and upload each file on its own to
//! a multipart endpoint.
//!
//! The crate is the state and the network half of a plain upload form. It
//! keeps an ordered selection of files, validates every picker batch
//! (declared type must start with `application/pdf`), and on submit posts
//! each file as its own `multipart/form-data` request with a single `media`
//! field, one after another.
//!
//! ## Flow
//!
//! ```text
//! picker ──▶ add_files ──▶ SelectionState ──▶ submit_selection
//!              │                                  │  (sequential)
//!              └── notice on reject               ├─ POST /api/upload  (file 1)
//!                                                 ├─ POST /api/upload  (file 2)
//!                                                 └─ …  notice per failed file
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf_uploader::{UploadController, UploaderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = UploaderConfig::builder()
//!         .endpoint("http://localhost:3000/api/upload")
//!         .build()?;
//!     let mut form = UploadController::from_config(config)?;
//!
//!     form.choose_paths(["invoice.pdf", "contract.pdf"]).await??;
//!     let report = form.submit_selection().await;
//!     for file in &report.files {
//!         println!("{}: {:?}", file.name, file.urls);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdfup` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! pdf-uploader = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod controller;
pub mod error;
pub mod notice;
pub mod output;
pub mod picker;
pub mod pipeline;
pub mod selection;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{InvalidFilePolicy, UploaderConfig, UploaderConfigBuilder};
pub use controller::UploadController;
pub use error::{FileUploadError, SelectionError, UploadError};
pub use notice::{NoopNotifier, Notice, Notifier, RecordingNotifier};
pub use output::{AddOutcome, FileResult, SubmissionReport, SubmissionStats, UploadedUrls};
pub use picker::{FilePicker, MemoryPicker, PathPicker};
pub use pipeline::transport::{HttpTransport, RawResponse, TransportError, UploadTransport};
pub use selection::{SelectedFile, SelectionEntry, SelectionState};
