//! Configuration types for the upload controller.
//!
//! All behaviour is controlled through [`UploaderConfig`], built via its
//! [`UploaderConfigBuilder`]. The defaults reproduce the plain upload form:
//! post to `/api/upload`, one multipart field named `media`, abort the rest
//! of a picker batch at the first non-PDF, keep the selection after
//! submitting.

use crate::error::UploadError;
use serde::{Deserialize, Serialize};

/// Default endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:3000/api/upload";

/// Default name of the multipart field carrying the file bytes.
pub const DEFAULT_FIELD_NAME: &str = "media";

/// MIME prefix every accepted file must declare.
pub const PDF_MIME: &str = "application/pdf";

/// Configuration for an [`crate::UploadController`].
///
/// # Example
/// ```rust
/// use pdf_uploader::{InvalidFilePolicy, UploaderConfig};
///
/// let config = UploaderConfig::builder()
///     .endpoint("https://files.example.com/api/upload")
///     .invalid_file_policy(InvalidFilePolicy::SkipInvalid)
///     .build()
///     .unwrap();
/// assert_eq!(config.field_name, "media");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploaderConfig {
    /// Absolute URL the multipart POST is sent to. Default: [`DEFAULT_ENDPOINT`].
    pub endpoint: String,

    /// Name of the single multipart field holding the file. Default: `media`.
    pub field_name: String,

    /// Advisory accept hint handed to the file picker. Default: `application/pdf`.
    ///
    /// The controller re-validates every file against [`PDF_MIME`] regardless
    /// of what the picker did with this hint.
    pub accept: String,

    /// What to do with the rest of a picker batch when one file is not a PDF.
    pub invalid_file_policy: InvalidFilePolicy,

    /// Reset the selection after a submit in which every file succeeded. Default: false.
    pub clear_on_success: bool,

    /// Per-request timeout in seconds. Default: none (client default applies).
    pub request_timeout_secs: Option<u64>,

    /// `User-Agent` header sent with each upload.
    pub user_agent: String,
}

impl Default for UploaderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            field_name: DEFAULT_FIELD_NAME.to_string(),
            accept: PDF_MIME.to_string(),
            invalid_file_policy: InvalidFilePolicy::default(),
            clear_on_success: false,
            request_timeout_secs: None,
            user_agent: concat!("pdf-uploader/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl UploaderConfig {
    /// Create a new builder for `UploaderConfig`.
    pub fn builder() -> UploaderConfigBuilder {
        UploaderConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`UploaderConfig`].
#[derive(Debug)]
pub struct UploaderConfigBuilder {
    config: UploaderConfig,
}

impl UploaderConfigBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.config.field_name = name.into();
        self
    }

    pub fn accept(mut self, accept: impl Into<String>) -> Self {
        self.config.accept = accept.into();
        self
    }

    pub fn invalid_file_policy(mut self, policy: InvalidFilePolicy) -> Self {
        self.config.invalid_file_policy = policy;
        self
    }

    pub fn clear_on_success(mut self, v: bool) -> Self {
        self.config.clear_on_success = v;
        self
    }

    /// A zero timeout means "no timeout".
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = (secs > 0).then_some(secs);
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<UploaderConfig, UploadError> {
        let c = &self.config;
        let url = reqwest::Url::parse(&c.endpoint).map_err(|e| {
            UploadError::InvalidConfig(format!("endpoint '{}' is not a valid URL: {}", c.endpoint, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(UploadError::InvalidConfig(format!(
                "endpoint must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if c.field_name.trim().is_empty() {
            return Err(UploadError::InvalidConfig(
                "multipart field name must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// Handling of a non-PDF file in the middle of a picker batch.
///
/// | Policy | `[a.pdf, b.txt, c.pdf]` becomes |
/// |--------|---------------------------------|
/// | `AbortBatch` | `[a.pdf]`, one notice for `b.txt` |
/// | `SkipInvalid` | `[a.pdf, c.pdf]`, one notice for `b.txt` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InvalidFilePolicy {
    /// Stop at the first invalid file; files before it stay appended. (default)
    #[default]
    AbortBatch,
    /// Reject only the invalid files and keep their valid siblings.
    SkipInvalid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_form() {
        let c = UploaderConfig::default();
        assert_eq!(c.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(c.field_name, "media");
        assert_eq!(c.accept, "application/pdf");
        assert_eq!(c.invalid_file_policy, InvalidFilePolicy::AbortBatch);
        assert!(!c.clear_on_success);
        assert_eq!(c.request_timeout_secs, None);
    }

    #[test]
    fn builder_rejects_bad_endpoint() {
        let err = UploaderConfig::builder().endpoint("not a url").build();
        assert!(matches!(err, Err(UploadError::InvalidConfig(_))));

        let err = UploaderConfig::builder()
            .endpoint("ftp://example.com/upload")
            .build();
        assert!(matches!(err, Err(UploadError::InvalidConfig(_))));
    }

    #[test]
    fn builder_rejects_blank_field() {
        let err = UploaderConfig::builder().field_name("  ").build();
        assert!(matches!(err, Err(UploadError::InvalidConfig(_))));
    }

    #[test]
    fn zero_timeout_means_none() {
        let c = UploaderConfig::builder()
            .request_timeout_secs(0)
            .build()
            .unwrap();
        assert_eq!(c.request_timeout_secs, None);

        let c = UploaderConfig::builder()
            .request_timeout_secs(30)
            .build()
            .unwrap();
        assert_eq!(c.request_timeout_secs, Some(30));
    }
}
