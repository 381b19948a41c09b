//! Send one file to the upload endpoint.
//!
//! [`UploadTransport`] is the seam between the controller and the network:
//! the controller only ever asks "send this file, give me the status and
//! body". [`HttpTransport`] is the reqwest implementation; tests substitute
//! an in-memory one.

use crate::config::UploaderConfig;
use crate::error::UploadError;
use crate::pipeline::input::OCTET_STREAM;
use crate::selection::SelectedFile;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Status line and body of an upload response, before interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

/// The request never produced a readable response.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Posts one file per call.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    async fn send(&self, file: &SelectedFile) -> Result<RawResponse, TransportError>;
}

/// reqwest-backed transport: one multipart POST per file.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: reqwest::Url,
    field_name: String,
}

impl HttpTransport {
    pub fn new(config: &UploaderConfig) -> Result<Self, UploadError> {
        let endpoint = reqwest::Url::parse(&config.endpoint)
            .map_err(|e| UploadError::InvalidConfig(format!("endpoint: {e}")))?;

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| UploadError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            field_name: config.field_name.clone(),
        })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

/// Build the single-field form carrying `file`.
fn build_form(field_name: &str, file: &SelectedFile) -> Result<Form, TransportError> {
    let mime = match file.mime_type().parse::<mime_guess::Mime>() {
        Ok(_) => file.mime_type(),
        Err(_) => OCTET_STREAM,
    };
    let part = Part::stream(file.bytes().clone())
        .file_name(file.name().to_string())
        .mime_str(mime)
        .map_err(|e| TransportError(format!("invalid part: {e}")))?;

    Ok(Form::new().part(field_name.to_string(), part))
}

#[async_trait]
impl UploadTransport for HttpTransport {
    async fn send(&self, file: &SelectedFile) -> Result<RawResponse, TransportError> {
        let form = build_form(&self.field_name, file)?;

        debug!("POST {} ({} bytes as '{}')", self.endpoint, file.size(), self.field_name);
        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransportError(format!("request timed out: {e}"))
                } else {
                    TransportError(e.to_string())
                }
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError(format!("failed to read response body: {e}")))?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_uses_configured_endpoint() {
        let config = UploaderConfig::builder()
            .endpoint("http://127.0.0.1:9/api/upload")
            .request_timeout_secs(5)
            .build()
            .unwrap();
        let t = HttpTransport::new(&config).unwrap();
        assert_eq!(t.endpoint().path(), "/api/upload");
    }

    #[test]
    fn form_builds_for_odd_mime() {
        let file = SelectedFile::new("a.pdf", "application/pdf; ;;", b"%PDF".to_vec());
        assert!(build_form("media", &file).is_ok());
    }

    #[test]
    fn unparseable_mime_falls_back_to_octet_stream() {
        let file = SelectedFile::new("a.pdf", "not a mime", b"%PDF".to_vec());
        let form = build_form("media", &file).unwrap();
        assert!(!form.boundary().is_empty());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_transport_error() {
        // Port 9 (discard) is closed on any sane test host.
        let config = UploaderConfig::builder()
            .endpoint("http://127.0.0.1:9/api/upload")
            .request_timeout_secs(5)
            .build()
            .unwrap();
        let t = HttpTransport::new(&config).unwrap();
        let file = SelectedFile::new("a.pdf", "application/pdf", b"%PDF".to_vec());
        assert!(t.send(&file).await.is_err());
    }
}
