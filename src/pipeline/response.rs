//! Decode the endpoint's `{ data, error }` envelope.
//!
//! The HTTP status does not decide success. A 200 with `error` set is a
//! rejection, and a 4xx whose body is a well-formed success envelope is
//! treated as a success, exactly as the form reads only the JSON body.

use crate::error::FileUploadError;
use crate::output::UploadedUrls;
use crate::pipeline::transport::RawResponse;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct Envelope {
    #[serde(default)]
    data: Option<EnvelopeData>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EnvelopeData {
    url: UploadedUrls,
}

/// Interpret one upload response for the file called `name`.
pub fn parse_response(name: &str, response: &RawResponse) -> Result<UploadedUrls, FileUploadError> {
    let envelope: Envelope =
        serde_json::from_slice(&response.body).map_err(|e| FileUploadError::MalformedResponse {
            name: name.to_string(),
            status: response.status,
            detail: e.to_string(),
        })?;

    let error = envelope.error.filter(|e| !e.is_empty());
    match (envelope.data, error) {
        (_, Some(message)) => Err(FileUploadError::Rejected {
            name: name.to_string(),
            status: response.status,
            message: Some(message),
        }),
        (None, None) => Err(FileUploadError::Rejected {
            name: name.to_string(),
            status: response.status,
            message: None,
        }),
        (Some(data), None) => Ok(data.url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(status: u16, body: &str) -> RawResponse {
        RawResponse {
            status,
            body: bytes::Bytes::from(body.to_string()),
        }
    }

    #[test]
    fn single_url() {
        let urls = parse_response("a.pdf", &raw(200, r#"{"data":{"url":"https://cdn/a.pdf"},"error":null}"#))
            .unwrap();
        assert_eq!(urls, UploadedUrls::One("https://cdn/a.pdf".into()));
    }

    #[test]
    fn url_list() {
        let urls = parse_response("a.pdf", &raw(200, r#"{"data":{"url":["u1","u2"]}}"#)).unwrap();
        assert_eq!(urls, UploadedUrls::Many(vec!["u1".into(), "u2".into()]));
    }

    #[test]
    fn error_field_wins_over_data() {
        let err = parse_response(
            "a.pdf",
            &raw(200, r#"{"data":{"url":"u"},"error":"quota exceeded"}"#),
        )
        .unwrap_err();
        assert_eq!(err.user_message(), "quota exceeded");
    }

    #[test]
    fn missing_data_is_rejection_with_fallback() {
        let err = parse_response("a.pdf", &raw(200, r#"{"data":null,"error":null}"#)).unwrap_err();
        assert!(matches!(err, FileUploadError::Rejected { message: None, .. }));
        assert_eq!(err.user_message(), "Sorry! something went wrong.");

        let err = parse_response("a.pdf", &raw(500, "{}")).unwrap_err();
        assert!(matches!(err, FileUploadError::Rejected { status: 500, .. }));
    }

    #[test]
    fn empty_error_string_is_not_truthy() {
        let urls = parse_response("a.pdf", &raw(200, r#"{"data":{"url":"u"},"error":""}"#)).unwrap();
        assert_eq!(urls, UploadedUrls::One("u".into()));
    }

    #[test]
    fn other_shapes_are_malformed() {
        for body in [
            "<html>502 Bad Gateway</html>",
            "",
            r#"{"data":{"url":"u"},"error":null,"extra":1}"#,
            r#"{"data":{"url":42}}"#,
            r#"{"data":{}}"#,
            r#"["data"]"#,
        ] {
            let err = parse_response("a.pdf", &raw(502, body)).unwrap_err();
            assert!(
                matches!(err, FileUploadError::MalformedResponse { status: 502, .. }),
                "body {body:?} gave {err:?}"
            );
        }
    }
}
