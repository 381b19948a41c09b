//! Input resolution: turn a user-supplied local path into a [`SelectedFile`].
//!
//! The declared MIME type is derived the way a browser's file input does
//! it: from the file extension, via `mime_guess`. Only when the extension is
//! missing or unknown do we sniff the `%PDF` magic bytes, so an extensionless
//! PDF still declares `application/pdf`. The controller's PDF check then runs on the declared
//! type only.

use crate::error::UploadError;
use crate::selection::SelectedFile;
use std::path::Path;
use tracing::debug;

const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Fallback type for unknown content.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Read a local file into a [`SelectedFile`].
pub async fn load_file(path: impl AsRef<Path>) -> Result<SelectedFile, UploadError> {
    let path = path.as_ref().to_path_buf();

    let bytes = match tokio::fs::read(&path).await {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(UploadError::FileNotFound { path });
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(UploadError::PermissionDenied { path });
        }
        Err(e) => return Err(UploadError::ReadFailed { path, source: e }),
    };

    let name = display_name(&path);
    let mime_type = declared_mime(&path, &bytes);
    debug!("Loaded {} ({} bytes, {})", path.display(), bytes.len(), mime_type);

    Ok(SelectedFile::new(name, mime_type, bytes))
}

/// The file name component, or the whole path if there is none.
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// MIME type a browser would declare for this file.
///
/// The extension decides whenever `mime_guess` knows it, even if the
/// contents start with `%PDF`.
pub fn declared_mime(path: &Path, bytes: &[u8]) -> &'static str {
    if let Some(mime) = mime_guess::from_path(path).first_raw() {
        return mime;
    }
    if bytes.starts_with(PDF_MAGIC) {
        return "application/pdf";
    }
    OCTET_STREAM
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn extension_wins() {
        assert_eq!(declared_mime(Path::new("a.pdf"), b""), "application/pdf");
        assert_eq!(declared_mime(Path::new("A.PDF"), b""), "application/pdf");
        assert_eq!(declared_mime(Path::new("b.txt"), b"%PDF-1.4"), "text/plain");
    }

    #[test]
    fn known_extension_beats_pdf_magic() {
        assert_eq!(declared_mime(Path::new("song.mp3"), b"%PDF-1.4"), "audio/mpeg");
        assert_eq!(declared_mime(Path::new("notes.rtf"), b"%PDF-1.4"), "application/rtf");
        assert_eq!(
            declared_mime(Path::new("deck.pptx"), b""),
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        );
    }

    #[test]
    fn missing_extension_sniffs_magic() {
        assert_eq!(declared_mime(Path::new("scan"), b"%PDF-1.4"), "application/pdf");
        assert_eq!(declared_mime(Path::new("blob"), b"\x00\x01"), OCTET_STREAM);
    }

    #[tokio::test]
    async fn load_reads_name_type_and_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(b"%PDF-1.7\n%%EOF").unwrap();

        let file = load_file(&path).await.unwrap();
        assert_eq!(file.name(), "report.pdf");
        assert_eq!(file.mime_type(), "application/pdf");
        assert_eq!(file.size(), 14);
    }

    #[tokio::test]
    async fn load_missing_file_is_not_found() {
        let err = load_file("/definitely/not/here.pdf").await.unwrap_err();
        assert!(matches!(err, UploadError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn pdf_bytes_behind_audio_extension_stay_audio() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("song.mp3");
        std::fs::write(&path, b"%PDF-1.7\n%%EOF").unwrap();

        let file = load_file(&path).await.unwrap();
        assert_eq!(file.mime_type(), "audio/mpeg");
        assert!(!file.is_pdf());
    }
}
