//! Upload validation and document construction.

use chrono::Utc;
use rand::Rng;

use super::model::{Document, DocumentContent, DocumentMetadata, FileKind};
use crate::error::{BoardroomError, Result};

/// Largest accepted upload (20 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// (MIME type, extension, icon, color)
const SUPPORTED_TYPES: &[(&str, &str, &str, &str)] = &[
    ("application/pdf", "pdf", "📄", "red"),
    (
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "docx",
        "📝",
        "blue",
    ),
    ("text/plain", "txt", "📃", "gray"),
    (
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "xlsx",
        "📊",
        "green",
    ),
    (
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "pptx",
        "📽️",
        "orange",
    ),
];

/// Turns uploaded files into [`Document`]s.
pub struct DocumentIntake;

impl DocumentIntake {
    /// Returns the display descriptor for a supported MIME type.
    pub fn file_kind(mime_type: &str) -> Option<FileKind> {
        SUPPORTED_TYPES
            .iter()
            .find(|(mime, ..)| *mime == mime_type)
            .map(|(_, ext, icon, color)| FileKind {
                ext: ext.to_string(),
                icon: icon.to_string(),
                color: color.to_string(),
            })
    }

    /// Lists the supported MIME types.
    pub fn supported_mime_types() -> impl Iterator<Item = &'static str> {
        SUPPORTED_TYPES.iter().map(|(mime, ..)| *mime)
    }

    /// Validates an upload and builds the document with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unsupported types or files over
    /// [`MAX_UPLOAD_BYTES`].
    pub fn prepare(name: &str, mime_type: &str, bytes: &[u8]) -> Result<Document> {
        let file_kind = Self::file_kind(mime_type).ok_or_else(|| {
            BoardroomError::validation(format!("File type not supported: {}", name))
        })?;

        let size_bytes = bytes.len() as u64;
        if size_bytes > MAX_UPLOAD_BYTES {
            return Err(BoardroomError::validation(format!(
                "File too large: {} (max 20MB)",
                name
            )));
        }

        let id = Self::generate_id();
        let metadata = DocumentMetadata {
            id: id.clone(),
            name: name.to_string(),
            mime_type: mime_type.to_string(),
            size_bytes,
            uploaded_at: Utc::now(),
            analyzed: false,
            analysis: None,
            file_kind,
        };
        let content = DocumentContent::from_bytes(id, mime_type, bytes);

        Ok(Document { metadata, content })
    }

    /// Generates an id of the form `doc_<millis>_<9 base36 chars>`.
    pub fn generate_id() -> String {
        let mut rng = rand::thread_rng();
        let suffix: String = (0..9)
            .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
            .collect();
        format!("doc_{}_{}", Utc::now().timestamp_millis(), suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_text_document() {
        let bytes = vec![b'a'; 10 * 1024];
        let doc = DocumentIntake::prepare("plan.txt", "text/plain", &bytes).unwrap();

        assert!(doc.id().starts_with("doc_"));
        assert_eq!(doc.metadata.name, "plan.txt");
        assert_eq!(doc.metadata.size_bytes, 10 * 1024);
        assert_eq!(doc.metadata.file_kind.ext, "txt");
        assert!(!doc.metadata.analyzed);
        assert_eq!(doc.content.id, doc.metadata.id);
        assert_eq!(doc.content.decode_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_unsupported_type_rejected() {
        let err = DocumentIntake::prepare("photo.png", "image/png", b"png").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_oversize_rejected() {
        let bytes = vec![0u8; (MAX_UPLOAD_BYTES + 1) as usize];
        let err = DocumentIntake::prepare("huge.pdf", "application/pdf", &bytes).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = DocumentIntake::generate_id();
        let b = DocumentIntake::generate_id();
        assert_ne!(a, b);
        let suffix = a.rsplit('_').next().unwrap();
        assert_eq!(suffix.len(), 9);
    }

    #[test]
    fn test_supported_types_all_have_kinds() {
        for mime in DocumentIntake::supported_mime_types() {
            assert!(DocumentIntake::file_kind(mime).is_some());
        }
    }
}
