//! Document domain models.
//!
//! A document is split in two: metadata that lives in the application state
//! snapshot, and content that lives only in the document content store.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BoardroomError, Result};

/// Display descriptor of a supported file type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileKind {
    /// File extension without the dot (e.g. "pdf").
    pub ext: String,
    /// Glyph shown next to the document.
    pub icon: String,
    /// Accent color name.
    pub color: String,
}

/// Result of analyzing a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    #[serde(default)]
    pub key_points: Vec<String>,
    pub sentiment: String,
    /// Relevance in the range 0.0..=1.0
    pub relevance_score: f64,
    #[serde(default)]
    pub extracted_entities: Vec<String>,
    #[serde(default)]
    pub suggested_advisors: Vec<String>,
}

/// Document metadata tracked in application state.
///
/// Never carries the document content; see [`DocumentContent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    /// Unique, stable identifier shared with the content record.
    pub id: String,
    /// Original file name.
    pub name: String,
    /// MIME type of the uploaded file.
    pub mime_type: String,
    /// Size of the original file in bytes.
    pub size_bytes: u64,
    /// When the document was uploaded.
    pub uploaded_at: DateTime<Utc>,
    /// Whether an analysis has been attached.
    pub analyzed: bool,
    /// Attached analysis, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AnalysisResult>,
    /// Display descriptor of the file type.
    pub file_kind: FileKind,
}

impl DocumentMetadata {
    /// Attaches an analysis and marks the document analyzed.
    pub fn attach_analysis(&mut self, analysis: AnalysisResult) {
        self.analysis = Some(analysis);
        self.analyzed = true;
    }

    /// Returns true when an analysis is attached.
    pub fn has_analysis(&self) -> bool {
        self.analysis.is_some()
    }
}

/// Content record held by the document content store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentContent {
    /// Same id as the matching [`DocumentMetadata`].
    pub id: String,
    /// Opaque encoded payload, a base64 `data:` URL.
    pub content: String,
}

impl DocumentContent {
    /// Encodes raw bytes as a `data:<mime>;base64,<payload>` URL.
    pub fn from_bytes(id: impl Into<String>, mime_type: &str, bytes: &[u8]) -> Self {
        Self {
            id: id.into(),
            content: format!("data:{};base64,{}", mime_type, BASE64_STANDARD.encode(bytes)),
        }
    }

    /// Decodes the payload back into raw bytes.
    pub fn decode_bytes(&self) -> Result<Vec<u8>> {
        let (header, payload) = self.content.split_once(',').ok_or_else(|| {
            BoardroomError::validation(format!("Content of '{}' is not a data URL", self.id))
        })?;

        if !header.starts_with("data:") || !header.ends_with(";base64") {
            return Err(BoardroomError::validation(format!(
                "Content of '{}' is not a base64 data URL",
                self.id
            )));
        }

        BASE64_STANDARD.decode(payload).map_err(|e| BoardroomError::Serialization {
            format: "base64".to_string(),
            message: e.to_string(),
        })
    }

    /// Returns the MIME type declared in the data URL header.
    pub fn mime_type(&self) -> Option<&str> {
        self.content
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(';'))
            .map(|(mime, _)| mime)
    }
}

/// A full document as uploaded: metadata plus content.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub metadata: DocumentMetadata,
    pub content: DocumentContent,
}

impl Document {
    pub fn id(&self) -> &str {
        &self.metadata.id
    }

    /// Splits the document into its stored halves.
    pub fn into_parts(self) -> (DocumentMetadata, DocumentContent) {
        (self.metadata, self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_preserves_bytes() {
        let bytes = b"quarterly plan\n\x00\xff".to_vec();
        let content = DocumentContent::from_bytes("doc_1", "text/plain", &bytes);

        assert!(content.content.starts_with("data:text/plain;base64,"));
        assert_eq!(content.mime_type(), Some("text/plain"));
        assert_eq!(content.decode_bytes().unwrap(), bytes);
    }

    #[test]
    fn test_decode_rejects_plain_text() {
        let content = DocumentContent {
            id: "doc_2".to_string(),
            content: "not a data url".to_string(),
        };
        assert!(content.decode_bytes().unwrap_err().is_validation());
    }

    #[test]
    fn test_metadata_serializes_without_content() {
        let metadata = DocumentMetadata {
            id: "doc_3".to_string(),
            name: "plan.txt".to_string(),
            mime_type: "text/plain".to_string(),
            size_bytes: 12,
            uploaded_at: Utc::now(),
            analyzed: false,
            analysis: None,
            file_kind: FileKind {
                ext: "txt".to_string(),
                icon: "📃".to_string(),
                color: "gray".to_string(),
            },
        };

        let json = serde_json::to_value(&metadata).unwrap();
        assert!(json.get("content").is_none());
        assert!(json.get("analysis").is_none());
        assert_eq!(json["sizeBytes"], 12);
    }

    #[test]
    fn test_attach_analysis_marks_analyzed() {
        let mut metadata = DocumentMetadata {
            id: "doc_4".to_string(),
            name: "deck.pdf".to_string(),
            mime_type: "application/pdf".to_string(),
            size_bytes: 2048,
            uploaded_at: Utc::now(),
            analyzed: false,
            analysis: None,
            file_kind: FileKind {
                ext: "pdf".to_string(),
                icon: "📄".to_string(),
                color: "red".to_string(),
            },
        };
        assert!(!metadata.has_analysis());

        metadata.attach_analysis(AnalysisResult {
            summary: "Pitch deck".to_string(),
            key_points: vec!["Raise 2M".to_string()],
            sentiment: "positive".to_string(),
            relevance_score: 0.8,
            extracted_entities: Vec::new(),
            suggested_advisors: vec!["cfo-001".to_string()],
        });

        assert!(metadata.has_analysis());
        assert!(metadata.analyzed);
        assert_eq!(metadata.analysis.unwrap().summary, "Pitch deck");
    }
}
