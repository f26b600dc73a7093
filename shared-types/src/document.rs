use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Doc,
    Txt,
}

impl DocumentKind {
    /// Derive the kind from a file name's extension. `.docx` counts as `doc`.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = filename.rsplit_once('.')?.1.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "doc" | "docx" => Some(DocumentKind::Doc),
            "txt" => Some(DocumentKind::Txt),
            _ => None,
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Doc => "application/msword",
            DocumentKind::Txt => "text/plain",
        }
    }
}

/// A knowledge-base document the AI draws on when replying
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDocument {
    pub id: String,
    pub filename: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    /// Size in bytes
    pub size: u64,
    pub uploaded_at: DateTime<Utc>,
    /// Extracted text
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_filename() {
        assert_eq!(
            DocumentKind::from_filename("Pricing.PDF"),
            Some(DocumentKind::Pdf)
        );
        assert_eq!(
            DocumentKind::from_filename("faq.docx"),
            Some(DocumentKind::Doc)
        );
        assert_eq!(
            DocumentKind::from_filename("notes.txt"),
            Some(DocumentKind::Txt)
        );
        assert_eq!(DocumentKind::from_filename("image.png"), None);
        assert_eq!(DocumentKind::from_filename("README"), None);
    }
}
