//! Document and version records

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::hash::Digest;

/// A named document with its ordered version history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Identifier derived from name, type and creation time
    #[serde(rename = "documentId")]
    pub id: String,
    /// Display name
    #[serde(rename = "documentName")]
    pub name: String,
    /// Declared type, free text (never checked against the content)
    #[serde(rename = "documentType")]
    pub doc_type: String,
    #[serde(rename = "authorName", default)]
    pub author: String,
    #[serde(rename = "creationDate")]
    pub created_at: DateTime<Utc>,
    /// Versions in append order, `v1` first
    pub versions: Vec<VersionRecord>,
}

/// One revision of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    #[serde(rename = "documentHash")]
    pub hash: Digest,
    #[serde(rename = "modificationDate")]
    pub modified_at: DateTime<Utc>,
    /// Label such as `v1`, `v2`
    pub version: String,
    pub state: VersionState,
    /// Name of the uploaded file, when one was recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

/// State tag of a version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionState {
    /// Initial version of a document
    Active,
    /// Any version appended afterwards
    Updated,
}

impl fmt::Display for VersionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Updated => f.write_str("updated"),
        }
    }
}

/// Content category inferred from the declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Spreadsheet,
    WordProcessor,
    Csv,
    PlainText,
    Other,
}

/// Declared type without surrounding spaces or a leading `.`, lowercased
pub fn normalize_type(doc_type: &str) -> String {
    doc_type.trim().trim_start_matches('.').to_lowercase()
}

impl DocumentKind {
    /// Classify a declared type such as `pdf`, `.CSV` or `text/plain`
    pub fn from_type(doc_type: &str) -> Self {
        match normalize_type(doc_type).as_str() {
            "pdf" | "application/pdf" => Self::Pdf,
            "xlsx" | "xls" => Self::Spreadsheet,
            "docx" | "doc" => Self::WordProcessor,
            "csv" | "text/csv" => Self::Csv,
            "txt" | "text" | "text/plain" | "md" => Self::PlainText,
            _ => Self::Other,
        }
    }
}

/// Label for the version following `count` existing versions
pub fn version_label(count: usize) -> String {
    format!("v{}", count + 1)
}

impl DocumentRecord {
    /// Most recently appended version
    pub fn latest_version(&self) -> Option<&VersionRecord> {
        self.versions.last()
    }

    /// Find a version by label
    pub fn version(&self, label: &str) -> Option<&VersionRecord> {
        self.versions.iter().find(|v| v.version == label)
    }

    /// Last modification time, falling back to creation time
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.latest_version()
            .map(|v| v.modified_at)
            .unwrap_or(self.created_at)
    }

    pub fn kind(&self) -> DocumentKind {
        DocumentKind::from_type(&self.doc_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_web_record() {
        let json = r#"{
            "documentId": "0xabc",
            "documentName": "Informe Q1",
            "documentType": "pdf",
            "authorName": "Ana",
            "creationDate": "2023-04-01T10:00:00.000Z",
            "versions": [{
                "documentHash": "0x8f7d88e901a5ad3a1654977929d1c2f7",
                "modificationDate": "2023-04-15T10:00:00.000Z",
                "version": "v1",
                "state": "active"
            }]
        }"#;

        let doc: DocumentRecord = serde_json::from_str(json).unwrap();
        assert_eq!(doc.name, "Informe Q1");
        assert_eq!(doc.kind(), DocumentKind::Pdf);
        assert_eq!(doc.versions[0].state, VersionState::Active);
        assert_eq!(doc.versions[0].file_name, None);
        assert_eq!(doc.last_modified().to_rfc3339(), "2023-04-15T10:00:00+00:00");
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let doc = DocumentRecord {
            id: "0x1".to_string(),
            name: "Notas".to_string(),
            doc_type: "txt".to_string(),
            author: String::new(),
            created_at: Utc::now(),
            versions: Vec::new(),
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("documentId").is_some());
        assert!(value.get("creationDate").is_some());
        assert!(value.get("doc_type").is_none());
    }

    #[test]
    fn test_document_kind() {
        assert_eq!(DocumentKind::from_type("PDF"), DocumentKind::Pdf);
        assert_eq!(DocumentKind::from_type(".csv"), DocumentKind::Csv);
        assert_eq!(DocumentKind::from_type("xlsx"), DocumentKind::Spreadsheet);
        assert_eq!(DocumentKind::from_type("contract"), DocumentKind::Other);
    }

    #[test]
    fn test_normalize_type() {
        assert_eq!(normalize_type(" .PDF "), "pdf");
        assert_eq!(normalize_type("docx"), "docx");
    }

    #[test]
    fn test_version_label() {
        assert_eq!(version_label(0), "v1");
        assert_eq!(version_label(4), "v5");
    }
}
