//! Document list panel (dashboard)

use std::fmt::Write;

use crate::core::document::DocumentRecord;

/// Dashboard table of all documents
pub struct DocumentListPanel;

impl DocumentListPanel {
    /// Render the document table
    pub fn render(documents: &[DocumentRecord]) -> String {
        if documents.is_empty() {
            return Self::render_empty();
        }

        let name_width = documents
            .iter()
            .map(|d| d.name.chars().count())
            .max()
            .unwrap_or(0)
            .max("NAME".len());
        let type_width = documents
            .iter()
            .map(|d| d.doc_type.chars().count())
            .max()
            .unwrap_or(0)
            .max("TYPE".len());

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{:<name_width$}  {:<type_width$}  {:<10}  {:<10}  {:>8}  ID",
            "NAME", "TYPE", "CREATED", "MODIFIED", "VERSIONS"
        );
        for doc in documents {
            let _ = writeln!(
                out,
                "{:<name_width$}  {:<type_width$}  {:<10}  {:<10}  {:>8}  {}",
                doc.name,
                doc.doc_type.to_uppercase(),
                doc.created_at.format("%Y-%m-%d"),
                doc.last_modified().format("%Y-%m-%d"),
                doc.versions.len(),
                doc.id
            );
        }
        out
    }

    fn render_empty() -> String {
        "No documents yet\nUpload a file with `ddocs upload` to get started\n".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::HashStamper;
    use crate::core::registry::{NewDocument, Registry};

    #[test]
    fn test_render_lists_documents() {
        let mut registry = Registry::new(HashStamper::default());
        let id = registry.create_document(NewDocument::new("Contrato", "docx")).id.clone();
        registry.add_version(&id, b"", None).unwrap();

        let out = DocumentListPanel::render(registry.documents());
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("NAME"));
        assert!(lines[1].contains("DOCX"));
        assert!(lines[1].contains(&id));
        assert!(lines[1].contains("       2  "));
    }

    #[test]
    fn test_render_empty() {
        assert!(DocumentListPanel::render(&[]).starts_with("No documents yet"));
    }
}
