//! Version history panel

use std::fmt::Write;

use crate::core::document::DocumentRecord;

/// Version history of one document, newest first
pub struct VersionListPanel;

impl VersionListPanel {
    pub fn render(doc: &DocumentRecord) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} ({})", doc.name, doc.id);
        for version in doc.versions.iter().rev() {
            let _ = writeln!(
                out,
                "  {} - {} - {} - {}",
                version.version,
                version.modified_at.format("%Y-%m-%d %H:%M:%S"),
                version.state,
                version.hash
            );
        }
        out
    }

    /// Render every document's history, separated by blank lines
    pub fn render_all(documents: &[DocumentRecord]) -> String {
        documents
            .iter()
            .map(Self::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::HashStamper;
    use crate::core::registry::{NewDocument, Registry};

    #[test]
    fn test_render_newest_first() {
        let mut registry = Registry::new(HashStamper::default());
        let id = registry.create_document(NewDocument::new("Informe Q1", "pdf")).id.clone();
        registry.add_version(&id, b"rev", None).unwrap();

        let out = VersionListPanel::render(registry.get(&id).unwrap());
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].trim_start().starts_with("v2 - "));
        assert!(lines[1].contains(" - updated - 0x"));
        assert!(lines[2].contains(" - active - 0x"));
    }
}
