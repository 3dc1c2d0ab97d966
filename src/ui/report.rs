//! Registry report panel

use std::collections::BTreeMap;
use std::fmt::Write;

use crate::core::document::{normalize_type, DocumentRecord};

/// Document and version counts for one declared type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TypeStats {
    pub documents: usize,
    pub versions: usize,
}

/// Summary of the registry contents
pub struct ReportPanel;

impl ReportPanel {
    /// Count documents and versions per normalized, upper-cased declared type
    pub fn type_distribution(documents: &[DocumentRecord]) -> BTreeMap<String, TypeStats> {
        let mut stats: BTreeMap<String, TypeStats> = BTreeMap::new();
        for doc in documents {
            let entry = stats.entry(normalize_type(&doc.doc_type).to_uppercase()).or_default();
            entry.documents += 1;
            entry.versions += doc.versions.len();
        }
        stats
    }

    pub fn render(documents: &[DocumentRecord]) -> String {
        let versions: usize = documents.iter().map(|d| d.versions.len()).sum();
        let stats = Self::type_distribution(documents);

        let mut out = String::new();
        let _ = writeln!(out, "Documents: {}", documents.len());
        let _ = writeln!(out, "Versions:  {}", versions);
        if let Some(latest) = documents.iter().max_by_key(|d| d.last_modified()) {
            let _ = writeln!(
                out,
                "Last change: {} ({})",
                latest.name,
                latest.last_modified().format("%Y-%m-%d %H:%M:%S")
            );
        }

        if !stats.is_empty() {
            out.push('\n');
            let _ = writeln!(out, "{:<10}  {:>9}  {:>8}", "TYPE", "DOCUMENTS", "VERSIONS");
            for (doc_type, s) in &stats {
                let _ = writeln!(out, "{:<10}  {:>9}  {:>8}", doc_type, s.documents, s.versions);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::HashStamper;
    use crate::core::registry::{NewDocument, Registry};

    #[test]
    fn test_type_distribution() {
        let mut registry = Registry::new(HashStamper::default());
        let id = registry.create_document(NewDocument::new("Informe Q1", "pdf")).id.clone();
        registry.add_version(&id, b"", None).unwrap();
        registry.create_document(NewDocument::new("Contrato", "docx"));
        registry.create_document(NewDocument::new("Anexo", "PDF"));

        let stats = ReportPanel::type_distribution(registry.documents());
        assert_eq!(stats["PDF"], TypeStats { documents: 2, versions: 3 });
        assert_eq!(stats["DOCX"], TypeStats { documents: 1, versions: 1 });

        let out = ReportPanel::render(registry.documents());
        assert!(out.starts_with("Documents: 3\nVersions:  4\n"));
    }

    #[test]
    fn test_type_distribution_merges_spellings() {
        let mut registry = Registry::new(HashStamper::default());
        registry.create_document(NewDocument::new("Informe Q1", "pdf"));
        registry.create_document(NewDocument::new("Informe Q2", ".pdf"));
        registry.create_document(NewDocument::new("Informe Q3", " PDF "));

        let stats = ReportPanel::type_distribution(registry.documents());
        assert_eq!(stats.len(), 1);
        assert_eq!(stats["PDF"], TypeStats { documents: 3, versions: 3 });
    }

    #[test]
    fn test_render_empty_registry() {
        assert_eq!(ReportPanel::render(&[]), "Documents: 0\nVersions:  0\n");
    }
}
