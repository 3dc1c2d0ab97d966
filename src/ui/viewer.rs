//! Document viewer panel

use std::fmt::Write;

use crate::core::document::{DocumentKind, DocumentRecord, VersionRecord};

/// Shows one version of a document with its content
pub struct ViewerPanel;

impl ViewerPanel {
    /// Render the version header followed by its content
    pub fn render(doc: &DocumentRecord, version: &VersionRecord, content: Option<&[u8]>) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", doc.name);
        let _ = writeln!(out, "  Type:     {}", doc.doc_type.to_uppercase());
        let _ = writeln!(out, "  Created:  {}", doc.created_at.format("%Y-%m-%d"));
        let _ = writeln!(out, "  Modified: {}", version.modified_at.format("%Y-%m-%d"));
        let _ = writeln!(out, "  Version:  {} ({})", version.version, version.state);
        let _ = writeln!(out, "  Hash:     {}", version.hash);
        out.push('\n');

        match content {
            Some(content) => out.push_str(&Self::render_content(doc.kind(), content)),
            None => out.push_str("Content not available\n"),
        }
        out
    }

    /// Render content according to the document kind
    fn render_content(kind: DocumentKind, content: &[u8]) -> String {
        match kind {
            DocumentKind::Csv => Self::render_csv(&String::from_utf8_lossy(content)),
            DocumentKind::PlainText => {
                let mut text = String::from_utf8_lossy(content).into_owned();
                if !text.ends_with('\n') {
                    text.push('\n');
                }
                text
            }
            DocumentKind::Pdf => format!("PDF document, {} bytes\n", content.len()),
            DocumentKind::Spreadsheet => format!("Spreadsheet document, {} bytes\n", content.len()),
            DocumentKind::WordProcessor => format!("Word document, {} bytes\n", content.len()),
            DocumentKind::Other => "Unsupported file type\n".to_string(),
        }
    }

    /// Lay out comma-separated rows as an aligned table
    fn render_csv(text: &str) -> String {
        let rows: Vec<Vec<&str>> = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| line.split(',').map(str::trim).collect())
            .collect();

        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let widths: Vec<usize> = (0..columns)
            .map(|i| {
                rows.iter()
                    .filter_map(|row| row.get(i))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        for row in &rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect();
            let _ = writeln!(out, "| {} |", cells.join(" | "));
        }
        out
    }
}
