//! Text views over the document registry

pub mod document_list;
pub mod report;
pub mod version_list;
pub mod viewer;

pub use document_list::DocumentListPanel;
pub use report::ReportPanel;
pub use version_list::VersionListPanel;
pub use viewer::ViewerPanel;
