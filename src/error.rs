//! Error types for registry and upload operations

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by registry lookups and mutations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Document not found: {0}")]
    DocumentNotFound(String),
    #[error("Version {version} not found for document {document_id}")]
    VersionNotFound { document_id: String, version: String },
}

/// Errors raised by the upload flow
///
/// The display text of each variant is the message shown to the user.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Please fill in all fields.")]
    MissingField(&'static str),
    #[error("Document not found.")]
    DocumentNotFound(String),
    #[error("Version not found.")]
    VersionNotFound { document_id: String, version: String },
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<RegistryError> for UploadError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::DocumentNotFound(id) => Self::DocumentNotFound(id),
            RegistryError::VersionNotFound {
                document_id,
                version,
            } => Self::VersionNotFound {
                document_id,
                version,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_errors_keep_their_kind() {
        let err = UploadError::from(RegistryError::DocumentNotFound("0xa".to_string()));
        assert!(matches!(&err, UploadError::DocumentNotFound(id) if id == "0xa"));
        assert_eq!(err.to_string(), "Document not found.");

        let err = UploadError::from(RegistryError::VersionNotFound {
            document_id: "0xa".to_string(),
            version: "v3".to_string(),
        });
        assert!(matches!(
            &err,
            UploadError::VersionNotFound { document_id, version } if document_id == "0xa" && version == "v3"
        ));
        assert_eq!(err.to_string(), "Version not found.");
    }
}
