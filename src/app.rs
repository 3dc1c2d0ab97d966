//! Application state and upload coordination

use std::path::{Path, PathBuf};

use crate::core::config::AppConfig;
use crate::core::document::{DocumentRecord, VersionRecord};
use crate::core::file_system;
use crate::core::hash::{keccak256, Digest, HashStamper};
use crate::core::registry::{NewDocument, Registry};
use crate::core::storage::{self, FileStorage, Storage};
use crate::error::{RegistryError, UploadError};

/// Upload form fields
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// File to upload
    pub file: Option<PathBuf>,
    pub name: String,
    pub doc_type: String,
    pub author: String,
    /// Append a version to this document instead of creating one
    pub existing_document: Option<String>,
}

/// Result of a successful upload
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub document_id: String,
    pub version: String,
    /// Digest stored on the version record
    pub hash: Digest,
    /// Digest of the uploaded bytes alone
    pub content_hash: Digest,
    /// User-facing summary
    pub message: String,
}

/// Main application state
pub struct DocsApp {
    /// Application configuration
    pub config: AppConfig,
    /// Document registry
    registry: Registry,
    /// Backing store for the registry
    storage: Box<dyn Storage>,
}

impl DocsApp {
    /// Open the registry stored in the configured data directory
    pub fn open(config: AppConfig) -> Self {
        let storage = FileStorage::new(config.get_data_dir());
        Self::with_storage(config, Box::new(storage))
    }

    /// Create an application over an explicit storage backend
    pub fn with_storage(config: AppConfig, storage: Box<dyn Storage>) -> Self {
        let stamper = HashStamper::new(config.registry.hash_input);
        let registry = Registry::from_documents(storage::load_documents(storage.as_ref()), stamper);
        tracing::info!("Loaded {} documents", registry.len());

        Self {
            config,
            registry,
            storage,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Handle an upload: create a document or append a version
    pub fn upload(&mut self, request: &UploadRequest) -> Result<UploadOutcome, UploadError> {
        let path = request.file.as_deref().ok_or(UploadError::MissingField("file"))?;
        let author = if request.author.is_empty() {
            self.config.default_author.clone().unwrap_or_default()
        } else {
            request.author.clone()
        };
        for (field, value) in [
            ("name", &request.name),
            ("type", &request.doc_type),
            ("author", &author),
        ] {
            if value.trim().is_empty() {
                return Err(UploadError::MissingField(field));
            }
        }

        let content = std::fs::read(path).map_err(|source| UploadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = file_system::file_name(path);

        let (document_id, version, hash, message) = match request.existing_document.as_deref() {
            Some(id) => {
                let version = self.registry.add_version(id, &content, file_name.clone())?;
                let (label, hash) = (version.version.clone(), version.hash.clone());
                let name = self.document(id)?.name.clone();
                let message = format!("New version created for document {}.", name);
                (id.to_string(), label, hash, message)
            }
            None => {
                let mut new = NewDocument::new(&request.name, &request.doc_type)
                    .author(&author)
                    .content(&content);
                new.file_name = file_name.clone();
                let doc = self.registry.create_document(new);
                let version = &doc.versions[0];
                (
                    doc.id.clone(),
                    version.version.clone(),
                    version.hash.clone(),
                    "Document created successfully.".to_string(),
                )
            }
        };

        self.persist();
        if let Some(file_name) = file_name.filter(|_| self.config.registry.save_uploads) {
            let uploads_dir = self.config.get_uploads_dir();
            if let Err(e) =
                file_system::save_upload(&uploads_dir, &document_id, &version, &file_name, &content)
            {
                tracing::error!("Failed to save uploaded file: {:#}", e);
            }
        }
        self.config.add_recent_document(&document_id);

        Ok(UploadOutcome {
            document_id,
            version,
            hash,
            content_hash: keccak256(&content),
            message,
        })
    }

    /// Upload every file under `dir` as a new document
    pub fn import(&mut self, dir: &Path, author: &str) -> Vec<Result<UploadOutcome, UploadError>> {
        file_system::get_import_files(dir)
            .into_iter()
            .map(|path| {
                let name = path
                    .file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default();
                let doc_type = path
                    .extension()
                    .map(|s| s.to_string_lossy().to_lowercase())
                    .unwrap_or_else(|| "file".to_string());
                let request = UploadRequest {
                    file: Some(path),
                    name,
                    doc_type,
                    author: author.to_string(),
                    existing_document: None,
                };
                self.upload(&request)
            })
            .collect()
    }

    /// Get a document by id
    pub fn document(&self, id: &str) -> Result<&DocumentRecord, RegistryError> {
        self.registry
            .get(id)
            .ok_or_else(|| RegistryError::DocumentNotFound(id.to_string()))
    }

    /// Get a version and, when a saved copy exists, its content
    pub fn open_version(
        &self,
        id: &str,
        label: &str,
    ) -> Result<(&DocumentRecord, &VersionRecord, Option<Vec<u8>>), RegistryError> {
        let version = self.registry.version(id, label)?;
        let doc = self.document(id)?;
        let content = version.file_name.as_deref().and_then(|file_name| {
            file_system::read_upload(&self.config.get_uploads_dir(), id, label, file_name)
        });
        Ok((doc, version, content))
    }

    /// Path of the saved copy of a version, if one was recorded
    pub fn upload_location(&self, id: &str, label: &str) -> Result<Option<PathBuf>, RegistryError> {
        let version = self.registry.version(id, label)?;
        Ok(version.file_name.as_deref().map(|file_name| {
            file_system::upload_path(&self.config.get_uploads_dir(), id, label, file_name)
        }))
    }

    /// Write the registry to storage, logging failures
    fn persist(&mut self) {
        if let Err(e) = storage::save_documents(self.storage.as_mut(), self.registry.documents()) {
            tracing::error!("Failed to save documents: {:#}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::VersionState;
    use crate::core::storage::MemoryStorage;

    struct Fixture {
        _dir: tempfile::TempDir,
        app: DocsApp,
        file: PathBuf,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("contrato.docx");
        std::fs::write(&file, b"first draft").unwrap();

        let mut config = AppConfig::default();
        config.data_dir = Some(dir.path().join("data"));
        let app = DocsApp::with_storage(config, Box::new(MemoryStorage::new()));
        Fixture { _dir: dir, app, file }
    }

    fn request(file: &Path) -> UploadRequest {
        UploadRequest {
            file: Some(file.to_path_buf()),
            name: "Contrato".to_string(),
            doc_type: "docx".to_string(),
            author: "Ana".to_string(),
            existing_document: None,
        }
    }

    #[test]
    fn test_upload_creates_document() {
        let mut f = fixture();
        let outcome = f.app.upload(&request(&f.file)).unwrap();

        assert_eq!(outcome.message, "Document created successfully.");
        assert_eq!(outcome.version, "v1");
        assert_eq!(outcome.content_hash, keccak256(b"first draft"));
        assert_eq!(outcome.hash, outcome.content_hash);

        let doc = f.app.document(&outcome.document_id).unwrap();
        assert_eq!(doc.author, "Ana");
        assert_eq!(doc.versions[0].state, VersionState::Active);
        assert_eq!(doc.versions[0].file_name.as_deref(), Some("contrato.docx"));
        assert_eq!(f.app.config.recent_documents, vec![outcome.document_id.clone()]);
    }

    #[test]
    fn test_upload_saves_copy_and_opens_version() {
        let mut f = fixture();
        let outcome = f.app.upload(&request(&f.file)).unwrap();

        let (doc, version, content) = f.app.open_version(&outcome.document_id, "v1").unwrap();
        assert_eq!(doc.name, "Contrato");
        assert_eq!(version.version, "v1");
        assert_eq!(content, Some(b"first draft".to_vec()));
    }

    #[test]
    fn test_upload_new_version() {
        let mut f = fixture();
        let created = f.app.upload(&request(&f.file)).unwrap();

        std::fs::write(&f.file, b"second draft").unwrap();
        let mut req = request(&f.file);
        req.existing_document = Some(created.document_id.clone());
        let outcome = f.app.upload(&req).unwrap();

        assert_eq!(outcome.version, "v2");
        assert_eq!(outcome.message, "New version created for document Contrato.");
        assert_ne!(outcome.hash, outcome.content_hash);
        assert_eq!(f.app.registry().len(), 1);
    }

    #[test]
    fn test_upload_missing_fields() {
        let mut f = fixture();

        let mut req = request(&f.file);
        req.name.clear();
        let err = f.app.upload(&req).unwrap_err();
        assert!(matches!(err, UploadError::MissingField("name")));
        assert_eq!(err.to_string(), "Please fill in all fields.");

        let mut req = request(&f.file);
        req.file = None;
        assert!(matches!(f.app.upload(&req), Err(UploadError::MissingField("file"))));
        assert!(f.app.registry().is_empty());
    }

    #[test]
    fn test_upload_default_author() {
        let mut f = fixture();
        let mut req = request(&f.file);
        req.author.clear();
        assert!(matches!(f.app.upload(&req), Err(UploadError::MissingField("author"))));

        f.app.config.default_author = Some("Luis".to_string());
        let outcome = f.app.upload(&req).unwrap();
        assert_eq!(f.app.document(&outcome.document_id).unwrap().author, "Luis");
    }

    #[test]
    fn test_upload_unknown_document() {
        let mut f = fixture();
        let mut req = request(&f.file);
        req.existing_document = Some("0xmissing".to_string());

        let err = f.app.upload(&req).unwrap_err();
        assert_eq!(err.to_string(), "Document not found.");
        assert!(f.app.registry().is_empty());
    }

    #[test]
    fn test_registry_reloads_from_file_storage() {
        let f = fixture();
        let data_dir = f.app.config.get_data_dir();
        let mut app = DocsApp::open(f.app.config.clone());
        let outcome = app.upload(&request(&f.file)).unwrap();
        drop(app);

        let reopened = DocsApp::open(f.app.config.clone());
        assert!(data_dir.join("documents.json").exists());
        assert_eq!(reopened.registry().len(), 1);
        assert_eq!(
            reopened.document(&outcome.document_id).unwrap().versions[0].hash,
            outcome.hash
        );
    }

    #[test]
    fn test_import_directory() {
        let mut f = fixture();
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Datos.csv"), "id,name\n1,John").unwrap();
        std::fs::write(dir.path().join("Notas.txt"), "plain").unwrap();

        let results = f.app.import(dir.path(), "Ana");
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.is_ok()));

        let types: Vec<_> = f.app.registry().documents().iter().map(|d| d.doc_type.as_str()).collect();
        assert_eq!(types, vec!["csv", "txt"]);
    }
}
