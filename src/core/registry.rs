//! In-memory document registry
//!
//! The registry owns every document record. Callers hold it by value and
//! pass it by reference; mutation needs `&mut`, so a version label is always
//! computed and appended under the same exclusive borrow.

use chrono::{DateTime, Utc};

use super::document::{version_label, DocumentRecord, VersionRecord, VersionState};
use super::hash::HashStamper;
use crate::error::RegistryError;

/// Fields needed to create a document
#[derive(Debug, Clone, Default)]
pub struct NewDocument<'a> {
    pub name: &'a str,
    pub doc_type: &'a str,
    pub author: &'a str,
    pub content: &'a [u8],
    pub file_name: Option<String>,
}

impl<'a> NewDocument<'a> {
    pub fn new(name: &'a str, doc_type: &'a str) -> Self {
        Self {
            name,
            doc_type,
            ..Default::default()
        }
    }

    pub fn author(mut self, author: &'a str) -> Self {
        self.author = author;
        self
    }

    pub fn content(mut self, content: &'a [u8]) -> Self {
        self.content = content;
        self
    }
}

/// Ordered collection of documents
#[derive(Debug, Clone, Default)]
pub struct Registry {
    documents: Vec<DocumentRecord>,
    stamper: HashStamper,
}

impl Registry {
    /// Create an empty registry
    #[allow(dead_code)]
    pub fn new(stamper: HashStamper) -> Self {
        Self {
            documents: Vec::new(),
            stamper,
        }
    }

    /// Create a registry over previously stored records
    pub fn from_documents(documents: Vec<DocumentRecord>, stamper: HashStamper) -> Self {
        Self { documents, stamper }
    }

    pub fn documents(&self) -> &[DocumentRecord] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Find a document by id
    pub fn get(&self, id: &str) -> Option<&DocumentRecord> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    /// Find a specific version of a document
    pub fn version(&self, id: &str, label: &str) -> Result<&VersionRecord, RegistryError> {
        let doc = self
            .get(id)
            .ok_or_else(|| RegistryError::DocumentNotFound(id.to_string()))?;
        doc.version(label).ok_or_else(|| RegistryError::VersionNotFound {
            document_id: id.to_string(),
            version: label.to_string(),
        })
    }

    /// Create a document with a single `v1` version
    pub fn create_document(&mut self, new: NewDocument<'_>) -> &DocumentRecord {
        self.create_document_at(new, Utc::now())
    }

    /// Create a document using `now` as its creation time
    pub fn create_document_at(&mut self, new: NewDocument<'_>, now: DateTime<Utc>) -> &DocumentRecord {
        let id = self.unique_id(new.name, new.doc_type, now);
        let hash = self.stamper.initial(new.name, new.doc_type, new.content);
        tracing::debug!("Stamped {} v1 with {}", new.name, hash);

        let index = self.documents.len();
        self.documents.push(DocumentRecord {
            id,
            name: new.name.to_string(),
            doc_type: new.doc_type.to_string(),
            author: new.author.to_string(),
            created_at: now,
            versions: vec![VersionRecord {
                hash,
                modified_at: now,
                version: version_label(0),
                state: VersionState::Active,
                file_name: new.file_name,
            }],
        });

        &self.documents[index]
    }

    /// Append a version to an existing document
    pub fn add_version(
        &mut self,
        id: &str,
        content: &[u8],
        file_name: Option<String>,
    ) -> Result<&VersionRecord, RegistryError> {
        self.add_version_at(id, content, file_name, Utc::now())
    }

    /// Append a version using `now` as its modification time
    pub fn add_version_at(
        &mut self,
        id: &str,
        content: &[u8],
        file_name: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<&VersionRecord, RegistryError> {
        let stamper = self.stamper;
        let doc = self
            .documents
            .iter_mut()
            .find(|doc| doc.id == id)
            .ok_or_else(|| RegistryError::DocumentNotFound(id.to_string()))?;

        let hash = stamper.revision(&doc.name, &doc.doc_type, content, now);
        let version = version_label(doc.versions.len());
        tracing::debug!("Stamped {} {} with {}", doc.name, version, hash);

        doc.versions.push(VersionRecord {
            hash,
            modified_at: now,
            version,
            state: VersionState::Updated,
            file_name,
        });

        Ok(&doc.versions[doc.versions.len() - 1])
    }

    /// Derive a document id, salting on the rare clash with an existing one
    fn unique_id(&self, name: &str, doc_type: &str, now: DateTime<Utc>) -> String {
        let id: String = self.stamper.document_id(name, doc_type, now).into();
        if self.get(&id).is_none() {
            return id;
        }

        tracing::warn!("Document id collision for {}, re-deriving", name);
        (1u32..)
            .map(|salt| String::from(self.stamper.document_id(&format!("{name}#{salt}"), doc_type, now)))
            .find(|candidate| self.get(candidate).is_none())
            .unwrap_or(id)
    }
}
