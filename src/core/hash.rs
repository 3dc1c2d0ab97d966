//! Keccak256 hash stamping for documents and versions
//!
//! Digests are display values only. Nothing re-checks a stored digest
//! against the content it was computed from.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use sha3::{Digest as _, Keccak256};

/// A version digest as displayed
///
/// Digests computed by [`keccak256`] or accepted by [`Digest::parse`] are
/// `0x` followed by 64 lowercase hex characters. Values loaded from storage
/// are kept verbatim, since older records may carry shorter hashes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Parse a digest string, normalizing hex to lowercase
    pub fn parse(value: &str) -> Option<Self> {
        static PATTERN: OnceLock<Regex> = OnceLock::new();
        let pattern = PATTERN.get_or_init(|| {
            Regex::new(r"^0[xX][0-9a-fA-F]{64}$").expect("digest pattern is valid")
        });

        if pattern.is_match(value) {
            Some(Self(format!("0x{}", value[2..].to_ascii_lowercase())))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.0
    }
}

/// Compute the keccak256 digest of `data`
pub fn keccak256(data: impl AsRef<[u8]>) -> Digest {
    let mut hasher = Keccak256::new();
    hasher.update(data.as_ref());
    Digest(format!("0x{:x}", hasher.finalize()))
}

/// Which fields feed a version digest
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HashInput {
    /// Raw file content
    #[default]
    Content,
    /// Document name followed by its declared type
    NameAndType,
}

/// Computes document ids and version digests
#[derive(Debug, Clone, Copy, Default)]
pub struct HashStamper {
    input: HashInput,
}

impl HashStamper {
    pub fn new(input: HashInput) -> Self {
        Self { input }
    }

    /// Digest for the first version of a document
    pub fn initial(&self, name: &str, doc_type: &str, content: &[u8]) -> Digest {
        keccak256(self.material(name, doc_type, content))
    }

    /// Digest for an appended version, salted with the append time
    pub fn revision(
        &self,
        name: &str,
        doc_type: &str,
        content: &[u8],
        at: DateTime<Utc>,
    ) -> Digest {
        let mut material = self.material(name, doc_type, content);
        material.extend_from_slice(at.timestamp_millis().to_string().as_bytes());
        keccak256(material)
    }

    /// Document identifier derived from name, type and creation time
    pub fn document_id(&self, name: &str, doc_type: &str, created_at: DateTime<Utc>) -> Digest {
        keccak256(format!(
            "{}{}{}",
            name,
            doc_type,
            created_at.timestamp_millis()
        ))
    }

    fn material(&self, name: &str, doc_type: &str, content: &[u8]) -> Vec<u8> {
        match self.input {
            HashInput::Content => content.to_vec(),
            HashInput::NameAndType => format!("{name}{doc_type}").into_bytes(),
        }
    }
}
