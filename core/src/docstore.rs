use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// A structured crawled document: the full record backing an indexed unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub url: String,
    pub title: String,
    pub text: String,
    pub headings: Vec<String>,
    pub code_snippets: Vec<String>,
    pub metadata: HashMap<String, String>,
    pub version: u32,
    /// RFC 3339 timestamp of the last (re-)indexing.
    pub last_updated: String,
}

impl Document {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: String,
        url: String,
        title: String,
        text: String,
        headings: Vec<String>,
        code_snippets: Vec<String>,
        metadata: HashMap<String, String>,
        version: u32,
    ) -> Self {
        let last_updated = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .unwrap_or_default();
        Self {
            id,
            url,
            title,
            text,
            headings,
            code_snippets,
            metadata,
            version,
            last_updated,
        }
    }
}

/// Concurrency-safe store of full documents, keyed by index doc ID.
/// Entries are never deleted; re-indexing inserts a new version.
#[derive(Default)]
pub struct DocStore {
    inner: RwLock<HashMap<String, Document>>,
}

impl DocStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, doc: Document) {
        self.inner.write().insert(doc.id.clone(), doc);
    }

    pub fn get(&self, id: &str) -> Option<Document> {
        self.inner.read().get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}
