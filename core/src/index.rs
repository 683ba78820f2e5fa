use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::sentence::split_into_sentences;
use crate::tokenizer::tokenize;

/// A document as the index sees it. The richer, structure-bearing record
/// lives in [`crate::docstore`]; the two share IDs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub url: String,
    pub title: String,
    pub text: String,
}

#[derive(Default)]
struct IndexInner {
    docs: HashMap<String, Document>,
    /// term -> set of doc IDs containing that term
    postings: HashMap<String, HashSet<String>>,
    next_doc_id: u64,
}

/// In-memory inverted index answering exact-token boolean-AND queries.
///
/// A single reader/writer lock scopes the whole structure: `add_document`
/// is exclusive, reads run concurrently, and no reader ever observes a
/// document whose postings are partially inserted.
#[derive(Default)]
pub struct InvertedIndex {
    inner: RwLock<IndexInner>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a document and return its assigned ID.
    ///
    /// IDs are monotonic (`doc1`, `doc2`, ...) for the lifetime of the index.
    pub fn add_document(&self, url: &str, title: &str, text: &str) -> String {
        let mut inner = self.inner.write();
        inner.next_doc_id += 1;
        let id = format!("doc{}", inner.next_doc_id);
        inner.docs.insert(
            id.clone(),
            Document {
                id: id.clone(),
                url: url.to_string(),
                title: title.to_string(),
                text: text.to_string(),
            },
        );
        for term in tokenize(text) {
            inner.postings.entry(term).or_default().insert(id.clone());
        }
        debug!(id = %id, url, "indexed document");
        id
    }

    /// Return documents containing every query token, in no particular order.
    /// A query with no tokens, or with a token that was never indexed, matches
    /// nothing.
    pub fn search(&self, query: &str) -> Vec<Document> {
        let inner = self.inner.read();
        let ids = Self::matching_ids(&inner, query);
        ids.into_iter()
            .filter_map(|id| inner.docs.get(&id).cloned())
            .collect()
    }

    /// Return every sentence of every matching document that contains all
    /// query tokens as case-insensitive substrings.
    pub fn search_sentences(&self, query: &str) -> Vec<String> {
        let inner = self.inner.read();
        let terms = tokenize(query);
        if terms.is_empty() {
            return Vec::new();
        }
        let ids = Self::matching_ids(&inner, query);
        let mut sentences = Vec::new();
        for id in ids {
            let Some(doc) = inner.docs.get(&id) else { continue };
            for sentence in split_into_sentences(&doc.text) {
                if contains_all_terms(&sentence, &terms) {
                    sentences.push(sentence);
                }
            }
        }
        sentences
    }

    pub fn get_document(&self, id: &str) -> Option<Document> {
        self.inner.read().docs.get(id).cloned()
    }

    pub fn doc_count(&self) -> usize {
        self.inner.read().docs.len()
    }

    fn matching_ids(inner: &IndexInner, query: &str) -> Vec<String> {
        let terms = tokenize(query);
        if terms.is_empty() {
            return Vec::new();
        }
        let mut result: Option<HashSet<String>> = None;
        for term in &terms {
            let Some(posting) = inner.postings.get(term) else {
                return Vec::new();
            };
            result = Some(match result {
                None => posting.clone(),
                Some(acc) => acc.intersection(posting).cloned().collect(),
            });
        }
        result.map(|ids| ids.into_iter().collect()).unwrap_or_default()
    }
}

fn contains_all_terms(sentence: &str, terms: &[String]) -> bool {
    let lowered = sentence.to_lowercase();
    terms.iter().all(|t| lowered.contains(t.as_str()))
}
