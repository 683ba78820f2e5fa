use docdex_core::InvertedIndex;
use std::collections::HashSet;

fn ids(docs: &[docdex_core::index::Document]) -> HashSet<String> {
    docs.iter().map(|d| d.id.clone()).collect()
}

#[test]
fn boolean_and_over_two_documents() {
    let idx = InvertedIndex::new();
    let id1 = idx.add_document("https://example.com/1", "", "the quick fox");
    let id2 = idx.add_document("https://example.com/2", "", "the lazy dog");

    assert_eq!(
        ids(&idx.search("the")),
        HashSet::from([id1.clone(), id2.clone()])
    );
    assert!(idx.search("quick dog").is_empty());
    assert_eq!(ids(&idx.search("fox")), HashSet::from([id1]));
}

#[test]
fn empty_and_blank_queries_match_nothing() {
    let idx = InvertedIndex::new();
    idx.add_document("https://example.com", "", "some text here");
    assert!(idx.search("").is_empty());
    assert!(idx.search("   ").is_empty());
    assert!(idx.search_sentences("").is_empty());
}

#[test]
fn unindexed_token_short_circuits() {
    let idx = InvertedIndex::new();
    idx.add_document("https://example.com", "", "alpha beta");
    assert!(idx.search("alpha nosuchtoken").is_empty());
    assert!(idx.search("nosuchtoken").is_empty());
}

#[test]
fn search_is_commutative() {
    let idx = InvertedIndex::new();
    idx.add_document("u1", "", "rust tokio async");
    idx.add_document("u2", "", "rust threads");
    idx.add_document("u3", "", "tokio runtime");

    assert_eq!(ids(&idx.search("rust tokio")), ids(&idx.search("tokio rust")));
}

#[test]
fn add_then_get_round_trips() {
    let idx = InvertedIndex::new();
    let id = idx.add_document("https://example.com/doc", "A Title", "body text");
    let doc = idx.get_document(&id).expect("document exists");
    assert_eq!(doc.url, "https://example.com/doc");
    assert_eq!(doc.title, "A Title");
    assert_eq!(doc.text, "body text");
}

#[test]
fn get_unknown_id_is_none() {
    let idx = InvertedIndex::new();
    idx.add_document("u", "", "text");
    assert!(idx.get_document("doc999").is_none());
}

#[test]
fn doc_ids_are_monotonic() {
    let idx = InvertedIndex::new();
    assert_eq!(idx.add_document("u1", "", "a"), "doc1");
    assert_eq!(idx.add_document("u2", "", "b"), "doc2");
    assert_eq!(idx.add_document("u3", "", "c"), "doc3");
    assert_eq!(idx.doc_count(), 3);
}

#[test]
fn sentence_search_returns_matching_sentences() {
    let idx = InvertedIndex::new();
    idx.add_document("u", "", "Go is great. Go is fast.");
    assert_eq!(
        idx.search_sentences("go"),
        vec!["Go is great.", "Go is fast."]
    );
}

#[test]
fn sentence_search_requires_all_terms_in_one_sentence() {
    let idx = InvertedIndex::new();
    idx.add_document("u", "", "Rust is safe. Rust is fast. Nothing here.");
    assert_eq!(idx.search_sentences("rust fast"), vec!["Rust is fast."]);
    assert!(idx.search_sentences("rust missingterm").is_empty());
}

#[test]
fn tokenization_matches_between_add_and_search() {
    let idx = InvertedIndex::new();
    let id = idx.add_document("u", "", "HTTP/2: faster, better!");
    assert_eq!(ids(&idx.search("http 2 faster")), HashSet::from([id]));
}

#[test]
fn concurrent_adds_and_reads_stay_consistent() {
    let idx = std::sync::Arc::new(InvertedIndex::new());
    std::thread::scope(|s| {
        for w in 0..4 {
            let idx = idx.clone();
            s.spawn(move || {
                for i in 0..50 {
                    idx.add_document(
                        &format!("https://example.com/{w}/{i}"),
                        "",
                        &format!("shared token plus unique w{w}i{i}"),
                    );
                }
            });
        }
    });
    assert_eq!(idx.doc_count(), 200);
    // Every add is atomic: the shared token must resolve to every document.
    assert_eq!(idx.search("shared token").len(), 200);
    assert_eq!(idx.search("w2i17").len(), 1);
}
