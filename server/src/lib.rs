use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use docdex_core::docstore::{DocStore, Document};
use docdex_core::sentence::split_into_sentences;
use docdex_core::InvertedIndex;
use docdex_crawler::extract;
use docdex_crawler::CrawlResult;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

/// Shared state behind the query API: the inverted index and the document
/// store, owned here and passed by reference everywhere else.
#[derive(Clone, Default)]
pub struct AppState {
    pub index: Arc<InvertedIndex>,
    pub store: Arc<DocStore>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub id: String,
    pub url: String,
    pub text: String,
    pub headings: Vec<String>,
    pub code_snippets: Vec<String>,
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/search", get(search_handler))
        .route("/document/:id", get(document_handler))
        .route("/mcp", get(mcp_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

// Placeholder for Model Context Protocol integration.
async fn mcp_handler() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(serde_json::json!({ "error": "MCP endpoint not implemented yet" })),
    )
}

async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<SearchHit>> {
    let mut hits = Vec::new();
    for doc in state.index.search(&params.q) {
        let (headings, code_snippets) = state
            .store
            .get(&doc.id)
            .map(|d| (d.headings, d.code_snippets))
            .unwrap_or_default();
        hits.push(SearchHit {
            id: doc.id,
            url: doc.url,
            text: doc.text,
            headings,
            code_snippets,
        });
    }
    Json(hits)
}

async fn document_handler(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.store.get(&id) {
        Some(doc) => Json(doc).into_response(),
        None => (StatusCode::NOT_FOUND, "document not found").into_response(),
    }
}

/// Index crawl results into the in-memory index and document store.
///
/// Each crawled page is one indexed unit; its sentences and code snippets
/// become derived units with their own IDs and store entries. Page structure
/// (title, headings, snippets) is re-derived by fetching the page again; a
/// failed re-fetch leaves those fields empty and is not fatal.
pub async fn index_results(state: &AppState, client: &Client, results: &[CrawlResult]) {
    for res in results {
        let (title, headings, snippets) = match extract::fetch_and_parse(client, &res.url).await {
            Ok(doc) => (
                extract::extract_title(&doc),
                extract::extract_headings(&doc),
                extract::extract_code_snippets(&doc),
            ),
            Err(err) => {
                warn!(url = %res.url, error = %err, "re-fetch for page structure failed");
                (String::new(), Vec::new(), Vec::new())
            }
        };

        let page_id = state.index.add_document(&res.url, &title, &res.text);
        state.store.insert(Document::new(
            page_id.clone(),
            res.url.clone(),
            title.clone(),
            res.text.clone(),
            headings,
            snippets.clone(),
            unit_metadata("page", None),
            1,
        ));

        for sentence in split_into_sentences(&res.text) {
            let id = state.index.add_document(&res.url, &title, &sentence);
            state.store.insert(Document::new(
                id,
                res.url.clone(),
                title.clone(),
                sentence,
                Vec::new(),
                Vec::new(),
                unit_metadata("sentence", Some(&page_id)),
                1,
            ));
        }

        for snippet in snippets {
            let id = state.index.add_document(&res.url, &title, &snippet);
            state.store.insert(Document::new(
                id,
                res.url.clone(),
                title.clone(),
                snippet,
                Vec::new(),
                Vec::new(),
                unit_metadata("code", Some(&page_id)),
                1,
            ));
        }
        debug!(url = %res.url, "indexed page and derived units");
    }
}

fn unit_metadata(unit: &str, parent: Option<&str>) -> HashMap<String, String> {
    let mut metadata = HashMap::new();
    metadata.insert("unit".to_string(), unit.to_string());
    if let Some(parent) = parent {
        metadata.insert("parent".to_string(), parent.to_string());
    }
    metadata
}
