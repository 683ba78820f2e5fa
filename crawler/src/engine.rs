use crate::extract;
use crate::frontier::{CrawlTask, Frontier};
use parking_lot::Mutex;
use reqwest::{redirect, Client};
use scraper::Html;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use url::Url;

pub const RESULTS_FILE_NAME: &str = "results.json";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 12;
const USER_AGENT: &str = "docdex-crawler/0.1 (+https://example.com/docdex)";

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("invalid seed URL {url:?}: {reason}")]
    InvalidSeed { url: String, reason: String },
    #[error("failed to build HTTP client")]
    Client(#[from] reqwest::Error),
    #[error("failed to persist crawl results")]
    Persist(#[from] std::io::Error),
    #[error("failed to encode crawl results")]
    Encode(#[from] serde_json::Error),
}

/// One successfully fetched page. Also the schema of the per-job
/// `results.json` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlResult {
    pub url: String,
    pub text: String,
}

/// Set of normalized URLs already scheduled. Grows monotonically for the
/// lifetime of one crawl job; check-and-insert holds a single lock.
#[derive(Default)]
pub struct VisitedSet {
    inner: Mutex<HashSet<String>>,
}

impl VisitedSet {
    /// Insert unconditionally; `false` means the URL was already scheduled.
    fn insert(&self, url: &str) -> bool {
        self.inner.lock().insert(url.to_string())
    }

    /// Admit a discovered link: not yet scheduled and the set still below
    /// the page cap.
    fn try_schedule(&self, url: &str, max_pages: usize) -> bool {
        let mut set = self.inner.lock();
        if set.len() >= max_pages || set.contains(url) {
            return false;
        }
        set.insert(url.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

/// Bounded, host-scoped, concurrent breadth-first crawler for one job.
pub struct Crawler {
    client: Client,
    visited: Arc<VisitedSet>,
    seed: Url,
    host: String,
    process_dir: PathBuf,
    process_id: String,
}

impl Crawler {
    /// Build a crawler for `seed`, persisting into `process_dir`. Fails fast
    /// with [`CrawlError::InvalidSeed`] when the seed does not parse into an
    /// http(s) URL with a host.
    pub fn new(seed: &str, process_dir: &Path) -> Result<Self, CrawlError> {
        let invalid = |reason: &str| CrawlError::InvalidSeed {
            url: seed.to_string(),
            reason: reason.to_string(),
        };
        let parsed = Url::parse(seed).map_err(|e| invalid(&e.to_string()))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(invalid("scheme must be http or https"));
        }
        let host = match parsed.host_str() {
            Some(host) if !host.is_empty() => extract::normalize_host(host),
            _ => return Err(invalid("missing host")),
        };
        let seed_url = extract::normalize_url(parsed).ok_or_else(|| invalid("missing host"))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(redirect::Policy::limited(5))
            .timeout(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS))
            .build()?;

        let process_id = process_dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        Ok(Self {
            client,
            visited: Arc::new(VisitedSet::default()),
            seed: seed_url,
            host,
            process_dir: process_dir.to_path_buf(),
            process_id,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn process_id(&self) -> &str {
        &self.process_id
    }

    pub fn process_dir(&self) -> &Path {
        &self.process_dir
    }

    /// Run the crawl to completion and return the collected results, also
    /// persisted to `<process_dir>/results.json`.
    ///
    /// `max_depth` is exact (enforced at dequeue); `max_pages` is a soft
    /// ceiling: the collector stops at `max_pages` results but in-flight
    /// fetches run to completion and late results are dropped. Per-page
    /// fetch and parse failures are discarded silently.
    pub async fn start(
        &self,
        max_depth: usize,
        max_pages: usize,
        concurrency: usize,
    ) -> Result<Vec<CrawlResult>, CrawlError> {
        let frontier = Arc::new(Frontier::new());
        let in_flight = Arc::new(AtomicUsize::new(0));
        let (results_tx, mut results_rx) = mpsc::unbounded_channel();

        if self.visited.insert(self.seed.as_str()) {
            in_flight.fetch_add(1, Ordering::SeqCst);
            frontier.push(CrawlTask {
                url: self.seed.to_string(),
                depth: 0,
            });
        } else {
            frontier.close();
        }

        let concurrency = concurrency.max(1);
        let mut workers = Vec::with_capacity(concurrency);
        for _ in 0..concurrency {
            let worker = Worker {
                client: self.client.clone(),
                frontier: Arc::clone(&frontier),
                visited: Arc::clone(&self.visited),
                in_flight: Arc::clone(&in_flight),
                results: results_tx.clone(),
                host: self.host.clone(),
                max_depth,
                max_pages,
            };
            workers.push(tokio::spawn(worker.run()));
        }
        drop(results_tx);

        let mut results = Vec::new();
        while results.len() < max_pages {
            match results_rx.recv().await {
                Some(res) => results.push(res),
                None => break,
            }
        }

        for handle in workers {
            let _ = handle.await;
        }

        self.save_results(&results)?;
        Ok(results)
    }

    fn save_results(&self, results: &[CrawlResult]) -> Result<(), CrawlError> {
        fs::create_dir_all(&self.process_dir)?;
        let file = fs::File::create(self.process_dir.join(RESULTS_FILE_NAME))?;
        serde_json::to_writer_pretty(file, results)?;
        Ok(())
    }
}

struct Worker {
    client: Client,
    frontier: Arc<Frontier>,
    visited: Arc<VisitedSet>,
    in_flight: Arc<AtomicUsize>,
    results: mpsc::UnboundedSender<CrawlResult>,
    host: String,
    max_depth: usize,
    max_pages: usize,
}

impl Worker {
    async fn run(self) {
        while let Some(task) = self.frontier.next().await {
            self.process(task).await;
            // This decrement happens strictly after the task's own enqueues
            // (each preceded by its own increment), so the zero-crossing can
            // never race an in-progress producer.
            if self.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
                self.frontier.close();
            }
        }
    }

    async fn process(&self, task: CrawlTask) {
        if task.depth > self.max_depth {
            debug!(url = %task.url, depth = task.depth, "depth bound exceeded");
            return;
        }
        debug!(url = %task.url, depth = task.depth, "fetching");
        let resp = match self.client.get(&task.url).send().await {
            Ok(resp) => resp,
            Err(err) => {
                warn!(url = %task.url, error = %err, "fetch failed");
                return;
            }
        };
        if !resp.status().is_success() {
            warn!(url = %task.url, status = %resp.status(), "non-success status");
            return;
        }
        let body = match resp.text().await {
            Ok(body) => body,
            Err(err) => {
                warn!(url = %task.url, error = %err, "failed to read body");
                return;
            }
        };

        let (text, links) = parse_page(&body, &task.url, &self.host);
        let _ = self.results.send(CrawlResult {
            url: task.url.clone(),
            text,
        });
        debug!(url = %task.url, count = links.len(), "links extracted");

        for link in links {
            if self.visited.try_schedule(&link, self.max_pages) {
                self.in_flight.fetch_add(1, Ordering::SeqCst);
                self.frontier.push(CrawlTask {
                    url: link,
                    depth: task.depth + 1,
                });
            }
        }
    }
}

// Parse and extract in one synchronous pass: `Html` is not `Send` and must
// not be held across an await.
fn parse_page(body: &str, page_url: &str, host: &str) -> (String, Vec<String>) {
    let doc = Html::parse_document(body);
    let text = extract::extract_text(&doc);
    let links = match Url::parse(page_url) {
        Ok(base) => extract::extract_links(&doc, &base, host),
        Err(_) => Vec::new(),
    };
    (text, links)
}
