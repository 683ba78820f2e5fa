use crate::engine::{CrawlResult, Crawler};
use crate::process::new_process_dir;
use anyhow::Result;
use docdex_core::config;
use std::path::{Path, PathBuf};
use tracing::info;

/// Parameters and bookkeeping of one crawl job.
#[derive(Debug, Clone)]
pub struct CrawlJob {
    pub seed_url: String,
    pub max_depth: usize,
    pub max_pages: usize,
    pub concurrency: usize,
    pub process_id: String,
    pub process_dir: PathBuf,
}

/// Manages crawl jobs and their process directories under the config dir.
pub struct Scheduler {
    config_dir: PathBuf,
}

impl Scheduler {
    pub fn new(config_dir: &Path) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
        }
    }

    /// Allocate a process directory, run a crawl to completion, and return
    /// the job record alongside its results.
    pub async fn start_crawl_job(
        &self,
        seed_url: &str,
        max_depth: usize,
        max_pages: usize,
        concurrency: usize,
    ) -> Result<(CrawlJob, Vec<CrawlResult>)> {
        let processes = config::processes_dir(&self.config_dir);
        let process_dir = new_process_dir(&processes)?;
        let crawler = Crawler::new(seed_url, &process_dir)?;
        info!(seed = seed_url, process_id = crawler.process_id(), "starting crawl job");
        let process_id = crawler.process_id().to_string();
        let results = crawler.start(max_depth, max_pages, concurrency).await?;
        let job = CrawlJob {
            seed_url: seed_url.to_string(),
            max_depth,
            max_pages,
            concurrency,
            process_id,
            process_dir,
        };
        Ok((job, results))
    }
}
