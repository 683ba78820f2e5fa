use anyhow::Result;
use clap::Parser;
use docdex_core::config;
use docdex_crawler::Scheduler;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(about = "Crawl a documentation site into a per-job results.json")]
struct Cli {
    /// Seed URL to crawl
    #[arg(long)]
    url: String,
    /// Maximum crawl depth
    #[arg(long, default_value_t = 2)]
    depth: usize,
    /// Maximum pages to collect
    #[arg(long = "max-pages", default_value_t = 20)]
    max_pages: usize,
    /// Number of concurrent workers
    #[arg(long, default_value_t = 4)]
    concurrency: usize,
    /// Config directory (defaults to ~/.docdex)
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();

    let config_dir = match args.config_dir {
        Some(dir) => dir,
        None => config::default_config_dir()?,
    };
    let cfg = config::load_config(&config_dir)?;
    tracing::debug!(app = %cfg.app_name, version = %cfg.version, "config loaded");

    let scheduler = Scheduler::new(&config_dir);
    let (job, results) = scheduler
        .start_crawl_job(&args.url, args.depth, args.max_pages, args.concurrency)
        .await?;
    tracing::info!(
        pages = results.len(),
        process_id = %job.process_id,
        process_dir = %job.process_dir.display(),
        "crawl complete"
    );
    Ok(())
}
