use anyhow::{bail, Result};
use clap::Parser;
use docdex_core::config;
use docdex_crawler::{CrawlResult, Scheduler};
use docdex_server::{build_router, index_results, AppState};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "server")]
#[command(about = "Crawl (or load) a documentation site and serve search over it")]
struct Args {
    /// Seed URL: crawl before serving
    #[arg(long, conflicts_with = "results")]
    seed: Option<String>,
    /// Load a previous job's results.json instead of crawling
    #[arg(long)]
    results: Option<PathBuf>,
    /// Maximum crawl depth
    #[arg(long, default_value_t = 2)]
    depth: usize,
    /// Maximum pages to collect
    #[arg(long = "max-pages", default_value_t = 20)]
    max_pages: usize,
    /// Number of concurrent crawl workers
    #[arg(long, default_value_t = 4)]
    concurrency: usize,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
    /// Config directory (defaults to ~/.docdex)
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let config_dir = match args.config_dir {
        Some(dir) => dir,
        None => config::default_config_dir()?,
    };
    let cfg = config::load_config(&config_dir)?;
    tracing::debug!(app = %cfg.app_name, version = %cfg.version, "config loaded");

    let results: Vec<CrawlResult> = if let Some(seed) = &args.seed {
        let scheduler = Scheduler::new(&config_dir);
        let (job, results) = scheduler
            .start_crawl_job(seed, args.depth, args.max_pages, args.concurrency)
            .await?;
        tracing::info!(
            pages = results.len(),
            process_dir = %job.process_dir.display(),
            "crawl complete"
        );
        results
    } else if let Some(path) = &args.results {
        let raw = std::fs::read_to_string(path)?;
        serde_json::from_str(&raw)?
    } else {
        bail!("provide --seed to crawl or --results to load a previous job");
    };

    let state = AppState::new();
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(12))
        .build()?;
    index_results(&state, &client, &results).await;
    tracing::info!(documents = state.index.doc_count(), "index ready");

    let app = build_router(state);
    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
