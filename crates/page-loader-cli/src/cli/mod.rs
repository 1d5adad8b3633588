//! CLI for page-loader.

mod progress;

use anyhow::Result;
use clap::Parser;
use page_loader_core::config::{self, PageLoaderConfig};
use page_loader_core::logging::LogLevel;
use page_loader_core::{CurlFetcher, PageLoader};
use std::path::PathBuf;
use std::sync::mpsc;

/// Save a web page and its local images, stylesheets and scripts.
#[derive(Debug, Parser)]
#[command(name = "page-loader", version)]
#[command(about = "Download a web page for offline viewing", long_about = None)]
pub struct Cli {
    /// HTTP/HTTPS URL of the page.
    pub url: String,

    /// Directory to save the page into (must exist).
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub output: PathBuf,

    /// Log verbosity: critical, error, warning, info, debug or notset. RUST_LOG overrides it.
    #[arg(short = 'l', long, default_value = "warning", value_name = "LEVEL")]
    pub log_level: LogLevel,

    /// Append logs to this file instead of ~/.local/state/page-loader/page-loader.log.
    #[arg(short = 'f', long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Download up to N resources at once (overrides config).
    #[arg(short = 'j', long, value_name = "N")]
    pub jobs: Option<usize>,

    /// Do not print per-resource progress.
    #[arg(long)]
    pub no_progress: bool,
}

impl Cli {
    /// Loads the page and returns the absolute path of the saved document.
    pub fn run(&self) -> Result<PathBuf> {
        let cfg = config::load_or_init().unwrap_or_else(|e| {
            tracing::warn!("could not load config ({:#}), using defaults", e);
            PageLoaderConfig::default()
        });
        tracing::debug!("loaded config: {:?}", cfg);

        let mut options = cfg.loader_options();
        if let Some(jobs) = self.jobs {
            options.max_concurrent_downloads = jobs.max(1);
        }
        let loader = PageLoader::new(CurlFetcher::new(cfg.fetch_options()), options);

        if self.no_progress {
            return Ok(loader.download(&self.url, &self.output)?.html_path);
        }

        let (progress_tx, progress_rx) = mpsc::channel();
        let printer = std::thread::spawn(move || progress::print_progress(progress_rx));
        let result = loader.with_progress(progress_tx).download(&self.url, &self.output);
        // The loader owned the sender; dropping it ends the printer loop.
        let _ = printer.join();

        Ok(result?.html_path)
    }
}
