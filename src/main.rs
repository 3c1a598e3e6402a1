// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging
// 3. Crawl the site, printing progress as pages are visited
// 4. Write the sitemap report (and optionally a JSON dump)
// 5. Exit with proper code (0 = report written, 1 = homepage unreachable,
//    2 = unexpected error)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod crawl;         // src/crawl/ - link filtering and the crawl itself
mod error;         // src/error.rs - fetch and crawl error types
mod fetch;         // src/fetch/ - turning URLs into link lists
mod logging;       // src/logging.rs - tracing setup
mod sitemap;       // src/sitemap/ - crawl results and the text report

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use cli::Cli;
use crawl::{CrawlEngine, CrawlEvent, CrawlOptions};
use fetch::{HttpFetcher, PageFetcher};
use sitemap::Sitemap;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(2);
    }

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> Result<i32> {
    let fetcher = HttpFetcher::new(Duration::from_secs(cli.timeout))
        .context("failed to create HTTP client")?;

    let options = CrawlOptions {
        workers: usize::from(cli.workers),
        sort_links: cli.sorted,
    };

    let mut engine = CrawlEngine::new(fetcher).with_options(options);
    if !cli.quiet {
        engine = engine.with_progress_callback(Arc::new(print_event));
    }

    map_site(&mut engine, &cli.homepage, &cli.outfile, cli.json.as_deref()).await
}

// Crawls `homepage` and writes the report files
//
// Returns: Ok(0) when the report was written, Ok(1) when the homepage could
// not be fetched (nothing is written in that case)
async fn map_site<F: PageFetcher>(
    engine: &mut CrawlEngine<F>,
    homepage: &str,
    outfile: &Path,
    json: Option<&Path>,
) -> Result<i32> {
    let sitemap = match engine.crawl(homepage).await {
        Ok(sitemap) => sitemap,
        Err(e) => {
            error!("{}", e);
            eprintln!("❌ Invalid hostname: {}", homepage);
            return Ok(1);
        }
    };

    debug!("{} URL(s) queued during the crawl", engine.visited().len());
    write_report(&sitemap, homepage, outfile)?;

    if let Some(json_path) = json {
        write_json(&sitemap, json_path)?;
    }

    Ok(0)
}

fn write_report(sitemap: &Sitemap, homepage: &str, outfile: &Path) -> Result<()> {
    println!("\n📝 Writing to file: {}", outfile.display());

    let report = sitemap::render(sitemap, homepage);
    std::fs::write(outfile, report)
        .with_context(|| format!("failed to write report to {}", outfile.display()))
}

fn write_json(sitemap: &Sitemap, path: &Path) -> Result<()> {
    println!("📝 Writing JSON to file: {}", path.display());

    let json = serde_json::to_string_pretty(sitemap)?;
    std::fs::write(path, json).with_context(|| format!("failed to write JSON to {}", path.display()))
}

// Prints human-readable progress for one crawl event
fn print_event(event: &CrawlEvent) {
    match event {
        CrawlEvent::Started { homepage } => println!("🔍 Crawling domain {}", homepage),
        CrawlEvent::QueueSize(count) => println!("📋 Number of sites to visit: {}", count),
        CrawlEvent::Visiting { url } => println!("   Crawling page {}", url),
        CrawlEvent::Discovered { children, .. } => {
            if !children.is_empty() {
                println!("   Child links:");
                for child in children {
                    println!("     {}", child);
                }
            }
        }
        CrawlEvent::PageFailed { url, error } => {
            println!("   ⚠️  Could not fetch {}: {}", url, error)
        }
        CrawlEvent::Finished { pages } => println!("📄 Mapped {} page(s)", pages),
    }
}
