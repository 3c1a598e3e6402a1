// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
// =============================================================================

use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "site-mapper",
    version,
    about = "Crawl a website and write a sitemap of its pages, images and stylesheets",
    long_about = "site-mapper starts at a homepage, follows every same-domain link it finds \
                  and writes an indented report of each page's images, stylesheets and \
                  child pages."
)]
pub struct Cli {
    /// Homepage to start crawling from (e.g., https://example.com)
    pub homepage: String,

    /// File to write the sitemap report to
    pub outfile: PathBuf,

    /// Number of pages fetched at the same time
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub workers: u16,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Sort each page's child links so the report is reproducible
    #[arg(long)]
    pub sorted: bool,

    /// Also write the sitemap as JSON to this file
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,

    /// Show debug logs
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print errors; no progress output
    #[arg(short, long)]
    pub quiet: bool,
}
