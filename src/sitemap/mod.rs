// src/sitemap/mod.rs
// =============================================================================
// This module holds the result of a crawl: one record per visited page.
//
// Submodules:
// - render: turns a finished sitemap into the indented text report
//
// The homepage is stored under the key "top"; every other page is stored
// under its absolute URL, which is also the string its parent lists in
// `child_links`.
// =============================================================================

mod render;

pub use render::render;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::fetch::PageData;

/// Key under which the homepage's record is stored
pub const ROOT_KEY: &str = "top";

/// Everything learned about one visited page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// Links exactly as extracted, before any filtering
    pub raw_links: Vec<Option<String>>,
    pub css: Vec<String>,
    pub images: Vec<String>,
    /// Absolute URLs of in-domain pages first discovered here, in discovery order
    pub child_links: Vec<String>,
    /// Set when the page could not be fetched; the record is then empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch_error: Option<String>,
}

impl PageRecord {
    pub fn from_page(page: PageData, child_links: Vec<String>) -> Self {
        Self {
            raw_links: page.links,
            css: page.css,
            images: page.images,
            child_links,
            fetch_error: None,
        }
    }

    /// Placeholder for a page that was queued but could not be fetched
    pub fn failed(message: String) -> Self {
        Self {
            fetch_error: Some(message),
            ..Self::default()
        }
    }
}

/// Page key -> record for every page visited by one crawl
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sitemap {
    pages: HashMap<String, PageRecord>,
}

impl Sitemap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, record: PageRecord) {
        self.pages.insert(key.into(), record);
    }

    pub fn get(&self, key: &str) -> Option<&PageRecord> {
        self.pages.get(key)
    }

    pub fn root(&self) -> Option<&PageRecord> {
        self.get(ROOT_KEY)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }
}
