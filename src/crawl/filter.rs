// src/crawl/filter.rs
// =============================================================================
// This module turns a page's raw hrefs into the new URLs worth visiting.
//
// Steps:
// 1. Drop every candidate the validator rejects (and missing hrefs)
// 2. Drop duplicate candidates
// 3. Resolve each survivor against the homepage to an absolute URL
// 4. Drop anything already in the visited set
//
// The caller owns the visited set and is responsible for inserting the
// returned URLs into it.
// =============================================================================

use std::collections::HashSet;
use url::Url;

use super::validate::is_eligible;

// Filters raw links down to new, absolute, same-domain URLs
//
// Parameters:
//   domain: the homepage URL (used for validation and as the join base)
//   visited: every URL already queued during this crawl
//   raw_links: hrefs as extracted from the page, None for a missing value
//   sort: sort the survivors lexically instead of keeping discovery order
//
// Returns: Vec of absolute URLs, each appearing once
//
// Survivors keep the order they were first seen in unless `sort` is set.
// Callers must not rely on that order matching the page's link order.
pub fn filter_links(
    domain: &str,
    visited: &HashSet<String>,
    raw_links: &[Option<String>],
    sort: bool,
) -> Vec<String> {
    let base = Url::parse(domain).ok();

    let mut seen_raw = HashSet::new();
    let mut seen_resolved = HashSet::new();
    let mut survivors = Vec::new();

    for candidate in raw_links.iter().flatten() {
        if !is_eligible(domain, candidate) {
            continue;
        }
        if !seen_raw.insert(candidate.as_str()) {
            continue;
        }

        let absolute = match resolve_link(domain, base.as_ref(), candidate) {
            Some(url) => url,
            None => continue,
        };

        // "/a/" and "http://host/a/" resolve to the same page
        if visited.contains(&absolute) || !seen_resolved.insert(absolute.clone()) {
            continue;
        }
        survivors.push(absolute);
    }

    if sort {
        survivors.sort();
    }
    survivors
}

// Resolves a candidate against the homepage
//
// Absolute URLs are returned exactly as written; everything else is joined
// onto the homepage with standard URL-join rules.
fn resolve_link(domain: &str, base: Option<&Url>, candidate: &str) -> Option<String> {
    if Url::parse(candidate).is_ok() {
        return Some(candidate.to_string());
    }

    match base {
        Some(base) => base.join(candidate).ok().map(|url| url.to_string()),
        // Unparseable homepage: plain concatenation is the best we can do
        None if candidate.starts_with('/') => {
            Some(format!("{}{}", domain.trim_end_matches('/'), candidate))
        }
        None => None,
    }
}
