// src/crawl/validate.rs
// =============================================================================
// This module decides whether a discovered reference is worth crawling.
//
// A link is eligible when it:
// - is not empty and not a bare "/"
// - does not look like an email/contact link
// - is not a locale-prefixed path (/en/, /en-de/), which would just
//   re-crawl the whole site once per language
// - does not point back at the homepage itself
// - stays on the homepage's host
//
// The rules are checked in that order and the first match wins.
// =============================================================================

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

// Leading two-letter path segment, optionally with a region suffix
static LOCALE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/[a-z]{2}(-[a-z]{2})?/").unwrap());

// Checks whether `candidate` (as found in an href) should be crawled
//
// Parameters:
//   domain: the homepage URL the crawl started from
//   candidate: the raw href value
//
// Returns: true if the link is same-domain, non-circular and not junk
//
// Example:
//   is_eligible("http://example.com", "/about/")            -> true
//   is_eligible("http://example.com", "http://other.com/x") -> false
pub fn is_eligible(domain: &str, candidate: &str) -> bool {
    if candidate.chars().count() <= 1 {
        return false;
    }

    if candidate.contains("email") {
        return false;
    }

    if LOCALE_PREFIX.is_match(candidate) {
        return false;
    }

    // Circular link back to the homepage
    if candidate.trim_matches('/') == domain.trim_matches('/') {
        return false;
    }

    // Root-relative path; "//host/..." is protocol-relative and checked below
    if candidate.starts_with('/') && !candidate.starts_with("//") {
        return true;
    }

    same_host(domain, candidate)
}

// Compares the host (and port) of an absolute candidate with the domain's
//
// A candidate that fails to parse, or has no host, never matches.
fn same_host(domain: &str, candidate: &str) -> bool {
    let base = match Url::parse(domain) {
        Ok(url) => url,
        Err(_) => return false,
    };

    let target = if candidate.starts_with("//") {
        base.join(candidate)
    } else {
        Url::parse(candidate)
    };

    match target {
        Ok(target) => {
            target.host_str().is_some()
                && target.host_str() == base.host_str()
                && target.port_or_known_default() == base.port_or_known_default()
        }
        Err(_) => false,
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why LazyLock?
//    - Compiling a regex is comparatively expensive
//    - LazyLock compiles it once, the first time it is used
//    - Every later call reuses the same compiled pattern
//
// 2. Why compare the port too?
//    - http://example.com:8080 and http://example.com are different servers
//    - port_or_known_default() makes http://example.com and
//      http://example.com:80 compare equal
//
// 3. Why is "email" a substring check?
//    - It is a heuristic: it drops mailto-style links and "email us" pages
//    - It will also drop a legitimate /newsletter-email-archive/ page
// -----------------------------------------------------------------------------
