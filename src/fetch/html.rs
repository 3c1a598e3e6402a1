// src/fetch/html.rs
// =============================================================================
// This module extracts the references a sitemap cares about from HTML.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (Document Object Model)
// - Supports CSS selectors for finding elements
// - Is built on html5ever (Mozilla's HTML parser)
//
// Values are returned exactly as written in the page. Resolving and
// filtering them is the crawler's job, not ours.
// =============================================================================

use scraper::{ElementRef, Html, Selector};

use super::PageData;

// Extracts links, stylesheets and images from an HTML document
//
// Parameters:
//   html: the HTML content to parse
//
// Returns: PageData with
//   links:  every non-empty <a href>
//   css:    every non-empty <link href> whose rel is exactly "stylesheet"
//   images: every non-empty <img src>
//
// Example:
//   html = "<a href='/docs'>Docs</a><img src='logo.png'>"
//   result = PageData { links: [Some("/docs")], css: [], images: ["logo.png"] }
pub fn extract_page_data(html: &str) -> PageData {
    let document = Html::parse_document(html);

    // These selectors are constants and known to be valid
    let anchor = Selector::parse("a[href]").unwrap();
    let link = Selector::parse("link[href]").unwrap();
    let image = Selector::parse("img[src]").unwrap();

    let links = document
        .select(&anchor)
        .filter_map(|element| non_empty_attr(element, "href"))
        .map(Some)
        .collect();

    let css = document
        .select(&link)
        .filter(|element| element.value().attr("rel") == Some("stylesheet"))
        .filter_map(|element| non_empty_attr(element, "href"))
        .collect();

    let images = document
        .select(&image)
        .filter_map(|element| non_empty_attr(element, "src"))
        .collect();

    PageData { links, css, images }
}

fn non_empty_attr(element: ElementRef<'_>, name: &str) -> Option<String> {
    element
        .value()
        .attr(name)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
