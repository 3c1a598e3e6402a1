// src/sitemap/render.rs
// =============================================================================
// This module renders a finished sitemap as an indented text report.
//
// Output shape (4 spaces of extra indent per level):
//
//   Site: http://example.com
//   - Images:
//     logo.png
//   - CSS:
//     /style.css
//   - Child links:
//       Site: http://example.com/about/
//       - Child links:
//           Site: http://example.com/about/team/
//
// "- Images:" and "- CSS:" are only written when the page has any, and
// "- Child links:" only when the page discovered children.
// =============================================================================

use std::collections::HashSet;

use super::{PageRecord, Sitemap, ROOT_KEY};

const INDENT: usize = 4;

// Renders the sitemap as a tree rooted at the homepage
//
// Parameters:
//   sitemap: a finished sitemap
//   homepage: the URL printed on the root line
//
// Returns: the report text; empty if the sitemap has no homepage record
//
// Each page is rendered at most once. A child that was already rendered
// (which only happens if someone built the sitemap by hand with a cycle)
// is skipped, and a child with no record prints only its "Site:" line.
pub fn render(sitemap: &Sitemap, homepage: &str) -> String {
    let mut out = String::new();

    let root = match sitemap.root() {
        Some(record) => record,
        None => return out,
    };

    let mut rendered = HashSet::new();
    rendered.insert(ROOT_KEY.to_string());

    write_details(&mut out, homepage, Some(root), 0);
    write_children(&mut out, sitemap, ROOT_KEY, 0, &mut rendered);

    out
}

// Writes the "Site:" line plus the Images and CSS blocks for one page
fn write_details(out: &mut String, url: &str, record: Option<&PageRecord>, indent: usize) {
    push_line(out, indent, &format!("Site: {}", url));

    let record = match record {
        Some(record) => record,
        None => return,
    };

    if !record.images.is_empty() {
        push_line(out, indent, "- Images:");
        for image in &record.images {
            push_line(out, indent, &format!("  {}", image));
        }
    }

    if !record.css.is_empty() {
        push_line(out, indent, "- CSS:");
        for css in &record.css {
            push_line(out, indent, &format!("  {}", css));
        }
    }
}

// Writes the "- Child links:" block for `key` and recurses into each child
fn write_children(
    out: &mut String,
    sitemap: &Sitemap,
    key: &str,
    indent: usize,
    rendered: &mut HashSet<String>,
) {
    let children = match sitemap.get(key) {
        Some(record) if !record.child_links.is_empty() => &record.child_links,
        _ => return,
    };

    push_line(out, indent, "- Child links:");

    let child_indent = indent + INDENT;
    for child in children {
        if !rendered.insert(child.clone()) {
            continue;
        }
        write_details(out, child, sitemap.get(child), child_indent);
        write_children(out, sitemap, child, child_indent, rendered);
    }
}

fn push_line(out: &mut String, indent: usize, text: &str) {
    out.push_str(&" ".repeat(indent));
    out.push_str(text);
    out.push('\n');
}
