//! Splice rendered tags into an HTML document.
//!
//! Mirrors what bundler hosts do with the tags a markup transform returns:
//!
//! ```text
//! <head>  ← HeadPrepend
//!   ...
//!         ← Head
//! </head>
//! <body>  ← BodyPrepend
//!   ...
//!         ← Body
//! </body>
//! ```
//!
//! When an anchor element is missing, prepend targets fall back to just after
//! `<html>`, then just after a leading `<!DOCTYPE>`, then the start of the
//! document. Append targets fall back to the end.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::tag::{HtmlTag, InjectTo};

static HEAD_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<head(\s[^>]*)?>").unwrap());
static HEAD_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</head>").unwrap());
static BODY_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<body(\s[^>]*)?>").unwrap());
static BODY_CLOSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</body>").unwrap());
static HTML_OPEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<html(\s[^>]*)?>").unwrap());
static DOCTYPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*<!doctype[^>]*>").unwrap());

/// Inject `tags` into `html`, keeping the relative order of tags that share
/// an injection point.
pub fn inject_tags(html: &str, tags: &[HtmlTag]) -> String {
    let mut out = html.to_string();
    for target in [
        InjectTo::HeadPrepend,
        InjectTo::Head,
        InjectTo::BodyPrepend,
        InjectTo::Body,
    ] {
        let snippet: String = tags
            .iter()
            .filter(|tag| tag.inject_to == target)
            .map(HtmlTag::render)
            .collect();
        if snippet.is_empty() {
            continue;
        }
        out = insert_at(&out, target, &snippet);
    }
    out
}

/// First offset where content may go when the page has no usable anchor:
/// inside `<html>`, else after the doctype, else 0
fn document_start(html: &str) -> usize {
    HTML_OPEN
        .find(html)
        .or_else(|| DOCTYPE.find(html))
        .map(|m| m.end())
        .unwrap_or(0)
}

fn insert_at(html: &str, target: InjectTo, snippet: &str) -> String {
    let position = match target {
        InjectTo::HeadPrepend => HEAD_OPEN
            .find(html)
            .map(|m| m.end())
            .unwrap_or_else(|| document_start(html)),
        InjectTo::Head => HEAD_CLOSE
            .find(html)
            .map(|m| m.start())
            .or_else(|| BODY_OPEN.find(html).map(|m| m.start()))
            .unwrap_or(html.len()),
        InjectTo::BodyPrepend => BODY_OPEN
            .find(html)
            .map(|m| m.end())
            .or_else(|| HEAD_CLOSE.find(html).map(|m| m.end()))
            .unwrap_or_else(|| document_start(html)),
        InjectTo::Body => BODY_CLOSE
            .find(html)
            .map(|m| m.start())
            .unwrap_or(html.len()),
    };

    let (before, after) = html.split_at(position);
    let mut out = String::with_capacity(html.len() + snippet.len());
    out.push_str(before);
    out.push_str(snippet);
    out.push_str(after);
    out
}
