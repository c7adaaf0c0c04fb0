//! Markup → display text.
//!
//! Service strings are inserted unescaped, so tags in them are markup, not
//! literal text. egui has no HTML layer; these helpers parse the markup with
//! `scraper` and keep only what a reader would see.

use scraper::{ElementRef, Html, Node};

/// Tags whose contents are never shown
const SKIP_CHILDREN: &[&str] = &["script", "style", "noscript", "svg", "template"];

/// Tags that start and end on their own line
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "footer", "form", "h1", "h2", "h3",
    "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section",
    "table", "tr", "ul",
];

/// Text content of an inline fragment, whitespace collapsed to single spaces.
pub fn fragment_text(fragment: &str) -> String {
    let html = Html::parse_fragment(fragment);
    let mut out = String::new();
    collect_inline(html.root_element(), &mut out);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_inline(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Element(e) => {
                if SKIP_CHILDREN.contains(&e.name()) {
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_inline(child_el, out);
                }
            }
            Node::Text(t) => out.push_str(&t.text),
            _ => {}
        }
    }
}

/// Text content of a larger HTML reply with its line structure kept:
/// `<br>` and block boundaries become newlines, at most one blank line in a row.
pub fn document_text(markup: &str) -> String {
    let html = Html::parse_fragment(markup);
    let mut raw = String::new();
    collect_blocks(html.root_element(), &mut raw);

    let mut lines: Vec<String> = Vec::new();
    for line in raw.split('\n') {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() && lines.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

fn collect_blocks(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Element(e) => {
                let tag = e.name();
                if SKIP_CHILDREN.contains(&tag) {
                    continue;
                }
                if tag == "br" {
                    out.push('\n');
                    continue;
                }
                let block = BLOCK_TAGS.contains(&tag);
                if block {
                    line_break(out);
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_blocks(child_el, out);
                }
                if block {
                    line_break(out);
                }
            }
            Node::Text(t) => {
                // Source newlines are layout whitespace, not breaks
                for (i, word) in t.text.split(|c: char| c.is_whitespace()).enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    out.push_str(word);
                }
            }
            _ => {}
        }
    }
}

fn line_break(out: &mut String) {
    let kept = out.trim_end_matches(' ').len();
    out.truncate(kept);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}
