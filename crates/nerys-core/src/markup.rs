//! Inline markup renderer.
//!
//! Turns raw assistant/user text into safe structured rendering
//! instructions. The renderer is pure and total: malformed input degrades to
//! literal paragraphs, it never fails.
//!
//! Lines are processed one at a time through a three-state list machine
//! (none / unordered / ordered) with no nesting and no backtracking. Every
//! line is HTML-escaped *before* the restricted inline pass, so emphasis
//! markers cannot be smuggled in through untrusted characters.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-•]\s+(\S.*)$").unwrap());
static NUMBERED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s+(\S.*)$").unwrap());
static STRONG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static EMPHASIS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*([^*]+)\*").unwrap());

/// An inline span. Text is already escaped for safe embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    Text { text: String },
    Strong { text: String },
    Emphasis { text: String },
}

impl Inline {
    /// The escaped text content of the span.
    pub fn as_str(&self) -> &str {
        match self {
            Inline::Text { text } | Inline::Strong { text } | Inline::Emphasis { text } => text,
        }
    }
}

/// A block-level rendering instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Paragraph { spans: Vec<Inline> },
    ParagraphBreak,
    List {
        ordered: bool,
        items: Vec<Vec<Inline>>,
    },
}

/// Renders raw text into block nodes.
pub fn render(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    // Single-slot list state: None, or (ordered?, accumulated items).
    let mut list: Option<(bool, Vec<Vec<Inline>>)> = None;

    for raw_line in text.lines() {
        let line = raw_line.trim();

        if line.is_empty() {
            close_list(&mut blocks, &mut list);
            blocks.push(Block::ParagraphBreak);
        } else if let Some(caps) = BULLET_RE.captures(line) {
            push_item(&mut blocks, &mut list, false, &caps[1]);
        } else if let Some(caps) = NUMBERED_RE.captures(line) {
            push_item(&mut blocks, &mut list, true, &caps[1]);
        } else {
            close_list(&mut blocks, &mut list);
            blocks.push(Block::Paragraph {
                spans: parse_inline(&escape(line)),
            });
        }
    }

    close_list(&mut blocks, &mut list);
    blocks
}

fn push_item(
    blocks: &mut Vec<Block>,
    list: &mut Option<(bool, Vec<Vec<Inline>>)>,
    ordered: bool,
    content: &str,
) {
    let item = parse_inline(&escape(content));
    match list {
        Some((kind, items)) if *kind == ordered => items.push(item),
        _ => {
            // A list of the other kind is open: close it first.
            close_list(blocks, list);
            *list = Some((ordered, vec![item]));
        }
    }
}

fn close_list(blocks: &mut Vec<Block>, list: &mut Option<(bool, Vec<Vec<Inline>>)>) {
    if let Some((ordered, items)) = list.take() {
        blocks.push(Block::List { ordered, items });
    }
}

/// Escapes `&`, `<`, `>` and `"` for safe embedding. Ampersand first so
/// already-produced entities are not double-escaped.
pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Restricted inline pass over escaped text: `**x**` then `*x*`.
fn parse_inline(escaped: &str) -> Vec<Inline> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for caps in STRONG_RE.captures_iter(escaped) {
        let m = caps.get(0).unwrap();
        if m.start() > cursor {
            push_emphasis(&mut spans, &escaped[cursor..m.start()]);
        }
        spans.push(Inline::Strong {
            text: caps[1].to_string(),
        });
        cursor = m.end();
    }
    if cursor < escaped.len() {
        push_emphasis(&mut spans, &escaped[cursor..]);
    }

    spans
}

fn push_emphasis(spans: &mut Vec<Inline>, segment: &str) {
    let mut cursor = 0;

    for caps in EMPHASIS_RE.captures_iter(segment) {
        let m = caps.get(0).unwrap();
        if m.start() > cursor {
            spans.push(Inline::Text {
                text: segment[cursor..m.start()].to_string(),
            });
        }
        spans.push(Inline::Emphasis {
            text: caps[1].to_string(),
        });
        cursor = m.end();
    }
    if cursor < segment.len() {
        spans.push(Inline::Text {
            text: segment[cursor..].to_string(),
        });
    }
}
