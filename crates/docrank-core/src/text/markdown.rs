//! Markdown noise removal ahead of tokenization

use regex::{Captures, Regex};
use std::sync::OnceLock;
use tracing::warn;

type Pattern = OnceLock<Option<Regex>>;

static FRONT_MATTER: Pattern = OnceLock::new();
static BACKTICK_FENCE: Pattern = OnceLock::new();
static TILDE_FENCE: Pattern = OnceLock::new();
static INLINE_CODE: Pattern = OnceLock::new();
static IMAGE: Pattern = OnceLock::new();
static WIKI_EMBED: Pattern = OnceLock::new();
static WIKI_LINK: Pattern = OnceLock::new();
static MD_LINK: Pattern = OnceLock::new();
static HTML_TAG: Pattern = OnceLock::new();
static RULE: Pattern = OnceLock::new();
static HEADING: Pattern = OnceLock::new();
static QUOTE: Pattern = OnceLock::new();
static LIST_MARKER: Pattern = OnceLock::new();
static EMPHASIS: Pattern = OnceLock::new();
static BLANK_RUN: Pattern = OnceLock::new();
static PARAGRAPH_BREAK: Pattern = OnceLock::new();

fn pattern(cell: &'static Pattern, source: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| match Regex::new(source) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!(pattern = source, error = %e, "Failed to compile markdown pattern");
            None
        }
    })
    .as_ref()
}

fn strip(text: String, cell: &'static Pattern, source: &str, replacement: &str) -> String {
    match pattern(cell, source) {
        Some(re) => re.replace_all(&text, replacement).into_owned(),
        None => text,
    }
}

/// Remove markdown syntax, keeping the readable text
///
/// Front matter, code (fenced and inline), images and embeds are dropped.
/// Links keep their label, wiki links their alias or target. Heading, quote,
/// list and emphasis markers plus HTML tags are removed.
pub fn clean_markdown(text: &str) -> String {
    let mut out = text.replace("\r\n", "\n");

    out = strip(out, &FRONT_MATTER, r"(?s)\A---\n.*?\n---[ \t]*(\n|\z)", "");
    out = strip(out, &BACKTICK_FENCE, r"(?ms)^[ \t]*```.*?^[ \t]*```[^\n]*$", "");
    out = strip(out, &TILDE_FENCE, r"(?ms)^[ \t]*~~~.*?^[ \t]*~~~[^\n]*$", "");
    out = strip(out, &INLINE_CODE, r"`[^`\n]*`", "");
    out = strip(out, &IMAGE, r"!\[[^\]]*\]\([^)]*\)", "");
    out = strip(out, &WIKI_EMBED, r"!\[\[[^\]]*\]\]", "");

    if let Some(re) = pattern(&WIKI_LINK, r"\[\[([^\]|]+)(?:\|([^\]]+))?\]\]") {
        out = re
            .replace_all(&out, |caps: &Captures| {
                caps.get(2)
                    .or_else(|| caps.get(1))
                    .map(|m| m.as_str().trim().to_string())
                    .unwrap_or_default()
            })
            .into_owned();
    }

    out = strip(out, &MD_LINK, r"\[([^\]]*)\]\([^)]*\)", "$1");
    out = strip(out, &HTML_TAG, r"<[^>\n]+>", "");
    out = strip(out, &RULE, r"(?m)^[ \t]*([-*_][ \t]*){3,}$", "");
    out = strip(out, &HEADING, r"(?m)^[ \t]{0,3}#{1,6}[ \t]+", "");
    out = strip(out, &QUOTE, r"(?m)^[ \t]*(>[ \t]?)+", "");
    out = strip(out, &LIST_MARKER, r"(?m)^[ \t]*(?:[-*+]|\d+[.)])[ \t]+(\[[ xX]\][ \t]+)?", "");
    out = strip(out, &EMPHASIS, r"\*{1,3}|_{2,3}|~~|==", "");
    out = strip(out, &BLANK_RUN, r"\n[ \t]*\n(?:[ \t]*\n)+", "\n\n");

    out.trim().to_string()
}

/// Keep the first `max_paragraphs` non-empty paragraphs (0 keeps all)
pub fn limit_paragraphs(text: &str, max_paragraphs: usize) -> String {
    if max_paragraphs == 0 {
        return text.to_string();
    }

    let paragraphs: Vec<&str> = match pattern(&PARAGRAPH_BREAK, r"\n[ \t]*\n") {
        Some(re) => re.split(text).collect(),
        None => text.split("\n\n").collect(),
    };

    paragraphs
        .into_iter()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .take(max_paragraphs)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Cut `text` to at most `max_chars` characters on a char boundary
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Clean raw markdown, keep the leading paragraphs, and cap the length
pub fn extract_text(raw: &str, max_paragraphs: usize, max_chars: usize) -> String {
    let cleaned = clean_markdown(raw);
    let limited = limit_paragraphs(&cleaned, max_paragraphs);
    truncate_chars(&limited, max_chars).to_string()
}
