use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::keywords::{CATEGORY_SUFFIX, HEADER_KEYWORDS, LABEL_NAMES};

// A count token: a digit run starting at a word boundary.
static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d+").unwrap());
static DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d").unwrap());
static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static DIGITS_ONLY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

const EDGE_CHARS: &[char] = &[' ', ',', '.', ';', '(', ')', '[', ']'];
const SHORT_LABEL_MAX_CHARS: usize = 8;

const LINE_BREAKS: &[char] = &[
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Split page text into lines at every Unicode line boundary.
///
/// `\r\n` counts as one break and a trailing break leaves no empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !LINE_BREAKS.contains(&c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r' && chars.next_if(|&(_, next)| next == '\n').is_some() {
            start += 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Column headers, section labels and blank lines carry no dish names.
pub fn is_header_line(line: &str) -> bool {
    let s = line.trim();
    if s.is_empty() {
        return true;
    }
    if HEADER_KEYWORDS.iter().any(|kw| s.contains(kw)) {
        return true;
    }
    // Short standalone section labels such as "밥류" or "빵, 과자류".
    s.chars().count() <= SHORT_LABEL_MAX_CHARS && (s.contains(CATEGORY_SUFFIX) || s.contains(','))
}

/// Split a "count name count name ..." line into its name spans.
///
/// A name runs from the end of its count to whitespace followed by the next
/// count, or to the end of the line. A span that hits a digit glued to text
/// (no whitespace before it) is dropped, as is a span with no text.
pub fn extract_pairs(line: &str) -> Vec<&str> {
    let mut names = Vec::new();

    for count in COUNT_RE.find_iter(line) {
        let span_end = DIGIT_RE
            .find_at(line, count.end())
            .map_or(line.len(), |d| d.start());
        let body = line[count.end()..span_end].trim_start();
        if body.is_empty() {
            continue;
        }

        if span_end == line.len() {
            names.push(body);
            continue;
        }

        let name = body.trim_end();
        if name.len() < body.len() && !name.is_empty() {
            names.push(name);
        }
    }

    names
}

fn collapse_whitespace(s: &str) -> String {
    WS_RE.replace_all(s, " ").into_owned()
}

/// Tidy a raw span; an empty result means the span is not a name.
pub fn clean_name(raw: &str) -> String {
    let collapsed = collapse_whitespace(raw);
    let n = collapsed.trim_matches(EDGE_CHARS);

    if n.chars().count() < 2 || DIGITS_ONLY_RE.is_match(n) {
        return String::new();
    }
    if LABEL_NAMES.contains(&n) {
        return String::new();
    }
    n.to_string()
}

/// Key used to spot repeats: lowercase with whitespace runs collapsed.
pub fn dedupe_key(name: &str) -> String {
    collapse_whitespace(&name.to_lowercase())
}

/// Drop repeats by [`dedupe_key`], keeping the first occurrence in order.
pub fn dedupe<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for name in names {
        let name = name.as_ref();
        if seen.insert(dedupe_key(name)) {
            out.push(name.to_string());
        }
    }
    out
}
