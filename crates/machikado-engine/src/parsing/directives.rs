//! Extraction of `{{kind:address}}` map directives.
//!
//! Each directive is swapped for a placeholder token built from two
//! private-use characters around the directive's sequence number. Markdown
//! treats the token as plain text, so it comes out of the parser as part of
//! a text run where the document builder can pick it up again.

use crate::models::{DirectiveKind, MapDirective};
use regex::Regex;
use std::sync::LazyLock;

const TOKEN_OPEN: char = '\u{E000}';
const TOKEN_CLOSE: char = '\u{E001}';
const TOKEN_TAG: &str = "map:";

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{(googlemap|streetview|maps):([^}]+)\}\}").expect("directive pattern is valid")
});

/// Placeholder-bearing text plus the directives it refers to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub directives: Vec<MapDirective>,
    /// Text the spans point into (private-use delimiters already removed)
    source: String,
}

impl Extraction {
    /// Replace every placeholder in `text` with the directive source it stands for.
    ///
    /// Used where a directive must stay literal, e.g. inside code.
    pub fn restore(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for piece in split_placeholders(text) {
            match piece {
                Piece::Text(t) => out.push_str(t),
                Piece::Slot(index) => match self.directives.get(index) {
                    Some(directive) => out.push_str(&self.source[directive.span.clone()]),
                    None => out.push_str(&placeholder(index)),
                },
            }
        }
        out
    }
}

/// Pull map directives out of `text` in order of appearance.
///
/// Unknown keywords are left as literal text. The numbering restarts at zero
/// on every call.
pub fn extract_directives(text: &str) -> Extraction {
    let source: String = text
        .chars()
        .filter(|c| *c != TOKEN_OPEN && *c != TOKEN_CLOSE)
        .collect();

    let mut directives = Vec::new();
    let mut replaced = String::with_capacity(source.len());
    let mut last = 0;

    for captures in DIRECTIVE.captures_iter(&source) {
        let (Some(whole), Some(keyword), Some(address)) =
            (captures.get(0), captures.get(1), captures.get(2))
        else {
            continue;
        };
        let Some(kind) = DirectiveKind::from_keyword(keyword.as_str()) else {
            continue;
        };

        let index = directives.len();
        replaced.push_str(&source[last..whole.start()]);
        replaced.push_str(&placeholder(index));
        last = whole.end();

        directives.push(MapDirective {
            kind,
            address: address.as_str().trim().to_string(),
            span: whole.range(),
            index,
        });
    }
    replaced.push_str(&source[last..]);

    Extraction {
        text: replaced,
        directives,
        source,
    }
}

pub fn placeholder(index: usize) -> String {
    format!("{TOKEN_OPEN}{TOKEN_TAG}{index}{TOKEN_CLOSE}")
}

/// A slice of a text run: literal text or a placeholder's index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    Text(&'a str),
    Slot(usize),
}

/// Split a text run around placeholder tokens.
///
/// Malformed tokens are kept as text.
pub fn split_placeholders(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(TOKEN_OPEN) {
        let after_open = &rest[open + TOKEN_OPEN.len_utf8()..];
        let parsed = after_open.strip_prefix(TOKEN_TAG).and_then(|tail| {
            let close = tail.find(TOKEN_CLOSE)?;
            let index = tail[..close].parse::<usize>().ok()?;
            let consumed = TOKEN_TAG.len() + close + TOKEN_CLOSE.len_utf8();
            Some((index, consumed))
        });

        match parsed {
            Some((index, consumed)) => {
                if open > 0 {
                    pieces.push(Piece::Text(&rest[..open]));
                }
                pieces.push(Piece::Slot(index));
                rest = &after_open[consumed..];
            }
            None => {
                let keep = open + TOKEN_OPEN.len_utf8();
                pieces.push(Piece::Text(&rest[..keep]));
                rest = &rest[keep..];
            }
        }
    }

    if !rest.is_empty() {
        pieces.push(Piece::Text(rest));
    }
    pieces
}

pub fn contains_placeholder(text: &str) -> bool {
    text.contains(TOKEN_OPEN)
}
