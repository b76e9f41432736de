//! Fenced-code highlighting via syntect.

use regex::Regex;
use std::sync::LazyLock;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

const THEME_NAME: &str = "base16-ocean.dark";

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

static THEME: LazyLock<Theme> = LazyLock::new(|| {
    let mut themes = ThemeSet::load_defaults();
    themes.themes.remove(THEME_NAME).unwrap_or_default()
});

static LANGUAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\w+)").expect("language pattern is valid"));

/// Language named by a fence info string (` ```rust,ignore ` gives `rust`)
pub fn language_from_info(info: &str) -> Option<String> {
    LANGUAGE
        .captures(info)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Highlight `code` as `language`, or `None` when the language is unknown
pub fn highlight(code: &str, language: &str) -> Option<String> {
    let syntax = SYNTAXES.find_syntax_by_token(language)?;
    match highlighted_html_for_string(code, &SYNTAXES, syntax, &THEME) {
        Ok(html) => Some(html),
        Err(e) => {
            log::debug!("highlighting {language} failed: {e}");
            None
        }
    }
}
