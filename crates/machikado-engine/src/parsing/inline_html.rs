//! HTML serialisation of inline runs.
//!
//! A paragraph that mixes Markdown with raw inline tags (`<b>`, `<span>`)
//! arrives from the parser as separate open and close fragments. Those only
//! make sense once joined into one string, so such paragraphs are written
//! out here with the same link and image treatment the UI applies.

use crate::maps;
use crate::models::{Image, Inline, Link, LinkKind};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

pub fn paragraph_to_html(inlines: &[Inline]) -> String {
    let mut out = String::from("<p>");
    write_inlines(inlines, &mut out);
    out.push_str("</p>");
    out
}

pub fn write_inlines(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        write_inline(inline, out);
    }
}

fn write_inline(inline: &Inline, out: &mut String) {
    match inline {
        Inline::Text(text) => out.push_str(&encode_text(text)),
        Inline::Code(code) => {
            out.push_str("<code>");
            out.push_str(&encode_text(code));
            out.push_str("</code>");
        }
        Inline::Emphasis(children) => wrap("em", children, out),
        Inline::Strong(children) => wrap("strong", children, out),
        Inline::Strikethrough(children) => wrap("del", children, out),
        Inline::Link(link) => write_link(link, out),
        Inline::Image(image) => write_image(image, out),
        Inline::Html(html) => out.push_str(html),
        Inline::SoftBreak => out.push('\n'),
        Inline::HardBreak => out.push_str("<br />"),
        Inline::TaskMarker(checked) => {
            out.push_str("<input type=\"checkbox\" disabled=\"\"");
            if *checked {
                out.push_str(" checked=\"\"");
            }
            out.push_str(" /> ");
        }
        Inline::Map(directive) => {
            let _ = write!(
                out,
                "<a class=\"content-link external-link\" href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
                encode_double_quoted_attribute(&maps::maps_search_url(&directive.address)),
                encode_text(&directive.address),
            );
        }
        Inline::MissingComponent { index } => {
            let _ = write!(
                out,
                "<span class=\"missing-component\">component not found: map {index}</span>"
            );
        }
    }
}

fn wrap(tag: &str, children: &[Inline], out: &mut String) {
    let _ = write!(out, "<{tag}>");
    write_inlines(children, out);
    let _ = write!(out, "</{tag}>");
}

fn write_link(link: &Link, out: &mut String) {
    let _ = write!(
        out,
        "<a class=\"{}\" href=\"{}\"",
        link.kind.class(),
        encode_double_quoted_attribute(&link.href)
    );
    if !link.title.is_empty() {
        let _ = write!(out, " title=\"{}\"", encode_double_quoted_attribute(&link.title));
    }
    if let Some(target) = link.kind.target() {
        let _ = write!(out, " target=\"{target}\"");
    }
    if let Some(rel) = link.kind.rel() {
        let _ = write!(out, " rel=\"{rel}\"");
    }
    out.push('>');
    if link.kind == LinkKind::Call {
        out.push_str("<span class=\"call-icon\" aria-hidden=\"true\">📞</span> ");
    }
    write_inlines(&link.children, out);
    out.push_str("</a>");
}

fn write_image(image: &Image, out: &mut String) {
    let _ = write!(
        out,
        "<span class=\"content-image\"><img src=\"{}\" alt=\"{}\"",
        encode_double_quoted_attribute(&image.src),
        encode_double_quoted_attribute(&image.alt)
    );
    if !image.title.is_empty() {
        let _ = write!(out, " title=\"{}\"", encode_double_quoted_attribute(&image.title));
    }
    out.push_str(" loading=\"lazy\" /></span>");
}
