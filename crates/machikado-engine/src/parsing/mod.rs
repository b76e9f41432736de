pub mod builder;
pub mod directives;
pub mod highlight;
pub mod inline_html;
pub mod links;

use crate::models::Document;
use builder::DocumentBuilder;
use pulldown_cmark::{Options, Parser};
use regex::Regex;
use std::sync::LazyLock;

pub use directives::{Extraction, extract_directives};
pub use links::classify_link;

static HTML_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern is valid"));

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Render a Markdown body into a `Document`.
///
/// HTML comments are dropped before anything else so a commented-out
/// directive never becomes a map. Map directives are then extracted and
/// come back as `Block::Map` (or `Inline::Map` inside headings, lists and
/// formatting), numbered in source order. Inside code spans and code blocks
/// they stay literal text.
///
/// Rendering is pure: the same body always yields the same document.
pub fn render_markdown(body: &str) -> Document {
    let without_comments = strip_html_comments(body);
    let extraction = extract_directives(&without_comments);

    let mut builder = DocumentBuilder::new(&extraction);
    for event in Parser::new_ext(&extraction.text, options()) {
        builder.process(event);
    }
    builder.finish()
}

pub fn strip_html_comments(text: &str) -> String {
    HTML_COMMENT.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Alignment, Block, DirectiveKind, Image, Inline, Link, LinkKind, MapDirective,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    fn only_paragraph(body: &str) -> Vec<Inline> {
        let doc = render_markdown(body);
        match doc.blocks.as_slice() {
            [Block::Paragraph(inlines)] => inlines.clone(),
            other => panic!("expected one paragraph, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_paragraph() {
        assert_eq!(only_paragraph("Hello *world*"), vec![
            text("Hello "),
            Inline::Emphasis(vec![text("world")]),
        ]);
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let body = "# 喫茶店\n\n{{maps:東京都渋谷区1-1}}\n\n- one\n- two [tel](tel:0312345678)\n";
        assert_eq!(render_markdown(body), render_markdown(body));
    }

    #[test]
    fn test_directive_paragraph_becomes_map_block() {
        let doc = render_markdown("Visit us!\n\n{{maps:1-1 Chiyoda, Tokyo}}");

        assert_eq!(doc.blocks, vec![
            Block::Paragraph(vec![text("Visit us!")]),
            Block::Map(MapDirective {
                kind: DirectiveKind::Maps,
                address: "1-1 Chiyoda, Tokyo".to_string(),
                span: 11..38,
                index: 0,
            }),
        ]);
    }

    #[test]
    fn test_directive_inside_paragraph_splits_it() {
        let doc = render_markdown("before {{googlemap:Ginza}} after");

        assert_eq!(doc.blocks.len(), 3);
        assert_eq!(doc.blocks[0], Block::Paragraph(vec![text("before")]));
        assert!(matches!(&doc.blocks[1], Block::Map(d) if d.address == "Ginza"));
        assert_eq!(doc.blocks[2], Block::Paragraph(vec![text("after")]));
    }

    #[test]
    fn test_directives_keep_document_order() {
        let body = "{{streetview:A}}\n\n- {{maps:B}}\n\n> {{googlemap:C}}\n";
        let doc = render_markdown(body);

        let found: Vec<_> = doc
            .map_directives()
            .iter()
            .map(|d| (d.index, d.kind, d.address.clone()))
            .collect();
        assert_eq!(found, vec![
            (0, DirectiveKind::StreetView, "A".to_string()),
            (1, DirectiveKind::Maps, "B".to_string()),
            (2, DirectiveKind::GoogleMap, "C".to_string()),
        ]);
    }

    #[test]
    fn test_directive_in_code_stays_literal() {
        let doc = render_markdown("`{{maps:A}}`\n\n```\n{{maps:B}}\n```\n");

        assert_eq!(doc.blocks[0], Block::Paragraph(vec![Inline::Code(
            "{{maps:A}}".to_string()
        )]));
        match &doc.blocks[1] {
            Block::CodeBlock(code) => assert_eq!(code.code, "{{maps:B}}"),
            other => panic!("expected code block, got {other:?}"),
        }
        assert!(doc.map_directives().is_empty());
    }

    #[test]
    fn test_commented_directive_is_ignored() {
        let doc = render_markdown("<!-- {{maps:hidden}} -->\n{{maps:shown}}");
        let addresses: Vec<_> = doc
            .map_directives()
            .iter()
            .map(|d| d.address.clone())
            .collect();
        assert_eq!(addresses, vec!["shown".to_string()]);
    }

    #[test]
    fn test_forged_placeholder_is_plain_text() {
        // Forged delimiters are stripped, so the token never reaches the builder.
        let doc = render_markdown(&directives::placeholder(3));
        assert!(
            !doc.blocks
                .iter()
                .any(|b| matches!(b, Block::MissingComponent { .. }))
        );
    }

    #[test]
    fn test_builder_reports_placeholder_without_directive() {
        let extraction = extract_directives("plain text");
        let mut builder = DocumentBuilder::new(&extraction);
        let forged = format!("x {} y", directives::placeholder(5));
        for event in Parser::new_ext(&forged, options()) {
            builder.process(event);
        }
        let doc = builder.finish();

        assert_eq!(doc.blocks, vec![
            Block::Paragraph(vec![text("x")]),
            Block::MissingComponent { index: 5 },
            Block::Paragraph(vec![text("y")]),
        ]);
    }

    #[test]
    fn test_tel_link_is_a_call_link() {
        let inlines = only_paragraph("[予約する](tel:03-1234-5678)");
        assert_eq!(inlines, vec![Inline::Link(Link {
            href: "tel:03-1234-5678".to_string(),
            title: String::new(),
            kind: LinkKind::Call,
            children: vec![text("予約する")],
        })]);
    }

    #[rstest]
    #[case("[mail](mailto:a@example.jp)", LinkKind::SameTab)]
    #[case("[web](https://example.jp)", LinkKind::External)]
    #[case("<https://example.jp>", LinkKind::External)]
    #[case("<shop@example.jp>", LinkKind::SameTab)]
    fn test_link_kinds(#[case] body: &str, #[case] expected: LinkKind) {
        match only_paragraph(body).as_slice() {
            [Inline::Link(link)] => assert_eq!(link.kind, expected),
            other => panic!("expected a single link, got {other:?}"),
        }
    }

    #[test]
    fn test_email_autolink_gets_mailto() {
        match only_paragraph("<shop@example.jp>").as_slice() {
            [Inline::Link(link)] => assert_eq!(link.href, "mailto:shop@example.jp"),
            other => panic!("expected a single link, got {other:?}"),
        }
    }

    #[test]
    fn test_image_with_empty_src_is_dropped() {
        let doc = render_markdown("![nothing]()\n\nafter");
        assert_eq!(doc.blocks, vec![Block::Paragraph(vec![text("after")])]);
    }

    #[test]
    fn test_image_keeps_alt_text() {
        assert_eq!(only_paragraph("![店内の *様子*](/img/inside.jpg)"), vec![
            Inline::Image(Image {
                src: "/img/inside.jpg".to_string(),
                alt: "店内の 様子".to_string(),
                title: String::new(),
            })
        ]);
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_code() {
        let doc = render_markdown("```nosuchlang\nlet x = 1;\n```\n");
        match doc.blocks.as_slice() {
            [Block::CodeBlock(code)] => {
                assert_eq!(code.language.as_deref(), Some("nosuchlang"));
                assert_eq!(code.code, "let x = 1;");
                assert_eq!(code.highlighted, None);
            }
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn test_known_language_is_highlighted() {
        let doc = render_markdown("```rust\nfn main() {}\n```\n");
        match doc.blocks.as_slice() {
            [Block::CodeBlock(code)] => assert!(code.highlighted.is_some()),
            other => panic!("expected code block, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_lists() {
        let doc = render_markdown("- a\n  - b\n  - c\n- d\n");
        let [Block::List(outer)] = doc.blocks.as_slice() else {
            panic!("expected one list, got {:?}", doc.blocks);
        };

        assert!(!outer.is_ordered());
        assert_eq!(outer.items.len(), 2);
        assert_eq!(outer.items[0][0], Block::Paragraph(vec![text("a")]));
        match &outer.items[0][1] {
            Block::List(inner) => {
                assert_eq!(inner.items, vec![
                    vec![Block::Paragraph(vec![text("b")])],
                    vec![Block::Paragraph(vec![text("c")])],
                ]);
            }
            other => panic!("expected nested list, got {other:?}"),
        }
        assert_eq!(outer.items[1], vec![Block::Paragraph(vec![text("d")])]);
    }

    #[test]
    fn test_ordered_list_start() {
        let doc = render_markdown("3. three\n4. four\n");
        match doc.blocks.as_slice() {
            [Block::List(list)] => {
                assert_eq!(list.start, Some(3));
                assert!(list.is_ordered());
            }
            other => panic!("expected list, got {other:?}"),
        }
    }

    #[test]
    fn test_task_list_marker() {
        let doc = render_markdown("- [x] done\n");
        let [Block::List(list)] = doc.blocks.as_slice() else {
            panic!("expected list");
        };
        let [Block::Paragraph(inlines)] = list.items[0].as_slice() else {
            panic!("expected a paragraph in the item");
        };
        assert_eq!(inlines[0], Inline::TaskMarker(true));
        assert!(matches!(&inlines[1], Inline::Text(t) if t.trim() == "done"));
    }

    #[test]
    fn test_table() {
        let doc = render_markdown("| 曜日 | 営業 |\n|:--|--:|\n| 月 | 休み |\n");
        let [Block::Table(table)] = doc.blocks.as_slice() else {
            panic!("expected table, got {:?}", doc.blocks);
        };

        assert_eq!(table.alignments, vec![Alignment::Left, Alignment::Right]);
        assert_eq!(table.head, vec![vec![text("曜日")], vec![text("営業")]]);
        assert_eq!(table.rows, vec![vec![vec![text("月")], vec![text("休み")]]]);
    }

    #[test]
    fn test_heading_and_rule() {
        let doc = render_markdown("## アクセス\n\n---\n");
        assert_eq!(doc.blocks, vec![
            Block::Heading {
                level: 2,
                content: vec![text("アクセス")],
            },
            Block::Rule,
        ]);
    }

    #[test]
    fn test_blockquote() {
        let doc = render_markdown("> quoted\n");
        assert_eq!(doc.blocks, vec![Block::BlockQuote(vec![Block::Paragraph(
            vec![text("quoted")]
        )])]);
    }

    #[test]
    fn test_inline_html_paragraph_is_serialised() {
        let doc = render_markdown("open <b>late</b> & early");
        assert_eq!(doc.blocks, vec![Block::Html(
            "<p>open <b>late</b> &amp; early</p>".to_string()
        )]);
    }

    #[test]
    fn test_map_nested_in_html_paragraph_stays_a_block() {
        let doc = render_markdown("<b>営業中</b> **{{maps:Tokyo}}**");

        assert_eq!(doc.blocks, vec![
            Block::Html("<p><b>営業中</b></p>".to_string()),
            Block::Map(MapDirective {
                kind: DirectiveKind::Maps,
                address: "Tokyo".to_string(),
                span: 19..33,
                index: 0,
            }),
        ]);
        assert_eq!(doc.map_directives().len(), 1);
    }

    #[test]
    fn test_directive_in_link_and_image_titles_is_restored() {
        let doc = render_markdown(
            "[x](https://a.jp \"{{maps:A}}\") ![y](/y.png \"{{googlemap:B}}\")",
        );

        let Block::Paragraph(inlines) = &doc.blocks[0] else {
            panic!("expected paragraph, got {:?}", doc.blocks);
        };
        let Inline::Link(link) = &inlines[0] else {
            panic!("expected link, got {inlines:?}");
        };
        assert_eq!(link.title, "{{maps:A}}");
        let Some(Inline::Image(image)) = inlines.last() else {
            panic!("expected image, got {inlines:?}");
        };
        assert_eq!(image.title, "{{googlemap:B}}");
        assert!(doc.map_directives().is_empty());
    }

    #[test]
    fn test_html_block_passes_through() {
        let doc = render_markdown("<div class=\"note\">hi</div>\n");
        assert_eq!(doc.blocks, vec![Block::Html(
            "<div class=\"note\">hi</div>\n".to_string()
        )]);
    }

    #[test]
    fn test_empty_body() {
        assert!(render_markdown("").is_empty());
        assert!(render_markdown("<!-- only a comment -->").is_empty());
    }
}
