//! Structured output of the Markdown renderer.
//!
//! A `Document` is a tree of blocks and inline runs that a UI can walk
//! without re-parsing Markdown. Map directives are first-class nodes
//! rather than text to be spliced back in after rendering.

use super::directive::MapDirective;

/// Rendered Markdown body
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Map directives in document order, including ones nested in lists and quotes
    pub fn map_directives(&self) -> Vec<&MapDirective> {
        let mut found = Vec::new();
        collect_block_maps(&self.blocks, &mut found);
        found
    }
}

fn collect_block_maps<'a>(blocks: &'a [Block], found: &mut Vec<&'a MapDirective>) {
    for block in blocks {
        match block {
            Block::Map(directive) => found.push(directive),
            Block::Heading { content, .. } | Block::Paragraph(content) => {
                collect_inline_maps(content, found)
            }
            Block::BlockQuote(children) => collect_block_maps(children, found),
            Block::List(list) => {
                for item in &list.items {
                    collect_block_maps(item, found);
                }
            }
            Block::Table(table) => {
                for cell in table.head.iter().chain(table.rows.iter().flatten()) {
                    collect_inline_maps(cell, found);
                }
            }
            Block::CodeBlock(_)
            | Block::Html(_)
            | Block::Rule
            | Block::MissingComponent { .. } => {}
        }
    }
}

fn collect_inline_maps<'a>(inlines: &'a [Inline], found: &mut Vec<&'a MapDirective>) {
    for inline in inlines {
        match inline {
            Inline::Map(directive) => found.push(directive),
            Inline::Emphasis(children) | Inline::Strong(children) | Inline::Strikethrough(children) => {
                collect_inline_maps(children, found)
            }
            Inline::Link(link) => collect_inline_maps(&link.children, found),
            _ => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, content: Vec<Inline> },
    Paragraph(Vec<Inline>),
    List(List),
    BlockQuote(Vec<Block>),
    CodeBlock(CodeBlock),
    Table(Table),
    /// Raw markup passed through untouched
    Html(String),
    Rule,
    /// Map widget standing on its own line
    Map(MapDirective),
    /// Placeholder with no matching directive
    MissingComponent { index: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct List {
    /// `Some(n)` for ordered lists starting at `n`
    pub start: Option<u64>,
    pub items: Vec<Vec<Block>>,
}

impl List {
    pub fn is_ordered(&self) -> bool {
        self.start.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeBlock {
    /// Leading word of the fence info string
    pub language: Option<String>,
    pub code: String,
    /// Inline-styled HTML when the language is known to the highlighter
    pub highlighted: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    None,
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn css(self) -> Option<&'static str> {
        match self {
            Alignment::None => None,
            Alignment::Left => Some("text-align: left"),
            Alignment::Center => Some("text-align: center"),
            Alignment::Right => Some("text-align: right"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub alignments: Vec<Alignment>,
    pub head: Vec<Vec<Inline>>,
    pub rows: Vec<Vec<Vec<Inline>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Code(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link(Link),
    Image(Image),
    Html(String),
    SoftBreak,
    HardBreak,
    TaskMarker(bool),
    Map(MapDirective),
    MissingComponent { index: usize },
}

impl Inline {
    /// Whitespace-only text and line breaks
    pub fn is_blank(&self) -> bool {
        match self {
            Inline::Text(text) => text.trim().is_empty(),
            Inline::SoftBreak | Inline::HardBreak => true,
            _ => false,
        }
    }

    pub fn contains_html(&self) -> bool {
        match self {
            Inline::Html(_) => true,
            Inline::Emphasis(children) | Inline::Strong(children) | Inline::Strikethrough(children) => {
                children.iter().any(Inline::contains_html)
            }
            Inline::Link(link) => link.children.iter().any(Inline::contains_html),
            _ => false,
        }
    }
}

/// How a hyperlink behaves when activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// `tel:`, shown as a call button, navigates in place
    Call,
    /// `mailto:` and `sms:`, plain link in the same tab
    SameTab,
    /// Everything else opens a new tab without referrer or opener
    External,
}

impl LinkKind {
    pub fn target(self) -> Option<&'static str> {
        match self {
            LinkKind::External => Some("_blank"),
            LinkKind::Call | LinkKind::SameTab => None,
        }
    }

    pub fn rel(self) -> Option<&'static str> {
        match self {
            LinkKind::External => Some("noopener noreferrer"),
            LinkKind::Call | LinkKind::SameTab => None,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            LinkKind::Call => "call-link",
            LinkKind::SameTab => "content-link",
            LinkKind::External => "content-link external-link",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub href: String,
    pub title: String,
    pub kind: LinkKind,
    pub children: Vec<Inline>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub src: String,
    pub alt: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::directive::DirectiveKind;

    fn directive(index: usize, address: &str) -> MapDirective {
        MapDirective {
            kind: DirectiveKind::Maps,
            address: address.to_string(),
            span: 0..0,
            index,
        }
    }

    #[test]
    fn test_map_directives_walks_nested_blocks() {
        let doc = Document {
            blocks: vec![
                Block::Map(directive(0, "first")),
                Block::BlockQuote(vec![Block::Map(directive(1, "quoted"))]),
                Block::List(List {
                    start: None,
                    items: vec![vec![Block::Paragraph(vec![Inline::Strong(vec![
                        Inline::Map(directive(2, "listed")),
                    ])])]],
                }),
            ],
        };

        let addresses: Vec<_> = doc
            .map_directives()
            .iter()
            .map(|d| d.address.as_str())
            .collect();
        assert_eq!(addresses, vec!["first", "quoted", "listed"]);
    }

    #[test]
    fn test_blank_inlines() {
        assert!(Inline::Text("  ".to_string()).is_blank());
        assert!(Inline::SoftBreak.is_blank());
        assert!(!Inline::Text("x".to_string()).is_blank());
        assert!(!Inline::Code(" ".to_string()).is_blank());
    }

    #[test]
    fn test_link_kind_attributes() {
        assert_eq!(LinkKind::External.target(), Some("_blank"));
        assert_eq!(LinkKind::External.rel(), Some("noopener noreferrer"));
        assert_eq!(LinkKind::Call.target(), None);
        assert_eq!(LinkKind::SameTab.rel(), None);
    }
}
