use super::directives::{Extraction, Piece, split_placeholders};
use super::highlight::{highlight, language_from_info};
use super::inline_html::paragraph_to_html;
use super::links::classify_link;
use crate::models::{
    Alignment, Block, CodeBlock, Document, Image, Inline, Link, LinkKind, List, Table,
};
use pulldown_cmark::{CodeBlockKind, Event, LinkType, Tag, TagEnd};
use std::mem;

/// Builds a `Document` from one pass over pulldown-cmark events.
///
/// Two stacks carry the state:
/// - `containers`: block containers (root, block quotes, lists, list items)
/// - `inlines`: inline frames being filled (paragraph, heading, emphasis,
///   link, table cell)
///
/// Tight list items carry their text without `Paragraph` events. Text that
/// arrives with no open inline frame opens an implicit paragraph which is
/// closed at the next block boundary.
///
/// Consecutive `Text` events are joined before placeholder tokens are looked
/// for, so a token is never split across events.
pub(crate) struct DocumentBuilder<'e> {
    extraction: &'e Extraction,
    containers: Vec<Container>,
    inlines: Vec<Frame>,
    pending_text: String,
    code: Option<CodeBuffer>,
    html: Option<String>,
    image: Option<Image>,
    table: Option<TableBuffer>,
}

enum Container {
    Root(Vec<Block>),
    Quote(Vec<Block>),
    List {
        start: Option<u64>,
        items: Vec<Vec<Block>>,
    },
    Item(Vec<Block>),
}

enum FrameKind {
    Paragraph { implicit: bool },
    Heading(u8),
    Emphasis,
    Strong,
    Strikethrough,
    Link { href: String, title: String, kind: LinkKind },
    Cell,
}

struct Frame {
    kind: FrameKind,
    children: Vec<Inline>,
}

impl Frame {
    fn new(kind: FrameKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }
}

struct CodeBuffer {
    language: Option<String>,
    text: String,
}

struct TableBuffer {
    alignments: Vec<Alignment>,
    head: Vec<Vec<Inline>>,
    rows: Vec<Vec<Vec<Inline>>>,
    row: Vec<Vec<Inline>>,
}

impl<'e> DocumentBuilder<'e> {
    pub(crate) fn new(extraction: &'e Extraction) -> Self {
        Self {
            extraction,
            containers: vec![Container::Root(Vec::new())],
            inlines: Vec::new(),
            pending_text: String::new(),
            code: None,
            html: None,
            image: None,
            table: None,
        }
    }

    pub(crate) fn process(&mut self, event: Event<'_>) {
        if let Event::Text(text) = event {
            self.pending_text.push_str(&text);
            return;
        }
        self.flush_text();

        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Code(code) => {
                let code = self.extraction.restore(&code);
                self.push_inline(Inline::Code(code));
            }
            Event::InlineMath(math) | Event::DisplayMath(math) => {
                let math = self.extraction.restore(&math);
                self.push_inline(Inline::Code(math));
            }
            Event::Html(html) => {
                let html = self.extraction.restore(&html);
                match self.html.as_mut() {
                    Some(buffer) => buffer.push_str(&html),
                    None => self.push_inline(Inline::Html(html)),
                }
            }
            Event::InlineHtml(html) => {
                let html = self.extraction.restore(&html);
                self.push_inline(Inline::Html(html));
            }
            Event::FootnoteReference(label) => {
                self.push_inline(Inline::Text(format!("[^{label}]")));
            }
            Event::SoftBreak => match self.image.as_mut() {
                Some(image) => image.alt.push(' '),
                None => self.push_inline(Inline::SoftBreak),
            },
            Event::HardBreak => self.push_inline(Inline::HardBreak),
            Event::Rule => {
                self.close_implicit_paragraph();
                self.push_block(Block::Rule);
            }
            Event::TaskListMarker(checked) => self.push_inline(Inline::TaskMarker(checked)),
            Event::Text(_) => {}
        }
    }

    pub(crate) fn finish(mut self) -> Document {
        self.flush_text();
        self.close_implicit_paragraph();

        // Unbalanced input: fold whatever is still open into its parent.
        while let Some(frame) = self.inlines.pop() {
            self.close_frame(frame);
        }
        while self.containers.len() > 1 {
            if let Some(container) = self.containers.pop() {
                let blocks = container_into_blocks(container);
                for block in blocks {
                    self.push_block(block);
                }
            }
        }

        let blocks = match self.containers.pop() {
            Some(container) => container_into_blocks(container),
            None => Vec::new(),
        };
        Document { blocks }
    }

    fn start(&mut self, tag: Tag<'_>) {
        if self.image.is_some() {
            return;
        }

        match tag {
            Tag::Paragraph => {
                self.close_implicit_paragraph();
                self.inlines
                    .push(Frame::new(FrameKind::Paragraph { implicit: false }));
            }
            Tag::Heading { level, .. } => {
                self.close_implicit_paragraph();
                self.inlines.push(Frame::new(FrameKind::Heading(level as u8)));
            }
            Tag::BlockQuote(_) => {
                self.close_implicit_paragraph();
                self.containers.push(Container::Quote(Vec::new()));
            }
            Tag::CodeBlock(kind) => {
                self.close_implicit_paragraph();
                let language = match kind {
                    CodeBlockKind::Fenced(info) => language_from_info(&info),
                    CodeBlockKind::Indented => None,
                };
                self.code = Some(CodeBuffer {
                    language,
                    text: String::new(),
                });
            }
            Tag::HtmlBlock => {
                self.close_implicit_paragraph();
                self.html = Some(String::new());
            }
            Tag::List(start) => {
                self.close_implicit_paragraph();
                self.containers.push(Container::List {
                    start,
                    items: Vec::new(),
                });
            }
            Tag::Item => self.containers.push(Container::Item(Vec::new())),
            Tag::Table(alignments) => {
                self.close_implicit_paragraph();
                self.table = Some(TableBuffer {
                    alignments: alignments.into_iter().map(convert_alignment).collect(),
                    head: Vec::new(),
                    rows: Vec::new(),
                    row: Vec::new(),
                });
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.row.clear();
                }
            }
            Tag::TableCell => self.inlines.push(Frame::new(FrameKind::Cell)),
            Tag::Emphasis => self.inlines.push(Frame::new(FrameKind::Emphasis)),
            Tag::Strong => self.inlines.push(Frame::new(FrameKind::Strong)),
            Tag::Strikethrough => self.inlines.push(Frame::new(FrameKind::Strikethrough)),
            Tag::Link {
                link_type,
                dest_url,
                title,
                ..
            } => {
                let href = if link_type == LinkType::Email && !dest_url.starts_with("mailto:") {
                    format!("mailto:{dest_url}")
                } else {
                    self.extraction.restore(&dest_url)
                };
                let kind = classify_link(&href);
                self.inlines.push(Frame::new(FrameKind::Link {
                    href,
                    title: self.extraction.restore(&title),
                    kind,
                }));
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image = Some(Image {
                    src: self.extraction.restore(&dest_url),
                    alt: String::new(),
                    title: self.extraction.restore(&title),
                });
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        if self.image.is_some() && !matches!(tag, TagEnd::Image) {
            return;
        }

        match tag {
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Link
            | TagEnd::TableCell => {
                if let Some(frame) = self.inlines.pop() {
                    self.close_frame(frame);
                }
            }
            TagEnd::BlockQuote(_) => {
                self.close_implicit_paragraph();
                if let Some(Container::Quote(blocks)) = self.pop_container() {
                    self.push_block(Block::BlockQuote(blocks));
                }
            }
            TagEnd::CodeBlock => {
                if let Some(mut buffer) = self.code.take() {
                    buffer.text = self.extraction.restore(&buffer.text);
                    self.push_block(Block::CodeBlock(finish_code(buffer)));
                }
            }
            TagEnd::HtmlBlock => {
                if let Some(html) = self.html.take() {
                    self.push_block(Block::Html(html));
                }
            }
            TagEnd::List(_) => {
                self.close_implicit_paragraph();
                if let Some(Container::List { start, items }) = self.pop_container() {
                    self.push_block(Block::List(List { start, items }));
                }
            }
            TagEnd::Item => {
                self.close_implicit_paragraph();
                if let Some(Container::Item(blocks)) = self.pop_container()
                    && let Some(Container::List { items, .. }) = self.containers.last_mut()
                {
                    items.push(blocks);
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.head = mem::take(&mut table.row);
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = mem::take(&mut table.row);
                    table.rows.push(row);
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.push_block(Block::Table(Table {
                        alignments: table.alignments,
                        head: table.head,
                        rows: table.rows,
                    }));
                }
            }
            TagEnd::Image => {
                if let Some(mut image) = self.image.take() {
                    image.alt = self.extraction.restore(&image.alt);
                    // An image without a source renders nothing.
                    if !image.src.trim().is_empty() {
                        self.push_inline(Inline::Image(image));
                    }
                }
            }
            _ => {}
        }
    }

    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let text = mem::take(&mut self.pending_text);

        if let Some(code) = self.code.as_mut() {
            code.text.push_str(&text);
            return;
        }
        if let Some(image) = self.image.as_mut() {
            image.alt.push_str(&text);
            return;
        }
        if let Some(html) = self.html.as_mut() {
            html.push_str(&self.extraction.restore(&text));
            return;
        }

        for piece in split_placeholders(&text) {
            let inline = match piece {
                Piece::Text(t) => Inline::Text(t.to_string()),
                Piece::Slot(index) => match self.extraction.directives.get(index) {
                    Some(directive) => Inline::Map(directive.clone()),
                    None => {
                        log::warn!("map placeholder {index} has no matching directive");
                        Inline::MissingComponent { index }
                    }
                },
            };
            self.push_inline(inline);
        }
    }

    fn push_inline(&mut self, inline: Inline) {
        if self.inlines.is_empty() {
            self.inlines
                .push(Frame::new(FrameKind::Paragraph { implicit: true }));
        }
        if let Some(frame) = self.inlines.last_mut() {
            push_merged(&mut frame.children, inline);
        }
    }

    fn push_block(&mut self, block: Block) {
        match self.containers.last_mut() {
            Some(Container::Root(blocks) | Container::Quote(blocks) | Container::Item(blocks)) => {
                blocks.push(block)
            }
            Some(Container::List { items, .. }) => items.push(vec![block]),
            None => self.containers.push(Container::Root(vec![block])),
        }
    }

    fn pop_container(&mut self) -> Option<Container> {
        if self.containers.len() > 1 {
            self.containers.pop()
        } else {
            None
        }
    }

    fn close_implicit_paragraph(&mut self) {
        if let Some(Frame {
            kind: FrameKind::Paragraph { implicit: true },
            ..
        }) = self.inlines.last()
            && let Some(frame) = self.inlines.pop()
        {
            self.finish_paragraph(frame.children);
        }
    }

    fn close_frame(&mut self, frame: Frame) {
        let Frame { kind, children } = frame;
        match kind {
            FrameKind::Paragraph { .. } => self.finish_paragraph(children),
            FrameKind::Heading(level) => self.push_block(Block::Heading {
                level,
                content: children,
            }),
            FrameKind::Emphasis => self.push_inline(Inline::Emphasis(children)),
            FrameKind::Strong => self.push_inline(Inline::Strong(children)),
            FrameKind::Strikethrough => self.push_inline(Inline::Strikethrough(children)),
            FrameKind::Link { href, title, kind } => self.push_inline(Inline::Link(Link {
                href,
                title,
                kind,
                children,
            })),
            FrameKind::Cell => match self.table.as_mut() {
                Some(table) => table.row.push(children),
                None => self.finish_paragraph(children),
            },
        }
    }

    /// Map embeds standing in a paragraph become blocks of their own; the
    /// text around them stays as separate paragraphs.
    fn finish_paragraph(&mut self, children: Vec<Inline>) {
        let mut fragment = Vec::new();
        for inline in children {
            match inline {
                Inline::Map(directive) => {
                    self.flush_fragment(&mut fragment);
                    self.push_block(Block::Map(directive));
                }
                Inline::MissingComponent { index } => {
                    self.flush_fragment(&mut fragment);
                    self.push_block(Block::MissingComponent { index });
                }
                other => fragment.push(other),
            }
        }
        self.flush_fragment(&mut fragment);
    }

    fn flush_fragment(&mut self, fragment: &mut Vec<Inline>) {
        let mut inlines = mem::take(fragment);
        trim_inlines(&mut inlines);
        if inlines.is_empty() {
            return;
        }

        if inlines.iter().any(Inline::contains_html) {
            // Maps nested in formatting would otherwise be flattened into the
            // HTML string; they follow it as blocks of their own.
            let mut components = Vec::new();
            take_components(&mut inlines, &mut components);
            trim_inlines(&mut inlines);
            if !inlines.is_empty() {
                self.push_block(Block::Html(paragraph_to_html(&inlines)));
            }
            for component in components {
                self.push_block(component);
            }
        } else {
            self.push_block(Block::Paragraph(inlines));
        }
    }
}

/// Remove map nodes from an inline tree, in order, as blocks
fn take_components(inlines: &mut Vec<Inline>, found: &mut Vec<Block>) {
    let mut kept = Vec::with_capacity(inlines.len());
    for mut inline in inlines.drain(..) {
        match inline {
            Inline::Map(directive) => found.push(Block::Map(directive)),
            Inline::MissingComponent { index } => {
                found.push(Block::MissingComponent { index })
            }
            Inline::Emphasis(ref mut children)
            | Inline::Strong(ref mut children)
            | Inline::Strikethrough(ref mut children) => {
                take_components(children, found);
                if !children.is_empty() {
                    kept.push(inline);
                }
            }
            Inline::Link(ref mut link) => {
                take_components(&mut link.children, found);
                kept.push(inline);
            }
            other => kept.push(other),
        }
    }
    *inlines = kept;
}

fn container_into_blocks(container: Container) -> Vec<Block> {
    match container {
        Container::Root(blocks) | Container::Item(blocks) => blocks,
        Container::Quote(blocks) => vec![Block::BlockQuote(blocks)],
        Container::List { start, items } => vec![Block::List(List { start, items })],
    }
}

fn finish_code(buffer: CodeBuffer) -> CodeBlock {
    let mut code = buffer.text;
    if code.ends_with('\n') {
        code.pop();
    }
    let highlighted = buffer
        .language
        .as_deref()
        .and_then(|language| highlight(&code, language));

    CodeBlock {
        language: buffer.language,
        code,
        highlighted,
    }
}

fn convert_alignment(alignment: pulldown_cmark::Alignment) -> Alignment {
    match alignment {
        pulldown_cmark::Alignment::None => Alignment::None,
        pulldown_cmark::Alignment::Left => Alignment::Left,
        pulldown_cmark::Alignment::Center => Alignment::Center,
        pulldown_cmark::Alignment::Right => Alignment::Right,
    }
}

fn push_merged(children: &mut Vec<Inline>, inline: Inline) {
    if let Inline::Text(text) = &inline
        && let Some(Inline::Text(previous)) = children.last_mut()
    {
        previous.push_str(text);
        return;
    }
    if let Inline::Text(text) = &inline
        && text.is_empty()
    {
        return;
    }
    children.push(inline);
}

/// Drop blank runs at both ends and trim the text touching them.
fn trim_inlines(inlines: &mut Vec<Inline>) {
    while inlines.first().is_some_and(Inline::is_blank) {
        inlines.remove(0);
    }
    while inlines.last().is_some_and(Inline::is_blank) {
        inlines.pop();
    }
    if let Some(Inline::Text(text)) = inlines.first_mut() {
        *text = text.trim_start().to_string();
    }
    if let Some(Inline::Text(text)) = inlines.last_mut() {
        *text = text.trim_end().to_string();
    }
}
