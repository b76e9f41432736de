use super::MapWidget;
use dioxus::prelude::*;
use machikado_engine::{
    Block, CodeBlock, Document, Image, Inline, Link, LinkKind, List, MapDirective, Table,
};

/// Rendered Markdown body
#[component]
pub fn MarkdownView(document: Document) -> Element {
    rsx! {
        div {
            class: "markdown-body",
            for (i, block) in document.blocks.into_iter().enumerate() {
                BlockView { key: "{i}", block }
            }
        }
    }
}

#[component]
fn BlockView(block: Block) -> Element {
    match block {
        Block::Heading { level, content } => heading(level, content),
        Block::Paragraph(content) => rsx! {
            p { Inlines { inlines: content } }
        },
        Block::List(list) => list_view(list),
        Block::BlockQuote(children) => rsx! {
            blockquote {
                for (i, child) in children.into_iter().enumerate() {
                    BlockView { key: "{i}", block: child }
                }
            }
        },
        Block::CodeBlock(code) => code_view(code),
        Block::Table(table) => table_view(table),
        Block::Html(html) => rsx! {
            div { class: "raw-html", dangerous_inner_html: "{html}" }
        },
        Block::Rule => rsx! { hr {} },
        Block::Map(directive) => map_view(directive),
        Block::MissingComponent { index } => missing_component(index),
    }
}

fn heading(level: u8, content: Vec<Inline>) -> Element {
    let inner = rsx! { Inlines { inlines: content } };
    match level {
        1 => rsx! { h1 { {inner} } },
        2 => rsx! { h2 { {inner} } },
        3 => rsx! { h3 { {inner} } },
        4 => rsx! { h4 { {inner} } },
        5 => rsx! { h5 { {inner} } },
        _ => rsx! { h6 { {inner} } },
    }
}

fn list_view(list: List) -> Element {
    let items = rsx! {
        for (i, item) in list.items.into_iter().enumerate() {
            li {
                key: "{i}",
                for (j, block) in item.into_iter().enumerate() {
                    BlockView { key: "{j}", block }
                }
            }
        }
    };

    match list.start {
        Some(start) => rsx! {
            ol { start: "{start}", {items} }
        },
        None => rsx! {
            ul { {items} }
        },
    }
}

fn code_view(code: CodeBlock) -> Element {
    let language = code.language.unwrap_or_default();
    match code.highlighted {
        Some(highlighted) => rsx! {
            div {
                class: "code-block",
                "data-language": "{language}",
                dangerous_inner_html: "{highlighted}",
            }
        },
        None => {
            let text = code.code;
            rsx! {
                div {
                    class: "code-block",
                    "data-language": "{language}",
                    pre { code { "{text}" } }
                }
            }
        }
    }
}

fn table_view(table: Table) -> Element {
    let style_for = |column: usize| {
        table
            .alignments
            .get(column)
            .and_then(|a| a.css())
            .unwrap_or_default()
            .to_string()
    };
    let head: Vec<(String, Vec<Inline>)> = table
        .head
        .iter()
        .enumerate()
        .map(|(column, cell)| (style_for(column), cell.clone()))
        .collect();
    let rows: Vec<Vec<(String, Vec<Inline>)>> = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(column, cell)| (style_for(column), cell.clone()))
                .collect()
        })
        .collect();

    rsx! {
        div {
            class: "table-wrapper",
            table {
                thead {
                    tr {
                        for (style, cell) in head {
                            th { style: "{style}", Inlines { inlines: cell } }
                        }
                    }
                }
                tbody {
                    for row in rows {
                        tr {
                            for (style, cell) in row {
                                td { style: "{style}", Inlines { inlines: cell } }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Keyed on address so an edited directive starts a fresh lookup
fn map_view(directive: MapDirective) -> Element {
    let key = format!("{}-{}", directive.index, directive.address);
    rsx! {
        MapWidget { key: "{key}", directive }
    }
}

fn missing_component(index: usize) -> Element {
    rsx! {
        span { class: "missing-component", "component not found: map {index}" }
    }
}

#[component]
fn Inlines(inlines: Vec<Inline>) -> Element {
    rsx! {
        for inline in inlines {
            InlineView { inline }
        }
    }
}

#[component]
fn InlineView(inline: Inline) -> Element {
    match inline {
        Inline::Text(text) => rsx! { "{text}" },
        Inline::Code(code) => rsx! { code { class: "inline-code", "{code}" } },
        Inline::Emphasis(children) => rsx! { em { Inlines { inlines: children } } },
        Inline::Strong(children) => rsx! { strong { Inlines { inlines: children } } },
        Inline::Strikethrough(children) => rsx! { del { Inlines { inlines: children } } },
        Inline::Link(link) => link_view(link),
        Inline::Image(image) => image_view(image),
        Inline::Html(html) => rsx! { span { dangerous_inner_html: "{html}" } },
        Inline::SoftBreak => rsx! { " " },
        Inline::HardBreak => rsx! { br {} },
        Inline::TaskMarker(checked) => rsx! {
            input { r#type: "checkbox", class: "task-marker", checked, disabled: true }
        },
        Inline::Map(directive) => map_view(directive),
        Inline::MissingComponent { index } => missing_component(index),
    }
}

fn link_view(link: Link) -> Element {
    let class = link.kind.class();
    let target = link.kind.target();
    let rel = link.kind.rel();
    let call = link.kind == LinkKind::Call;
    let href = link.href;
    let title = (!link.title.is_empty()).then_some(link.title);

    rsx! {
        a {
            class,
            href: "{href}",
            target,
            rel,
            title,
            if call {
                span { class: "call-icon", "📞" }
            }
            Inlines { inlines: link.children }
        }
    }
}

fn image_view(image: Image) -> Element {
    let Image { src, alt, title } = image;
    let title = (!title.is_empty()).then_some(title);

    rsx! {
        span {
            class: "content-image",
            img {
                src: "{src}",
                alt: "{alt}",
                title,
                loading: "lazy",
                style: "max-width: 100%; height: auto;",
            }
        }
    }
}
