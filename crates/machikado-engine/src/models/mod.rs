pub mod directive;
pub mod document;
pub mod post;
pub mod shop;

pub use directive::{DirectiveKind, MapDirective};
pub use document::{
    Alignment, Block, CodeBlock, Document, Image, Inline, Link, LinkKind, List, Table,
};
pub use post::BlogPost;
pub use shop::Shop;
