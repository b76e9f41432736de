use std::fmt;
use std::ops::Range;

/// Keyword of a `{{kind:address}}` map directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectiveKind {
    /// `{{googlemap:...}}`: map frame only
    GoogleMap,
    /// `{{streetview:...}}`: panorama only
    StreetView,
    /// `{{maps:...}}`: map and panorama side by side
    Maps,
}

impl DirectiveKind {
    pub const ALL: [DirectiveKind; 3] = [
        DirectiveKind::GoogleMap,
        DirectiveKind::StreetView,
        DirectiveKind::Maps,
    ];

    pub fn keyword(self) -> &'static str {
        match self {
            DirectiveKind::GoogleMap => "googlemap",
            DirectiveKind::StreetView => "streetview",
            DirectiveKind::Maps => "maps",
        }
    }

    /// Case-sensitive keyword lookup
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }
}

impl fmt::Display for DirectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One map directive pulled out of a Markdown body.
///
/// Lives for a single render; `index` is the position among the directives
/// of that body and is what the placeholder token refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapDirective {
    pub kind: DirectiveKind,
    /// Trimmed text between the colon and `}}`. May be empty.
    pub address: String,
    /// Byte range of the whole `{{...}}` in the text handed to the extractor
    pub span: Range<usize>,
    pub index: usize,
}
