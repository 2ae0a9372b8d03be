mod collation;
mod filter;
pub mod text;

pub use filter::{extract_categories, filter};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum SortKey {
    #[default]
    Title,
    Author,
    DateDesc,
    DateAsc,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::DateDesc => "date_desc",
            Self::DateAsc => "date_asc",
        }
    }
}

/// Caller-owned catalog view state. An empty search term or category means
/// "no constraint".
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CatalogQuery {
    pub search_term: String,
    pub category: Option<String>,
    pub sort_key: SortKey,
}

impl CatalogQuery {
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|value| !value.is_empty())
    }
}
