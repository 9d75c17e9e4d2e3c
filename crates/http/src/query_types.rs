//! Request/query types (Deserialize)

use newsdash_core::{DEFAULT_PAGE_SIZE, SortSpec};
use serde::Deserialize;

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

/// `?page=&size=&sort=` on the news listing.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
    pub sort: Option<String>,
}

impl PageQuery {
    /// Parsed sort order; absent means newest first.
    pub fn sort_spec(&self) -> Result<SortSpec, String> {
        self.sort.as_deref().map_or(Ok(SortSpec::NEWEST_FIRST), |s| s.parse())
    }
}

/// `?page=&size=` on the search endpoint.
#[derive(Debug, Deserialize)]
pub struct SearchPageQuery {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub size: u32,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub text: String,
}
