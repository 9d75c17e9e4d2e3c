use serde::{Deserialize, Serialize};

/// One page of results, shaped the way the dashboard reads paginated lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    /// Zero-based page index.
    pub number: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, number: u32, size: u32, total_elements: u64) -> Self {
        let total_pages = if size == 0 { 0 } else { total_elements.div_ceil(u64::from(size)) };
        Self { content, number, size, total_elements, total_pages }
    }
}
