use serde::{Deserialize, Serialize};

/// A stored news item.
///
/// Immutable once created. The timestamp is kept as the text the store holds so a
/// malformed value can be carried around and skipped instead of rejected on read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(rename = "text")]
    pub body: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(rename = "datetime", default)]
    pub timestamp: Option<String>,
}

impl Event {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        body: impl Into<String>,
        category: Option<String>,
        timestamp: Option<String>,
    ) -> Self {
        Self { id: id.into(), title: title.into(), body: body.into(), category, timestamp }
    }

    /// Category if present and non-empty.
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }
}

/// Search predicate understood by every store backend.
///
/// `text` matches title, body or category case-insensitively; `category` is an exact match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl EventFilter {
    pub fn text(text: impl Into<String>) -> Self {
        Self { text: Some(text.into()), category: None }
    }

    pub fn matches(&self, event: &Event) -> bool {
        if let Some(ref category) = self.category {
            if event.category.as_deref() != Some(category.as_str()) {
                return false;
            }
        }
        match self.text.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(text) => {
                let needle = text.to_lowercase();
                event.title.to_lowercase().contains(&needle)
                    || event.body.to_lowercase().contains(&needle)
                    || event.category.as_deref().is_some_and(|c| c.to_lowercase().contains(&needle))
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    #[default]
    #[serde(rename = "datetime")]
    Timestamp,
    Title,
    Category,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Ordering of a page request. Defaults to newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub const NEWEST_FIRST: Self =
        Self { field: SortField::Timestamp, direction: SortDirection::Desc };
}

impl std::str::FromStr for SortSpec {
    type Err = String;

    /// Parses `"datetime,desc"`, `"title"` or `"category,asc"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',').map(str::trim);
        let field = match parts.next().unwrap_or_default() {
            "" | "datetime" | "timestamp" => SortField::Timestamp,
            "title" => SortField::Title,
            "category" => SortField::Category,
            other => return Err(format!("unknown sort field: {other}")),
        };
        let direction = match parts.next().map(str::to_ascii_lowercase).as_deref() {
            None | Some("desc") => SortDirection::Desc,
            Some("asc") => SortDirection::Asc,
            Some(other) => return Err(format!("unknown sort direction: {other}")),
        };
        Ok(Self { field, direction })
    }
}
