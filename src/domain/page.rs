use serde::Serialize;

/// A stored wiki page as the backend knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub id: i64,
    pub name: String,
    pub raw_content: String,
}

/// One entry of the home listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub id: i64,
    pub name: String,
}

/// Result of looking a page up by name. `found` only ever comes from the
/// backend, never from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLookup {
    pub found: bool,
    pub id: Option<i64>,
    pub raw_content: Option<String>,
}

impl PageLookup {
    pub fn missing() -> Self {
        Self::default()
    }
}

impl From<Page> for PageLookup {
    fn from(page: Page) -> Self {
        Self {
            found: true,
            id: Some(page.id),
            raw_content: Some(page.raw_content),
        }
    }
}

/// Name and markdown of a page, as exported by a backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageData {
    pub name: String,
    pub content: String,
}

impl From<Page> for PageData {
    fn from(page: Page) -> Self {
        Self {
            name: page.name,
            content: page.raw_content,
        }
    }
}

impl From<&Page> for PageSummary {
    fn from(page: &Page) -> Self {
        Self {
            id: page.id,
            name: page.name.clone(),
        }
    }
}

/// Path of the page view for `name`, percent-encoded so it is always a valid link and
/// `Location` header.
pub fn page_path(name: &str) -> String {
    format!("/wiki/{}", urlencoding::encode(name))
}
