use core::fmt;

use async_trait::async_trait;

/// One page of results returned by a [`PageFetcher`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Cursor for the page after this one. `None` when there is none.
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_cursor: Option<String>, has_more: bool) -> Self {
        Self {
            items,
            next_cursor,
            has_more,
        }
    }

    /// A final page: no cursor, nothing more to load.
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None, false)
    }
}

/// Anything the pager can keep in its item list.
pub trait FeedEntry: Clone {
    /// Identity used for duplicate detection.
    fn entry_id(&self) -> &str;
}

/// The upstream data source of a [`crate::FeedClient`].
///
/// `cursor` is `None` for the first page. Errors are only ever shown to users through their
/// `Display` output.
#[async_trait(?Send)]
pub trait PageFetcher {
    type Item: FeedEntry;
    type Error: fmt::Display;

    async fn fetch_page(
        &self,
        cursor: Option<&str>,
        limit: u32,
    ) -> Result<Page<Self::Item>, Self::Error>;
}
