//! Cursor-paginated feed loading for UI views.
//!
//! - [`FeedPager`]: a sans-IO state machine (items, cursor, `has_more`, loading flags, error)
//!   with a single-flight guard for `load_more` and a generation counter that discards stale
//!   responses after a `refresh`.
//! - [`FeedClient`]: the async front end over an injected [`PageFetcher`].
//! - [`wire`]: JSON shapes of the feed proxy, plus [`HttpFeedFetcher`] behind `feature = "http"`.
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod client;
mod error;
mod fetcher;
#[cfg(feature = "http")]
mod http;
mod options;
mod pager;
pub mod wire;

#[cfg(test)]
mod tests;

pub use client::FeedClient;
pub use error::{DEFAULT_ERROR_MESSAGE, FetchError, Result};
pub use fetcher::{FeedEntry, Page, PageFetcher};
#[cfg(feature = "http")]
pub use http::HttpFeedFetcher;
pub use options::{DuplicatePolicy, FeedOptions};
pub use pager::{FeedPager, FeedState, Outcome, PageRequest, RequestKind};
