//! JSON shapes of the feed proxy boundary.
//!
//! `GET <endpoint>?limit=N[&after=CURSOR]` answers with [`FeedResponse`] on success and with
//! [`ApiError`] plus a non-2xx status on failure.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{FeedEntry, Page};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Image,
    Video,
    CarouselAlbum,
}

/// One post as served by the proxy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub id: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub image_url: String,
    /// Present only for [`MediaType::Video`].
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnail_url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permalink: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub caption: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timestamp: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: u64,
    #[serde(default)]
    pub is_video: bool,
    #[serde(default)]
    pub is_carousel: bool,
}

impl FeedItem {
    /// Re-derives the convenience fields from `media_type`.
    ///
    /// `is_video`/`is_carousel` follow the type, `video_url` is dropped for non-videos and an
    /// empty thumbnail falls back to the media URL.
    pub fn normalized(mut self) -> Self {
        self.is_video = self.media_type == MediaType::Video;
        self.is_carousel = self.media_type == MediaType::CarouselAlbum;
        if !self.is_video {
            self.video_url = None;
        }
        if self.thumbnail_url.is_empty() {
            self.thumbnail_url.clone_from(&self.image_url);
        }
        self
    }

    /// Parses `timestamp`.
    ///
    /// Accepts the compact `+0000` offset form used by graph-style APIs as well as RFC 3339.
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_str(&self.timestamp, "%Y-%m-%dT%H:%M:%S%z")
            .or_else(|_| DateTime::parse_from_rfc3339(&self.timestamp))
            .ok()
    }
}

impl FeedEntry for FeedItem {
    fn entry_id(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Success body of the proxy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedResponse {
    #[serde(default)]
    pub posts: Vec<FeedItem>,
    #[serde(default)]
    pub pagination: Pagination,
}

impl From<FeedResponse> for Page<FeedItem> {
    fn from(response: FeedResponse) -> Self {
        Page {
            items: response
                .posts
                .into_iter()
                .map(FeedItem::normalized)
                .collect(),
            next_cursor: response.pagination.next_cursor.filter(|c| !c.is_empty()),
            has_more: response.pagination.has_next,
        }
    }
}

/// Failure body of the proxy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub error: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
