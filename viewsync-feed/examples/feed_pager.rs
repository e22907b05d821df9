// Example: a news page backed by an in-memory source, paged three posts at a time.
use async_trait::async_trait;
use futures::executor::block_on;
use viewsync_feed::{FeedClient, FeedEntry, FeedOptions, Page, PageFetcher};

#[derive(Clone, Debug)]
struct Post {
    id: String,
    caption: String,
}

impl FeedEntry for Post {
    fn entry_id(&self) -> &str {
        &self.id
    }
}

struct InMemory(Vec<Post>);

#[async_trait(?Send)]
impl PageFetcher for InMemory {
    type Item = Post;
    type Error = String;

    async fn fetch_page(&self, cursor: Option<&str>, limit: u32) -> Result<Page<Post>, String> {
        let start = match cursor {
            Some(c) => c.parse::<usize>().map_err(|e| e.to_string())?,
            None => 0,
        };
        let end = (start + limit as usize).min(self.0.len());
        let items = self.0[start.min(end)..end].to_vec();
        let has_more = end < self.0.len();
        Ok(Page::new(items, has_more.then(|| end.to_string()), has_more))
    }
}

fn main() {
    let posts = (1..=8)
        .map(|i| Post {
            id: format!("post-{i}"),
            caption: format!("Community event #{i}"),
        })
        .collect();

    block_on(async {
        let feed = FeedClient::connect(InMemory(posts), FeedOptions::new(3)).await;
        while feed.has_more() {
            let outcome = feed.load_more().await;
            println!("load_more -> {outcome:?} ({} posts)", feed.len());
        }
        for post in feed.items() {
            println!("{}: {}", post.id, post.caption);
        }

        feed.refresh().await;
        println!("after refresh: {} posts, cursor={:?}", feed.len(), feed.cursor());
    });
}
