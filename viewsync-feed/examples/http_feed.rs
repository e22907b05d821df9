// Example: page through the feed proxy of a running site.
//
//     cargo run -p viewsync-feed --features http --example http_feed -- http://localhost:3000
use viewsync_feed::{FeedClient, FeedOptions, HttpFeedFetcher};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let origin = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:3000".to_owned());
    let fetcher = HttpFeedFetcher::for_origin(&origin);
    println!("GET {}", fetcher.endpoint());

    let feed = FeedClient::connect(fetcher, FeedOptions::new(6)).await;
    if let Some(error) = feed.error() {
        eprintln!("initial load failed: {error}");
        return;
    }
    feed.load_more().await;

    for post in feed.items() {
        let kind = if post.is_video { "video" } else { "image" };
        println!("[{kind}] {} {} likes: {}", post.timestamp, post.permalink, post.likes);
    }
    if let Some(error) = feed.error() {
        eprintln!("load more failed: {error}");
    }
}
