use crate::wire::{FeedItem, FeedResponse, MediaType};
use crate::*;

use std::cell::RefCell;
use std::collections::VecDeque;

use async_trait::async_trait;
use futures::channel::oneshot;
use futures::executor::block_on;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Post(String);

impl FeedEntry for Post {
    fn entry_id(&self) -> &str {
        &self.0
    }
}

type Reply = core::result::Result<Page<Post>, String>;

enum Scripted {
    Ready(Reply),
    Gated(oneshot::Receiver<Reply>),
}

#[derive(Default)]
struct FakeFetcher {
    calls: RefCell<Vec<(Option<String>, u32)>>,
    replies: RefCell<VecDeque<Scripted>>,
}

impl FakeFetcher {
    fn with(replies: Vec<Scripted>) -> Self {
        Self {
            calls: RefCell::default(),
            replies: RefCell::new(replies.into()),
        }
    }

    fn push(&self, reply: Scripted) {
        self.replies.borrow_mut().push_back(reply);
    }

    fn gate(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.push(Scripted::Gated(rx));
        tx
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

#[async_trait(?Send)]
impl PageFetcher for FakeFetcher {
    type Item = Post;
    type Error = String;

    async fn fetch_page(&self, cursor: Option<&str>, limit: u32) -> Reply {
        self.calls
            .borrow_mut()
            .push((cursor.map(str::to_owned), limit));
        let next = self.replies.borrow_mut().pop_front();
        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Gated(rx)) => rx.await.unwrap_or_else(|_| Err("cancelled".into())),
            None => Err("no scripted reply".into()),
        }
    }
}

fn posts(ids: &[u32]) -> Vec<Post> {
    ids.iter().map(|i| Post(i.to_string())).collect()
}

fn page(ids: &[u32], next: Option<&str>) -> Page<Post> {
    Page::new(posts(ids), next.map(str::to_owned), next.is_some())
}

fn ok(ids: &[u32], next: Option<&str>) -> Scripted {
    Scripted::Ready(Ok(page(ids, next)))
}

fn err(message: &str) -> Scripted {
    Scripted::Ready(Err(message.to_owned()))
}

fn client(replies: Vec<Scripted>) -> FeedClient<FakeFetcher> {
    FeedClient::new(FakeFetcher::with(replies), FeedOptions::new(3))
}

#[test]
fn new_client_starts_loading_and_empty() {
    let c = client(vec![]);
    let s = c.snapshot();
    assert!(s.loading);
    assert!(!s.loading_more);
    assert!(s.has_more);
    assert!(s.items.is_empty());
    assert_eq!(s.error, None);
    assert_eq!(c.fetcher().call_count(), 0);
}

#[test]
fn initial_load_replaces_items_and_sets_cursor() {
    block_on(async {
        let c = FeedClient::connect(
            FakeFetcher::with(vec![ok(&[1, 2, 3], Some("c1"))]),
            FeedOptions::new(3),
        )
        .await;
        assert_eq!(c.items(), posts(&[1, 2, 3]));
        assert_eq!(c.cursor().as_deref(), Some("c1"));
        assert!(c.has_more());
        assert!(!c.loading());
        assert_eq!(*c.fetcher().calls.borrow(), vec![(None, 3)]);

        // Only the first initial load fetches.
        assert_eq!(c.load_initial().await, Outcome::Skipped);
        assert_eq!(c.fetcher().call_count(), 1);
    });
}

#[test]
fn snapshot_releases_state_before_follow_up_calls() {
    block_on(async {
        let c = client(vec![ok(&[1, 2], None)]);
        c.load_initial().await;

        let other = c.clone();
        let state = c.snapshot();
        if !state.has_more {
            other.dispose();
        }
        assert!(c.is_disposed());
        assert_eq!(state.items, posts(&[1, 2]));
    });
}

#[test]
#[should_panic]
fn with_state_rejects_reentrant_mutation() {
    let c = client(vec![]);
    let other = c.clone();
    c.with_state(|_| other.dispose());
}

#[test]
fn initial_failure_is_recorded_and_refresh_recovers() {
    block_on(async {
        let c = client(vec![err("upstream unavailable"), ok(&[7], None)]);
        assert_eq!(c.load_initial().await, Outcome::Failed);
        assert_eq!(c.error().as_deref(), Some("upstream unavailable"));
        assert!(c.is_empty());
        assert!(!c.loading());

        assert_eq!(c.refresh().await, Outcome::Applied);
        assert_eq!(c.error(), None);
        assert_eq!(c.items(), posts(&[7]));
        assert!(!c.has_more());
    });
}

#[test]
fn load_more_appends_with_cursor_and_refresh_replaces() {
    block_on(async {
        let c = client(vec![
            ok(&[1, 2, 3], Some("c1")),
            ok(&[4, 5], Some("c2")),
            ok(&[9, 10], Some("r1")),
        ]);
        c.load_initial().await;
        assert_eq!(c.load_more().await, Outcome::Applied);
        assert_eq!(c.items(), posts(&[1, 2, 3, 4, 5]));
        assert_eq!(c.cursor().as_deref(), Some("c2"));

        assert_eq!(c.refresh().await, Outcome::Applied);
        assert_eq!(c.items(), posts(&[9, 10]));
        assert_eq!(c.cursor().as_deref(), Some("r1"));

        let calls = c.fetcher().calls.borrow().clone();
        assert_eq!(
            calls,
            vec![(None, 3), (Some("c1".to_owned()), 3), (None, 3)]
        );
    });
}

#[test]
fn load_more_is_a_no_op_when_guarded() {
    block_on(async {
        // Initial load still in flight.
        let c = client(vec![]);
        let gate = c.fetcher().gate();
        let initial = c.load_initial();
        let probe = async {
            let before = c.snapshot();
            assert_eq!(c.load_more().await, Outcome::Skipped);
            assert_eq!(c.snapshot(), before);
            gate.send(Ok(page(&[1], Some("c1")))).unwrap();
        };
        let (outcome, ()) = futures::join!(initial, probe);
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(c.fetcher().call_count(), 1);

        // A load more already in flight.
        let gate = c.fetcher().gate();
        let first = c.load_more();
        let probe = async {
            assert!(c.loading_more());
            let before = c.snapshot();
            assert_eq!(c.load_more().await, Outcome::Skipped);
            assert_eq!(c.snapshot(), before);
            gate.send(Ok(page(&[2], None))).unwrap();
        };
        let (outcome, ()) = futures::join!(first, probe);
        assert_eq!(outcome, Outcome::Applied);
        assert_eq!(c.fetcher().call_count(), 2);

        // Nothing more to load.
        assert!(!c.has_more());
        let before = c.snapshot();
        assert_eq!(c.load_more().await, Outcome::Skipped);
        assert_eq!(c.snapshot(), before);
        assert_eq!(c.fetcher().call_count(), 2);
    });
}

#[test]
fn failed_load_more_keeps_items_and_allows_retry() {
    block_on(async {
        let c = client(vec![
            ok(&[1, 2, 3], Some("c1")),
            err("timeout"),
            ok(&[4, 5], None),
        ]);
        c.load_initial().await;

        assert_eq!(c.load_more().await, Outcome::Failed);
        assert_eq!(c.items(), posts(&[1, 2, 3]));
        assert_eq!(c.error().as_deref(), Some("timeout"));
        assert!(!c.loading_more());
        assert_eq!(c.cursor().as_deref(), Some("c1"));

        assert_eq!(c.load_more().await, Outcome::Applied);
        assert_eq!(c.error(), None);
        assert_eq!(c.items(), posts(&[1, 2, 3, 4, 5]));
        assert_eq!(
            c.fetcher().calls.borrow()[2],
            (Some("c1".to_owned()), 3)
        );
    });
}

#[test]
fn stale_load_more_response_is_discarded_after_refresh() {
    block_on(async {
        let c = client(vec![ok(&[1, 2, 3], Some("c1"))]);
        c.load_initial().await;

        let gate = c.fetcher().gate();
        c.fetcher().push(ok(&[9, 10], Some("r1")));

        let more = c.load_more();
        let driver = async {
            assert!(c.loading_more());
            let refreshed = c.refresh().await;
            assert_eq!(c.items(), posts(&[9, 10]));
            gate.send(Ok(page(&[4, 5], Some("c2")))).unwrap();
            refreshed
        };
        let (more, refreshed) = futures::join!(more, driver);

        assert_eq!(refreshed, Outcome::Applied);
        assert_eq!(more, Outcome::Stale);
        assert_eq!(c.items(), posts(&[9, 10]));
        assert_eq!(c.cursor().as_deref(), Some("r1"));
        assert!(!c.loading_more());
        assert!(!c.loading());
    });
}

#[test]
fn refresh_supersedes_an_in_flight_initial_load() {
    block_on(async {
        let c = client(vec![]);
        let gate = c.fetcher().gate();
        c.fetcher().push(ok(&[5], None));

        let initial = c.load_initial();
        let driver = async {
            let refreshed = c.refresh().await;
            gate.send(Ok(page(&[1, 2], Some("c1")))).unwrap();
            refreshed
        };
        let (initial, refreshed) = futures::join!(initial, driver);

        assert_eq!(refreshed, Outcome::Applied);
        assert_eq!(initial, Outcome::Stale);
        assert_eq!(c.items(), posts(&[5]));
        assert!(!c.has_more());
    });
}

#[test]
fn responses_after_dispose_do_not_mutate_state() {
    block_on(async {
        let c = client(vec![]);
        let gate = c.fetcher().gate();

        let initial = c.load_initial();
        let driver = async {
            c.dispose();
            gate.send(Ok(page(&[1, 2, 3], Some("c1")))).unwrap();
        };
        let before = c.snapshot();
        let (outcome, ()) = futures::join!(initial, driver);

        assert_eq!(outcome, Outcome::Disposed);
        assert!(c.is_disposed());
        assert!(c.is_empty());
        assert_eq!(c.cursor(), None);
        assert_eq!(c.error(), None);
        assert_eq!(before.items, c.items());

        assert_eq!(c.refresh().await, Outcome::Skipped);
        assert_eq!(c.load_more().await, Outcome::Skipped);
        assert_eq!(c.fetcher().call_count(), 1);
    });
}

#[test]
fn duplicate_ids_are_skipped_by_default() {
    block_on(async {
        let c = client(vec![ok(&[1, 2, 3, 3], Some("c1")), ok(&[3, 4], None)]);
        c.load_initial().await;
        assert_eq!(c.items(), posts(&[1, 2, 3]));
        c.load_more().await;
        assert_eq!(c.items(), posts(&[1, 2, 3, 4]));
    });
}

#[test]
fn duplicate_ids_can_be_kept_verbatim() {
    block_on(async {
        let c = FeedClient::new(
            FakeFetcher::with(vec![ok(&[1, 2, 3], Some("c1")), ok(&[3, 4], None)]),
            FeedOptions::new(3).with_duplicate_policy(DuplicatePolicy::Keep),
        );
        c.load_initial().await;
        c.load_more().await;
        assert_eq!(c.items(), posts(&[1, 2, 3, 3, 4]));
    });
}

#[test]
fn pager_rejects_double_completion() {
    let mut p = FeedPager::<Post>::new(FeedOptions::new(0));
    assert_eq!(p.options().page_size, 1);

    let req = p.begin_initial().unwrap();
    assert_eq!(req.kind(), RequestKind::Initial);
    assert_eq!(req.limit(), 1);
    assert_eq!(req.generation(), 1);
    assert_eq!(p.complete(req.clone(), Ok(page(&[1], Some("c1")))), Outcome::Applied);
    assert_eq!(p.complete(req, Ok(page(&[2], None))), Outcome::Stale);
    assert_eq!(p.items(), posts(&[1]).as_slice());

    let more = p.begin_load_more().unwrap();
    assert_eq!(more.cursor(), Some("c1"));
    assert_eq!(more.generation(), 1);
    assert!(p.begin_refresh().is_some());
    assert_eq!(p.generation(), 2);
    assert!(!p.state().loading_more);
    assert_eq!(p.complete(more, Ok(page(&[2], None))), Outcome::Stale);
}

#[test]
fn wire_response_decodes_with_defaults() {
    let body = r#"{
        "posts": [
            {
                "id": "17890",
                "type": "VIDEO",
                "imageUrl": "https://cdn.example/v.mp4",
                "videoUrl": "https://cdn.example/v.mp4",
                "thumbnailUrl": "https://cdn.example/v.jpg",
                "permalink": "https://social.example/p/1",
                "caption": null,
                "timestamp": "2024-05-01T09:30:00+0000",
                "isVideo": true,
                "isCarousel": false
            },
            {
                "id": "17891",
                "type": "CAROUSEL_ALBUM",
                "imageUrl": "https://cdn.example/c.jpg",
                "videoUrl": "https://cdn.example/wrong.mp4",
                "thumbnailUrl": "",
                "permalink": "https://social.example/p/2",
                "caption": "Open house this Friday",
                "timestamp": "2024-05-02T18:00:00+09:00",
                "likes": 12,
                "comments": 3
            }
        ],
        "pagination": { "hasNext": true, "nextCursor": "QVFI" }
    }"#;
    let response: FeedResponse = serde_json::from_str(body).unwrap();
    let page: Page<FeedItem> = response.into();

    assert!(page.has_more);
    assert_eq!(page.next_cursor.as_deref(), Some("QVFI"));

    let video = &page.items[0];
    assert_eq!(video.media_type, MediaType::Video);
    assert!(video.is_video);
    assert_eq!(video.caption, "");
    assert_eq!((video.likes, video.comments), (0, 0));
    let at = video.published_at().unwrap();
    assert_eq!(at.timestamp(), 1_714_555_800);

    let album = &page.items[1];
    assert!(album.is_carousel);
    assert!(!album.is_video);
    assert_eq!(album.video_url, None);
    assert_eq!(album.thumbnail_url, album.image_url);
    assert_eq!(album.likes, 12);
    assert!(album.published_at().is_some());
}

#[test]
fn wire_last_page_has_no_cursor() {
    let response: FeedResponse =
        serde_json::from_str(r#"{"posts":[],"pagination":{"hasNext":false,"nextCursor":null}}"#)
            .unwrap();
    let page: Page<FeedItem> = response.into();
    assert_eq!(page, Page::last(Vec::new()));
}

#[test]
fn upstream_error_message_is_passed_through() {
    let e = FetchError::upstream(500, r#"{"error":"feed API is not configured"}"#);
    assert_eq!(e.to_string(), "feed API is not configured");
    assert_eq!(e.status(), Some(500));

    let e = FetchError::upstream(502, "<html>bad gateway</html>");
    assert_eq!(e.to_string(), DEFAULT_ERROR_MESSAGE);

    let e = FetchError::upstream(400, r#"{"error":""}"#);
    assert_eq!(e.to_string(), DEFAULT_ERROR_MESSAGE);

    let decode = serde_json::from_str::<FeedResponse>("not json").unwrap_err();
    let e = FetchError::from(decode);
    assert!(e.to_string().starts_with("invalid feed response"));
    assert_eq!(e.status(), None);
}

#[cfg(feature = "http")]
#[test]
fn http_request_carries_limit_and_cursor() {
    let fetcher = HttpFeedFetcher::for_origin("https://example.com/");
    assert_eq!(fetcher.endpoint(), "https://example.com/api/instagram/news");

    let first = fetcher.request(None, 3).build().unwrap();
    assert_eq!(first.method(), reqwest::Method::GET);
    assert_eq!(first.url().path(), "/api/instagram/news");
    assert_eq!(first.url().query(), Some("limit=3"));

    let next = fetcher.request(Some("c1"), 3).build().unwrap();
    assert_eq!(next.url().query(), Some("limit=3&after=c1"));

    let empty_cursor = fetcher.request(Some(""), 3).build().unwrap();
    assert_eq!(empty_cursor.url().query(), Some("limit=3"));
}
