use std::cell::RefCell;
use std::rc::Rc;

use crate::{FeedOptions, FeedPager, FeedState, Outcome, PageFetcher, PageRequest};

/// Async paginated feed client.
///
/// Wraps a [`FeedPager`] and an injected [`PageFetcher`]. The client is built for a single
/// cooperative UI thread: it is cheap to clone (clones share state), every operation takes
/// `&self`, and no borrow of the shared state is held across the fetch `.await`, so several
/// operations may be in flight at once on the same executor. Their effects are ordered by the
/// pager's guards and generation counter; the client never returns an error, failures become
/// `error` state.
pub struct FeedClient<F: PageFetcher> {
    pager: Rc<RefCell<FeedPager<F::Item>>>,
    fetcher: Rc<F>,
}

impl<F: PageFetcher> Clone for FeedClient<F> {
    fn clone(&self) -> Self {
        Self {
            pager: Rc::clone(&self.pager),
            fetcher: Rc::clone(&self.fetcher),
        }
    }
}

impl<F: PageFetcher> FeedClient<F> {
    /// Creates a client without fetching anything. The state starts out as `loading`.
    pub fn new(fetcher: F, options: FeedOptions) -> Self {
        Self {
            pager: Rc::new(RefCell::new(FeedPager::new(options))),
            fetcher: Rc::new(fetcher),
        }
    }

    /// Creates a client and runs its initial load.
    pub async fn connect(fetcher: F, options: FeedOptions) -> Self {
        let client = Self::new(fetcher, options);
        client.load_initial().await;
        client
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Runs the first load. Only the first call per client fetches; later calls are `Skipped`.
    pub async fn load_initial(&self) -> Outcome {
        let request = self.pager.borrow_mut().begin_initial();
        self.run(request).await
    }

    /// Loads and appends the next page, unless a load is in flight or there is nothing more.
    pub async fn load_more(&self) -> Outcome {
        let request = self.pager.borrow_mut().begin_load_more();
        self.run(request).await
    }

    /// Reloads from the first page and replaces the item list.
    pub async fn refresh(&self) -> Outcome {
        let request = self.pager.borrow_mut().begin_refresh();
        self.run(request).await
    }

    async fn run(&self, request: Option<PageRequest>) -> Outcome {
        let Some(request) = request else {
            return Outcome::Skipped;
        };
        let result = self
            .fetcher
            .fetch_page(request.cursor(), request.limit())
            .await
            .map_err(|e| e.to_string());
        self.pager.borrow_mut().complete(request, result)
    }

    /// Stops the client. Responses that arrive afterwards are dropped.
    pub fn dispose(&self) {
        self.pager.borrow_mut().dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.pager.borrow().is_disposed()
    }

    /// Runs `f` against the current state without cloning it.
    ///
    /// # Panics
    ///
    /// The state stays borrowed while `f` runs, so `f` must not start a load or call
    /// [`FeedClient::dispose`] on this client or one of its clones. Take a
    /// [`FeedClient::snapshot`] first when the follow-up depends on the state.
    pub fn with_state<R>(&self, f: impl FnOnce(&FeedState<F::Item>) -> R) -> R {
        f(self.pager.borrow().state())
    }

    /// Clones the current state; no borrow outlives the call.
    pub fn snapshot(&self) -> FeedState<F::Item> {
        self.with_state(FeedState::clone)
    }

    pub fn items(&self) -> Vec<F::Item> {
        self.with_state(|s| s.items.clone())
    }

    pub fn len(&self) -> usize {
        self.with_state(|s| s.items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn loading(&self) -> bool {
        self.with_state(|s| s.loading)
    }

    pub fn loading_more(&self) -> bool {
        self.with_state(|s| s.loading_more)
    }

    pub fn has_more(&self) -> bool {
        self.with_state(|s| s.has_more)
    }

    pub fn cursor(&self) -> Option<String> {
        self.with_state(|s| s.cursor.clone())
    }

    pub fn error(&self) -> Option<String> {
        self.with_state(|s| s.error.clone())
    }
}
