use std::collections::HashSet;

use crate::{DuplicatePolicy, FeedEntry, FeedOptions, Page};

/// Which operation a [`PageRequest`] belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Initial,
    LoadMore,
    Refresh,
}

impl RequestKind {
    /// Whether a successful response replaces the item list (instead of appending to it).
    pub fn replaces(self) -> bool {
        !matches!(self, Self::LoadMore)
    }
}

/// A fetch the pager has started and is waiting on.
///
/// Hand it back to [`FeedPager::complete`] together with the fetch result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    kind: RequestKind,
    generation: u64,
    cursor: Option<String>,
    limit: u32,
}

impl PageRequest {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cursor(&self) -> Option<&str> {
        self.cursor.as_deref()
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

/// What happened to a load operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The response was merged into the state.
    Applied,
    /// The fetch failed; the message is in `error`, items are untouched.
    Failed,
    /// A newer replacing load started after this request; the response was discarded.
    Stale,
    /// The pager was disposed; the response was discarded.
    Disposed,
    /// The guard refused to start a fetch.
    Skipped,
}

/// Observable feed state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedState<T> {
    pub items: Vec<T>,
    pub cursor: Option<String>,
    pub has_more: bool,
    pub loading: bool,
    pub loading_more: bool,
    pub error: Option<String>,
}

impl<T> FeedState<T> {
    fn initial() -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
            has_more: true,
            loading: true,
            loading_more: false,
            error: None,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.loading_more
    }
}

/// Cursor pagination state machine, independent of any I/O.
///
/// Every load is split into `begin_*` (guards, flag updates, returns the request to perform)
/// and [`FeedPager::complete`] (applies the result). Replacing loads (initial, refresh) bump a
/// generation counter; a completion tagged with an older generation is stale and discarded, so
/// a `load_more` response that lands after a `refresh` started can never leak into the list.
#[derive(Clone, Debug)]
pub struct FeedPager<T> {
    options: FeedOptions,
    state: FeedState<T>,
    generation: u64,
    started: bool,
    disposed: bool,
}

impl<T: FeedEntry> FeedPager<T> {
    /// Creates an empty pager in the loading state; call [`FeedPager::begin_initial`] next.
    pub fn new(options: FeedOptions) -> Self {
        let options = options.with_page_size(options.page_size);
        vdebug!(page_size = options.page_size, "FeedPager::new");
        Self {
            options,
            state: FeedState::initial(),
            generation: 0,
            started: false,
            disposed: false,
        }
    }

    pub fn options(&self) -> &FeedOptions {
        &self.options
    }

    pub fn state(&self) -> &FeedState<T> {
        &self.state
    }

    pub fn items(&self) -> &[T] {
        &self.state.items
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Starts the first load. Returns `None` if a load was already started or after disposal.
    pub fn begin_initial(&mut self) -> Option<PageRequest> {
        if self.disposed || self.started {
            return None;
        }
        Some(self.begin_replace(RequestKind::Initial))
    }

    /// Starts a reload from the first page that will replace the item list.
    ///
    /// Always allowed (except after disposal). Whatever was in flight becomes stale.
    pub fn begin_refresh(&mut self) -> Option<PageRequest> {
        if self.disposed {
            return None;
        }
        self.state.cursor = None;
        self.state.has_more = true;
        self.state.loading_more = false;
        Some(self.begin_replace(RequestKind::Refresh))
    }

    fn begin_replace(&mut self, kind: RequestKind) -> PageRequest {
        self.started = true;
        self.generation = self.generation.wrapping_add(1);
        self.state.loading = true;
        self.state.error = None;
        vtrace!(?kind, generation = self.generation, "FeedPager: begin");
        PageRequest {
            kind,
            generation: self.generation,
            cursor: None,
            limit: self.options.page_size,
        }
    }

    /// Starts loading the next page.
    ///
    /// Returns `None` (and changes nothing) unless there is more to load and no other load is in
    /// flight.
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        if self.disposed || !self.state.has_more || self.state.is_busy() {
            return None;
        }
        self.state.loading_more = true;
        self.state.error = None;
        vtrace!(generation = self.generation, "FeedPager: begin load more");
        Some(PageRequest {
            kind: RequestKind::LoadMore,
            generation: self.generation,
            cursor: self.state.cursor.clone(),
            limit: self.options.page_size,
        })
    }

    /// Applies the result of a request returned by one of the `begin_*` methods.
    pub fn complete(&mut self, request: PageRequest, result: Result<Page<T>, String>) -> Outcome {
        if self.disposed {
            vdebug!(kind = ?request.kind, "FeedPager: completion after dispose discarded");
            return Outcome::Disposed;
        }
        let in_flight = if request.kind.replaces() {
            self.state.loading
        } else {
            self.state.loading_more
        };
        if request.generation != self.generation || !in_flight {
            vdebug!(
                kind = ?request.kind,
                generation = request.generation,
                current = self.generation,
                "FeedPager: stale completion discarded"
            );
            return Outcome::Stale;
        }

        if request.kind.replaces() {
            self.state.loading = false;
        } else {
            self.state.loading_more = false;
        }

        match result {
            Ok(page) => {
                self.merge(request.kind, page);
                Outcome::Applied
            }
            Err(message) => {
                vwarn!(kind = ?request.kind, error = %message, "FeedPager: fetch failed");
                self.state.error = Some(message);
                Outcome::Failed
            }
        }
    }

    fn merge(&mut self, kind: RequestKind, page: Page<T>) {
        if kind.replaces() {
            self.state.items.clear();
        }
        match self.options.duplicate_policy {
            DuplicatePolicy::Keep => self.state.items.extend(page.items),
            DuplicatePolicy::Skip => {
                let mut seen: HashSet<String> = self
                    .state
                    .items
                    .iter()
                    .map(|item| item.entry_id().to_owned())
                    .collect();
                for item in page.items {
                    if seen.insert(item.entry_id().to_owned()) {
                        self.state.items.push(item);
                    } else {
                        vtrace!(id = item.entry_id(), "FeedPager: duplicate item skipped");
                    }
                }
            }
        }
        self.state.cursor = page.next_cursor;
        self.state.has_more = page.has_more;
        vtrace!(
            items = self.state.items.len(),
            has_more = self.state.has_more,
            "FeedPager: page merged"
        );
    }

    /// Stops the pager. Pending and future completions are discarded; `begin_*` returns `None`.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        vdebug!("FeedPager::dispose");
        self.disposed = true;
    }
}
