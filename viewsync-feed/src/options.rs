/// What to do with an incoming item whose id is already in the list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Drop it; ids in the list stay unique.
    #[default]
    Skip,
    /// Keep it; the list mirrors exactly what upstream returned.
    Keep,
}

/// Configuration for [`crate::FeedPager`] / [`crate::FeedClient`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeedOptions {
    /// Items requested per page. Always at least 1.
    pub page_size: u32,
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            page_size: 10,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

impl FeedOptions {
    pub fn new(page_size: u32) -> Self {
        Self::default().with_page_size(page_size)
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_duplicate_policy(mut self, duplicate_policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = duplicate_policy;
        self
    }
}
