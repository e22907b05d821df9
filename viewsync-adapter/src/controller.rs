use viewsync::{
    ObserverRegistry, SectionKey, SectionTracker, TrackerOptions, TrackerState, VisibilityEntry,
    VisibilityObserver,
};

use crate::{SmoothScroll, SmoothScrollOptions};

/// A framework-neutral controller for a scroll-synchronized section view.
///
/// It owns the three per-view resources and ties their lifetimes together:
/// - a [`SectionTracker`] publishing the active section and progress,
/// - an [`ObserverRegistry`] holding the host's visibility subscriptions,
/// - a [`SmoothScroll`] used by `scroll_to_section`, created on first use.
///
/// Adapters drive it by calling:
/// - `observe(id, target)` from their ref/mount callbacks (`None` on unmount),
/// - `on_visibility(batch)` from the host observer's callback,
/// - `on_scroll(offset, now_ms)` for user scrolling and `tick(now_ms)` every frame,
/// - `dispose()` when the view goes away.
pub struct SectionController<K, O: VisibilityObserver<K>> {
    tracker: SectionTracker<K>,
    registry: ObserverRegistry<K, O>,
    smooth_options: SmoothScrollOptions,
    smooth: Option<SmoothScroll>,
    scroll_offset: u64,
    disposed: bool,
}

impl<K: SectionKey, O: VisibilityObserver<K>> SectionController<K, O> {
    pub fn new(sections: Vec<K>, options: TrackerOptions<K>, observer: O) -> Self {
        let registry = ObserverRegistry::new(observer, options.observe.clone());
        Self {
            tracker: SectionTracker::new(sections, options),
            registry,
            smooth_options: SmoothScrollOptions::default(),
            smooth: None,
            scroll_offset: 0,
            disposed: false,
        }
    }

    pub fn with_smooth_scroll(mut self, options: SmoothScrollOptions) -> Self {
        self.smooth_options = options;
        self
    }

    pub fn tracker(&self) -> &SectionTracker<K> {
        &self.tracker
    }

    pub fn registry(&self) -> &ObserverRegistry<K, O> {
        &self.registry
    }

    pub fn active(&self) -> Option<&K> {
        self.tracker.active()
    }

    pub fn progress(&self) -> f32 {
        self.tracker.progress()
    }

    pub fn state(&self) -> TrackerState<K> {
        self.tracker.state()
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Whether the smooth-scroll resource is currently held.
    pub fn has_smooth_scroll(&self) -> bool {
        self.smooth.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.smooth.as_ref().is_some_and(SmoothScroll::is_animating)
    }

    /// Registers (or, with `None`, unregisters) the region rendered for section `id`.
    ///
    /// Ids that are not part of the section list are ignored. Returns `true` when `id` is
    /// observed afterwards.
    pub fn observe(&mut self, id: K, target: Option<O::Target>) -> bool {
        if self.disposed {
            return false;
        }
        if !self.tracker.contains(&id) {
            vtrace!("SectionController: observe for unknown section ignored");
            return false;
        }
        self.registry.observe(id, target)
    }

    /// Feeds one visibility batch from the host observer.
    ///
    /// Entries for regions that were unregistered in the meantime are dropped. Returns `true`
    /// when the active section changed.
    pub fn on_visibility(&mut self, mut batch: Vec<VisibilityEntry<K>>) -> bool {
        if self.disposed {
            vtrace!("SectionController: batch after dispose ignored");
            return false;
        }
        self.registry.retain_observed(&mut batch);
        self.tracker.apply_batch(&batch)
    }

    /// Replaces the section list. Observations for sections that no longer exist are cancelled.
    pub fn set_sections(&mut self, sections: Vec<K>) {
        if self.disposed {
            return;
        }
        for id in self.tracker.sections().to_vec() {
            if !sections.contains(&id) {
                self.registry.unobserve(&id);
            }
        }
        self.tracker.set_sections(sections);
    }

    /// Call this when the UI reports a user scroll. Cancels any active smooth scroll.
    pub fn on_scroll(&mut self, scroll_offset: u64) {
        self.scroll_offset = scroll_offset;
        if let Some(smooth) = &mut self.smooth {
            smooth.on_user_scroll(scroll_offset);
        }
    }

    /// Starts a smooth scroll to the start of section `id`.
    ///
    /// `section_start` maps a section to its current offset in the scroll container (the adapter
    /// owns layout). Returns the resolved target offset, or `None` when the section is unknown,
    /// has no layout yet, or the controller was disposed.
    pub fn scroll_to_section(
        &mut self,
        id: &K,
        now_ms: u64,
        mut section_start: impl FnMut(&K) -> Option<u64>,
    ) -> Option<u64> {
        if self.disposed || !self.tracker.contains(id) {
            return None;
        }
        let start = section_start(id)?;
        let offset = self.scroll_offset;
        let options = self.smooth_options;
        let smooth = self
            .smooth
            .get_or_insert_with(|| SmoothScroll::new(options, offset));
        Some(smooth.scroll_to(start, now_ms))
    }

    /// Advances the smooth scroll, if any.
    ///
    /// Returns the offset the adapter should apply to the real scroll container.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        let off = self.smooth.as_mut()?.tick(now_ms)?;
        self.scroll_offset = off;
        Some(off)
    }

    /// Tears the view down: cancels every observation, stops the tracker and releases the
    /// smooth-scroll resource. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        vdebug!(live = self.registry.len(), "SectionController::dispose");
        self.disposed = true;
        self.registry.dispose();
        self.tracker.dispose();
        self.smooth = None;
    }
}

impl<K: core::fmt::Debug, O: VisibilityObserver<K>> core::fmt::Debug for SectionController<K, O> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SectionController")
            .field("tracker", &self.tracker)
            .field("registry", &self.registry)
            .field("smooth", &self.smooth)
            .field("scroll_offset", &self.scroll_offset)
            .field("disposed", &self.disposed)
            .finish()
    }
}
