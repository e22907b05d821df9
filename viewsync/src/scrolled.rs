use crate::{ScrollThresholdOptions, ScrolledState};

/// Throttled "has the page scrolled past N" detector (e.g. for a sticky header).
///
/// The adapter drives it with timestamps:
/// - `on_scroll(offset, now_ms)` for every scroll event,
/// - `tick(now_ms)` from a timer or frame loop so a throttled trailing event is not lost.
///
/// An event arriving more than `throttle_ms` after the last evaluation is evaluated immediately.
/// Otherwise the latest offset is held and evaluated once the throttle window has elapsed.
#[derive(Clone, Debug)]
pub struct ScrollThreshold {
    options: ScrollThresholdOptions,
    offset: u64,
    is_scrolled: bool,
    last_eval_ms: Option<u64>,
    pending: Option<u64>,
}

impl ScrollThreshold {
    /// Creates a detector and evaluates `initial_offset` right away.
    pub fn new(options: ScrollThresholdOptions, initial_offset: u64) -> Self {
        Self {
            is_scrolled: initial_offset > options.threshold,
            offset: initial_offset,
            options,
            last_eval_ms: None,
            pending: None,
        }
    }

    pub fn options(&self) -> &ScrollThresholdOptions {
        &self.options
    }

    pub fn is_scrolled(&self) -> bool {
        self.is_scrolled
    }

    /// The last evaluated offset.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn state(&self) -> ScrolledState {
        ScrolledState {
            offset: self.offset,
            is_scrolled: self.is_scrolled,
        }
    }

    /// Changes the threshold and re-evaluates the last known offset.
    ///
    /// Returns `true` when `is_scrolled` flipped.
    pub fn set_threshold(&mut self, threshold: u64) -> bool {
        self.options.threshold = threshold;
        self.evaluate(self.offset)
    }

    /// Reports a scroll event. Returns `true` when `is_scrolled` flipped.
    pub fn on_scroll(&mut self, offset: u64, now_ms: u64) -> bool {
        let due = match self.last_eval_ms {
            None => true,
            Some(last) => now_ms.saturating_sub(last) > self.options.throttle_ms,
        };
        if due {
            self.pending = None;
            self.last_eval_ms = Some(now_ms);
            return self.evaluate(offset);
        }
        self.pending = Some(offset);
        false
    }

    /// Flushes a throttled trailing event once its window has elapsed.
    ///
    /// Returns `true` when `is_scrolled` flipped.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let Some(offset) = self.pending else {
            return false;
        };
        let last = self.last_eval_ms.unwrap_or(0);
        if now_ms.saturating_sub(last) < self.options.throttle_ms {
            return false;
        }
        self.pending = None;
        self.last_eval_ms = Some(now_ms);
        self.evaluate(offset)
    }

    fn evaluate(&mut self, offset: u64) -> bool {
        self.offset = offset;
        let next = offset > self.options.threshold;
        if next == self.is_scrolled {
            return false;
        }
        vtrace!(offset, is_scrolled = next, "ScrollThreshold: flipped");
        self.is_scrolled = next;
        true
    }
}
