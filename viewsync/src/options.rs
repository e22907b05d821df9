use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::RootMargin;
use crate::tracker::SectionTracker;

/// A callback fired when the tracker's active section changes.
pub type OnActiveChangeCallback<K> = Arc<dyn Fn(&SectionTracker<K>) + Send + Sync>;

/// What the host's visibility observer is asked to report.
///
/// These values are handed verbatim to [`crate::VisibilityObserver::observe`]; the tracker
/// itself only consumes the resulting batches.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObserveOptions {
    /// Ratios at which the observer should deliver a batch. Sorted ascending, within `[0, 1]`.
    pub thresholds: Vec<f32>,
    pub root_margin: RootMargin,
}

impl ObserveOptions {
    /// `steps + 1` evenly spaced thresholds from 0 to 1 (`steps = 10` gives `0.0, 0.1, .., 1.0`).
    pub fn evenly_spaced(steps: u16) -> Vec<f32> {
        let steps = steps.max(1);
        (0..=steps).map(|i| i as f32 / steps as f32).collect()
    }

    pub fn with_steps(mut self, steps: u16) -> Self {
        self.thresholds = Self::evenly_spaced(steps);
        self
    }

    pub fn with_thresholds(mut self, mut thresholds: Vec<f32>) -> Self {
        thresholds.retain(|t| (0.0..=1.0).contains(t));
        thresholds.sort_by(f32::total_cmp);
        thresholds.dedup();
        self.thresholds = thresholds;
        self
    }

    pub fn with_root_margin(mut self, root_margin: RootMargin) -> Self {
        self.root_margin = root_margin;
        self
    }
}

impl Default for ObserveOptions {
    fn default() -> Self {
        Self {
            thresholds: Self::evenly_spaced(10),
            root_margin: RootMargin::default(),
        }
    }
}

/// Configuration for [`crate::SectionTracker`].
pub struct TrackerOptions<K> {
    /// Minimum visibility ratio the most visible section must reach to become active.
    pub activation_threshold: f32,

    /// Forwarded to the visibility observer when regions are registered.
    pub observe: ObserveOptions,

    /// Optional callback fired after the active section changes.
    pub on_change: Option<OnActiveChangeCallback<K>>,
}

impl<K> Clone for TrackerOptions<K> {
    fn clone(&self) -> Self {
        Self {
            activation_threshold: self.activation_threshold,
            observe: self.observe.clone(),
            on_change: self.on_change.clone(),
        }
    }
}

impl<K> Default for TrackerOptions<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TrackerOptions<K> {
    pub const DEFAULT_ACTIVATION_THRESHOLD: f32 = 0.3;

    pub fn new() -> Self {
        Self {
            activation_threshold: Self::DEFAULT_ACTIVATION_THRESHOLD,
            observe: ObserveOptions::default(),
            on_change: None,
        }
    }

    /// Sets the activation threshold, clamped to `[0, 1]`.
    pub fn with_activation_threshold(mut self, threshold: f32) -> Self {
        self.activation_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    pub fn with_observe(mut self, observe: ObserveOptions) -> Self {
        self.observe = observe;
        self
    }

    pub fn with_root_margin(mut self, root_margin: RootMargin) -> Self {
        self.observe.root_margin = root_margin;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&SectionTracker<K>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl<K> core::fmt::Debug for TrackerOptions<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TrackerOptions")
            .field("activation_threshold", &self.activation_threshold)
            .field("observe", &self.observe)
            .finish_non_exhaustive()
    }
}

/// Configuration for [`crate::ScrollThreshold`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollThresholdOptions {
    /// The page counts as scrolled once the offset is strictly greater than this.
    pub threshold: u64,
    /// Minimum spacing between evaluations. Events inside the window are coalesced into a single
    /// trailing evaluation.
    pub throttle_ms: u64,
}

impl Default for ScrollThresholdOptions {
    fn default() -> Self {
        Self {
            threshold: 50,
            throttle_ms: 16,
        }
    }
}

impl ScrollThresholdOptions {
    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_throttle_ms(mut self, throttle_ms: u64) -> Self {
        self.throttle_ms = throttle_ms;
        self
    }
}
