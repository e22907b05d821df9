use crate::{Easing, Tween};

/// Configuration for [`SmoothScroll`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothScrollOptions {
    pub duration_ms: u64,
    pub easing: Easing,
    /// Added to every scroll target (negative values stop short, e.g. below a fixed header).
    pub offset: i64,
}

impl Default for SmoothScrollOptions {
    fn default() -> Self {
        Self {
            duration_ms: 1200,
            easing: Easing::ExpoOut,
            offset: 0,
        }
    }
}

impl SmoothScrollOptions {
    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }
}

/// Tween-driven programmatic scrolling.
///
/// This type does not touch any scroll container. The adapter calls `tick(now_ms)` once per
/// frame and writes the returned offset to the real container; user scroll input is reported
/// through `on_user_scroll`, which interrupts any running animation.
#[derive(Clone, Debug)]
pub struct SmoothScroll {
    options: SmoothScrollOptions,
    position: u64,
    tween: Option<Tween>,
}

impl SmoothScroll {
    pub fn new(options: SmoothScrollOptions, position: u64) -> Self {
        vdebug!(
            duration_ms = options.duration_ms,
            offset = options.offset,
            "SmoothScroll::new"
        );
        Self {
            options,
            position,
            tween: None,
        }
    }

    pub fn options(&self) -> &SmoothScrollOptions {
        &self.options
    }

    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn target(&self) -> Option<u64> {
        self.tween.map(|t| t.to)
    }

    pub fn cancel(&mut self) {
        self.tween = None;
    }

    fn resolve_target(&self, target: u64) -> u64 {
        target.saturating_add_signed(self.options.offset)
    }

    /// Starts (or retargets) an animation towards `target` plus the configured offset.
    ///
    /// Returns the resolved target offset.
    pub fn scroll_to(&mut self, target: u64, now_ms: u64) -> u64 {
        let to = self.resolve_target(target);
        match &mut self.tween {
            Some(tween) => tween.retarget(now_ms, to, self.options.duration_ms),
            None => {
                self.tween = Some(Tween::new(
                    self.position,
                    to,
                    now_ms,
                    self.options.duration_ms,
                    self.options.easing,
                ));
            }
        }
        vtrace!(from = self.position, to, "SmoothScroll::scroll_to");
        to
    }

    /// Jumps to `target` plus the configured offset without animating.
    pub fn jump_to(&mut self, target: u64) -> u64 {
        self.tween = None;
        self.position = self.resolve_target(target);
        self.position
    }

    /// Records a user-driven scroll position. Cancels any active animation.
    pub fn on_user_scroll(&mut self, position: u64) {
        if self.tween.take().is_some() {
            vtrace!(position, "SmoothScroll: animation interrupted by user scroll");
        }
        self.position = position;
    }

    /// Advances the animation.
    ///
    /// Returns the new offset while animating (including the final frame), `None` when idle.
    pub fn tick(&mut self, now_ms: u64) -> Option<u64> {
        let tween = self.tween?;
        self.position = tween.sample(now_ms);
        if tween.is_done(now_ms) {
            self.tween = None;
        }
        Some(self.position)
    }
}
