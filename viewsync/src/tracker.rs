use alloc::vec::Vec;

use crate::{TrackerOptions, TrackerState, VisibilityEntry};

/// Scroll-synchronized "which section is on screen" tracker.
///
/// The tracker is headless: it never observes anything itself. The host feeds it batches of
/// [`VisibilityEntry`] (typically from an intersection observer registered through
/// [`crate::ObserverRegistry`]) and reads back the active section and a progress value in
/// `[0, 100]`.
///
/// Selection rules for a batch:
/// - only intersecting entries with a positive ratio whose id is a known section are considered,
/// - the greatest ratio wins; equal ratios resolve to the section listed first,
/// - the winner becomes active only if its ratio reaches `activation_threshold`; otherwise the
///   previous state is kept.
#[derive(Clone, Debug)]
pub struct SectionTracker<K> {
    options: TrackerOptions<K>,
    sections: Vec<K>,
    active: Option<K>,
    progress: f32,
    activated: bool,
    disposed: bool,
}

impl<K: Clone + PartialEq> SectionTracker<K> {
    /// Creates a tracker over an ordered section list.
    ///
    /// The first section starts out active with a progress of 0; nothing has been observed yet.
    pub fn new(sections: Vec<K>, options: TrackerOptions<K>) -> Self {
        vdebug!(
            sections = sections.len(),
            activation_threshold = options.activation_threshold,
            "SectionTracker::new"
        );
        let active = sections.first().cloned();
        Self {
            options,
            sections,
            active,
            progress: 0.0,
            activated: false,
            disposed: false,
        }
    }

    pub fn options(&self) -> &TrackerOptions<K> {
        &self.options
    }

    pub fn sections(&self) -> &[K] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn index_of(&self, id: &K) -> Option<usize> {
        self.sections.iter().position(|s| s == id)
    }

    pub fn contains(&self, id: &K) -> bool {
        self.index_of(id).is_some()
    }

    pub fn active(&self) -> Option<&K> {
        self.active.as_ref()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active.as_ref().and_then(|id| self.index_of(id))
    }

    pub fn is_active(&self, id: &K) -> bool {
        self.active.as_ref() == Some(id)
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Returns a snapshot of the published state.
    pub fn state(&self) -> TrackerState<K> {
        TrackerState {
            active: self.active.clone(),
            progress: self.progress,
        }
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Stops the tracker. Later batches are ignored and the last published state is retained.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        vdebug!("SectionTracker::dispose");
        self.disposed = true;
    }

    pub fn set_activation_threshold(&mut self, threshold: f32) {
        self.options.activation_threshold = threshold.clamp(0.0, 1.0);
    }

    /// Progress value for the section at `index`: `(index + 1) / count * 100`.
    pub fn progress_at(&self, index: usize) -> f32 {
        let count = self.sections.len();
        if count == 0 {
            return 0.0;
        }
        let pos = index.min(count - 1) + 1;
        pos as f32 / count as f32 * 100.0
    }

    /// Picks the entry that would win this batch, ignoring the activation threshold.
    ///
    /// Returns the section index and its ratio.
    pub fn most_visible(&self, entries: &[VisibilityEntry<K>]) -> Option<(usize, f32)> {
        let mut best: Option<(usize, f32)> = None;
        for entry in entries {
            if !entry.is_intersecting || !entry.ratio.is_finite() || entry.ratio <= 0.0 {
                continue;
            }
            let Some(index) = self.index_of(&entry.id) else {
                vtrace!("SectionTracker: ignoring entry for unknown section");
                continue;
            };
            let ratio = entry.ratio.min(1.0);
            let better = match best {
                None => true,
                Some((best_index, best_ratio)) => {
                    ratio > best_ratio || (ratio == best_ratio && index < best_index)
                }
            };
            if better {
                best = Some((index, ratio));
            }
        }
        best
    }

    /// Applies one visibility batch.
    ///
    /// Returns `true` when the active section changed.
    pub fn apply_batch(&mut self, entries: &[VisibilityEntry<K>]) -> bool {
        if self.disposed {
            vtrace!("SectionTracker: batch after dispose ignored");
            return false;
        }
        let Some((index, ratio)) = self.most_visible(entries) else {
            return false;
        };
        if ratio < self.options.activation_threshold {
            return false;
        }
        self.activate_index(index)
    }

    fn activate_index(&mut self, index: usize) -> bool {
        let id = self.sections[index].clone();
        let changed = self.active.as_ref() != Some(&id);
        self.active = Some(id);
        self.progress = self.progress_at(index);
        self.activated = true;
        if changed {
            vtrace!(index, progress = self.progress, "SectionTracker: active section changed");
            self.notify();
        }
        changed
    }

    /// Replaces the ordered section list.
    ///
    /// When the active section is still present its progress is recomputed against the new
    /// order; otherwise the tracker falls back to its initial state (first section, progress 0).
    pub fn set_sections(&mut self, sections: Vec<K>) {
        if self.disposed {
            return;
        }
        self.sections = sections;
        match self.active_index() {
            Some(index) if self.activated => {
                self.progress = self.progress_at(index);
            }
            Some(_) => {}
            None => {
                self.active = self.sections.first().cloned();
                self.progress = 0.0;
                self.activated = false;
                self.notify();
            }
        }
    }

    fn notify(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }
}
