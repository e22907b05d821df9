/// A lightweight, serializable snapshot of a [`crate::SectionTracker`].
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackerState<K> {
    /// The currently active section, or `None` when there are no sections.
    pub active: Option<K>,
    /// Position of `active` in the section list, in `[0, 100]`.
    pub progress: f32,
}

impl<K> Default for TrackerState<K> {
    fn default() -> Self {
        Self {
            active: None,
            progress: 0.0,
        }
    }
}

/// A lightweight, serializable snapshot of a [`crate::ScrollThreshold`].
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrolledState {
    pub offset: u64,
    pub is_scrolled: bool,
}
