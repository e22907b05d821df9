use core::fmt;

/// One visibility report for a tracked region, as delivered by the host's intersection
/// observation mechanism.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityEntry<K> {
    pub id: K,
    pub is_intersecting: bool,
    /// Fraction of the region inside the (margin-adjusted) viewport, in `[0, 1]`.
    pub ratio: f32,
}

impl<K> VisibilityEntry<K> {
    pub fn new(id: K, is_intersecting: bool, ratio: f32) -> Self {
        Self {
            id,
            is_intersecting,
            ratio,
        }
    }

    /// An intersecting entry with the given ratio.
    pub fn visible(id: K, ratio: f32) -> Self {
        Self::new(id, true, ratio)
    }

    /// A non-intersecting entry (ratio 0).
    pub fn hidden(id: K) -> Self {
        Self::new(id, false, 0.0)
    }
}

/// A single edge offset of a [`RootMargin`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Inset {
    /// Offset in pixels. Negative values shrink the observed viewport.
    Px(i32),
    /// Offset as a percentage of the viewport's size on that axis.
    Percent(i32),
}

impl Default for Inset {
    fn default() -> Self {
        Self::Px(0)
    }
}

impl fmt::Display for Inset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(v) => write!(f, "{v}px"),
            Self::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// Offsets applied to the viewport edges before intersection ratios are computed.
///
/// Formats the way DOM-style observers expect (`"top right bottom left"`), e.g.
/// `"0px 0px -10% 0px"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RootMargin {
    pub top: Inset,
    pub right: Inset,
    pub bottom: Inset,
    pub left: Inset,
}

impl RootMargin {
    pub fn new(top: Inset, right: Inset, bottom: Inset, left: Inset) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Only the bottom edge is offset; the common "activate a bit before the fold" setup.
    pub fn bottom(bottom: Inset) -> Self {
        Self {
            bottom,
            ..Self::default()
        }
    }
}

impl fmt::Display for RootMargin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}
