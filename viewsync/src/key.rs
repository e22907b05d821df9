#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

/// Identity of a tracked section.
///
/// Blanket-implemented for every `Clone` key that can live in the registry map (`Hash + Eq` with
/// `std`, `Ord` without).
#[cfg(feature = "std")]
pub trait SectionKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> SectionKey for K {}

#[cfg(not(feature = "std"))]
pub trait SectionKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> SectionKey for K {}
