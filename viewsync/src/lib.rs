//! Headless viewport-driven state synchronization.
//!
//! For adapter-level utilities (smooth scrolling, a controller tying observation to the
//! tracker), see the `viewsync-adapter` crate.
//!
//! This crate holds the pure state machines behind scroll-synchronized UIs:
//! - [`SectionTracker`]: picks the most visible section from intersection batches and publishes
//!   an active id plus a progress value,
//! - [`ObserverRegistry`]: idempotent (un)registration of regions with an injected
//!   [`VisibilityObserver`],
//! - [`ScrollThreshold`]: throttled "scrolled past N" detection.
//!
//! It is UI-agnostic. A TUI/GUI/DOM layer is expected to provide:
//! - visibility batches (id, intersecting, ratio)
//! - scroll offsets and timestamps
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod key;
mod observer;
mod options;
mod scrolled;
mod state;
mod tracker;
mod types;


pub use observer::{ObserverRegistry, Subscription, VisibilityObserver};
pub use options::{
    ObserveOptions, OnActiveChangeCallback, ScrollThresholdOptions, TrackerOptions,
};
pub use scrolled::ScrollThreshold;
pub use state::{ScrolledState, TrackerState};
pub use tracker::SectionTracker;
pub use types::{Inset, RootMargin, VisibilityEntry};

#[doc(hidden)]
pub use key::SectionKey;
