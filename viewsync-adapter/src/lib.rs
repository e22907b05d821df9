//! Adapter utilities for the `viewsync` crate.
//!
//! The `viewsync` crate is UI-agnostic and focuses on the core state machines. This crate
//! provides small, framework-neutral helpers commonly needed by adapters:
//!
//! - Tween-based smooth scrolling (adapter-driven, with an exponential ease-out default)
//! - A per-view [`SectionController`] tying visibility observation, section tracking and smooth
//!   scrolling to one lifetime
//!
//! This crate is intentionally framework-agnostic (no DOM/egui/ratatui bindings).
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod controller;
mod smooth;
mod tween;


pub use controller::SectionController;
pub use smooth::{SmoothScroll, SmoothScrollOptions};
pub use tween::{Easing, Tween};
