//! Landmark tracking for the scroll position.

pub mod trigger;
