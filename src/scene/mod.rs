//! Retained visual scenes, one per diagram container.

pub mod model;
