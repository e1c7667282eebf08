//! Step registry, per-section step state and the host view contract.

pub mod registry;
pub mod sequencer;
pub mod view;
