//! Page session: configuration, host inputs and the state machine wiring every module.

pub mod config;
pub mod input;
pub mod story;
