//! Ids, virtual time, geometry primitives and the error type.

pub mod core;
pub mod error;
pub mod ids;
