//! Timed reveal plans and the virtual-clock animator that runs them.

pub mod animator;
pub mod ease;
pub mod reveal;
pub mod timer;
