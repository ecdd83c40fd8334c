//! Placing a hold on a library book: the book state machine, the placing-on-hold
//! policies and the events they produce, plus the in-process plumbing that wires
//! them together.

pub mod core;
pub mod gateway;
pub mod lending;
pub mod utils;
