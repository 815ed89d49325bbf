//! World implementations for the harness runner.

pub mod counter;
pub mod faulty;
pub mod jitter;
pub mod words;
