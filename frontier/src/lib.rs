//! Fathom Frontier: pluggable containers of pending search candidates.
//!
//! A frontier decides exploration order. Search engines in `fathom_search`
//! only insert, select, truncate, and clear; they never look at candidates.
//!
//! # Key types
//!
//! - [`contract::Frontier`]: the capability trait every strategy implements
//! - [`fifo::FifoFrontier`]: breadth-first (insertion order)
//! - [`lifo::LifoFrontier`]: depth-first (reverse insertion order)
//! - [`ranked::RankedFrontier`]: best-first by a caller-supplied key

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod fifo;
pub mod lifo;
pub mod ranked;
