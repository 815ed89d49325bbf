//! Fathom Harness: reference worlds and a recording runner for the engines.
//!
//! The harness drives [`fathom_search::batch::Rounds`] over a world and
//! packages what it observed as a [`transcript::Transcript`]: every batch,
//! the engine counters, and how the run ended. Transcripts carry `sha256:`
//! digests so determinism can be checked across runs, processes, and
//! concurrency limits.
//!
//! The harness does NOT implement search logic; it delegates to the engine.
//! Worlds provide candidates and expansion rules only.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod runner;
pub mod transcript;
pub mod worlds;
