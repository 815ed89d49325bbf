//! Fathom Search: lazy, batched state-space search over a pluggable frontier.
//!
//! Callers supply the candidate type, the expansion rule, and the frontier.
//! The engines here supply only the iteration discipline. Nothing is
//! computed until a consumer pulls.
//!
//! # Crate dependency graph
//!
//! ```text
//! fathom_frontier  ←  fathom_search  ←  fathom_harness
//! (frontier trait,     (engines,          (worlds, runner,
//!  stock strategies)    expansion)         transcripts)
//! ```
//!
//! # Key types
//!
//! - [`batch::BatchSearch`]: fluent builder for the concurrent, batched engine
//! - [`batch::Rounds`]: the round driver; yields batches or flattened candidates
//! - [`sequential::Search`]: one-candidate-at-a-time synchronous sibling
//! - [`expansion::Space`]: expansion rule trait (blanket impl for async closures)
//! - [`expansion::IntoSuccessors`]: normalization of rule output shapes
//! - [`policy::SearchPolicy`]: serializable `cores` / `max_frontier` configuration
//! - [`error::SearchError`] / [`error::ConfigError`]: runtime and pre-flight failures
//!
//! # Unbounded growth
//!
//! Without a frontier cap the pending set may grow without limit. Bound it
//! with `via(frontier, Some(max))`, an expansion rule that eventually
//! returns no successors, or by consuming only a prefix of the output.

#![forbid(unsafe_code)]

pub mod batch;
pub mod error;
pub mod expansion;
pub mod policy;
pub mod sequential;
