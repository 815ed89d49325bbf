//! Expansion rules and successor normalization.
//!
//! An expansion rule maps one candidate to zero or more successors. Rules
//! are async and may return several shapes (a `Vec`, an `Option`, a
//! `Result`, or a lazily produced stream). Every shape is normalized into
//! [`Successors`] and then resolved into one finite `Vec` before the engine
//! concatenates a batch's results.

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};

use futures::future::{self, BoxFuture, FutureExt};
use futures::stream::{BoxStream, Stream, StreamExt, TryStreamExt};

/// Why one candidate's expansion failed.
#[derive(Debug, thiserror::Error)]
pub enum ExpandFailure {
    /// The expansion rule reported an error.
    #[error("expansion rule failed: {0}")]
    Rule(#[source] anyhow::Error),
    /// A lazily produced successor sequence failed while being resolved.
    #[error("resolving successors failed: {0}")]
    Resolve(#[source] anyhow::Error),
    /// The expansion rule panicked.
    #[error("expansion rule panicked: {message}")]
    Panicked { message: String },
}

impl ExpandFailure {
    fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::Panicked { message }
    }
}

/// Normalized successor collection.
pub enum Successors<T> {
    /// Successors already materialized.
    Collected(Vec<T>),
    /// Successors produced lazily; any item may fail.
    Lazy(BoxStream<'static, anyhow::Result<T>>),
}

impl<T> Successors<T> {
    /// No successors.
    #[must_use]
    pub fn none() -> Self {
        Self::Collected(Vec::new())
    }

    /// Wrap a lazily produced, fallible successor stream.
    ///
    /// The stream must be finite; the engine drains it before merging.
    pub fn lazy<S>(stream: S) -> Self
    where
        S: Stream<Item = anyhow::Result<T>> + Send + 'static,
    {
        Self::Lazy(stream.boxed())
    }

    /// Resolve to one concrete, finite collection.
    ///
    /// # Errors
    ///
    /// Returns [`ExpandFailure::Resolve`] if a lazy stream yields an error.
    pub async fn resolve(self) -> Result<Vec<T>, ExpandFailure> {
        match self {
            Self::Collected(items) => Ok(items),
            Self::Lazy(stream) => stream.try_collect().await.map_err(ExpandFailure::Resolve),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Successors<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collected(items) => f.debug_tuple("Collected").field(items).finish(),
            Self::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

/// Conversion from an expansion rule's output into [`Successors`].
pub trait IntoSuccessors<T> {
    /// Normalize `self`.
    ///
    /// # Errors
    ///
    /// Returns [`ExpandFailure::Rule`] when `self` encodes a rule failure.
    fn into_successors(self) -> Result<Successors<T>, ExpandFailure>;
}

impl<T> IntoSuccessors<T> for Successors<T> {
    fn into_successors(self) -> Result<Successors<T>, ExpandFailure> {
        Ok(self)
    }
}

impl<T> IntoSuccessors<T> for Vec<T> {
    fn into_successors(self) -> Result<Successors<T>, ExpandFailure> {
        Ok(Successors::Collected(self))
    }
}

impl<T, const N: usize> IntoSuccessors<T> for [T; N] {
    fn into_successors(self) -> Result<Successors<T>, ExpandFailure> {
        Ok(Successors::Collected(Vec::from(self)))
    }
}

/// `None` means "no successors".
impl<T, C: IntoSuccessors<T>> IntoSuccessors<T> for Option<C> {
    fn into_successors(self) -> Result<Successors<T>, ExpandFailure> {
        match self {
            Some(inner) => inner.into_successors(),
            None => Ok(Successors::none()),
        }
    }
}

impl<T, C, E> IntoSuccessors<T> for Result<C, E>
where
    C: IntoSuccessors<T>,
    E: Into<anyhow::Error>,
{
    fn into_successors(self) -> Result<Successors<T>, ExpandFailure> {
        self.map_err(|e| ExpandFailure::Rule(e.into()))?
            .into_successors()
    }
}

/// An expansion rule: candidate → future of successors.
///
/// Implementations may be invoked concurrently on different candidates and
/// must never touch the frontier. Any `Fn(T) -> impl Future` closure whose
/// output implements [`IntoSuccessors`] is a `Space`.
pub trait Space<T>: Send + Sync {
    /// Start expanding `candidate`.
    fn expand(&self, candidate: T) -> BoxFuture<'static, Result<Successors<T>, ExpandFailure>>;
}

impl<T, F, Fut, R> Space<T> for F
where
    T: Send + 'static,
    F: Fn(T) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoSuccessors<T> + Send + 'static,
{
    fn expand(&self, candidate: T) -> BoxFuture<'static, Result<Successors<T>, ExpandFailure>> {
        let pending = (self)(candidate);
        async move { pending.await.into_successors() }.boxed()
    }
}

/// Drive a fallible future to completion, converting a panic into
/// [`ExpandFailure::Panicked`].
pub(crate) async fn settle<V>(
    pending: BoxFuture<'static, Result<V, ExpandFailure>>,
) -> Result<V, ExpandFailure> {
    AssertUnwindSafe(pending)
        .catch_unwind()
        .await
        .unwrap_or_else(|payload| Err(ExpandFailure::from_panic(&*payload)))
}

/// Expand and fully resolve one candidate, catching panics raised either
/// while the rule builds its future or while that future runs.
pub(crate) fn expand_guarded<T: Send + 'static>(
    space: &dyn Space<T>,
    candidate: T,
) -> BoxFuture<'static, Result<Vec<T>, ExpandFailure>> {
    match catch_unwind(AssertUnwindSafe(|| space.expand(candidate))) {
        Ok(pending) => settle(async move { pending.await?.resolve().await }.boxed()).boxed(),
        Err(payload) => future::ready(Err(ExpandFailure::from_panic(&*payload))).boxed(),
    }
}
