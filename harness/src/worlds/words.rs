//! `Words`: every word over an alphabet up to a fixed length.

use futures::future::{self, BoxFuture, FutureExt};

use crate::contract::SearchWorld;

/// Word-building world. Starts from the empty word; each word shorter than
/// `length` extends by one letter per alphabet symbol, in alphabet order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Words {
    pub alphabet: Vec<char>,
    pub length: usize,
}

impl Words {
    #[must_use]
    pub fn new(alphabet: &str, length: usize) -> Self {
        Self {
            alphabet: alphabet.chars().collect(),
            length,
        }
    }

    #[must_use]
    pub fn successors(&self, word: &str) -> Vec<String> {
        if word.chars().count() >= self.length {
            return Vec::new();
        }
        self.alphabet
            .iter()
            .map(|letter| format!("{word}{letter}"))
            .collect()
    }
}

impl SearchWorld for Words {
    type Candidate = String;

    fn world_id(&self) -> &str {
        "words"
    }

    fn start(&self) -> Vec<String> {
        vec![String::new()]
    }

    fn expand(&self, candidate: &String) -> BoxFuture<'static, anyhow::Result<Vec<String>>> {
        future::ready(Ok(self.successors(candidate))).boxed()
    }

    /// Shorter words first.
    fn rank(&self, candidate: &String) -> i64 {
        i64::try_from(candidate.chars().count()).unwrap_or(i64::MAX)
    }
}
