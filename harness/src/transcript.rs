//! Search transcripts: the recorded batches, stats, and outcome of one run.
//!
//! A transcript is persisted as `transcript.json` next to
//! `transcript_digest.txt`, which holds `sha256:<hex>` of the exact JSON
//! bytes. Reading verifies the digest before parsing, so a tampered or
//! truncated transcript is rejected rather than silently loaded.
//!
//! [`Transcript::sequence_digest`] hashes only the flattened candidate
//! sequence. Two runs that emit the same candidates in the same order agree
//! on it even when their batch boundaries differ (different `cores`).

use std::fs;
use std::io;
use std::path::Path;

use fathom_search::batch::SearchStats;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::runner::FrontierKind;

/// File name of the transcript body.
pub const TRANSCRIPT_FILE: &str = "transcript.json";
/// File name of the body's digest.
pub const DIGEST_FILE: &str = "transcript_digest.txt";

/// How a recorded run ended.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outcome {
    /// The frontier emptied.
    Exhausted,
    /// The consumer stopped after `candidate_limit` candidates.
    LimitReached,
    /// A round failed; nothing from the failing batch was recorded.
    Failed {
        /// Failing round, absent when resolving the start failed.
        round: Option<u64>,
        /// Size of the rejected batch.
        batch_len: usize,
        detail: String,
    },
}

/// One recorded search run.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transcript {
    pub world_id: String,
    pub frontier: FrontierKind,
    pub cores: usize,
    pub max_frontier: Option<usize>,
    pub candidate_limit: Option<usize>,
    /// Emitted batches in emission order.
    pub batches: Vec<Vec<Value>>,
    pub stats: SearchStats,
    pub outcome: Outcome,
}

/// Error reading or writing a persisted transcript.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("transcript I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("transcript JSON invalid: {0}")]
    Json(#[from] serde_json::Error),
    #[error("transcript digest mismatch: recorded {recorded}, computed {computed}")]
    DigestMismatch { recorded: String, computed: String },
}

impl Transcript {
    /// Flattened candidate sequence, truncated to `candidate_limit`.
    ///
    /// The last batch of a limited run may overshoot the limit; the overshoot
    /// is not part of the sequence.
    #[must_use]
    pub fn sequence(&self) -> Vec<Value> {
        let flat = self.batches.iter().flatten().cloned();
        match self.candidate_limit {
            Some(limit) => flat.take(limit).collect(),
            None => flat.collect(),
        }
    }

    /// Digest of the flattened sequence only.
    ///
    /// # Errors
    ///
    /// Returns [`TranscriptError::Json`] if serialization fails.
    pub fn sequence_digest(&self) -> Result<String, TranscriptError> {
        Ok(sha256_tag(&serde_json::to_vec(&self.sequence())?))
    }

    /// Digest of the whole transcript as persisted.
    ///
    /// # Errors
    ///
    /// Returns [`TranscriptError::Json`] if serialization fails.
    pub fn digest(&self) -> Result<String, TranscriptError> {
        Ok(sha256_tag(&self.to_bytes()?))
    }

    fn to_bytes(&self) -> Result<Vec<u8>, TranscriptError> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}

fn sha256_tag(bytes: &[u8]) -> String {
    format!("sha256:{}", hex::encode(Sha256::digest(bytes)))
}

/// Write `transcript.json` and `transcript_digest.txt` into `dir`.
///
/// The directory is created if missing. Returns the digest written.
///
/// # Errors
///
/// Returns [`TranscriptError`] on I/O or serialization failure.
pub fn write_transcript(transcript: &Transcript, dir: &Path) -> Result<String, TranscriptError> {
    fs::create_dir_all(dir)?;
    let bytes = transcript.to_bytes()?;
    let digest = sha256_tag(&bytes);
    fs::write(dir.join(TRANSCRIPT_FILE), &bytes)?;
    fs::write(dir.join(DIGEST_FILE), format!("{digest}\n"))?;
    tracing::debug!(dir = %dir.display(), %digest, "transcript written");
    Ok(digest)
}

/// Read a transcript from `dir`, verifying its digest first.
///
/// # Errors
///
/// Returns [`TranscriptError::DigestMismatch`] if the body does not hash to
/// the recorded digest, or other variants on I/O or parse failure.
pub fn read_transcript(dir: &Path) -> Result<Transcript, TranscriptError> {
    let bytes = fs::read(dir.join(TRANSCRIPT_FILE))?;
    let recorded = fs::read_to_string(dir.join(DIGEST_FILE))?.trim().to_string();
    let computed = sha256_tag(&bytes);
    if recorded != computed {
        return Err(TranscriptError::DigestMismatch { recorded, computed });
    }
    Ok(serde_json::from_slice(&bytes)?)
}
