//! Tunable parameters for the answer loop and the clause scorer.
//!
//! The thresholds are empirically chosen defaults, not invariants; callers may
//! override every field.

use serde::{Deserialize, Serialize};

/// Parameters of the retrieval-augmented answer loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnswerConfig {
    /// Statute snippets retrieved per query.
    pub statute_k: usize,
    /// Precedent snippets retrieved per query.
    pub precedent_k: usize,
    /// Faithfulness score (0–100) at which an answer is accepted.
    pub target_score: f64,
    /// Extra attempts allowed after the first; total attempts = `max_retries + 1`.
    pub max_retries: u32,
}

impl Default for AnswerConfig {
    fn default() -> Self {
        Self {
            statute_k: 2,
            precedent_k: 2,
            target_score: 75.0,
            max_retries: 2,
        }
    }
}

impl AnswerConfig {
    /// Upper bound on generation (and evaluation) calls per query.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Parameters of the clause toxicity scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssessConfig {
    pub statute_k: usize,
    pub precedent_k: usize,
    /// Normalized 0–10 score at or above which a clause is toxic.
    pub toxic_threshold: f64,
}

impl Default for AssessConfig {
    fn default() -> Self {
        Self {
            statute_k: 2,
            precedent_k: 1,
            toxic_threshold: 4.0,
        }
    }
}
