//! Retrieval-augmented answer loop with a bounded faithfulness-repair cycle.
//!
//! ```text
//! START → RETRIEVE ─┬─ nothing found ─→ NO_CONTEXT_EXIT
//!                   └─→ GENERATE → EVALUATE ─┬─ score ≥ target ──────────→ ACCEPT
//!                          ↑                 ├─ attempt < max_retries ──→ RETRY ─┐
//!                          └─────────────────┼───────────────────────────────────┘
//!                                            └─ budget spent ───────────→ EXHAUSTED_EXIT
//! ```
//!
//! The decision after each attempt is the pure function [`next_step`]; the
//! loop only threads a [`LoopState`] value through it.

use std::sync::Arc;

use fairclause_core::{AnswerConfig, GenerationAttempt, ResultEnvelope};
use tracing::{info, warn};

use crate::answer::AnswerGenerator;
use crate::error::LlmError;
use crate::faithfulness::FaithfulnessEvaluator;
use crate::llm::TextGenerator;
use crate::retrieval::Retriever;

/// What the next attempt starts from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoopState {
    pub attempt: u32,
    pub feedback: Option<String>,
}

/// Transition chosen after an attempt has been evaluated.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Accept,
    Retry(LoopState),
    Exhausted,
}

/// Revision instruction for the next attempt.
pub fn feedback_text(score: f64, reason: &str) -> String {
    format!("점수 미달({score}점). 이유: {reason}. 근거 자료에만 기반하여 다시 작성하세요.")
}

/// Low-confidence banner prepended to an answer that never reached the target.
pub fn warning_banner(score: f64) -> String {
    format!("[주의: 근거 불충분 (신뢰도: {score}%)]")
}

pub fn next_step(attempt: &GenerationAttempt, config: &AnswerConfig) -> Step {
    if attempt.score >= config.target_score {
        Step::Accept
    } else if attempt.index < config.max_retries {
        Step::Retry(LoopState {
            attempt: attempt.index + 1,
            feedback: Some(feedback_text(attempt.score, &attempt.reason)),
        })
    } else {
        Step::Exhausted
    }
}

/// Drives retrieval, generation and faithfulness evaluation for one query.
pub struct AnswerPipeline {
    retriever: Retriever,
    generator: AnswerGenerator,
    evaluator: FaithfulnessEvaluator,
    config: AnswerConfig,
}

impl AnswerPipeline {
    pub fn new(retriever: Retriever, llm: Arc<dyn TextGenerator>, config: AnswerConfig) -> Self {
        Self {
            retriever,
            generator: AnswerGenerator::new(llm.clone()),
            evaluator: FaithfulnessEvaluator::new(llm),
            config,
        }
    }

    pub fn config(&self) -> &AnswerConfig {
        &self.config
    }

    /// Answer `query` from retrieved statutes and precedents.
    ///
    /// Makes at most `max_retries + 1` generation calls and as many evaluation
    /// calls. Only a failing generation call is an error.
    pub async fn run(&self, query: &str) -> Result<ResultEnvelope, LlmError> {
        info!(query = %query, "answer pipeline start");

        let bundle = self
            .retriever
            .retrieve(query, self.config.statute_k, self.config.precedent_k)
            .await;
        if bundle.is_empty() {
            info!("no statutes or precedents retrieved, skipping generation");
            return Ok(ResultEnvelope::no_context());
        }

        let context = bundle.render();
        let mut state = LoopState::default();

        let (last, exhausted) = loop {
            let attempt = self.attempt(query, &context, state).await?;
            match next_step(&attempt, &self.config) {
                Step::Accept => break (attempt, false),
                Step::Exhausted => break (attempt, true),
                Step::Retry(next) => state = next,
            }
        };

        let answer = if exhausted {
            warn!(
                score = last.score,
                attempts = last.index + 1,
                "retry budget exhausted below target"
            );
            format!("{}\n{}", warning_banner(last.score), last.answer)
        } else {
            info!(score = last.score, attempt = last.index, "answer accepted");
            last.answer
        };

        Ok(ResultEnvelope {
            answer,
            sources: bundle.sources(),
            score: last.score,
            warning: exhausted,
            attempts: last.index + 1,
        })
    }

    async fn attempt(
        &self,
        query: &str,
        context: &str,
        state: LoopState,
    ) -> Result<GenerationAttempt, LlmError> {
        info!(attempt = state.attempt, "generating answer");
        let answer = self
            .generator
            .generate(query, context, state.feedback.as_deref())
            .await?;

        let verdict = self.evaluator.evaluate(query, &answer, context).await;
        info!(
            attempt = state.attempt,
            score = verdict.score,
            reason = %verdict.reason,
            "faithfulness evaluated"
        );

        Ok(GenerationAttempt {
            index: state.attempt,
            feedback: state.feedback,
            answer,
            score: verdict.score,
            reason: verdict.reason,
        })
    }
}
