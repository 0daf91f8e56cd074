//! Self-check of an answer against its grounding block.
//!
//! The evaluator never fails: engine errors and unreadable output both collapse
//! to a neutral [`FaithfulnessVerdict::fallback`] so the answer loop always has
//! a score to act on.

use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;

use crate::llm::TextGenerator;
use crate::verdict::parse_json_object;

pub const FALLBACK_SCORE: f64 = 50.0;
pub const FALLBACK_REASON: &str = "Evaluation Error";

/// Faithfulness score (0–100) with the evaluator's justification.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FaithfulnessVerdict {
    #[serde(default)]
    pub score: f64,
    #[serde(default = "default_reason")]
    pub reason: String,
}

fn default_reason() -> String {
    "평가 불가".to_string()
}

impl FaithfulnessVerdict {
    pub fn fallback() -> Self {
        Self {
            score: FALLBACK_SCORE,
            reason: FALLBACK_REASON.to_string(),
        }
    }
}

pub fn build_faithfulness_prompt(query: &str, answer: &str, context: &str) -> String {
    format!(
        "당신은 Fact Checker입니다. [참고 자료]를 바탕으로 [AI 답변]이 사실에 부합하는지 0~100점으로 평가하세요.\n\
         질문에 얼마나 잘 답했는지가 아니라, 답변의 내용이 [참고 자료]로 뒷받침되는 정도만 평가합니다.\n\
         결과는 JSON으로만 출력하세요: {{\"score\": 85, \"reason\": \"...\"}}\n\
         \n\
         [참고 자료]\n\
         {context}\n\
         [질문]\n\
         {query}\n\
         [AI 답변]\n\
         {answer}"
    )
}

/// Parse a verdict from raw model output, falling back on any failure.
pub fn parse_faithfulness(text: &str) -> FaithfulnessVerdict {
    match parse_json_object::<FaithfulnessVerdict>(text) {
        Ok(mut verdict) => {
            verdict.score = verdict.score.clamp(0.0, 100.0);
            verdict
        }
        Err(e) => {
            warn!(error = %e, "unreadable faithfulness verdict");
            FaithfulnessVerdict::fallback()
        }
    }
}

#[derive(Clone)]
pub struct FaithfulnessEvaluator {
    llm: Arc<dyn TextGenerator>,
}

impl FaithfulnessEvaluator {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    pub async fn evaluate(&self, query: &str, answer: &str, context: &str) -> FaithfulnessVerdict {
        let prompt = build_faithfulness_prompt(query, answer, context);
        match self.llm.generate(&prompt).await {
            Ok(text) => parse_faithfulness(&text),
            Err(e) => {
                warn!(error = %e, "faithfulness evaluation call failed");
                FaithfulnessVerdict::fallback()
            }
        }
    }
}
