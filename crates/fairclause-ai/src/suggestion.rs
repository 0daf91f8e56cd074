//! Plain-language explanation and rewrite for a clause judged toxic.

use std::sync::Arc;

use fairclause_core::ToxicityAssessment;
use tracing::debug;

use crate::error::LlmError;
use crate::llm::TextGenerator;

/// Returned without an engine call when the clause is not toxic.
pub const SAFE_CLAUSE_MESSAGE: &str = "✅ **안전한 조항입니다.**";

pub fn build_suggestion_prompt(assessment: &ToxicityAssessment) -> String {
    format!(
        "당신은 근로자 편인 법률 전문가입니다. 다음 독소조항을 분석하세요.\n\
         \n\
         [원문]: {clause}\n\
         [이유]: {reason}\n\
         [근거]: {context}\n\
         \n\
         다음 두 가지를 마크다운으로 작성:\n\
         1. **⚠️ 쉬운 해석**: 초등학생도 이해하게 2문장 요약.\n\
         2. **💡 수정 제안**: 법에 맞는 공정한 조항 예시.",
        clause = assessment.clause,
        reason = assessment.reason,
        context = assessment.context_used,
    )
}

pub struct SuggestionGenerator {
    llm: Arc<dyn TextGenerator>,
}

impl SuggestionGenerator {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    /// One engine call for a toxic clause; the reply is returned untouched.
    pub async fn suggest(&self, assessment: &ToxicityAssessment) -> Result<String, LlmError> {
        if !assessment.is_toxic {
            return Ok(SAFE_CLAUSE_MESSAGE.to_string());
        }
        debug!(risk_score = assessment.risk_score, "requesting clause rewrite");
        self.llm.generate(&build_suggestion_prompt(assessment)).await
    }
}
