//! Single-shot grounded answer generation.

use std::sync::Arc;

use crate::error::LlmError;
use crate::llm::TextGenerator;

const SYSTEM_DIRECTIVE: &str =
    "당신은 대한민국 법률 AI입니다. 반드시 [참고 자료]에 기반하여 답변하세요.";

/// Build the answer prompt: directive, grounding block, question and, when
/// given, a revision instruction carrying evaluator feedback.
pub fn build_answer_prompt(query: &str, context: &str, feedback: Option<&str>) -> String {
    let mut prompt = format!("{SYSTEM_DIRECTIVE}\n\n[참고 자료]\n{context}\n\n[질문]\n{query}");
    if let Some(feedback) = feedback.filter(|f| !f.trim().is_empty()) {
        prompt.push_str("\n\n[수정 지시]\n");
        prompt.push_str(feedback);
    }
    prompt
}

/// Wraps one reasoning-engine call per answer. No retries here.
#[derive(Clone)]
pub struct AnswerGenerator {
    llm: Arc<dyn TextGenerator>,
}

impl AnswerGenerator {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    pub async fn generate(
        &self,
        query: &str,
        context: &str,
        feedback: Option<&str>,
    ) -> Result<String, LlmError> {
        self.llm
            .generate(&build_answer_prompt(query, context, feedback))
            .await
    }
}
