//! Single facade over the three entry points: answer a question, assess a
//! clause, suggest a rewrite.

use std::sync::Arc;

use fairclause_core::{AnswerConfig, AssessConfig, ResultEnvelope, Rubric, ToxicityAssessment};

use crate::error::{AssessError, LlmError};
use crate::llm::TextGenerator;
use crate::pipeline::AnswerPipeline;
use crate::retrieval::Retriever;
use crate::suggestion::SuggestionGenerator;
use crate::toxicity::ToxicityScorer;

/// Contract advisor wired to one retriever and two engines.
///
/// `answer_llm` drives the answer loop and its faithfulness checks;
/// `assess_llm` drives clause scoring and suggestions.
pub struct ContractAdvisor {
    pipeline: AnswerPipeline,
    scorer: ToxicityScorer,
    suggester: SuggestionGenerator,
}

impl ContractAdvisor {
    pub fn new(
        retriever: Retriever,
        answer_llm: Arc<dyn TextGenerator>,
        assess_llm: Arc<dyn TextGenerator>,
        answer_config: AnswerConfig,
        assess_config: AssessConfig,
    ) -> Self {
        Self {
            pipeline: AnswerPipeline::new(retriever.clone(), answer_llm, answer_config),
            scorer: ToxicityScorer::new(retriever, assess_llm.clone(), assess_config),
            suggester: SuggestionGenerator::new(assess_llm),
        }
    }

    pub fn with_rubric(mut self, rubric: Rubric) -> Self {
        self.scorer = self.scorer.with_rubric(rubric);
        self
    }

    pub fn rubric(&self) -> &Rubric {
        self.scorer.rubric()
    }

    pub async fn answer_query(&self, query: &str) -> Result<ResultEnvelope, LlmError> {
        self.pipeline.run(query).await
    }

    pub async fn assess_clause(&self, clause: &str) -> Result<ToxicityAssessment, AssessError> {
        self.scorer.assess(clause).await
    }

    pub async fn suggest(&self, assessment: &ToxicityAssessment) -> Result<String, LlmError> {
        self.suggester.suggest(assessment).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::SAFE_CLAUSE_MESSAGE;
    use crate::testing::{ScriptedLlm, StaticSearch, retriever};
    use fairclause_core::NO_CONTEXT_ANSWER;

    #[tokio::test]
    async fn dismissal_notice_question_accepted_first_try() {
        let answer_llm = ScriptedLlm::new(&[
            "사용자는 근로자를 해고하려면 적어도 30일 전에 예고를 하여야 합니다.",
            r#"{"score": 80, "reason": "법령과 일치"}"#,
        ]);
        let assess_llm = ScriptedLlm::new(&[]);
        let advisor = ContractAdvisor::new(
            retriever(&["근로기준법 제26조(해고의 예고)"], &["해고예고수당 관련 판례"]),
            answer_llm.clone(),
            assess_llm.clone(),
            AnswerConfig::default(),
            AssessConfig::default(),
        );

        let env = advisor.answer_query("해고 통보 기간은?").await.unwrap();
        assert_eq!(
            env.answer,
            "사용자는 근로자를 해고하려면 적어도 30일 전에 예고를 하여야 합니다."
        );
        assert_eq!(env.score, 80.0);
        assert!(!env.warning);
        assert_eq!(env.attempts, 1);
        assert_eq!(env.sources.len(), 2);
        assert_eq!(answer_llm.calls(), 2);
        assert_eq!(assess_llm.calls(), 0);
    }

    #[tokio::test]
    async fn empty_index_answers_without_engine() {
        let answer_llm = ScriptedLlm::new(&[]);
        let advisor = ContractAdvisor::new(
            retriever(&[], &[]),
            answer_llm.clone(),
            ScriptedLlm::new(&[]),
            AnswerConfig::default(),
            AssessConfig::default(),
        );

        let env = advisor.answer_query("연차휴가는 며칠인가요?").await.unwrap();
        assert_eq!(env.answer, NO_CONTEXT_ANSWER);
        assert_eq!(env.score, 0.0);
        assert!(env.sources.is_empty());
        assert_eq!(answer_llm.calls(), 0);
    }

    #[tokio::test]
    async fn assess_then_suggest_uses_assess_engine() {
        let answer_llm = ScriptedLlm::new(&[]);
        let assess_llm = ScriptedLlm::new(&[
            r#"{"score": 0.95, "reason": "퇴직금 포기 약정은 무효"}"#,
            "**⚠️ 쉬운 해석**: ...\n**💡 수정 제안**: ...",
        ]);
        let statutes = StaticSearch::new(&["근로자퇴직급여 보장법 제8조"]);
        let precedents = StaticSearch::new(&["퇴직금 포기 무효 판례"]);
        let advisor = ContractAdvisor::new(
            Retriever::new(statutes.clone(), precedents.clone()),
            answer_llm.clone(),
            assess_llm.clone(),
            AnswerConfig::default(),
            AssessConfig::default(),
        );

        let a = advisor.assess_clause("퇴직금을 포기한다").await.unwrap();
        assert!(a.is_toxic);
        assert_eq!(a.risk_score, 9.5);
        assert_eq!(advisor.rubric().band_for(a.risk_score).unwrap().low, 9);

        let text = advisor.suggest(&a).await.unwrap();
        assert!(text.contains("💡 수정 제안"));

        assert_eq!(assess_llm.calls(), 2);
        assert_eq!(answer_llm.calls(), 0);
        assert_eq!(statutes.calls(), 1);
        assert_eq!(precedents.calls(), 1);
    }

    #[tokio::test]
    async fn safe_clause_suggestion_is_fixed() {
        let assess_llm = ScriptedLlm::new(&[r#"{"score": 1.5, "reason": "법정 기준 준수"}"#]);
        let advisor = ContractAdvisor::new(
            retriever(&["근로기준법 제50조"], &[]),
            ScriptedLlm::new(&[]),
            assess_llm.clone(),
            AnswerConfig::default(),
            AssessConfig::default(),
        );

        let a = advisor
            .assess_clause("1주 간의 근로시간은 40시간으로 한다.")
            .await
            .unwrap();
        assert!(!a.is_toxic);
        assert_eq!(advisor.suggest(&a).await.unwrap(), SAFE_CLAUSE_MESSAGE);
        assert_eq!(assess_llm.calls(), 1);
    }
}
