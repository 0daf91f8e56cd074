//! Rubric-graded toxicity scoring of a single employment-contract clause.
//!
//! Higher scores mean more dangerous for the worker. The engine is asked for a
//! 0–10 score, but graders of this kind sometimes answer on a 0–1 scale; the
//! raw value goes through [`normalize_risk_score`] exactly once, before any
//! threshold is applied.

use std::sync::Arc;

use fairclause_core::{AssessConfig, Rubric, ToxicityAssessment};
use serde::Deserialize;
use tracing::info;

use crate::error::AssessError;
use crate::llm::TextGenerator;
use crate::retrieval::Retriever;
use crate::verdict::parse_json_object;

const CRITERIA: &str = "\
당신은 근로자 보호를 최우선으로 하는 '근로계약서 감사관'입니다.
입력된 조항이 [관련 법령/판례]를 위반하거나, 근로자에게 불공정한 '독소조항'인지 평가하세요.

[필수 확인 사항]
1. 퇴직금/주휴수당 포기 각서가 포함되어 있는가? (명백한 불법)
2. '민형사상 이의 제기 금지' 같은 과도한 권리 제한이 있는가?
3. 손해배상액을 미리 정해두었는가? (위약 예정 금지 위반)
4. 해고 예고 없이 즉시 해고가 가능하다고 명시했는가?";

const EVALUATION_STEPS: [&str; 4] = [
    "조항의 핵심 의도(임금 삭감, 해고 용이성, 책임 전가 등)를 파악한다.",
    "[관련 법령]이 제공되지 않았더라도, 당신의 일반적인 법률 지식을 동원하여 위법성을 판단한다.",
    "특히 '퇴직금 포기', '손해배상 예정', '강제 근로' 관련 키워드가 있으면 즉시 최고 위험 점수(10점)를 부여한다.",
    "법적 근거가 확실하지 않으면 근로자에게 불리한 쪽으로 해석하여 점수를 매긴다.",
];

#[derive(Debug, Deserialize)]
struct ScoreVerdict {
    score: f64,
    reason: String,
}

/// Bring a raw grader score onto the 0–10 scale.
///
/// Values `<= 1.0` are read as a 0–1 fraction and scaled by 10; anything else
/// is already on the 0–10 scale. The result is clamped to `0.0..=10.0`.
pub fn normalize_risk_score(raw: f64) -> f64 {
    let scaled = if raw <= 1.0 { raw * 10.0 } else { raw };
    scaled.clamp(0.0, 10.0)
}

fn round_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

pub fn build_assessment_prompt(clause: &str, context: &str, rubric: &Rubric) -> String {
    let steps = EVALUATION_STEPS
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}. {s}", i + 1))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{CRITERIA}\n\
         \n\
         [평가 단계] (순서대로 적용)\n\
         {steps}\n\
         \n\
         [채점 기준] (0~10점, 높을수록 위험)\n\
         {rubric}\n\
         \n\
         [평가 대상 조항]\n\
         {clause}\n\
         \n\
         [관련 법령/판례]\n\
         {context}\n\
         \n\
         결과는 JSON으로만 출력하세요: {{\"score\": 0~10 사이의 점수, \"reason\": \"판단 근거\"}}",
        rubric = rubric.render(),
    )
}

/// Scores one clause per call against statutes and precedent retrieved for it.
pub struct ToxicityScorer {
    retriever: Retriever,
    llm: Arc<dyn TextGenerator>,
    rubric: Rubric,
    config: AssessConfig,
}

impl ToxicityScorer {
    pub fn new(retriever: Retriever, llm: Arc<dyn TextGenerator>, config: AssessConfig) -> Self {
        Self {
            retriever,
            llm,
            rubric: Rubric::toxicity(),
            config,
        }
    }

    pub fn with_rubric(mut self, rubric: Rubric) -> Self {
        self.rubric = rubric;
        self
    }

    pub fn rubric(&self) -> &Rubric {
        &self.rubric
    }

    pub fn config(&self) -> &AssessConfig {
        &self.config
    }

    pub async fn assess(&self, clause: &str) -> Result<ToxicityAssessment, AssessError> {
        let bundle = self
            .retriever
            .retrieve(clause, self.config.statute_k, self.config.precedent_k)
            .await;
        let context = bundle.render_for_assessment();

        let raw = self
            .llm
            .generate(&build_assessment_prompt(clause, &context, &self.rubric))
            .await?;
        let verdict: ScoreVerdict =
            parse_json_object(&raw).map_err(|source| AssessError::MalformedVerdict {
                source,
                raw: raw.chars().take(200).collect(),
            })?;

        let risk = normalize_risk_score(verdict.score);
        let is_toxic = risk >= self.config.toxic_threshold;

        info!(
            raw_score = verdict.score,
            risk_score = risk,
            is_toxic,
            clause = %clause.chars().take(20).collect::<String>(),
            "clause assessed"
        );

        Ok(ToxicityAssessment {
            clause: clause.to_string(),
            is_toxic,
            risk_score: round_one_decimal(risk),
            reason: verdict.reason,
            context_used: context,
        })
    }
}
