//! Value types exchanged between retrieval, answer generation and clause scoring.
//!
//! Everything here is created and consumed within a single invocation; nothing
//! is persisted.

use serde::{Deserialize, Serialize};

/// Answer returned when neither statute nor precedent retrieval found anything.
pub const NO_CONTEXT_ANSWER: &str = "관련된 법령이나 판례 정보를 찾을 수 없습니다.";

/// Which corpus a snippet was retrieved from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Statute,
    Precedent,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Statute => "statute",
            Self::Precedent => "precedent",
        }
    }

    /// Section label used in grounding blocks (`=== [관련 법령] ===`).
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Statute => "관련 법령",
            Self::Precedent => "관련 판례",
        }
    }
}

/// One unit of grounding evidence, in retrieval order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievedSnippet {
    pub text: String,
    pub source: SourceKind,
}

impl RetrievedSnippet {
    pub fn statute(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: SourceKind::Statute,
        }
    }

    pub fn precedent(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            source: SourceKind::Precedent,
        }
    }
}

/// A single generate-then-evaluate cycle of the answer loop.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationAttempt {
    /// Zero-based attempt number.
    pub index: u32,
    /// Revision instruction injected into this attempt's prompt, if any.
    pub feedback: Option<String>,
    pub answer: String,
    /// Faithfulness score on the 0–100 scale.
    pub score: f64,
    pub reason: String,
}

/// Terminal output of the answer loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultEnvelope {
    /// Final answer text, prefixed with a warning banner when `warning` is set.
    pub answer: String,
    /// Every statute and precedent snippet that grounded the answer.
    pub sources: Vec<RetrievedSnippet>,
    pub score: f64,
    /// Set when the retry budget ran out below the target score.
    pub warning: bool,
    /// Number of generate+evaluate cycles performed (0 when nothing was retrieved).
    pub attempts: u32,
}

impl ResultEnvelope {
    /// Zero-confidence result for a query with no grounding material.
    pub fn no_context() -> Self {
        Self {
            answer: NO_CONTEXT_ANSWER.to_string(),
            sources: Vec::new(),
            score: 0.0,
            warning: false,
            attempts: 0,
        }
    }
}

/// Verdict of the clause toxicity scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToxicityAssessment {
    pub clause: String,
    pub is_toxic: bool,
    /// Normalized 0–10 risk score, rounded to one decimal place.
    pub risk_score: f64,
    pub reason: String,
    /// The exact grounding text submitted with the clause.
    pub context_used: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_kind_headings() {
        assert_eq!(SourceKind::Statute.heading(), "관련 법령");
        assert_eq!(SourceKind::Precedent.heading(), "관련 판례");
        assert_eq!(SourceKind::Precedent.as_str(), "precedent");
    }

    #[test]
    fn no_context_envelope_has_zero_score() {
        let env = ResultEnvelope::no_context();
        assert_eq!(env.score, 0.0);
        assert_eq!(env.answer, NO_CONTEXT_ANSWER);
        assert!(env.sources.is_empty());
        assert!(!env.warning);
        assert_eq!(env.attempts, 0);
    }

    #[test]
    fn envelope_serializes_sources_with_kind() {
        let env = ResultEnvelope {
            answer: "30일 전에 예고해야 합니다.".into(),
            sources: vec![
                RetrievedSnippet::statute("근로기준법 제26조"),
                RetrievedSnippet::precedent("대법원 2010다21962"),
            ],
            score: 80.0,
            warning: false,
            attempts: 1,
        };
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["sources"][0]["source"], "statute");
        assert_eq!(json["sources"][1]["source"], "precedent");
        assert_eq!(json["score"], 80.0);
    }

    #[test]
    fn assessment_field_names_are_snake_case() {
        let a = ToxicityAssessment {
            clause: "퇴직금을 포기한다".into(),
            is_toxic: true,
            risk_score: 9.5,
            reason: "퇴직금 포기는 무효".into(),
            context_used: "=== [관련 법령] ===".into(),
        };
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["is_toxic"], true);
        assert_eq!(json["risk_score"], 9.5);
        assert!(json.get("context_used").is_some());
    }
}
