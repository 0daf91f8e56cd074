pub mod clause;
pub mod config;
pub mod context;
pub mod rubric;
pub mod schema;

pub use clause::{
    GenerationAttempt, NO_CONTEXT_ANSWER, ResultEnvelope, RetrievedSnippet, SourceKind,
    ToxicityAssessment,
};
pub use config::{AnswerConfig, AssessConfig};
pub use context::ContextBundle;
pub use rubric::{Rubric, RubricBand, RubricError};
pub use schema::corpus;
