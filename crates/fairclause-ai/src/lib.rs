//! AI layer: grounded answer generation with a faithfulness retry loop, rubric-based
//! clause scoring, and (behind `onnx`) local query embeddings.

pub mod advisor;
pub mod answer;
mod error;
pub mod faithfulness;
pub mod llm;
pub mod pipeline;
pub mod retrieval;
pub mod suggestion;
pub mod toxicity;
mod verdict;

#[cfg(feature = "onnx")]
mod embedder;
#[cfg(feature = "onnx")]
pub use embedder::Embedder;

#[cfg(test)]
mod testing;

pub use advisor::ContractAdvisor;
pub use error::{AssessError, LlmError, VerdictError};
pub use llm::{GeminiClient, GeminiConfig, TextGenerator};
pub use pipeline::AnswerPipeline;
pub use retrieval::{Retriever, SnippetSearch};
pub use toxicity::ToxicityScorer;
