//! Storage layer: LanceDB vector tables holding the statute and precedent corpus.

mod error;
pub use error::StoreError;

#[cfg(feature = "lancedb")]
mod lance;
#[cfg(feature = "lancedb")]
pub use lance::{LanceStore, snippet_texts};
