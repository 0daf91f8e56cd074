//! Retrieval boundary: similarity search over the statute and precedent corpora.

use std::sync::Arc;

use async_trait::async_trait;
use fairclause_core::ContextBundle;
use tracing::debug;

/// Similarity search over one corpus.
///
/// Returns up to `k` snippet texts, most similar first. No index or no match
/// yields an empty list; implementations log their own failures instead of
/// returning them.
#[async_trait]
pub trait SnippetSearch: Send + Sync {
    async fn similarity_search(&self, query: &str, k: usize) -> Vec<String>;
}

/// Statute and precedent search, queried one after the other.
#[derive(Clone)]
pub struct Retriever {
    statutes: Arc<dyn SnippetSearch>,
    precedents: Arc<dyn SnippetSearch>,
}

impl Retriever {
    pub fn new(statutes: Arc<dyn SnippetSearch>, precedents: Arc<dyn SnippetSearch>) -> Self {
        Self {
            statutes,
            precedents,
        }
    }

    pub async fn retrieve(&self, query: &str, statute_k: usize, precedent_k: usize) -> ContextBundle {
        let mut statutes = self.statutes.similarity_search(query, statute_k).await;
        statutes.truncate(statute_k);
        let mut precedents = self.precedents.similarity_search(query, precedent_k).await;
        precedents.truncate(precedent_k);

        debug!(
            statutes = statutes.len(),
            precedents = precedents.len(),
            "retrieved grounding snippets"
        );
        ContextBundle::new(statutes, precedents)
    }
}
