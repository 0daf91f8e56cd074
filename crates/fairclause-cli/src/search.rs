//! LanceDB-backed snippet search for one corpus table.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use fairclause_ai::{Embedder, Retriever, SnippetSearch};
use fairclause_core::corpus;
use fairclause_store::LanceStore;
use tracing::{debug, warn};

/// Embeds the query locally, then runs a vector search on `table`.
///
/// Failures never reach the caller: they are logged and yield no snippets.
pub struct LanceSnippetSearch {
    store: Arc<LanceStore>,
    embedder: Arc<Mutex<Embedder>>,
    table: &'static str,
}

impl LanceSnippetSearch {
    pub fn new(store: Arc<LanceStore>, embedder: Arc<Mutex<Embedder>>, table: &'static str) -> Self {
        Self {
            store,
            embedder,
            table,
        }
    }

    fn embed(&self, query: &str) -> anyhow::Result<Vec<f32>> {
        let mut embedder = self
            .embedder
            .lock()
            .map_err(|_| anyhow::anyhow!("embedder lock poisoned"))?;
        embedder.embed(query)
    }
}

#[async_trait]
impl SnippetSearch for LanceSnippetSearch {
    async fn similarity_search(&self, query: &str, k: usize) -> Vec<String> {
        if k == 0 {
            return Vec::new();
        }

        let vector = match self.embed(query) {
            Ok(v) => v,
            Err(e) => {
                warn!(table = self.table, error = %e, "query embedding failed");
                return Vec::new();
            }
        };

        match self.store.search_snippets(self.table, &vector, k).await {
            Ok(hits) => {
                debug!(table = self.table, hits = hits.len(), "retrieved snippets");
                hits
            }
            Err(e) => {
                warn!(table = self.table, error = %e, "snippet search failed");
                Vec::new()
            }
        }
    }
}

/// Retriever over the statute and precedent tables sharing one embedder.
pub fn corpus_retriever(store: Arc<LanceStore>, embedder: Embedder) -> Retriever {
    let embedder = Arc::new(Mutex::new(embedder));
    Retriever::new(
        Arc::new(LanceSnippetSearch::new(
            store.clone(),
            embedder.clone(),
            corpus::STATUTES_TABLE,
        )),
        Arc::new(LanceSnippetSearch::new(
            store,
            embedder,
            corpus::PRECEDENTS_TABLE,
        )),
    )
}
