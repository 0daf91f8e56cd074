//! In-memory stand-ins for the reasoning engine and the snippet indices.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::LlmError;
use crate::llm::TextGenerator;
use crate::retrieval::{Retriever, SnippetSearch};

/// Replays queued replies in order and records every prompt it receives.
pub(crate) struct ScriptedLlm {
    replies: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub(crate) fn new(replies: &[&str]) -> Arc<Self> {
        Self::with_results(replies.iter().map(|r| Ok(r.to_string())).collect())
    }

    pub(crate) fn with_results(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedLlm {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyResponse))
    }
}

/// Fixed snippet list; honours `k` unless built with [`StaticSearch::unbounded`].
pub(crate) struct StaticSearch {
    snippets: Vec<String>,
    respect_k: bool,
    calls: AtomicUsize,
}

impl StaticSearch {
    pub(crate) fn new(snippets: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            snippets: snippets.iter().map(|s| s.to_string()).collect(),
            respect_k: true,
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn unbounded(snippets: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            snippets: snippets.iter().map(|s| s.to_string()).collect(),
            respect_k: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnippetSearch for StaticSearch {
    async fn similarity_search(&self, _query: &str, k: usize) -> Vec<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.respect_k {
            self.snippets.iter().take(k).cloned().collect()
        } else {
            self.snippets.clone()
        }
    }
}

pub(crate) fn retriever(statutes: &[&str], precedents: &[&str]) -> Retriever {
    Retriever::new(StaticSearch::new(statutes), StaticSearch::new(precedents))
}
