//! Grounding context assembled from retrieved statutes and precedents.
//!
//! Two renderings exist. [`ContextBundle::render`] feeds the answer loop and
//! drops empty sections. [`ContextBundle::render_for_assessment`] feeds the
//! clause scorer and always keeps both headers, substituting an explicit
//! instruction when a section came back empty.

use std::fmt::Write;

use crate::clause::{RetrievedSnippet, SourceKind};

/// Placeholder when no statute was retrieved for a clause.
pub const NO_STATUTE_FALLBACK: &str = "관련 법령 검색 결과 없음 (일반 법률 지식으로 판단 요망)";

/// Placeholder when no precedent was retrieved for a clause.
pub const NO_PRECEDENT_FALLBACK: &str = "관련 판례 검색 결과 없음";

/// Retrieved snippets grouped by corpus: statutes first, then precedents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextBundle {
    statutes: Vec<String>,
    precedents: Vec<String>,
}

impl ContextBundle {
    pub fn new(statutes: Vec<String>, precedents: Vec<String>) -> Self {
        Self {
            statutes,
            precedents,
        }
    }

    pub fn statutes(&self) -> &[String] {
        &self.statutes
    }

    pub fn precedents(&self) -> &[String] {
        &self.precedents
    }

    /// True when both groups are empty. The answer loop must not generate then.
    pub fn is_empty(&self) -> bool {
        self.statutes.is_empty() && self.precedents.is_empty()
    }

    pub fn len(&self) -> usize {
        self.statutes.len() + self.precedents.len()
    }

    /// Flat list of every snippet, statutes before precedents.
    pub fn sources(&self) -> Vec<RetrievedSnippet> {
        self.statutes
            .iter()
            .map(RetrievedSnippet::statute)
            .chain(self.precedents.iter().map(RetrievedSnippet::precedent))
            .collect()
    }

    /// Render the grounding block for answer generation.
    ///
    /// Each non-empty group becomes a `=== [label] ===` section with a 1-based
    /// numbered list. Empty groups are omitted entirely.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.statutes.is_empty() {
            push_numbered(&mut out, SourceKind::Statute, &self.statutes);
            out.push_str("\n\n");
        }
        if !self.precedents.is_empty() {
            push_numbered(&mut out, SourceKind::Precedent, &self.precedents);
        }
        out
    }

    /// Render the grounding block for clause assessment.
    ///
    /// Statutes are newline-joined and only the first precedent is kept. A
    /// missing group is replaced by a fallback line so the prompt never lacks
    /// grounding language.
    pub fn render_for_assessment(&self) -> String {
        let statutes = if self.statutes.is_empty() {
            NO_STATUTE_FALLBACK.to_string()
        } else {
            self.statutes.join("\n")
        };
        let precedent = self
            .precedents
            .first()
            .map(String::as_str)
            .unwrap_or(NO_PRECEDENT_FALLBACK);

        format!(
            "=== [{}] ===\n{statutes}\n\n=== [{}] ===\n{precedent}",
            SourceKind::Statute.heading(),
            SourceKind::Precedent.heading(),
        )
    }
}

fn push_numbered(out: &mut String, kind: SourceKind, items: &[String]) {
    let _ = writeln!(out, "=== [{}] ===", kind.heading());
    for (i, text) in items.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{}. {text}", i + 1);
    }
}
