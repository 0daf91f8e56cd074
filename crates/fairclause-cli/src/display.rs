//! Plain-text rendering of answers, clause assessments and table counts.

use std::fmt::Write;

use fairclause_core::{ResultEnvelope, Rubric, ToxicityAssessment};

const RULE: &str = "────────────────────────────────────────";
const MAX_SOURCE_CHARS: usize = 120;

pub fn format_envelope(env: &ResultEnvelope) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", env.answer);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        "  faithfulness: {}  attempts: {}{}",
        env.score,
        env.attempts,
        if env.warning { "  (below target)" } else { "" }
    );

    if !env.sources.is_empty() {
        let _ = writeln!(out, "  sources:");
        for (i, s) in env.sources.iter().enumerate() {
            let _ = writeln!(
                out,
                "    {:>2}. [{}] {}",
                i + 1,
                s.source.heading(),
                truncate(&s.text, MAX_SOURCE_CHARS)
            );
        }
    }
    out
}

pub fn format_assessment(a: &ToxicityAssessment, rubric: &Rubric) -> String {
    let mut out = String::new();
    let verdict = if a.is_toxic { "TOXIC" } else { "OK" };
    let _ = writeln!(out, "{verdict}  risk {:.1}/10", a.risk_score);
    if let Some(band) = rubric.band_for(a.risk_score) {
        let _ = writeln!(out, "  band {}~{}: {}", band.low, band.high, band.description);
    }
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "  clause: {}", a.clause);
    let _ = writeln!(out, "  reason: {}", a.reason);
    out
}

pub fn format_table_counts(counts: &[(String, Option<usize>)]) -> String {
    if counts.is_empty() {
        return "  (no tables)\n".to_string();
    }
    let width = counts.iter().map(|(n, _)| n.len()).max().unwrap_or(0);
    let mut out = String::new();
    for (name, rows) in counts {
        match rows {
            Some(n) => {
                let _ = writeln!(out, "  {name:<width$}  {n:>8} rows");
            }
            None => {
                let _ = writeln!(out, "  {name:<width$}  {:>8}", "?");
            }
        }
    }
    out
}

fn truncate(s: &str, max_chars: usize) -> String {
    let one_line = s.replace('\n', " ");
    if one_line.chars().count() <= max_chars {
        one_line
    } else {
        let head: String = one_line.chars().take(max_chars).collect();
        format!("{head}…")
    }
}
