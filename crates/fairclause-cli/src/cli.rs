//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use fairclause_ai::llm::{DEFAULT_ANSWER_MODEL, DEFAULT_ASSESS_MODEL};
use fairclause_core::{AnswerConfig, AssessConfig};

/// Employment-contract clause advisor grounded in Korean labour law
#[derive(Parser, Debug)]
#[command(name = "fairclause")]
#[command(version)]
pub struct Args {
    /// LanceDB directory holding the `statutes` and `precedents` tables
    #[arg(long, env = "FAIRCLAUSE_DB", default_value = "data/corpus.lance", global = true)]
    pub db: PathBuf,

    /// Directory with the query embedding model (model.onnx, tokenizer.json)
    #[arg(
        long,
        env = "FAIRCLAUSE_MODEL_DIR",
        default_value = "models/ko-sbert-nli",
        global = true
    )]
    pub model_dir: PathBuf,

    /// Gemini model for answers and faithfulness checks
    #[arg(long, env = "FAIRCLAUSE_ANSWER_MODEL", default_value = DEFAULT_ANSWER_MODEL, global = true)]
    pub answer_model: String,

    /// Gemini model for clause scoring and suggestions
    #[arg(long, env = "FAIRCLAUSE_ASSESS_MODEL", default_value = DEFAULT_ASSESS_MODEL, global = true)]
    pub assess_model: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer a labour-law question from retrieved statutes and precedents
    Ask {
        query: String,

        /// Print the result envelope as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        tuning: AnswerTuning,
    },
    /// Score a contract clause for worker-hostile terms
    Assess {
        clause: String,

        /// Also ask for a plain-language explanation and a fair rewrite
        #[arg(long)]
        suggest: bool,

        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        tuning: AssessTuning,
    },
    /// List corpus tables and their row counts
    Tables,
}

#[derive(ClapArgs, Debug)]
pub struct AnswerTuning {
    /// Statutes retrieved per question
    #[arg(long, env = "FAIRCLAUSE_STATUTE_K", default_value = "2")]
    pub statute_k: usize,

    /// Precedents retrieved per question
    #[arg(long, env = "FAIRCLAUSE_PRECEDENT_K", default_value = "2")]
    pub precedent_k: usize,

    /// Faithfulness score (0-100) an answer must reach
    #[arg(long, env = "FAIRCLAUSE_TARGET_SCORE", default_value = "75")]
    pub target_score: f64,

    /// Regenerations allowed after the first attempt
    #[arg(long, env = "FAIRCLAUSE_MAX_RETRIES", default_value = "2")]
    pub max_retries: u32,
}

impl AnswerTuning {
    pub fn config(&self) -> AnswerConfig {
        AnswerConfig {
            statute_k: self.statute_k,
            precedent_k: self.precedent_k,
            target_score: self.target_score,
            max_retries: self.max_retries,
        }
    }
}

#[derive(ClapArgs, Debug)]
pub struct AssessTuning {
    /// Normalized risk score (0-10) at or above which a clause is toxic
    #[arg(long, env = "FAIRCLAUSE_TOXIC_THRESHOLD", default_value = "4.0")]
    pub toxic_threshold: f64,
}

impl AssessTuning {
    pub fn config(&self) -> AssessConfig {
        AssessConfig {
            toxic_threshold: self.toxic_threshold,
            ..AssessConfig::default()
        }
    }
}
