mod cli;
mod display;
mod search;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use fairclause_ai::{ContractAdvisor, Embedder, GeminiClient, GeminiConfig};
use fairclause_core::{AnswerConfig, AssessConfig};
use fairclause_store::LanceStore;
use tracing::{Level, info};

use cli::{Args, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .init();
    info!("fairclause v{}", env!("CARGO_PKG_VERSION"));

    match &args.command {
        Command::Tables => list_tables(&args).await,
        Command::Ask {
            query,
            json,
            tuning,
        } => {
            let advisor = build_advisor(&args, tuning.config(), AssessConfig::default()).await?;
            let envelope = advisor
                .answer_query(query)
                .await
                .context("answer generation failed")?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&envelope)?);
            } else {
                print!("{}", display::format_envelope(&envelope));
            }
            Ok(())
        }
        Command::Assess {
            clause,
            suggest,
            json,
            tuning,
        } => {
            let advisor = build_advisor(&args, AnswerConfig::default(), tuning.config()).await?;
            let assessment = advisor
                .assess_clause(clause)
                .await
                .context("clause assessment failed")?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                print!("{}", display::format_assessment(&assessment, advisor.rubric()));
            }
            if *suggest {
                let text = advisor
                    .suggest(&assessment)
                    .await
                    .context("suggestion failed")?;
                println!();
                println!("{text}");
            }
            Ok(())
        }
    }
}

async fn build_advisor(
    args: &Args,
    answer: AnswerConfig,
    assess: AssessConfig,
) -> anyhow::Result<ContractAdvisor> {
    let answer_llm = GeminiClient::new(GeminiConfig::from_env(args.answer_model.clone())?)
        .context("building answer client")?;
    let assess_llm = GeminiClient::new(GeminiConfig::from_env(args.assess_model.clone())?)
        .context("building assessment client")?;

    let store = LanceStore::open(&args.db)
        .await
        .with_context(|| format!("opening corpus at {}", args.db.display()))?;
    let embedder = Embedder::load(&args.model_dir)
        .with_context(|| format!("loading embedding model from {}", args.model_dir.display()))?;

    let retriever = search::corpus_retriever(Arc::new(store), embedder);
    Ok(ContractAdvisor::new(
        retriever,
        Arc::new(answer_llm),
        Arc::new(assess_llm),
        answer,
        assess,
    ))
}

async fn list_tables(args: &Args) -> anyhow::Result<()> {
    let store = LanceStore::open(&args.db)
        .await
        .with_context(|| format!("opening corpus at {}", args.db.display()))?;

    let mut counts = Vec::new();
    for name in store.table_names().await? {
        let rows = match store.count_rows(&name).await {
            Ok(n) => Some(n),
            Err(e) => {
                tracing::warn!(table = %name, error = %e, "row count failed");
                None
            }
        };
        counts.push((name, rows));
    }

    println!("{}", args.db.display());
    print!("{}", display::format_table_counts(&counts));
    Ok(())
}
