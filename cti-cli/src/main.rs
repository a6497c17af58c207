//! Interactive analyst console for the `cti-rag` query engine.
//!
//! Loads a JSONL file of already-normalized documents (one serialized
//! [`Document`] per line, as produced by the ingestion pipeline), indexes
//! them into an in-memory store via Ollama embeddings, and answers analyst
//! questions in a read-eval loop.
//!
//! Run: `cargo run -p cti-cli -- path/to/documents.jsonl`
//!
//! Requires a local Ollama server (`OLLAMA_BASE_URL` to override the
//! default `http://localhost:11434`).

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::sync::Arc;

use anyhow::Context;
use cti_rag::ollama::{OllamaEmbeddingProvider, OllamaGenerator};
use cti_rag::{CtiAgent, Document, InMemoryDocumentStore, QueryConfig};
use tracing::info;

/// Default document file, matching the ingestion pipeline's output name.
const DEFAULT_DATA_PATH: &str = "darkgram_cti.jsonl";

/// Load one serialized [`Document`] per JSONL line.
fn load_documents(path: &str) -> anyhow::Result<Vec<Document>> {
    let file = File::open(path).with_context(|| format!("cannot open document file '{path}'"))?;
    let reader = BufReader::new(file);

    let mut documents = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let number = i + 1;
        let line = line.with_context(|| format!("read error in '{path}' at line {number}"))?;
        if line.trim().is_empty() {
            continue;
        }
        let document: Document = serde_json::from_str(&line)
            .with_context(|| format!("malformed document in '{path}' at line {number}"))?;
        documents.push(document);
    }

    Ok(documents)
}

fn print_sources(result: &cti_rag::AnalysisResult) {
    if result.sources.is_empty() {
        return;
    }
    println!("\nSources:");
    for source in &result.sources {
        println!(
            "  POST {} | {} | score: {:.3} | replies: {}",
            source.post_id, source.channel, source.score, source.reply_count
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cti_rag=info,cti_cli=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let data_path =
        std::env::args().nth(1).unwrap_or_else(|| DEFAULT_DATA_PATH.to_string());

    let base_url =
        std::env::var("OLLAMA_BASE_URL").unwrap_or_else(|_| "http://localhost:11434".to_string());

    // -- 1. Index the documents -------------------------------------------
    let documents = load_documents(&data_path)?;
    info!(count = documents.len(), path = %data_path, "loaded documents");

    let embedder = Arc::new(OllamaEmbeddingProvider::new().with_base_url(&base_url));
    let store = Arc::new(InMemoryDocumentStore::new(embedder));
    store.index(&documents).await?;

    // -- 2. Build the agent -----------------------------------------------
    let generator = Arc::new(OllamaGenerator::new().with_base_url(&base_url));
    let agent = CtiAgent::builder()
        .config(QueryConfig::default())
        .store(store)
        .rewriter(generator.clone())
        .summarizer(generator)
        .build()?;

    // -- 3. Read-eval loop ------------------------------------------------
    println!("{}", "=".repeat(50));
    println!("  CTI INTELLIGENCE CONSOLE");
    println!("  {} documents indexed | 'quit' to leave", documents.len());
    println!("{}", "=".repeat(50));

    let stdin = std::io::stdin();
    loop {
        print!("\nQuestion: ");
        std::io::stdout().flush()?;

        let mut question = String::new();
        if stdin.lock().read_line(&mut question)? == 0 {
            break;
        }
        let question = question.trim();
        if question.is_empty() {
            continue;
        }
        if matches!(question.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }

        let result = agent.analyze(question).await?;

        println!("\n{}", "-".repeat(50));
        println!("{}", result.answer);
        println!("{}", "-".repeat(50));
        print_sources(&result);
    }

    Ok(())
}
