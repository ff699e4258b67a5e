use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wlsh::config;
use wlsh::query::mean_similarity;
use wlsh::{records, EngineConfig, QueryRequest, SimilarityEngine};

#[derive(Parser, Debug)]
#[command(name = "wlsh", about = "Find similar records with weighted MinHash LSH")]
struct Args {
    /// Records file: .csv with a header row, .jsonl/.ndjson JSON Lines, or a JSON array
    #[arg(short, long)]
    records: PathBuf,

    /// Maximum number of records to index (0 = no limit)
    #[arg(short, long, default_value_t = config::DEFAULT_CORPUS_LIMIT)]
    limit: usize,

    /// Number of LSH bands
    #[arg(short, long, default_value_t = config::DEFAULT_BANDS)]
    bands: usize,

    /// Signature rows per band
    #[arg(short = 'R', long, default_value_t = config::DEFAULT_ROWS)]
    rows: usize,

    /// Signature length; must equal bands * rows (derived when omitted)
    #[arg(long)]
    num_hashes: Option<usize>,

    /// Seed for the hash family
    #[arg(long, default_value_t = config::DEFAULT_SEED)]
    seed: u64,

    /// Number of similar records to return
    #[arg(short = 'k', long, default_value_t = config::DEFAULT_TOPK)]
    topk: usize,

    /// Print one JSON object per hit instead of a text report
    #[arg(long)]
    json: bool,

    /// Query text
    query: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let request = QueryRequest::new(args.query, args.topk);
    request.validate()?;

    let limit = (args.limit > 0).then_some(args.limit);
    let num_hashes = args.num_hashes.unwrap_or(args.bands.saturating_mul(args.rows));
    let config = EngineConfig::new(num_hashes, args.bands, args.rows)?
        .with_corpus_limit(limit)?
        .with_seed(args.seed);

    let records = records::load(&args.records, limit)
        .with_context(|| format!("reading {}", args.records.display()))?;

    let mut engine = SimilarityEngine::new(config);
    engine.build(records).context("building index")?;

    let hits = engine.search(&request)?;

    if args.json {
        for hit in &hits {
            println!("{}", serde_json::to_string(hit)?);
        }
        return Ok(());
    }

    println!(
        "Average similarity of top {} records: {:.3}",
        hits.len(),
        mean_similarity(&hits)
    );
    for (rank, hit) in hits.iter().enumerate() {
        let r = hit.document;
        println!();
        println!(
            "#{} similarity {:.3}  specialty: {}",
            rank + 1,
            hit.similarity,
            r.medical_specialty
        );
        println!("  description: {}", r.description);
        println!("  sample name: {}", r.sample_name);
        println!("  keywords:    {}", r.keywords);
        println!("  transcription:");
        println!("    {}", r.transcription);
    }
    Ok(())
}
