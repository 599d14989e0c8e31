//! Train the essay scoring model
//!
//! Usage: cargo run --bin train -- --corpus training_set_rel3.tsv --artifact artifacts/model.json

use anyhow::Result;
use clap::Parser;
use essay_ml::{run_training, ArtifactBundle, TrainConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Train the essay scoring model")]
struct Args {
    /// TSV corpus with essay_id, essay_set, essay, domain1_score columns
    #[arg(short, long, default_value = "training_set_rel3.tsv")]
    corpus: PathBuf,

    /// Where to write the artifact bundle
    #[arg(short, long, default_value = "artifacts/model.json")]
    artifact: PathBuf,

    /// Vocabulary cap for TF-IDF features
    #[arg(long, default_value = "5000")]
    max_features: usize,

    /// Held-out evaluation fraction
    #[arg(long, default_value = "0.2")]
    test_ratio: f64,

    /// Random seed for split and forest
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Number of trees
    #[arg(short, long, default_value = "100")]
    trees: usize,

    /// Max tree depth
    #[arg(long, default_value = "10")]
    max_depth: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "essay_ml=info".into()),
        )
        .init();

    let args = Args::parse();

    println!("===========================================");
    println!("  Essay Scoring - Model Training");
    println!("===========================================\n");

    let config = TrainConfig {
        corpus_path: args.corpus,
        artifact_path: args.artifact.clone(),
        max_features: args.max_features,
        test_ratio: args.test_ratio,
        seed: args.seed,
        n_trees: args.trees,
        max_depth: args.max_depth,
    };

    let start_time = std::time::Instant::now();
    let report = run_training(&config)?;
    let elapsed = start_time.elapsed();

    println!("Corpus:        {} labeled essays", report.n_essays);
    println!("Vocabulary:    {} features", report.n_features);
    println!("Train set:     {} essays", report.n_train);
    println!("Held-out set:  {} essays\n", report.n_test);

    println!("=== Model Evaluation ===\n");
    match (report.mse, report.kappa) {
        (Some(mse), Some(kappa)) => {
            println!("Mean Squared Error:        {:.4}", mse);
            println!("Quadratic Weighted Kappa:  {:.4}", kappa);
        }
        _ => println!("Held-out set was empty, evaluation skipped"),
    }

    // Top vocabulary terms by importance
    let bundle = ArtifactBundle::load(&args.artifact)?;
    println!("\n=== Top Terms by Importance ===\n");
    for (i, (term, imp)) in bundle
        .model
        .feature_importance_ranking()
        .iter()
        .take(15)
        .enumerate()
    {
        let bar = "#".repeat((imp * 400.0) as usize);
        println!("{:2}. {:20} {:.4} {}", i + 1, term, imp, bar);
    }

    println!("\nTraining completed in {:.2}s", elapsed.as_secs_f64());
    println!("Artifact bundle: {:?}", args.artifact);

    Ok(())
}
