//! Score an essay with a trained model
//!
//! Usage: cargo run --bin score -- --artifact artifacts/model.json --text "essay text..."
//!        cargo run --bin score -- --file essay.txt

use anyhow::{bail, Result};
use clap::Parser;
use essay_ml::{Error, ScorerHandle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Score an essay with a trained model")]
struct Args {
    /// Path to the artifact bundle
    #[arg(short, long, default_value = "artifacts/model.json")]
    artifact: PathBuf,

    /// Essay text to score
    #[arg(short, long)]
    text: Option<String>,

    /// Read the essay from a file instead
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "essay_ml=info".into()),
        )
        .init();

    let args = Args::parse();

    let essay_text = match (args.text, &args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => bail!("No essay provided: pass --text or --file"),
    };

    let handle = match ScorerHandle::load(&args.artifact) {
        Ok(handle) => handle,
        Err(Error::ArtifactMissing(_)) => {
            bail!("Model not trained yet: run the train binary first")
        }
        Err(Error::ArtifactCorrupt(msg)) => {
            bail!("Model artifact is unusable: {}", msg)
        }
        Err(e) => return Err(e.into()),
    };

    match handle.score(&essay_text) {
        Ok(score) => {
            println!("Predicted score: {:.2}", score);
            Ok(())
        }
        Err(Error::InvalidInput(msg)) => bail!("No essay provided: {}", msg),
        Err(e) => Err(e.into()),
    }
}
