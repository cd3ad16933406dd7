//! Sends one prompt to the configured recommendation model and prints the
//! structured answer. Usage: `smoke_oracle [prompt...]`.

use anyhow::Context;
use ruido_catalog::SeedCatalog;
use ruido_core::domain::RecommendationContext;
use ruido_core::ports::CatalogSource;
use ruido_core::services::RecommendationClient;
use ruido_lib::init_tracing;
use ruido_oracle::{GeminiModel, OracleConfig};

const DEFAULT_PROMPT: &str = "I need a haunting, dark foundation for an industrial track.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  init_tracing();

  let args: Vec<String> = std::env::args().skip(1).collect();
  let prompt = if args.is_empty() { DEFAULT_PROMPT.to_string() } else { args.join(" ") };

  let cfg = OracleConfig::load().context("loading [oracle] config")?;
  let model = GeminiModel::from_env(&cfg)?;
  let catalog = SeedCatalog::new().load_catalog()?;
  let client = RecommendationClient::new(model, &catalog);

  let rec = client.recommend(&prompt, false, &RecommendationContext::default()).await;

  println!("{}", serde_json::to_string_pretty(&rec)?);
  for sample in catalog.resolve_samples(&rec.recommended_sample_ids) {
    println!("  {} | {} | {} BPM {} | {}", sample.id, sample.title, sample.bpm, sample.key, sample.price);
  }
  if rec.is_fallback() {
    eprintln!("model unavailable or answered off-schema; see logs");
  }
  Ok(())
}
