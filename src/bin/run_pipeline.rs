//! Run the scoring pipeline and write a JSON report
//!
//! Usage: run_pipeline [INPUT] [--config FILE] [--output FILE] [--parallel]
//!
//! INPUT is a cleaned CSV or Parquet enrolment table; without it a synthetic
//! sample is generated. The report defaults to `analysis_report.json`.

use anyhow::{Context, Result};
use clap::Parser;
use inclusion_scorer::sample::{generate_sample_records, SampleConfig};
use inclusion_scorer::{load_records, EngineConfig, InclusionEngine};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Score enrolment inclusion and raise policy alerts
#[derive(Parser)]
#[command(name = "run_pipeline", version)]
struct Args {
    /// Cleaned enrolment table (CSV or Parquet); a sample is generated when omitted
    input: Option<PathBuf>,

    /// Engine configuration (JSON)
    #[arg(short, long, env = "INCLUSION_CONFIG")]
    config: Option<PathBuf>,

    /// Report path
    #[arg(short, long, default_value = "analysis_report.json")]
    output: PathBuf,

    /// Score regions on the Rayon pool
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inclusion_scorer=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading engine config from {:?}", path);
            EngineConfig::load(path)?
        }
        None => EngineConfig::default(),
    };
    let engine = InclusionEngine::new(config).context("Invalid engine configuration")?;

    let records = match &args.input {
        Some(path) => load_records(path)?,
        None => {
            tracing::info!("No input given, generating sample data");
            generate_sample_records(&SampleConfig::default())
        }
    };

    let analysis = if args.parallel {
        engine.run_parallel(&records)
    } else {
        engine.run(&records)
    };

    println!("\n{}", "=".repeat(70));
    println!("ENROLMENT INCLUSION ANALYSIS");
    println!("{}", "=".repeat(70));
    println!("  Records:   {}", analysis.summary.total_records);
    println!("  States:    {}", analysis.summary.states);
    println!("  Districts: {}", analysis.summary.districts);
    if let (Some(first), Some(last)) = (analysis.summary.first_period, analysis.summary.last_period) {
        println!("  Periods:   {} to {}", first, last);
    }

    if let Some(national) = analysis.national(None) {
        println!("\nNational ({}):", national.period());
        println!("  CEPS: {:?}", national.ceps.value());
        println!("  IGI:  {:?}", national.igi.value());
        println!("  LISS: {:?}", national.liss.value());
        println!("  FERS: {:?}", national.fers.value());
    }

    println!("\nTop 5 regions by exclusion risk:");
    for (i, ranked) in analysis.top_risk_regions(5).iter().enumerate() {
        println!("  {}. {} (FERS {:.3}, {})", i + 1, ranked.region, ranked.score, ranked.period);
    }

    println!("\nTop 5 priority intervention regions:");
    for (i, ranked) in analysis.priority_intervention_regions(5).iter().enumerate() {
        println!("  {}. {} (score {:.3})", i + 1, ranked.region, ranked.score);
    }

    println!("\nAnomalies: {}", analysis.anomalies().len());
    println!("Policy alerts: {}", analysis.alerts().len());
    for alert in analysis.alerts().iter().take(5) {
        println!("  [{}] {} - {}", alert.priority, alert.alert_type, alert.region);
        println!("      {}", alert.message);
        println!("      Action: {}", alert.recommended_action);
    }

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create report: {:?}", args.output))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &analysis)
        .with_context(|| format!("Failed to write report: {:?}", args.output))?;

    println!("\nReport written to {:?}", args.output);
    Ok(())
}
