use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use rollwise_core::policy::{BandTable, Preset, format_percent};
use rollwise_core::{LogSnapshot, ProbabilityTable, Recommendation};
use serde_json::json;
use rollwise_session::config::{ResolvedOutputs, SessionConfig};
use rollwise_session::logging::init_logging;
use rollwise_session::script::ReplayScript;
use rollwise_session::session::Session;

/// Landing odds and stake suggestions for two-dice board moves.
#[derive(Debug, Parser)]
#[command(name = "rollwise", author, version, about = "Two-dice landing odds and roll log")]
struct Cli {
    /// Path to a YAML session configuration file.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Override the session identifier (substitutes {session_id} templates).
    #[arg(long, value_name = "ID", global = true)]
    session_id: Option<String>,

    /// Override the configured band table with a named preset.
    #[arg(long, value_enum, global = true)]
    preset: Option<PresetArg>,

    /// Print results as JSON instead of text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show landing probability and suggested multiplier for target distances.
    Query {
        /// Target distances, e.g. "6, 7, 8". Defaults to the configured selection.
        #[arg(short, long, value_name = "LIST")]
        targets: Option<String>,
    },
    /// Print the probability of every distance from 2 to 12.
    Table,
    /// Append the rolls from a YAML script to a fresh log and export it as CSV.
    Replay {
        /// YAML file with an `entries` list.
        #[arg(short, long, value_name = "FILE")]
        script: PathBuf,

        /// Override the CSV output path.
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    Reference,
    LegacyEightBand,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Reference => Preset::Reference,
            PresetArg::LegacyEightBand => Preset::LegacyEightBand,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => SessionConfig::from_path(path)?,
        None => SessionConfig::default(),
    };

    if let Some(session_id) = cli.session_id {
        config.session_id = session_id;
    }

    if let Some(preset) = cli.preset {
        config.policy.preset = preset.into();
        config.policy.bands = None;
    }

    config.validate()?;

    let mut outputs: ResolvedOutputs = config.resolved_outputs();
    if let Command::Replay { csv: Some(csv), .. } = &cli.command {
        outputs.csv = csv.clone();
    }

    let _logging_guard = init_logging(&config.logging, &outputs, &config.session_id)?;
    let mut session = Session::from_config(&config)?;

    match cli.command {
        Command::Query { targets } => {
            if let Some(raw) = targets {
                for issue in session.select_from_text(&raw) {
                    eprintln!("Ignoring target: {issue}");
                }
            }
            let recommendation = session.recommendation();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&recommendation)?);
            } else {
                print_recommendation(&recommendation);
            }
        }
        Command::Table if cli.json => print_table_json(session.bands())?,
        Command::Table => print_table(session.bands()),
        Command::Replay { script, .. } => {
            let script = ReplayScript::from_path(&script)?;
            let report = script.run(&mut session);
            session
                .export_csv(&outputs.csv)
                .with_context(|| format!("exporting roll log to {}", outputs.csv.display()))?;

            if cli.json {
                let output = json!({
                    "report": report,
                    "log": LogSnapshot::capture(session.log()),
                    "csv": outputs.csv,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
                return Ok(());
            }

            println!(
                "Replayed {} roll{} ({} hit override{}, {} ignored target token{})",
                report.logged,
                if report.logged == 1 { "" } else { "s" },
                report.overridden_hits,
                if report.overridden_hits == 1 { "" } else { "s" },
                report.dropped_tokens,
                if report.dropped_tokens == 1 { "" } else { "s" },
            );
            match session.log().summary() {
                Some(summary) => println!(
                    "Hits: {}/{} ({})",
                    summary.hits(),
                    summary.total(),
                    format_percent(summary.hit_rate())
                ),
                None => println!("No rolls logged yet."),
            }
            println!("Roll log: {}", outputs.csv.display());
        }
    }

    Ok(())
}

fn print_recommendation(recommendation: &Recommendation) {
    match recommendation {
        Recommendation::NoTarget { .. } => println!("Please select at least one tile."),
        Recommendation::Targeted {
            probability,
            multiplier,
        } => {
            println!("Landing Probability: {}", format_percent(*probability));
            println!("Suggested Multiplier: {}", multiplier.badge());
        }
    }
}

fn print_table_json(bands: &BandTable) -> anyhow::Result<()> {
    let rows: Vec<_> = ProbabilityTable::shared()
        .entries()
        .map(|(distance, probability)| {
            json!({
                "distance": distance,
                "probability": probability,
                "multiplier": bands.classify(probability),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

fn print_table(bands: &BandTable) {
    println!("{:<8} | {:<11} | {:<10}", "Distance", "Probability", "Multiplier");
    for (distance, probability) in ProbabilityTable::shared().entries() {
        println!(
            "{:<8} | {:<11} | {:<10}",
            distance.to_string(),
            format_percent(probability),
            bands.classify(probability).badge()
        );
    }
}
