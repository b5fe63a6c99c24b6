use anyhow::Context;
use clap::{Parser, Subcommand};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use fitpass::scoring::{CandidateInput, Evaluation};
use fitpass::standards::{Gender, StandardsTable};
use fitpass::EvalError;

const EXIT_SUCCESS: i32 = 0;
const EXIT_OUTPUT: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// List universities, cutoffs and event standards (default if no subcommand)
    List,
    /// Score a single event
    Score {
        /// University id or name
        #[arg(short, long)]
        university: String,
        #[arg(short, long)]
        gender: Gender,
        /// Event id (see `fitpass list`)
        #[arg(short, long)]
        event: String,
        /// Raw measurement in the event's unit
        #[arg(short, long, allow_hyphen_values = true)]
        performance: f64,
    },
    /// Classify a total score against a university's cutoffs
    Classify {
        #[arg(short, long)]
        university: String,
        #[arg(short, long, allow_hyphen_values = true)]
        total: f64,
    },
    /// Score every event, add the academic score and classify the result
    Evaluate {
        #[arg(short, long)]
        university: String,
        #[arg(short, long)]
        gender: Gender,
        /// Converted academic score
        #[arg(short, long)]
        academic: u32,
        /// Event measurement as EVENT=VALUE (repeatable; omitted events score as 0)
        #[arg(short, long = "perf", value_parser = parse_performance, allow_hyphen_values = true)]
        perf: Vec<(String, f64)>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write the built-in standards to the standards file for editing
    Init {
        /// Overwrite without asking
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "fitpass")]
#[command(about = "University physical-fitness exam scoring CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to standards file (defaults to ~/.config/fitpass/standards.yaml, then built-in)
    #[arg(short, long, global = true)]
    standards: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn parse_performance(s: &str) -> Result<(String, f64), String> {
    let (event, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected EVENT=VALUE, got '{}'", s))?;
    let event = event.trim();
    if event.is_empty() {
        return Err(format!("missing event id in '{}'", s));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value for '{}': {}", event, e))?;
    Ok((event.to_string(), value))
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "fitpass=debug" } else { "fitpass=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_with(error: EvalError) -> ! {
    eprintln!("{}", error);
    match error {
        EvalError::Configuration(_) => std::process::exit(EXIT_CONFIG),
        EvalError::InvalidInput(_) => std::process::exit(EXIT_INPUT),
    }
}

fn to_json(evaluation: &Evaluation) -> anyhow::Result<String> {
    serde_json::to_string_pretty(evaluation).context("Failed to serialize result")
}

/// Load and validate standards, exiting with a config error on failure.
fn load_table(path: Option<PathBuf>) -> StandardsTable {
    match fitpass::config::load_standards(path) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Standards error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::List);
    let standards_path = cli.standards.map(PathBuf::from);

    let use_colors = fitpass::output::should_use_colors();

    match command {
        Commands::Init { force } => {
            match fitpass::config::write_default_standards(standards_path, force) {
                Ok(Some(path)) => println!("Standards written to {}", path.display()),
                Ok(None) => println!("Aborted."),
                Err(e) => {
                    eprintln!("Failed to write standards: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
        Commands::List => {
            let table = load_table(standards_path);
            println!("{}", fitpass::output::format_standards(&table, use_colors));
        }
        Commands::Score {
            university,
            gender,
            event,
            performance,
        } => {
            let table = load_table(standards_path);
            let score = fitpass::scoring::score_event(&table, &university, gender, &event, performance)
                .unwrap_or_else(|e| exit_with(e));
            let max_score = table
                .event(&university, gender, &event)
                .map(|e| e.max_score)
                .unwrap_or_else(|e| exit_with(e));
            println!(
                "{} / {}",
                fitpass::output::format_points(score, false),
                max_score
            );
        }
        Commands::Classify { university, total } => {
            let table = load_table(standards_path);
            let classification = fitpass::scoring::classify(&table, &university, total)
                .unwrap_or_else(|e| exit_with(e));
            println!(
                "{}",
                fitpass::output::format_classification(&classification, use_colors)
            );
        }
        Commands::Evaluate {
            university,
            gender,
            academic,
            perf,
            json,
        } => {
            let table = load_table(standards_path);
            // Later entries for the same event win
            let performances: HashMap<String, f64> = perf.into_iter().collect();
            let input = CandidateInput {
                university,
                gender,
                academic_score: academic,
                performances,
            };
            let evaluation =
                fitpass::scoring::evaluate(&table, &input).unwrap_or_else(|e| exit_with(e));

            if json {
                match to_json(&evaluation) {
                    Ok(out) => println!("{}", out),
                    Err(e) => {
                        eprintln!("{:#}", e);
                        std::process::exit(EXIT_OUTPUT);
                    }
                }
            } else {
                println!(
                    "{}",
                    fitpass::output::format_evaluation(&evaluation, use_colors)
                );
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_performance() {
        assert_eq!(
            parse_performance("grip_strength=211"),
            Ok(("grip_strength".to_string(), 211.0))
        );
        assert_eq!(
            parse_performance(" shuttle_run = 8.3 "),
            Ok(("shuttle_run".to_string(), 8.3))
        );
        assert!(parse_performance("grip_strength").is_err());
        assert!(parse_performance("=5").is_err());
        assert!(parse_performance("grip_strength=fast").is_err());
    }

    #[test]
    fn test_cli_parses_evaluate() {
        let cli = Cli::try_parse_from([
            "fitpass",
            "evaluate",
            "-u",
            "gachon",
            "-g",
            "male",
            "-a",
            "280",
            "--perf",
            "grip_strength=211",
            "--perf",
            "shuttle_run=8.3",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Evaluate {
                gender, academic, perf, json, ..
            }) => {
                assert_eq!(gender, Gender::Male);
                assert_eq!(academic, 280);
                assert_eq!(perf.len(), 2);
                assert!(!json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_to_json_includes_tier_and_breakdown() {
        let table = StandardsTable::builtin().unwrap();
        let input = CandidateInput {
            university: "gachon".to_string(),
            gender: Gender::Male,
            academic_score: 180,
            performances: HashMap::from([("grip_strength".to_string(), 211.0)]),
        };
        let evaluation = fitpass::scoring::evaluate(&table, &input).unwrap();
        let json = to_json(&evaluation).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["classification"]["tier"], "UNLIKELY_PASS");
        assert_eq!(value["events"][0]["score"], 157.5);
        assert_eq!(value["incomplete"], true);
    }

    #[test]
    fn test_exit_codes_distinct() {
        let codes = [EXIT_SUCCESS, EXIT_OUTPUT, EXIT_INPUT, EXIT_CONFIG];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_cli_rejects_unknown_gender() {
        let result = Cli::try_parse_from([
            "fitpass", "score", "-u", "gachon", "-g", "x", "-e", "grip_strength", "-p", "200",
        ]);
        assert!(result.is_err());
    }
}
