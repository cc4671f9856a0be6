//! Wiqaya scoring CLI
//!
//! Runs the screening-program scoring over a JSON patient export.
//!
//! Usage:
//!   wiqaya stats <patients.json>
//!   wiqaya predict <patients.json> [--min-priority <level>]
//!   wiqaya targets --age <n> [--diabetes] [--hypertension] ...
//!   wiqaya pilot <patient-id> [--age <n>]
//!   wiqaya config show | set [--data-source <pilot|live>] [--reference-date <date>]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use eyre::Result;
use jiff::civil::Date;
use tracing_subscriber::EnvFilter;
use wiqaya_cli::{commands, config};
use wiqaya_core::models::{DataSource, PriorityLevel};
use wiqaya_scoring::targets::PatientProfile;

#[derive(Parser)]
#[command(name = "wiqaya")]
#[command(version)]
#[command(about = "Scoring for the preventive-care screening program", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to the user config directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Dashboard aggregates for a patient export
    Stats {
        /// JSON array of patient records
        patients: PathBuf,
    },

    /// Triage worklist, highest priority first
    Predict {
        /// JSON array of patient records
        patients: PathBuf,

        /// Drop patients below this priority
        #[arg(short, long)]
        min_priority: Option<PriorityLevel>,
    },

    /// Clinical targets for a patient profile
    Targets {
        #[arg(long)]
        age: Option<i32>,
        #[arg(long)]
        diabetes: bool,
        #[arg(long)]
        hypertension: bool,
        #[arg(long)]
        dyslipidemia: bool,
        #[arg(long)]
        ascvd: bool,
        #[arg(long)]
        ckd: bool,
        #[arg(long)]
        heart_failure: bool,
    },

    /// Simulated pilot outcome for a patient ID
    Pilot {
        patient_id: String,
        #[arg(long)]
        age: Option<u32>,
    },

    /// Inspect or update the config file
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand)]
enum ConfigCommand {
    Show,
    Set {
        #[arg(long)]
        data_source: Option<DataSource>,
        /// Anchor date for simulated contact windows (YYYY-MM-DD)
        #[arg(long)]
        reference_date: Option<Date>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if cli.json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    let cfg = config::load_or_default(cli.config.as_deref())?;
    let today = jiff::Zoned::now().date();
    let aggregator_config = cfg.aggregator_config(today);

    match cli.command {
        Commands::Stats { patients } => {
            let records = commands::read_patients(&patients)?;
            commands::print_json(&commands::stats(&records, aggregator_config))
        }
        Commands::Predict {
            patients,
            min_priority,
        } => {
            let records = commands::read_patients(&patients)?;
            commands::print_json(&commands::predict(
                &records,
                aggregator_config,
                min_priority,
            ))
        }
        Commands::Targets {
            age,
            diabetes,
            hypertension,
            dyslipidemia,
            ascvd,
            ckd,
            heart_failure,
        } => {
            let profile = PatientProfile {
                age,
                has_diabetes: diabetes,
                has_hypertension: hypertension,
                has_dyslipidemia: dyslipidemia,
                has_ascvd: ascvd,
                has_ckd: ckd,
                has_heart_failure: heart_failure,
            };
            commands::print_json(&commands::targets(&profile))
        }
        Commands::Pilot { patient_id, age } => {
            commands::print_json(&commands::pilot(&patient_id, age, aggregator_config))
        }
        Commands::Config(ConfigCommand::Show) => commands::print_json(&cfg),
        Commands::Config(ConfigCommand::Set {
            data_source,
            reference_date,
        }) => {
            let path = match cli.config {
                Some(p) => p,
                None => config::default_config_path()?,
            };
            let mut updated = cfg;
            if let Some(source) = data_source {
                updated.data_source = source;
            }
            if reference_date.is_some() {
                updated.reference_date = reference_date;
            }
            config::save_config(&path, &updated)?;
            commands::print_json(&updated)
        }
    }
}
