use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

use access::lifecycle::trial_ends_at;
use access::{AccessSummary, Capability};
use config_loader::schemas::BUSINESS_ACCOUNT;
use config_loader::{ConfigError, ConfigManager};
use washctl::guards::{check_and_emit, WriterSink};
use washctl::{load_account, load_policy_config, parse_instant, report, resolve_now};

#[derive(Parser)]
#[command(name = "washctl", version, about = "Inspect business-owner access decisions")]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate every gated capability for an account snapshot
    Evaluate {
        /// Account snapshot (JSON or YAML)
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Evaluation instant (RFC 3339); defaults to the current time
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
        /// Shift the evaluation instant forward, e.g. "3days"
        #[arg(long = "in", value_name = "DURATION", value_parser = humantime::parse_duration)]
        offset: Option<Duration>,
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check one capability and print the decision event; exits 1 when denied
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// publish-services, accept-bookings or list-vehicles
        #[arg(long)]
        capability: Capability,
        #[arg(long, value_parser = parse_instant)]
        now: Option<DateTime<Utc>>,
    },
    /// Validate an account snapshot against the account schema
    Validate {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print when a trial started at the given instant ends
    Trial {
        #[arg(long, value_parser = parse_instant)]
        signup_at: DateTime<Utc>,
    },
    /// Print version and exit
    Version,
}

fn init_tracing() {
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let manager = ConfigManager::new();

    match cli.cmd {
        Commands::Evaluate {
            file,
            now,
            offset,
            json,
        } => {
            let cfg = load_policy_config(&manager)?;
            let account = load_account(&manager, &file)?;
            let now = resolve_now(now, offset)?;
            let summary = AccessSummary::evaluate(&account, now, &cfg);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", report::render(&summary));
            }
        }
        Commands::Check {
            file,
            capability,
            now,
        } => {
            // config errors fail every command alike, even where the decision ignores them
            load_policy_config(&manager)?;
            let account = load_account(&manager, &file)?;
            let now = resolve_now(now, None)?;
            let mut sink = WriterSink::stdout();
            let decision = check_and_emit(&account, capability, now, &mut sink)?;
            if !decision.allowed {
                std::process::exit(1);
            }
        }
        Commands::Validate { file } => match manager.validate_file(BUSINESS_ACCOUNT, &file) {
            Ok(value) => {
                let id = value.get("id").and_then(|v| v.as_str()).unwrap_or("<unknown>");
                println!("✓ Valid account snapshot: {}", id);
            }
            Err(ConfigError::ValidationFailed { errors }) => {
                println!("✗ Invalid account snapshot: {}", file.display());
                for e in &errors {
                    println!("  - {}", e);
                }
                std::process::exit(1);
            }
            Err(e) => return Err(e.into()),
        },
        Commands::Trial { signup_at } => {
            let cfg = load_policy_config(&manager)?;
            println!("{}", trial_ends_at(signup_at, &cfg)?.to_rfc3339());
        }
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
    }
    Ok(())
}
