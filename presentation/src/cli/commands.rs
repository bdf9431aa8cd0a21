//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for consumer-interview
#[derive(Parser, Debug)]
#[command(name = "consumer-interview")]
#[command(author, version, about = "Conversational consumer-experience interviewer")]
#[command(long_about = r#"
Consumer Interview runs a one-on-one research interview about a recent
purchase. Each reply is assessed in the background and the interviewer
either moves on or asks a focused follow-up.

Configuration files are loaded from (in priority order):
1. GEMINI_API_KEY / INTERVIEW_<SECTION>__<KEY>   Environment
2. --config <path>          Explicit config file
3. ./interview.toml         Project-level config
4. ~/.config/consumer-interview/config.toml   Global config

Example:
  GEMINI_API_KEY=... consumer-interview
  consumer-interview --resume --state-file ./session.json
  consumer-interview --transcript ./interview.jsonl -v
"#)]
pub struct Cli {
    /// Continue the interview stored in the state file
    #[arg(short, long)]
    pub resume: bool,

    /// Path of the session state file (overrides persistence.state_file)
    #[arg(long, value_name = "PATH")]
    pub state_file: Option<PathBuf>,

    /// Write a JSONL transcript of every turn and routing decision
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the status spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
