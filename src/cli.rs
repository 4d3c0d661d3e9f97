//! Command-line argument parsing for askdb.
//!
//! One-shot mode answers a single question and exits; without a question,
//! askdb starts an interactive chat session.

use clap::Parser;
use std::path::PathBuf;

/// Ask your SQLite database questions in plain English.
#[derive(Parser, Debug)]
#[command(name = "askdb")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Natural language question to answer (omit for interactive chat)
    #[arg(value_name = "QUESTION")]
    pub question: Option<String>,

    /// Path to the SQLite database file
    #[arg(short = 'd', long, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Schema file to prompt with (default: data/schema.sql, schema.sql,
    /// else extracted from the database)
    #[arg(long, value_name = "PATH")]
    pub schema: Option<PathBuf>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// LLM provider to use (gemini, mock)
    #[arg(long, value_name = "PROVIDER")]
    pub llm: Option<String>,

    /// Model name override (e.g., gemini-2.0-flash)
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Gemini API key (overrides GEMINI_API_KEY)
    #[arg(long, value_name = "KEY", env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Skip the generated-SQL explanation
    #[arg(long)]
    pub no_explanation: bool,

    /// Print the response record as JSON (one-shot mode only)
    #[arg(long)]
    pub json: bool,

    /// Maximum rows to display per result
    #[arg(long, value_name = "N", default_value = "20")]
    pub max_rows: usize,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(crate::config::Config::default_path)
    }
}
