//! CLI argument definitions using clap

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "curlpad", version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file to use instead of <config dir>/config.toml
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Environments file: a .toml store or a .env file
    #[arg(long = "env-file", value_name = "PATH", env = "CURLPAD_ENV_FILE", global = true)]
    pub env_file: Option<PathBuf>,

    /// Name of the environment to activate
    #[arg(long = "environment", value_name = "NAME", global = true)]
    pub environment: Option<String>,

    /// Output format for structured logging: json (JSON Lines) or text (default)
    #[arg(long = "log-format", value_name = "FORMAT", value_enum, global = true)]
    pub log_format: Option<LogFormat>,

    /// Debug logging to stderr
    #[arg(long = "debug", action = ArgAction::SetTrue, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Parse command text into a structured request (JSON)
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// Expand {{variables}} from the active environment first
        #[arg(long = "resolve", action = ArgAction::SetTrue)]
        resolve: bool,
    },

    /// Report errors and warnings in command text
    Lint {
        #[command(flatten)]
        input: InputArgs,

        /// Print diagnostics as a JSON array
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },

    /// Print the positioned tokens of command text (JSON)
    Tokens {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Suggest completions at a cursor position (JSON)
    Complete {
        #[command(flatten)]
        input: InputArgs,

        /// Zero-based cursor row
        #[arg(long = "row", value_name = "ROW")]
        row: usize,

        /// Zero-based cursor column, in characters
        #[arg(long = "column", value_name = "COLUMN")]
        column: usize,

        /// Word the editor considers typed so far
        #[arg(long = "prefix", value_name = "PREFIX", default_value = "", allow_hyphen_values = true)]
        prefix: String,
    },

    /// Show documentation for a flag
    Describe {
        /// Flag spelling, e.g. -H or --header
        #[arg(value_name = "FLAG", allow_hyphen_values = true)]
        flag: String,
    },
}

/// Where the command text comes from: argument, file, or stdin
#[derive(clap::Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Command text (reads --file or stdin when omitted)
    #[arg(value_name = "TEXT", allow_hyphen_values = true)]
    pub text: Option<String>,

    /// Read command text from a file
    #[arg(short = 'f', long = "file", value_name = "PATH", conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Plain text output (default)
    #[default]
    Text,
    /// JSON Lines format for parsing
    Json,
}
