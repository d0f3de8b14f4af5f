//! Subcommand dispatch
//!
//! Reads the command text, runs the requested engine operation and writes
//! its result to the given output.

use std::io::Write;
use tracing::{debug, warn};

use super::args::{Args, Command, InputArgs};
use crate::config::Config;
use crate::context::{expand_variables, Environment, EnvironmentStore, VariableSource};
use crate::curl::{self, flags, similarity, Completer, Validator};
use crate::errors::{CurlpadError, Result};
use crate::status::ExitStatus;

/// Run a parsed command line, writing results to `out`
pub fn run<W: Write>(args: &Args, env: &Environment, out: &mut W) -> Result<ExitStatus> {
    let config = load_config(args)?;

    match &args.command {
        Command::Parse { input, resolve } => {
            let mut text = read_input(input, env)?;
            if *resolve {
                let store = load_store(args, &config)?;
                let vars = store.map(|s| s.variable_map()).unwrap_or_default();
                text = expand_variables(&text, &vars)?;
            }
            let request = curl::curl_to_request(&text);
            write_json(out, &request, env)?;
            Ok(ExitStatus::Success)
        }

        Command::Lint { input, json } => {
            let text = read_input(input, env)?;
            let diagnostics = Validator::new(config.validation).validate(&text);
            if *json {
                write_json(out, &diagnostics, env)?;
            } else {
                for diagnostic in &diagnostics {
                    writeln!(out, "{}", diagnostic)?;
                }
            }
            Ok(ExitStatus::from_lint(diagnostics.iter().any(|d| d.is_error())))
        }

        Command::Tokens { input } => {
            let text = read_input(input, env)?;
            write_json(out, &curl::tokenize_with_positions(&text), env)?;
            Ok(ExitStatus::Success)
        }

        Command::Complete { input, row, column, prefix } => {
            let text = read_input(input, env)?;
            let store = match load_store(args, &config) {
                Ok(store) => store,
                Err(e) => {
                    // Completion degrades to no variables rather than failing
                    warn!(error = %e, "environment store unavailable");
                    None
                }
            };
            let completion = Completer::new(config.completion).complete(
                &text,
                *row,
                *column,
                prefix,
                store.as_ref().map(|s| s as &dyn VariableSource),
            );
            write_json(out, &completion, env)?;
            Ok(ExitStatus::Success)
        }

        Command::Describe { flag } => match flags::lookup_flag(flag) {
            Some(spec) => {
                let names: Vec<&str> = spec.spellings().collect();
                let value = if spec.takes_value { " <value>" } else { "" };
                writeln!(out, "{}{}", names.join(", "), value)?;
                writeln!(out, "    {}", spec.description)?;
                Ok(ExitStatus::Success)
            }
            None => {
                let hint = similarity::suggest_flag(flag, config.validation.suggestion_threshold)
                    .map(|s| format!(" Did you mean \"{}\"?", s))
                    .unwrap_or_default();
                eprintln!("{}: unknown flag \"{}\".{}", env.program_name, flag, hint);
                Ok(ExitStatus::Error)
            }
        },
    }
}

/// An explicit --config must load; the default location falls back with a warning
fn load_config(args: &Args) -> Result<Config> {
    if let Some(path) = &args.config {
        return Config::load_file(path);
    }
    match Config::load() {
        Ok(config) => Ok(config),
        Err(e) => {
            warn!(error = %e, "failed to load config, using defaults");
            Ok(Config::default())
        }
    }
}

/// Load the environments file named on the command line or in the config
fn load_store(args: &Args, config: &Config) -> Result<Option<EnvironmentStore>> {
    let Some(path) = args.env_file.as_ref().or(config.environment_file.as_ref()) else {
        return Ok(None);
    };

    let mut store = EnvironmentStore::load(path)?;
    if let Some(name) = args.environment.as_ref().or(config.active_environment.as_ref()) {
        store.set_active(name)?;
    }
    debug!(path = %path.display(), active = store.active.as_deref().unwrap_or("-"), "environment store ready");
    Ok(Some(store))
}

fn read_input(input: &InputArgs, env: &Environment) -> Result<String> {
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }
    if let Some(path) = &input.file {
        return std::fs::read_to_string(path).map_err(|e| {
            CurlpadError::Argument(format!("Cannot read {}: {}", path.display(), e))
        });
    }
    env.read_stdin()?
        .ok_or_else(|| CurlpadError::Argument("no command text given (pass TEXT, --file, or pipe stdin)".to_string()))
}

/// Pretty JSON for terminals, compact JSON for pipes
fn write_json<W: Write, T: serde::Serialize>(out: &mut W, value: &T, env: &Environment) -> Result<()> {
    if env.stdout_isatty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
