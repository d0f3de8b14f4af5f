use clap::Parser;
use tracing_subscriber::EnvFilter;

use curlpad::cli::{self, Args, LogFormat};
use curlpad::context::Environment;
use curlpad::status::ExitStatus;

/// Entry point - parses arguments, sets up logging and dispatches
fn main() -> ExitStatus {
    let argv: Vec<String> = std::env::args().collect();
    let env = Environment::init(argv.first().map(String::as_str));

    let args = match Args::try_parse_from(&argv) {
        Ok(args) => args,
        Err(e) => {
            e.print().ok();
            return if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                ExitStatus::Success
            } else {
                ExitStatus::Error
            };
        }
    };

    init_logging(&args);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match cli::run(&args, &env, &mut out) {
        Ok(status) => status,
        Err(e) => {
            eprintln!("{}: error: {}", env.program_name, e);
            ExitStatus::Error
        }
    }
}

/// Logs go to stderr; `CURLPAD_LOG` overrides the level, `--debug` raises the default
fn init_logging(args: &Args) {
    let default_level = if args.debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("CURLPAD_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match args.log_format.unwrap_or_default() {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
