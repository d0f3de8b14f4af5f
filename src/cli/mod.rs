//! CLI argument parsing and processing

pub mod args;
pub mod process;

pub use args::{Args, Command, LogFormat};
pub use process::run;
