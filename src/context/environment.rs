//! Process I/O environment for the CLI (stdin and TTY state)

use std::io::{self, Read};

use crate::errors::Result;

/// Execution environment
pub struct Environment {
    pub stdin_isatty: bool,
    pub stdout_isatty: bool,
    pub program_name: String,
}

impl Environment {
    pub fn init(program_name: Option<&str>) -> Self {
        let mut env = Self::default();
        if let Some(name) = program_name {
            if let Some(stem) = std::path::Path::new(name).file_stem() {
                env.program_name = stem.to_string_lossy().to_string();
            }
        }
        env
    }

    /// Read all of stdin, refusing to block on an interactive terminal
    pub fn read_stdin(&self) -> Result<Option<String>> {
        if self.stdin_isatty {
            return Ok(None);
        }
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(Some(buf))
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            stdin_isatty: atty::is(atty::Stream::Stdin),
            stdout_isatty: atty::is(atty::Stream::Stdout),
            program_name: "curlpad".to_string(),
        }
    }
}
