//! Common test utilities for curlpad integration tests
//!
//! - CLI invocation helpers with an isolated config directory
//! - Fixture files written into that directory

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Exit status codes matching the Rust application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    Success = 0,
    Error = 1,
}

impl From<i32> for ExitStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => ExitStatus::Success,
            _ => ExitStatus::Error,
        }
    }
}

/// Result of running the CLI
#[derive(Debug)]
pub struct CliResponse {
    pub stdout: String,
    pub stderr: String,
    pub exit_status: ExitStatus,
    pub exit_code: i32,
}

impl CliResponse {
    /// Parse stdout as a single JSON document
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(self.stdout.trim())
            .unwrap_or_else(|e| panic!("stdout is not JSON ({}): {}", e, self.stdout))
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.stdout.contains(needle)
    }
}

impl std::ops::Deref for CliResponse {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        &self.stdout
    }
}

/// Mock environment for testing
pub struct MockEnvironment {
    /// Temporary config directory
    pub config_dir: TempDir,
    /// Environment variables to set
    pub env_vars: HashMap<String, String>,
    /// Standard input content
    pub stdin: Option<Vec<u8>>,
}

impl Default for MockEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEnvironment {
    pub fn new() -> Self {
        let config_dir = TempDir::new().expect("Failed to create temp config dir");
        Self {
            config_dir,
            env_vars: HashMap::new(),
            stdin: None,
        }
    }

    pub fn set_env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    pub fn set_stdin(&mut self, content: &str) -> &mut Self {
        self.stdin = Some(content.as_bytes().to_vec());
        self
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.path().to_path_buf()
    }

    /// Write a file into the config directory and return its path
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.config_dir.path().join(name);
        std::fs::write(&path, content).expect("Failed to write fixture");
        path
    }
}

/// Run the CLI with the given arguments (excluding the program name)
pub fn curlpad(args: &[&str]) -> CliResponse {
    curlpad_with_env(args, &MockEnvironment::new())
}

/// Run the CLI with the given arguments and environment
pub fn curlpad_with_env(args: &[&str], env: &MockEnvironment) -> CliResponse {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_curlpad"));
    cmd.args(args);

    cmd.env("CURLPAD_CONFIG_DIR", env.config_path());
    cmd.env_remove("CURLPAD_ENV_FILE");
    cmd.env_remove("CURLPAD_LOG");
    for (key, value) in &env.env_vars {
        cmd.env(key, value);
    }

    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    if let Some(ref stdin_data) = env.stdin {
        cmd.stdin(Stdio::piped());
        let mut child = cmd.spawn().expect("Failed to spawn command");
        {
            let stdin = child.stdin.as_mut().expect("Failed to open stdin");
            stdin.write_all(stdin_data).expect("Failed to write to stdin");
        }
        let output = child.wait_with_output().expect("Failed to wait for command");
        parse_output(output)
    } else {
        cmd.stdin(Stdio::null());
        let output = cmd.output().expect("Failed to execute command");
        parse_output(output)
    }
}

fn parse_output(output: Output) -> CliResponse {
    let exit_code = output.status.code().unwrap_or(-1);
    CliResponse {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        exit_status: ExitStatus::from(exit_code),
        exit_code,
    }
}
