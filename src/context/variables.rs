//! Environment store: named sets of variables with one active selection
//!
//! The completion provider reads the active environment's enabled variables
//! through [`VariableSource`]. It only ever takes a snapshot; nothing in the
//! engine writes to the store.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::RwLock;
use tracing::debug;

use super::dotenv::EnvVars;
use crate::errors::{CurlpadError, Result};

/// Read-only access to the variables of the active environment
pub trait VariableSource: Send + Sync {
    /// Snapshot of the active environment's enabled variables.
    ///
    /// `None` means the store is not available (no active environment).
    fn enabled_variables(&self) -> Option<Vec<Variable>>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Variable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedEnvironment {
    pub name: String,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

/// All environments known to the host, plus which one is active
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentStore {
    #[serde(default)]
    pub active: Option<String>,
    #[serde(default)]
    pub environments: Vec<NamedEnvironment>,
}

impl EnvironmentStore {
    /// Load a store from disk.
    ///
    /// `.toml` files hold any number of environments; anything else is read
    /// as a .env file and becomes a single active environment named after
    /// the file.
    pub fn load(path: &Path) -> Result<Self> {
        if path.extension().is_some_and(|ext| ext == "toml") {
            let content = std::fs::read_to_string(path).map_err(|e| {
                CurlpadError::Environment(format!("Failed to read {}: {}", path.display(), e))
            })?;
            return Self::from_toml_str(&content);
        }

        let vars = EnvVars::load_file(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().trim_start_matches('.').to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "default".to_string());
        Ok(Self::from_dotenv(name, &vars))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let store: Self = toml::from_str(content)?;
        debug!(
            environments = store.environments.len(),
            active = store.active.as_deref().unwrap_or("-"),
            "loaded environment store"
        );
        Ok(store)
    }

    /// Single active environment holding every .env variable, all enabled
    pub fn from_dotenv(name: impl Into<String>, vars: &EnvVars) -> Self {
        let name = name.into();
        let variables = vars.iter().map(|(k, v)| Variable::new(k, v)).collect();
        Self {
            active: Some(name.clone()),
            environments: vec![NamedEnvironment { name, variables }],
        }
    }

    /// Select the active environment by name
    pub fn set_active(&mut self, name: &str) -> Result<()> {
        if !self.environments.iter().any(|e| e.name == name) {
            return Err(CurlpadError::Environment(format!("Unknown environment: {}", name)));
        }
        self.active = Some(name.to_string());
        Ok(())
    }

    pub fn active_environment(&self) -> Option<&NamedEnvironment> {
        let active = self.active.as_deref()?;
        self.environments.iter().find(|e| e.name == active)
    }

    /// Enabled variables of the active environment as a lookup map
    pub fn variable_map(&self) -> IndexMap<String, String> {
        self.enabled_variables()
            .unwrap_or_default()
            .into_iter()
            .map(|v| (v.key, v.value))
            .collect()
    }
}

impl VariableSource for EnvironmentStore {
    fn enabled_variables(&self) -> Option<Vec<Variable>> {
        let env = self.active_environment()?;
        Some(env.variables.iter().filter(|v| v.enabled).cloned().collect())
    }
}

/// A store shared with a host that keeps editing it
impl<T: VariableSource> VariableSource for RwLock<T> {
    fn enabled_variables(&self) -> Option<Vec<Variable>> {
        match self.read() {
            Ok(guard) => guard.enabled_variables(),
            Err(_) => None,
        }
    }
}
