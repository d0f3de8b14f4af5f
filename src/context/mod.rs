//! Collaborators around the engine: the process environment and the
//! variable store consulted by completion

pub mod dotenv;
pub mod environment;
pub mod variables;

pub use dotenv::{expand_variables, EnvVars};
pub use environment::Environment;
pub use variables::{EnvironmentStore, NamedEnvironment, Variable, VariableSource};
