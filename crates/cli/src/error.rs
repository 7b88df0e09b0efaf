//! CLI failures and the exit code each one maps to.
//!
//! | code | meaning |
//! |------|---------|
//! | 0    | success |
//! | 2    | argument parse failure (reported by clap) |
//! | 10   | the engine refused the request |
//! | 11   | a snapshot or preset file could not be read or written |
//! | 12   | malformed user input |
//! | 13   | a frame could not be serialized |

use mathviz_core::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(EngineError),
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    Input(String),
    #[error("failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Engine(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

/// File errors keep their own exit code; everything else is the engine's.
impl From<EngineError> for CliError {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::Io(msg) => CliError::Io(msg),
            other => CliError::Engine(other),
        }
    }
}
