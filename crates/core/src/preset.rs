//! Reproducible description of one engine run.
//!
//! A [`Preset`] captures everything needed to recreate what the user saw:
//! engine name, parameter overrides, PRNG seed, and how many ticks to run.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// Everything needed to rerun an engine.
///
/// Two identical `Preset` values fed to the same registry produce identical
/// frames, because every source of randomness is seeded from `seed`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    pub engine: String,
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub steps: usize,
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl Preset {
    /// Creates a preset with default params (`{}`) and steps (`0`).
    pub fn new(engine: &str, seed: u64) -> Self {
        Self {
            engine: engine.to_string(),
            params: empty_params(),
            seed,
            steps: 0,
        }
    }

    /// Checks that the engine name is present and params is a JSON object.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.engine.trim().is_empty() {
            return Err(EngineError::InvalidParam {
                name: "engine".into(),
                reason: "engine name must not be empty".into(),
            });
        }
        if !self.params.is_object() {
            return Err(EngineError::ParamTypeMismatch {
                name: "params".into(),
                expected: "object".into(),
                got: json_type_name(&self.params).into(),
            });
        }
        Ok(())
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
