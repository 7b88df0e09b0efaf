#![deny(unsafe_code)]
//! Scalar-field surface engine.
//!
//! Evaluates one of a few closed-form fields `f(x, y)` (quadratic, trigonometric,
//! Gaussian bump) over a rectangular domain and samples it onto an evenly
//! spaced grid for 2D, 3D, and contour plots. The grid sampler is generic over
//! the function so other engines can reuse it for their own heat maps.

pub mod config;
pub mod sample;

pub use config::{evaluate, Domain, FieldConfig, FieldKind};
pub use sample::{sample, sample_fn, SampledPoint};

use mathviz_core::error::EngineError;
use mathviz_core::params::param_usize;
use mathviz_core::Engine;
use serde_json::{json, Value};

/// Default grid resolution (intervals per axis).
const DEFAULT_RESOLUTION: usize = 30;
/// Largest resolution the engine accepts.
const MAX_RESOLUTION: usize = 200;

/// Surface sampling engine.
///
/// Samples the whole grid on construction; there is nothing to animate, so
/// the engine starts out finished and `step()` is a no-op.
pub struct Surface {
    config: FieldConfig,
    resolution: usize,
    points: Vec<SampledPoint>,
}

impl Surface {
    /// Creates a surface engine and samples its grid.
    ///
    /// Returns `EngineError::InvalidDomain`/`InvalidParam` for a bad config,
    /// `EngineError::InvalidResolution` for a zero resolution and
    /// `EngineError::InvalidParam` for a resolution above 200.
    pub fn new(config: FieldConfig, resolution: usize) -> Result<Self, EngineError> {
        if resolution > MAX_RESOLUTION {
            return Err(EngineError::InvalidParam {
                name: "resolution".into(),
                reason: format!("{resolution} exceeds the maximum of {MAX_RESOLUTION}"),
            });
        }
        let points = sample(&config, resolution)?;
        log::debug!(
            "surface engine: kind={} resolution={resolution}",
            config.kind.name()
        );
        Ok(Self {
            config,
            resolution,
            points,
        })
    }

    /// Creates a surface engine from flat JSON params.
    ///
    /// Reads the [`FieldConfig`] keys plus `resolution`, falling back to
    /// defaults for missing keys.
    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        Self::new(
            FieldConfig::from_json(params),
            param_usize(params, "resolution", DEFAULT_RESOLUTION),
        )
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Sampled points in row-major (x outer) order.
    pub fn points(&self) -> &[SampledPoint] {
        &self.points
    }
}

impl Engine for Surface {
    fn step(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    fn frame(&self) -> Value {
        json!({
            "config": self.config,
            "resolution": self.resolution,
            "points": self.points,
        })
    }

    fn is_finished(&self) -> bool {
        true
    }

    fn params(&self) -> Value {
        let mut params = json!(self.config);
        params["resolution"] = json!(self.resolution);
        params
    }

    fn param_schema(&self) -> Value {
        json!({
            "kind": {
                "type": "string",
                "default": "integral",
                "options": ["integral", "trig", "exponential"],
                "description": "Field family; unknown names evaluate x^2 + y"
            },
            "x_min": { "type": "number", "default": -5.0, "description": "Lower x bound" },
            "x_max": { "type": "number", "default": 5.0, "description": "Upper x bound" },
            "y_min": { "type": "number", "default": -5.0, "description": "Lower y bound" },
            "y_max": { "type": "number", "default": 5.0, "description": "Upper y bound" },
            "coeff_a": {
                "type": "number",
                "default": 1.0,
                "min": -10.0,
                "max": 10.0,
                "description": "Coefficient A"
            },
            "coeff_b": {
                "type": "number",
                "default": 1.0,
                "min": -10.0,
                "max": 10.0,
                "description": "Coefficient B"
            },
            "coeff_c": {
                "type": "number",
                "default": 0.0,
                "min": -10.0,
                "max": 10.0,
                "description": "Coefficient C"
            },
            "resolution": {
                "type": "integer",
                "default": DEFAULT_RESOLUTION,
                "min": 1,
                "max": MAX_RESOLUTION,
                "description": "Grid intervals per axis; (resolution + 1)^2 points"
            }
        })
    }
}
