#![deny(unsafe_code)]
//! Gradient-descent engine.
//!
//! Walks a point downhill on the fixed non-convex test field
//!
//! ```text
//! f(x, y) = (x − 2)² + (y − 1)² + 0.5·sin(x·y)
//! ```
//!
//! using its closed-form gradient. Each `step()` applies one steepest-descent
//! update and appends the new point to the path. There is no convergence
//! check: the caller decides when the walk has gone far enough.

use mathviz_core::error::EngineError;
use mathviz_core::params::param_f64;
use mathviz_core::Engine;
use mathviz_surface::{sample_fn, Domain, SampledPoint};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default learning rate.
const DEFAULT_LEARNING_RATE: f64 = 0.1;
/// Default starting point.
const DEFAULT_START: Point = Point { x: 3.0, y: 2.0 };
/// Heat-map extent and resolution (intervals per axis).
const HEAT_MAP_DOMAIN: Domain = Domain {
    x_min: 0.0,
    x_max: 5.0,
    y_min: 0.0,
    y_max: 4.0,
};
const HEAT_MAP_X_RES: usize = 50;
const HEAT_MAP_Y_RES: usize = 40;

/// A point in the optimizer's 2D parameter space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The test field `(x − 2)² + (y − 1)² + 0.5·sin(xy)`.
pub fn objective(p: Point) -> f64 {
    (p.x - 2.0).powi(2) + (p.y - 1.0).powi(2) + 0.5 * (p.x * p.y).sin()
}

/// Closed-form gradient of [`objective`].
pub fn gradient(p: Point) -> Point {
    let c = 0.5 * (p.x * p.y).cos();
    Point {
        x: 2.0 * (p.x - 2.0) + c * p.y,
        y: 2.0 * (p.y - 1.0) + c * p.x,
    }
}

/// One steepest-descent update: `p − learning_rate · ∇f(p)`.
///
/// Pure; the learning rate is not range-checked, so large rates may diverge.
pub fn descend(p: Point, learning_rate: f64) -> Point {
    let g = gradient(p);
    Point {
        x: p.x - learning_rate * g.x,
        y: p.y - learning_rate * g.y,
    }
}

/// The objective sampled on `[0, 5] × [0, 4]` at 50 × 40 intervals, for the
/// heat map drawn behind the path.
pub fn heat_map() -> Result<Vec<SampledPoint>, EngineError> {
    sample_fn(&HEAT_MAP_DOMAIN, HEAT_MAP_X_RES, HEAT_MAP_Y_RES, |x, y| {
        objective(Point { x, y })
    })
}

/// Position and history of one descent run.
///
/// `path` starts with the starting point and gains one entry per update, so
/// `path.len() == step_index + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerState {
    pub point: Point,
    pub path: Vec<Point>,
    pub step_index: usize,
}

impl OptimizerState {
    pub fn new(start: Point) -> Self {
        Self {
            point: start,
            path: vec![start],
            step_index: 0,
        }
    }

    /// Applies one update and records it. Returns the new point.
    pub fn advance(&mut self, learning_rate: f64) -> Point {
        self.point = descend(self.point, learning_rate);
        self.path.push(self.point);
        self.step_index += 1;
        if !self.point.x.is_finite() || !self.point.y.is_finite() {
            log::warn!(
                "gradient descent diverged at step {} with learning rate {learning_rate}",
                self.step_index
            );
        }
        self.point
    }
}

/// Parameters for the gradient-descent engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescentParams {
    pub learning_rate: f64,
    pub start: Point,
}

impl Default for DescentParams {
    fn default() -> Self {
        Self {
            learning_rate: DEFAULT_LEARNING_RATE,
            start: DEFAULT_START,
        }
    }
}

impl DescentParams {
    /// Extracts parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            learning_rate: param_f64(params, "learning_rate", DEFAULT_LEARNING_RATE),
            start: Point {
                x: param_f64(params, "start_x", DEFAULT_START.x),
                y: param_f64(params, "start_y", DEFAULT_START.y),
            },
        }
    }
}

/// Gradient-descent engine: one update per `step()`.
pub struct GradientDescent {
    state: OptimizerState,
    params: DescentParams,
    heat_map: Vec<SampledPoint>,
}

impl GradientDescent {
    pub fn new(params: DescentParams) -> Result<Self, EngineError> {
        if !params.start.x.is_finite() || !params.start.y.is_finite() {
            return Err(EngineError::InvalidParam {
                name: "start".into(),
                reason: format!("must be finite, got {:?}", params.start),
            });
        }
        Ok(Self {
            state: OptimizerState::new(params.start),
            params,
            heat_map: heat_map()?,
        })
    }

    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        Self::new(DescentParams::from_json(params))
    }

    pub fn state(&self) -> &OptimizerState {
        &self.state
    }

    /// Discards the path and returns to the starting point.
    pub fn reset(&mut self) {
        self.state = OptimizerState::new(self.params.start);
    }
}

impl Engine for GradientDescent {
    fn step(&mut self) -> Result<(), EngineError> {
        self.state.advance(self.params.learning_rate);
        Ok(())
    }

    fn frame(&self) -> Value {
        json!({
            "point": self.state.point,
            "value": objective(self.state.point),
            "gradient": gradient(self.state.point),
            "step_index": self.state.step_index,
            "path": self.state.path,
            "heat_map": self.heat_map,
        })
    }

    fn is_finished(&self) -> bool {
        false
    }

    fn params(&self) -> Value {
        json!({
            "learning_rate": self.params.learning_rate,
            "start_x": self.params.start.x,
            "start_y": self.params.start.y,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "learning_rate": {
                "type": "number",
                "default": DEFAULT_LEARNING_RATE,
                "min": 0.01,
                "max": 0.5,
                "description": "Step size multiplying the gradient"
            },
            "start_x": {
                "type": "number",
                "default": DEFAULT_START.x,
                "min": 0.0,
                "max": 5.0,
                "description": "Starting x coordinate"
            },
            "start_y": {
                "type": "number",
                "default": DEFAULT_START.y,
                "min": 0.0,
                "max": 4.0,
                "description": "Starting y coordinate"
            }
        })
    }
}
