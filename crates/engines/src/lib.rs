#![deny(unsafe_code)]
//! Engine registry: maps engine names to implementations and provides JSON
//! snapshot and preset I/O.
//!
//! This crate sits between `mathviz-core` (which defines the `Engine` trait)
//! and the individual engine crates (`mathviz-surface`, `mathviz-graph`, etc.),
//! so front ends dispatch by name without knowing any engine type.

pub mod snapshot;

use mathviz_core::error::EngineError;
use mathviz_core::{Engine, Preset};
use serde_json::Value;

/// All available engine names.
const ENGINE_NAMES: &[&str] = &["surface", "dijkstra", "gradient-descent", "sorting", "rsa"];

/// Enumeration of all available algorithm engines.
///
/// Wraps each engine implementation and delegates `Engine` trait methods.
/// Use [`EngineKind::from_name`] for string-based construction.
pub enum EngineKind {
    /// Scalar-field grid sampling.
    Surface(mathviz_surface::Surface),
    /// Random graph plus Dijkstra trace replay.
    Dijkstra(mathviz_graph::ShortestPath),
    /// Steepest descent on the fixed test field.
    GradientDescent(mathviz_descent::GradientDescent),
    /// Three sorting strategies on one seeded input.
    Sorting(mathviz_sort::Sorting),
    /// Small-prime RSA walkthrough.
    Rsa(mathviz_rsa::Rsa),
}

impl EngineKind {
    /// Constructs an engine by name.
    ///
    /// `seed` only matters to engines that draw random input (`dijkstra`,
    /// `sorting`). Returns `EngineError::UnknownEngine` if the name is not
    /// recognized.
    pub fn from_name(name: &str, seed: u64, params: &Value) -> Result<Self, EngineError> {
        match name {
            "surface" => Ok(EngineKind::Surface(mathviz_surface::Surface::from_json(
                params,
            )?)),
            "dijkstra" => Ok(EngineKind::Dijkstra(
                mathviz_graph::ShortestPath::from_json(seed, params)?,
            )),
            "gradient-descent" => Ok(EngineKind::GradientDescent(
                mathviz_descent::GradientDescent::from_json(params)?,
            )),
            "sorting" => Ok(EngineKind::Sorting(mathviz_sort::Sorting::from_json(
                seed, params,
            )?)),
            "rsa" => Ok(EngineKind::Rsa(mathviz_rsa::Rsa::from_json(params)?)),
            _ => Err(EngineError::UnknownEngine(name.to_string())),
        }
    }

    /// Constructs the preset's engine and runs it for `preset.steps` ticks.
    pub fn from_preset(preset: &Preset) -> Result<Self, EngineError> {
        preset.validate()?;
        let mut engine = Self::from_name(&preset.engine, preset.seed, &preset.params)?;
        advance(&mut engine, preset.steps)?;
        Ok(engine)
    }

    /// Returns a slice of all recognized engine names.
    pub fn list_engines() -> &'static [&'static str] {
        ENGINE_NAMES
    }
}

/// Steps `engine` up to `steps` times, stopping early once it is finished.
///
/// Returns the number of steps actually taken.
pub fn advance(engine: &mut dyn Engine, steps: usize) -> Result<usize, EngineError> {
    let mut taken = 0;
    while taken < steps && !engine.is_finished() {
        engine.step()?;
        taken += 1;
    }
    log::debug!("advanced {taken} of {steps} requested steps");
    Ok(taken)
}

impl Engine for EngineKind {
    fn step(&mut self) -> Result<(), EngineError> {
        match self {
            EngineKind::Surface(e) => e.step(),
            EngineKind::Dijkstra(e) => e.step(),
            EngineKind::GradientDescent(e) => e.step(),
            EngineKind::Sorting(e) => e.step(),
            EngineKind::Rsa(e) => e.step(),
        }
    }

    fn frame(&self) -> Value {
        match self {
            EngineKind::Surface(e) => e.frame(),
            EngineKind::Dijkstra(e) => e.frame(),
            EngineKind::GradientDescent(e) => e.frame(),
            EngineKind::Sorting(e) => e.frame(),
            EngineKind::Rsa(e) => e.frame(),
        }
    }

    fn is_finished(&self) -> bool {
        match self {
            EngineKind::Surface(e) => e.is_finished(),
            EngineKind::Dijkstra(e) => e.is_finished(),
            EngineKind::GradientDescent(e) => e.is_finished(),
            EngineKind::Sorting(e) => e.is_finished(),
            EngineKind::Rsa(e) => e.is_finished(),
        }
    }

    fn params(&self) -> Value {
        match self {
            EngineKind::Surface(e) => e.params(),
            EngineKind::Dijkstra(e) => e.params(),
            EngineKind::GradientDescent(e) => e.params(),
            EngineKind::Sorting(e) => e.params(),
            EngineKind::Rsa(e) => e.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            EngineKind::Surface(e) => e.param_schema(),
            EngineKind::Dijkstra(e) => e.param_schema(),
            EngineKind::GradientDescent(e) => e.param_schema(),
            EngineKind::Sorting(e) => e.param_schema(),
            EngineKind::Rsa(e) => e.param_schema(),
        }
    }
}
