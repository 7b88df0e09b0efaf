//! The `Engine` trait every algorithm engine implements.
//!
//! The trait is object-safe so the registry and CLI can hold any engine as
//! `dyn Engine` and drive it one animation tick at a time.

use crate::error::EngineError;
use serde_json::Value;

/// A caller-driven algorithm engine.
///
/// Engines compute their results eagerly or incrementally, but never on their
/// own schedule: the caller calls [`step`](Engine::step) once per animation
/// tick and reads [`frame`](Engine::frame) to render. Stopping early is the
/// caller's business; there is nothing to cancel.
pub trait Engine {
    /// Advance by one tick.
    ///
    /// Stepping a finished engine is a no-op that still returns `Ok(())`.
    fn step(&mut self) -> Result<(), EngineError>;

    /// Renderable state at the current tick as a JSON object.
    fn frame(&self) -> Value;

    /// Whether further steps would change the frame.
    ///
    /// Engines without a natural end (gradient descent) always return `false`.
    fn is_finished(&self) -> bool;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing all available parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}
