#![deny(unsafe_code)]
//! Core types and traits for the mathviz algorithm demonstrator.
//!
//! Provides the `Engine` trait every algorithm engine implements, the shared
//! `EngineError`, the injectable `RandomSource` with its `Xorshift64`
//! implementation, JSON parameter helpers, and the replayable `Preset`.

pub mod engine;
pub mod error;
pub mod params;
pub mod preset;
pub mod prng;

pub use engine::Engine;
pub use error::EngineError;
pub use preset::Preset;
pub use prng::{RandomSource, Xorshift64};
