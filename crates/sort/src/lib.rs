#![deny(unsafe_code)]
//! Comparison-sort tracers.
//!
//! Three strategies sort the same seeded input and report how much work they
//! did: deterministic quicksort, mergesort, and randomized quicksort. Each
//! strategy threads a [`Counters`] value through its recursion and hands it
//! back, so the counts come out of the call tree instead of shared state.

pub mod merge;
pub mod quick;

pub use merge::Mergesort;
pub use quick::{Quicksort, RandomizedQuicksort};

use mathviz_core::error::EngineError;
use mathviz_core::params::param_usize;
use mathviz_core::prng::{RandomSource, Xorshift64};
use mathviz_core::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Default input length.
const DEFAULT_ARRAY_SIZE: usize = 50;
/// Longest input the engine will generate.
const MAX_ARRAY_SIZE: usize = 100;
/// Generated values are integers in `[0, VALUE_CEILING)`.
const VALUE_CEILING: f64 = 100.0;

/// One array slot: the value and the position it held in the input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SortItem {
    pub value: f64,
    pub index: usize,
}

/// Work done by one sort.
///
/// `comparisons` counts element-vs-element (or element-vs-pivot) comparisons;
/// `steps` counts partition calls for quicksort and merge calls for mergesort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub comparisons: u64,
    pub steps: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortStrategy {
    Quicksort,
    Mergesort,
    RandomizedQuicksort,
}

impl SortStrategy {
    pub fn name(self) -> &'static str {
        match self {
            Self::Quicksort => "quicksort",
            Self::Mergesort => "mergesort",
            Self::RandomizedQuicksort => "randomized-quicksort",
        }
    }
}

/// Result of one strategy: the sorted items plus its counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortRun {
    pub strategy: SortStrategy,
    pub array: Vec<SortItem>,
    pub comparisons: u64,
    pub steps: u64,
}

impl SortRun {
    pub fn new(strategy: SortStrategy, array: Vec<SortItem>, counters: Counters) -> Self {
        Self {
            strategy,
            array,
            comparisons: counters.comparisons,
            steps: counters.steps,
        }
    }

    /// Sorted values without their input positions.
    pub fn values(&self) -> Vec<f64> {
        self.array.iter().map(|item| item.value).collect()
    }
}

/// A sorting strategy that reports its work.
///
/// Takes `&mut self` so strategies that consume randomness can advance their
/// source. Object-safe; the engine holds its strategies as `dyn SortTracer`.
pub trait SortTracer {
    fn strategy(&self) -> SortStrategy;

    /// Sorts `values` ascending. Empty and single-element input yields zero counts.
    fn sort(&mut self, values: &[f64]) -> SortRun;
}

pub(crate) fn items_from(values: &[f64]) -> Vec<SortItem> {
    values
        .iter()
        .enumerate()
        .map(|(index, &value)| SortItem { value, index })
        .collect()
}

/// `size` uniform random integers in `[0, 100)`, as floats.
pub fn generate_values<R: RandomSource + ?Sized>(rng: &mut R, size: usize) -> Vec<f64> {
    (0..size)
        .map(|_| (rng.next_f64() * VALUE_CEILING).floor())
        .collect()
}

/// Runs all three strategies over `values`. The randomized strategy draws its
/// pivots from `rng`.
pub fn sort_all<R: RandomSource + ?Sized>(values: &[f64], rng: &mut R) -> Vec<SortRun> {
    let mut tracers: [Box<dyn SortTracer + '_>; 3] = [
        Box::new(Quicksort),
        Box::new(Mergesort),
        Box::new(RandomizedQuicksort::new(rng)),
    ];
    tracers.iter_mut().map(|t| t.sort(values)).collect()
}

/// Parameters for the sorting engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortParams {
    pub array_size: usize,
}

impl Default for SortParams {
    fn default() -> Self {
        Self {
            array_size: DEFAULT_ARRAY_SIZE,
        }
    }
}

impl SortParams {
    pub fn from_json(params: &Value) -> Self {
        Self {
            array_size: param_usize(params, "array_size", DEFAULT_ARRAY_SIZE),
        }
    }
}

/// Sorting comparison engine.
///
/// All three runs are computed on construction, so the engine starts out
/// finished and `step()` never changes the frame.
pub struct Sorting {
    params: SortParams,
    input: Vec<f64>,
    runs: Vec<SortRun>,
}

impl Sorting {
    /// Generates the input and runs every strategy over it.
    ///
    /// Returns `EngineError::InvalidParam` when `array_size` is above 100.
    pub fn new(seed: u64, params: SortParams) -> Result<Self, EngineError> {
        if params.array_size > MAX_ARRAY_SIZE {
            return Err(EngineError::InvalidParam {
                name: "array_size".into(),
                reason: format!(
                    "{} exceeds the maximum of {MAX_ARRAY_SIZE}",
                    params.array_size
                ),
            });
        }
        let mut rng = Xorshift64::new(seed);
        let input = generate_values(&mut rng, params.array_size);
        let runs = sort_all(&input, &mut rng);
        log::debug!(
            "sorted {} values: {}",
            input.len(),
            runs.iter()
                .map(|r| format!("{} {}c/{}s", r.strategy.name(), r.comparisons, r.steps))
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(Self {
            params,
            input,
            runs,
        })
    }

    pub fn from_json(seed: u64, params: &Value) -> Result<Self, EngineError> {
        Self::new(seed, SortParams::from_json(params))
    }

    pub fn input(&self) -> &[f64] {
        &self.input
    }

    pub fn runs(&self) -> &[SortRun] {
        &self.runs
    }
}

impl Engine for Sorting {
    fn step(&mut self) -> Result<(), EngineError> {
        Ok(())
    }

    fn frame(&self) -> Value {
        json!({
            "input": self.input,
            "runs": self.runs,
        })
    }

    fn is_finished(&self) -> bool {
        true
    }

    fn params(&self) -> Value {
        json!({ "array_size": self.params.array_size })
    }

    fn param_schema(&self) -> Value {
        json!({
            "array_size": {
                "type": "integer",
                "default": DEFAULT_ARRAY_SIZE,
                "min": 10,
                "max": MAX_ARRAY_SIZE,
                "description": "Number of random values to sort"
            }
        })
    }
}
