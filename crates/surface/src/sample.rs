//! Evenly spaced grid sampling of a scalar field.

use crate::config::{Domain, FieldConfig};
use mathviz_core::error::EngineError;
use serde::{Deserialize, Serialize};

/// Largest grid [`sample_fn`] will allocate.
pub const MAX_POINTS: usize = 1 << 22;

/// One evaluated grid location.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampledPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Samples `f` on a `(x_res + 1) × (y_res + 1)` grid covering `domain`.
///
/// Points are ordered row-major with `x` as the outer loop: index
/// `i * (y_res + 1) + j` holds the `i`-th x column and `j`-th y row. Both
/// domain endpoints are included exactly. Renderers index by position, so
/// the order never depends on the field values.
///
/// Returns `EngineError::InvalidResolution` when either resolution is zero or
/// the grid would hold more than [`MAX_POINTS`] points.
pub fn sample_fn<F>(
    domain: &Domain,
    x_res: usize,
    y_res: usize,
    f: F,
) -> Result<Vec<SampledPoint>, EngineError>
where
    F: Fn(f64, f64) -> f64,
{
    domain.validate()?;
    if x_res == 0 || y_res == 0 {
        return Err(EngineError::InvalidResolution);
    }
    let len = x_res
        .checked_add(1)
        .zip(y_res.checked_add(1))
        .and_then(|(cols, rows)| cols.checked_mul(rows))
        .filter(|&len| len <= MAX_POINTS)
        .ok_or(EngineError::InvalidResolution)?;

    let mut points = Vec::with_capacity(len);
    for i in 0..=x_res {
        let x = axis_value(domain.x_min, domain.x_max, i, x_res);
        for j in 0..=y_res {
            let y = axis_value(domain.y_min, domain.y_max, j, y_res);
            points.push(SampledPoint { x, y, z: f(x, y) });
        }
    }
    log::debug!("sampled {} points over {domain:?}", points.len());
    Ok(points)
}

/// Samples a configured field on a square `(resolution + 1)²` grid.
pub fn sample(config: &FieldConfig, resolution: usize) -> Result<Vec<SampledPoint>, EngineError> {
    config.validate()?;
    sample_fn(&config.domain, resolution, resolution, |x, y| {
        config.evaluate(x, y)
    })
}

/// Position `i` of `res` equal steps from `min`, pinned to `max` at the last step.
fn axis_value(min: f64, max: f64, i: usize, res: usize) -> f64 {
    if i == res {
        max
    } else {
        min + i as f64 * ((max - min) / res as f64)
    }
}
