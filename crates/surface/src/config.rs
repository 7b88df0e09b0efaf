//! Scalar-field configuration and the closed-form evaluator.

use mathviz_core::error::EngineError;
use mathviz_core::params::{param_f64, param_string};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const DEFAULT_X_MIN: f64 = -5.0;
const DEFAULT_X_MAX: f64 = 5.0;
const DEFAULT_Y_MIN: f64 = -5.0;
const DEFAULT_Y_MAX: f64 = 5.0;
const DEFAULT_COEFF_A: f64 = 1.0;
const DEFAULT_COEFF_B: f64 = 1.0;
const DEFAULT_COEFF_C: f64 = 0.0;

/// Which closed-form family a [`FieldConfig`] evaluates.
///
/// The older UI names `function` and `parametric` are accepted as aliases.
/// Any other name resolves to [`FieldKind::Plain`], the fixed `x² + y` surface,
/// rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// `A·x² + B·y + C`
    #[default]
    Integral,
    /// `A·sin(B·x) + C·cos(y)`
    #[serde(alias = "function")]
    Trig,
    /// `A·exp(−B·(x² + y²)) + C`
    #[serde(alias = "parametric")]
    Exponential,
    /// `x² + y`, ignoring the coefficients.
    #[serde(other)]
    Plain,
}

impl FieldKind {
    /// Resolves a kind name, falling back to [`FieldKind::Plain`] for unknown names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "integral" => FieldKind::Integral,
            "trig" | "function" => FieldKind::Trig,
            "exponential" | "parametric" => FieldKind::Exponential,
            _ => FieldKind::Plain,
        }
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Integral => "integral",
            FieldKind::Trig => "trig",
            FieldKind::Exponential => "exponential",
            FieldKind::Plain => "plain",
        }
    }
}

/// Rectangular sampling domain `[x_min, x_max] × [y_min, y_max]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Domain {
    fn default() -> Self {
        Self {
            x_min: DEFAULT_X_MIN,
            x_max: DEFAULT_X_MAX,
            y_min: DEFAULT_Y_MIN,
            y_max: DEFAULT_Y_MAX,
        }
    }
}

impl Domain {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Checks that all bounds are finite and each axis is non-empty.
    pub fn validate(&self) -> Result<(), EngineError> {
        let bounds = [self.x_min, self.x_max, self.y_min, self.y_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(EngineError::InvalidDomain(format!(
                "bounds must be finite, got {self:?}"
            )));
        }
        if self.x_min >= self.x_max {
            return Err(EngineError::InvalidDomain(format!(
                "x_min ({}) must be below x_max ({})",
                self.x_min, self.x_max
            )));
        }
        if self.y_min >= self.y_max {
            return Err(EngineError::InvalidDomain(format!(
                "y_min ({}) must be below y_max ({})",
                self.y_min, self.y_max
            )));
        }
        Ok(())
    }
}

/// `params[key]`, else `params[query_key]` as a number or numeric string, else `default`.
fn keyed_f64(params: &Value, key: &str, query_key: &str, default: f64) -> f64 {
    let query = match params.get(query_key) {
        Some(Value::String(text)) => text.trim().parse().ok(),
        Some(other) => other.as_f64(),
        None => None,
    };
    param_f64(params, key, query.unwrap_or(default))
}

/// A parametrized scalar field over a rectangular domain.
///
/// Serializes flat (`kind`, `x_min`, …, `coeff_c`), the same key set
/// [`FieldConfig::from_json`] reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub kind: FieldKind,
    #[serde(flatten)]
    pub domain: Domain,
    pub coeff_a: f64,
    pub coeff_b: f64,
    pub coeff_c: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            kind: FieldKind::Integral,
            domain: Domain::default(),
            coeff_a: DEFAULT_COEFF_A,
            coeff_b: DEFAULT_COEFF_B,
            coeff_c: DEFAULT_COEFF_C,
        }
    }
}

impl FieldConfig {
    /// Reads a config from flat JSON params, falling back to the default per key.
    ///
    /// Each snake_case key also has a camelCase spelling (`type`, `xMin`, …,
    /// `coeffC`) as found in shared URL query strings; the snake_case key wins
    /// when both are present. The camelCase values may be numeric strings.
    pub fn from_json(params: &Value) -> Self {
        let kind = param_string(params, "type", FieldKind::Integral.name());
        Self {
            kind: FieldKind::from_name(&param_string(params, "kind", &kind)),
            domain: Domain {
                x_min: keyed_f64(params, "x_min", "xMin", DEFAULT_X_MIN),
                x_max: keyed_f64(params, "x_max", "xMax", DEFAULT_X_MAX),
                y_min: keyed_f64(params, "y_min", "yMin", DEFAULT_Y_MIN),
                y_max: keyed_f64(params, "y_max", "yMax", DEFAULT_Y_MAX),
            },
            coeff_a: keyed_f64(params, "coeff_a", "coeffA", DEFAULT_COEFF_A),
            coeff_b: keyed_f64(params, "coeff_b", "coeffB", DEFAULT_COEFF_B),
            coeff_c: keyed_f64(params, "coeff_c", "coeffC", DEFAULT_COEFF_C),
        }
    }

    /// Checks the domain and that every coefficient is finite.
    pub fn validate(&self) -> Result<(), EngineError> {
        self.domain.validate()?;
        for (name, value) in [
            ("coeff_a", self.coeff_a),
            ("coeff_b", self.coeff_b),
            ("coeff_c", self.coeff_c),
        ] {
            if !value.is_finite() {
                return Err(EngineError::InvalidParam {
                    name: name.into(),
                    reason: format!("must be finite, got {value}"),
                });
            }
        }
        Ok(())
    }

    /// Evaluates the field at `(x, y)`. See [`evaluate`].
    pub fn evaluate(&self, x: f64, y: f64) -> f64 {
        evaluate(x, y, self)
    }
}

/// Evaluates the configured scalar field at `(x, y)`.
///
/// Total over the reals: every kind is a closed-form expression with no
/// division or domain restriction.
pub fn evaluate(x: f64, y: f64, config: &FieldConfig) -> f64 {
    let a = config.coeff_a;
    let b = config.coeff_b;
    let c = config.coeff_c;
    match config.kind {
        FieldKind::Integral => a * x * x + b * y + c,
        FieldKind::Trig => a * (b * x).sin() + c * y.cos(),
        FieldKind::Exponential => a * (-b * (x * x + y * y)).exp() + c,
        FieldKind::Plain => x * x + y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::f64::consts::PI;

    fn config(kind: FieldKind, a: f64, b: f64, c: f64) -> FieldConfig {
        FieldConfig {
            kind,
            domain: Domain::default(),
            coeff_a: a,
            coeff_b: b,
            coeff_c: c,
        }
    }

    #[test]
    fn integral_kind_is_quadratic_in_x_linear_in_y() {
        let cfg = config(FieldKind::Integral, 2.0, 3.0, 1.0);
        assert!((evaluate(2.0, -1.0, &cfg) - 6.0).abs() < 1e-12);
    }

    #[test]
    fn trig_kind_combines_sine_and_cosine() {
        let cfg = config(FieldKind::Trig, 2.0, 0.5, 3.0);
        // 2·sin(0.5·π) + 3·cos(0) = 2 + 3
        assert!((evaluate(PI, 0.0, &cfg) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn exponential_kind_peaks_at_origin() {
        let cfg = config(FieldKind::Exponential, 4.0, 1.0, 0.5);
        assert!((evaluate(0.0, 0.0, &cfg) - 4.5).abs() < 1e-12);
        assert!(evaluate(1.0, 1.0, &cfg) < evaluate(0.0, 0.0, &cfg));
    }

    #[test]
    fn plain_kind_ignores_coefficients() {
        let cfg = config(FieldKind::Plain, 100.0, 100.0, 100.0);
        assert!((evaluate(3.0, 2.0, &cfg) - 11.0).abs() < 1e-12);
    }

    #[test]
    fn from_name_accepts_legacy_aliases() {
        assert_eq!(FieldKind::from_name("function"), FieldKind::Trig);
        assert_eq!(FieldKind::from_name("parametric"), FieldKind::Exponential);
        assert_eq!(FieldKind::from_name("integral"), FieldKind::Integral);
    }

    #[test]
    fn from_name_unknown_falls_back_to_plain() {
        assert_eq!(FieldKind::from_name("hyperbolic"), FieldKind::Plain);
    }

    #[test]
    fn deserialize_unknown_kind_falls_back_to_plain() {
        let cfg: FieldConfig = serde_json::from_value(json!({
            "kind": "hyperbolic",
            "x_min": -1.0, "x_max": 1.0, "y_min": -1.0, "y_max": 1.0,
            "coeff_a": 1.0, "coeff_b": 1.0, "coeff_c": 0.0
        }))
        .unwrap();
        assert_eq!(cfg.kind, FieldKind::Plain);
    }

    #[test]
    fn serializes_flat_and_round_trips() {
        let cfg = config(FieldKind::Exponential, 1.5, 0.2, -1.0);
        let v = serde_json::to_value(cfg).unwrap();
        assert_eq!(v["kind"], "exponential");
        assert_eq!(v["x_min"], -5.0);
        let restored: FieldConfig = serde_json::from_value(v).unwrap();
        assert_eq!(restored, cfg);
    }

    #[test]
    fn from_json_uses_defaults_for_empty_object() {
        assert_eq!(FieldConfig::from_json(&json!({})), FieldConfig::default());
        let d = FieldConfig::default();
        assert_eq!(d.kind, FieldKind::Integral);
        assert_eq!(d.domain, Domain::new(-5.0, 5.0, -5.0, 5.0));
        assert_eq!((d.coeff_a, d.coeff_b, d.coeff_c), (1.0, 1.0, 0.0));
    }

    #[test]
    fn from_json_reads_each_key_independently() {
        let cfg = FieldConfig::from_json(&json!({"kind": "trig", "x_max": 8, "coeff_c": 2.5}));
        assert_eq!(cfg.kind, FieldKind::Trig);
        assert_eq!(cfg.domain.x_max, 8.0);
        assert_eq!(cfg.domain.x_min, -5.0);
        assert_eq!(cfg.coeff_c, 2.5);
    }

    #[test]
    fn from_json_reads_query_string_keys() {
        let cfg = FieldConfig::from_json(&json!({"type": "function", "xMin": -2, "coeffA": 3}));
        assert_eq!(cfg.kind, FieldKind::Trig);
        assert_eq!(cfg.domain.x_min, -2.0);
        assert_eq!(cfg.domain.x_max, 5.0);
        assert_eq!(cfg.coeff_a, 3.0);
        assert_ne!(cfg, FieldConfig::default());
    }

    #[test]
    fn from_json_parses_numeric_strings_from_query_keys() {
        let params = json!({"yMax": "2.5", "coeffC": " 4 ", "coeffB": "wide"});
        let cfg = FieldConfig::from_json(&params);
        assert_eq!(cfg.domain.y_max, 2.5);
        assert_eq!(cfg.coeff_c, 4.0);
        assert_eq!(cfg.coeff_b, 1.0);
    }

    #[test]
    fn from_json_prefers_snake_case_keys() {
        let cfg = FieldConfig::from_json(&json!({
            "kind": "exponential",
            "type": "trig",
            "x_max": 9,
            "xMax": 1,
        }));
        assert_eq!(cfg.kind, FieldKind::Exponential);
        assert_eq!(cfg.domain.x_max, 9.0);
    }

    #[test]
    fn validate_rejects_inverted_axes() {
        let mut cfg = FieldConfig::default();
        cfg.domain.x_min = 5.0;
        assert!(matches!(cfg.validate(), Err(EngineError::InvalidDomain(_))));

        let mut cfg = FieldConfig::default();
        cfg.domain.y_max = cfg.domain.y_min;
        assert!(matches!(cfg.validate(), Err(EngineError::InvalidDomain(_))));
    }

    #[test]
    fn validate_rejects_non_finite_values() {
        let mut cfg = FieldConfig::default();
        cfg.domain.x_max = f64::INFINITY;
        assert!(matches!(cfg.validate(), Err(EngineError::InvalidDomain(_))));

        let mut cfg = FieldConfig::default();
        cfg.coeff_b = f64::NAN;
        assert!(matches!(cfg.validate(), Err(EngineError::InvalidParam { .. })));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn kind() -> impl Strategy<Value = FieldKind> {
            prop_oneof![
                Just(FieldKind::Integral),
                Just(FieldKind::Trig),
                Just(FieldKind::Exponential),
                Just(FieldKind::Plain),
            ]
        }

        proptest! {
            #[test]
            fn evaluation_is_finite_for_moderate_inputs(
                k in kind(),
                a in -10.0_f64..10.0,
                b in 0.0_f64..10.0,
                c in -10.0_f64..10.0,
                x in -100.0_f64..100.0,
                y in -100.0_f64..100.0,
            ) {
                let z = evaluate(x, y, &config(k, a, b, c));
                prop_assert!(z.is_finite(), "non-finite z = {z} at ({x}, {y})");
            }
        }
    }
}
