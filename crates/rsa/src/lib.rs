#![deny(unsafe_code)]
//! Textbook RSA over small primes.
//!
//! [`derive`] walks the full key derivation and one encrypt/decrypt round
//! trip, recording a human-readable line per stage. Nothing here is fit for
//! real cryptography: keys are tiny, `e` is the smallest coprime exponent, and
//! there is no padding.
//!
//! Non-prime factors are flagged rather than rejected so the failure mode can
//! be shown; the only hard errors are a zero factor and a modulus that does
//! not fit in `u64`.

pub mod arith;

pub use arith::{gcd, is_prime, mod_inverse, mod_pow};

use mathviz_core::error::EngineError;
use mathviz_core::params::param_u64;
use mathviz_core::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const DEFAULT_P: u64 = 11;
const DEFAULT_Q: u64 = 13;
const DEFAULT_MESSAGE: u64 = 42;
/// First public exponent tried.
const FIRST_EXPONENT: u64 = 3;

/// One line of the derivation trace. `step` counts from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceLine {
    pub step: usize,
    pub description: String,
}

/// Every intermediate value of one key derivation and round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsaDerivation {
    pub p: u64,
    pub q: u64,
    pub p_is_prime: bool,
    pub q_is_prime: bool,
    pub n: u64,
    pub phi: u64,
    pub e: u64,
    pub d: u64,
    pub message: u64,
    pub ciphertext: u64,
    pub decrypted: u64,
    pub trace: Vec<TraceLine>,
}

impl RsaDerivation {
    /// Whether decryption recovered the message.
    pub fn round_trips(&self) -> bool {
        self.decrypted == self.message
    }
}

/// Smallest `e >= 3` coprime to `phi`, scanning while `e < phi`.
///
/// When the scan runs out, the last value tried is returned even though it is
/// not coprime; callers check with [`gcd`].
pub fn choose_exponent(phi: u64) -> u64 {
    let mut e = FIRST_EXPONENT;
    while gcd(e, phi) != 1 && e < phi {
        e += 1;
    }
    e
}

/// Derives a key pair from `p` and `q`, then encrypts and decrypts `message`.
///
/// Computes on non-prime factors and on `message >= n`, logging a warning;
/// the round trip is only guaranteed for distinct primes and `message < n`.
/// When `e` has no inverse mod `phi`, `d` falls back to 1.
///
/// Fails with `InvalidParam` if either factor is zero or `p · q` overflows.
pub fn derive(p: u64, q: u64, message: u64) -> Result<RsaDerivation, EngineError> {
    for (name, value) in [("p", p), ("q", q)] {
        if value == 0 {
            return Err(EngineError::InvalidParam {
                name: name.into(),
                reason: "must be at least 1".into(),
            });
        }
    }
    let n = p.checked_mul(q).ok_or_else(|| EngineError::InvalidParam {
        name: "q".into(),
        reason: format!("p * q overflows u64 for p = {p}, q = {q}"),
    })?;
    let phi = (p - 1) * (q - 1);

    let p_is_prime = is_prime(p);
    let q_is_prime = is_prime(q);
    if !p_is_prime || !q_is_prime {
        log::warn!("rsa factors are not both prime (p = {p}, q = {q}); round trip may fail");
    }
    if message >= n {
        log::warn!("rsa message {message} is not below n = {n}; round trip may fail");
    }

    let e = choose_exponent(phi);
    let d = mod_inverse(e, phi).unwrap_or_else(|| {
        log::warn!("e = {e} has no inverse mod phi = {phi}; using d = 1");
        1
    });
    let ciphertext = mod_pow(message, e, n);
    let decrypted = mod_pow(ciphertext, d, n);

    let primality = |v: u64, prime: bool| {
        if prime {
            format!("{v}")
        } else {
            format!("{v} (not prime)")
        }
    };
    let exponent = if gcd(e, phi) == 1 {
        format!("Choose e = {e}, the smallest e >= 3 with gcd(e, phi) = 1")
    } else {
        format!("No e < phi is coprime to phi; stopped at e = {e}")
    };
    let lines = [
        format!(
            "Choose primes p = {} and q = {}",
            primality(p, p_is_prime),
            primality(q, q_is_prime)
        ),
        format!("n = p * q = {p} * {q} = {n}"),
        format!("phi = (p - 1) * (q - 1) = {} * {} = {phi}", p - 1, q - 1),
        exponent,
        format!("d = e^-1 mod phi = {d}, since ({e} * {d}) mod {phi} = {}", mul_mod(e, d, phi)),
        format!("Public key (e, n) = ({e}, {n}); private key (d, n) = ({d}, {n})"),
        format!("Encrypt: c = m^e mod n = {message}^{e} mod {n} = {ciphertext}"),
        format!("Decrypt: m = c^d mod n = {ciphertext}^{d} mod {n} = {decrypted}"),
    ];
    let trace = lines
        .into_iter()
        .enumerate()
        .map(|(i, description)| TraceLine {
            step: i + 1,
            description,
        })
        .collect();

    log::debug!("rsa p={p} q={q}: n={n} phi={phi} e={e} d={d} c={ciphertext}");
    Ok(RsaDerivation {
        p,
        q,
        p_is_prime,
        q_is_prime,
        n,
        phi,
        e,
        d,
        message,
        ciphertext,
        decrypted,
        trace,
    })
}

/// `(a · b) mod m`, with `m == 0` leaving the product unreduced modulo 2^64.
fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    if m == 0 {
        return a.wrapping_mul(b);
    }
    // Reduced below m, so it fits back into u64.
    (u128::from(a) * u128::from(b) % u128::from(m)) as u64
}

/// Parameters for the RSA engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RsaParams {
    pub p: u64,
    pub q: u64,
    pub message: u64,
}

impl Default for RsaParams {
    fn default() -> Self {
        Self {
            p: DEFAULT_P,
            q: DEFAULT_Q,
            message: DEFAULT_MESSAGE,
        }
    }
}

impl RsaParams {
    pub fn from_json(params: &Value) -> Self {
        Self {
            p: param_u64(params, "p", DEFAULT_P),
            q: param_u64(params, "q", DEFAULT_Q),
            message: param_u64(params, "message", DEFAULT_MESSAGE),
        }
    }
}

/// RSA walkthrough engine: each `step()` reveals one more trace line.
pub struct Rsa {
    params: RsaParams,
    derivation: RsaDerivation,
    revealed: usize,
}

impl Rsa {
    pub fn new(params: RsaParams) -> Result<Self, EngineError> {
        let derivation = derive(params.p, params.q, params.message)?;
        Ok(Self {
            params,
            derivation,
            revealed: 0,
        })
    }

    pub fn from_json(params: &Value) -> Result<Self, EngineError> {
        Self::new(RsaParams::from_json(params))
    }

    pub fn derivation(&self) -> &RsaDerivation {
        &self.derivation
    }

    /// Trace lines shown so far.
    pub fn revealed(&self) -> &[TraceLine] {
        &self.derivation.trace[..self.revealed]
    }
}

impl Engine for Rsa {
    fn step(&mut self) -> Result<(), EngineError> {
        if !self.is_finished() {
            self.revealed += 1;
        }
        Ok(())
    }

    fn frame(&self) -> Value {
        json!({
            "derivation": self.derivation,
            "revealed": self.revealed(),
        })
    }

    fn is_finished(&self) -> bool {
        self.revealed >= self.derivation.trace.len()
    }

    fn params(&self) -> Value {
        json!({
            "p": self.params.p,
            "q": self.params.q,
            "message": self.params.message,
        })
    }

    fn param_schema(&self) -> Value {
        json!({
            "p": {
                "type": "integer",
                "default": DEFAULT_P,
                "min": 1,
                "description": "First prime factor"
            },
            "q": {
                "type": "integer",
                "default": DEFAULT_Q,
                "min": 1,
                "description": "Second prime factor"
            },
            "message": {
                "type": "integer",
                "default": DEFAULT_MESSAGE,
                "min": 0,
                "description": "Plaintext integer; must be below p * q to round-trip"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textbook_example() {
        let r = derive(11, 13, 42).unwrap();
        assert_eq!(r.n, 143);
        assert_eq!(r.phi, 120);
        assert_eq!(r.e, 7);
        assert_eq!(r.d, 103);
        assert_eq!(r.ciphertext, 81);
        assert_eq!(r.decrypted, 42);
        assert!(r.p_is_prime && r.q_is_prime);
        assert!(r.round_trips());
    }

    #[test]
    fn derivation_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RsaDerivation>();
        assert_send_sync::<Rsa>();
    }

    #[test]
    fn trace_has_eight_numbered_lines() {
        let r = derive(11, 13, 42).unwrap();
        assert_eq!(r.trace.len(), 8);
        for (i, line) in r.trace.iter().enumerate() {
            assert_eq!(line.step, i + 1);
        }
        assert_eq!(r.trace[1].description, "n = p * q = 11 * 13 = 143");
        assert!(r.trace[6].description.ends_with("= 81"));
        assert!(r.trace[7].description.ends_with("= 42"));
    }

    #[test]
    fn non_prime_factors_are_flagged_not_rejected() {
        let r = derive(4, 6, 5).unwrap();
        assert!(!r.p_is_prime);
        assert!(!r.q_is_prime);
        assert_eq!(r.phi, 15);
        assert_eq!(r.e, 4);
        assert!(r.trace[0].description.contains("(not prime)"));
    }

    #[test]
    fn equal_primes_still_compute() {
        let r = derive(11, 11, 42).unwrap();
        assert_eq!(r.n, 121);
        assert_eq!(r.phi, 100);
        assert_eq!(r.e, 3);
        assert_eq!(r.d, 67);
    }

    #[test]
    fn tiny_phi_keeps_first_exponent() {
        // phi = 2: the scan never starts, and 3 happens to be coprime.
        let r = derive(2, 3, 5).unwrap();
        assert_eq!(r.e, 3);
        assert_eq!(r.d, 1);
        assert!(r.round_trips());
    }

    #[test]
    fn missing_inverse_falls_back_to_one() {
        // phi = 0: gcd(3, 0) = 3 and the scan cannot advance.
        let r = derive(1, 7, 3).unwrap();
        assert_eq!(r.phi, 0);
        assert_eq!(r.e, 3);
        assert_eq!(r.d, 1);
        assert!(r.trace[3].description.starts_with("No e < phi"));
    }

    #[test]
    fn message_not_below_n_is_computed() {
        let r = derive(11, 13, 200).unwrap();
        assert_eq!(r.decrypted, 200 % 143);
        assert!(!r.round_trips());
    }

    #[test]
    fn zero_factor_is_rejected() {
        assert!(matches!(
            derive(0, 13, 1),
            Err(EngineError::InvalidParam { ref name, .. }) if name == "p"
        ));
        assert!(matches!(
            derive(11, 0, 1),
            Err(EngineError::InvalidParam { ref name, .. }) if name == "q"
        ));
    }

    #[test]
    fn overflowing_modulus_is_rejected() {
        assert!(derive(u64::MAX, 3, 1).is_err());
    }

    #[test]
    fn engine_reveals_one_line_per_step() {
        let mut engine = Rsa::from_json(&json!({})).unwrap();
        assert!(engine.revealed().is_empty());
        engine.step().unwrap();
        engine.step().unwrap();
        assert_eq!(engine.revealed().len(), 2);
        for _ in 0..10 {
            engine.step().unwrap();
        }
        assert!(engine.is_finished());
        assert_eq!(engine.frame()["revealed"].as_array().unwrap().len(), 8);
        assert_eq!(engine.frame()["derivation"]["d"], 103);
    }

    #[test]
    fn engine_reads_params() {
        let engine = Rsa::from_json(&json!({"p": 17, "q": 19, "message": 100})).unwrap();
        assert_eq!(engine.derivation().n, 323);
        assert!(engine.derivation().round_trips());
    }

    #[test]
    fn param_schema_covers_every_param() {
        let engine = Rsa::from_json(&json!({})).unwrap();
        let schema = engine.param_schema();
        for key in engine.params().as_object().unwrap().keys() {
            assert!(schema.get(key).is_some(), "schema missing parameter: {key}");
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        const PRIMES: [u64; 15] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];

        proptest! {
            #[test]
            fn distinct_primes_round_trip(
                i in 0..PRIMES.len(),
                j in 0..PRIMES.len(),
                m_seed: u64,
            ) {
                prop_assume!(i != j);
                let (p, q) = (PRIMES[i], PRIMES[j]);
                let message = m_seed % (p * q);
                let r = derive(p, q, message).unwrap();
                prop_assert_eq!(gcd(r.e, r.phi), 1);
                prop_assert_eq!(r.e * r.d % r.phi, 1);
                prop_assert_eq!(r.decrypted, message);
            }
        }
    }
}
