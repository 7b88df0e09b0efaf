//! Integer number theory for small-key RSA.

/// Greatest common divisor, iterative Euclid. `gcd(a, 0) == a`.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `d` with `(a · d) mod m == 1`, via the extended Euclidean algorithm.
///
/// `None` when `m <= 1` or `gcd(a, m) != 1`.
pub fn mod_inverse(a: u64, m: u64) -> Option<u64> {
    if m <= 1 {
        return None;
    }
    let modulus = i128::from(m);
    let (mut old_r, mut r) = (i128::from(a % m), modulus);
    let (mut old_s, mut s) = (1_i128, 0_i128);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }
    if old_r != 1 {
        return None;
    }
    u64::try_from(old_s.rem_euclid(modulus)).ok()
}

/// `base^exp mod modulus` by square-and-multiply.
///
/// Intermediate products are widened to `u128`, so any `u64` modulus is safe.
/// Returns `1 % modulus` for `exp == 0`.
///
/// # Panics
///
/// Panics if `modulus` is zero.
pub fn mod_pow(base: u64, mut exp: u64, modulus: u64) -> u64 {
    let m = u128::from(modulus);
    let mut result = 1 % m;
    let mut base = u128::from(base) % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % m;
        }
        base = base * base % m;
        exp >>= 1;
    }
    // result < modulus, which fits in u64.
    result as u64
}

/// Trial-division primality test.
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}
