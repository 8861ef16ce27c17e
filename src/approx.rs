//! Analytic approximations: the logarithmic integral `Li(x)`, the Riemann
//! prime-counting approximation `RiemannR(x)`, and their inverses.
//!
//! These never participate in an exact `pi(x)` result; they only seed
//! tuning heuristics (`alpha`), the hard leaves' progress estimate, and
//! `nth_prime`'s bisection starting point. Approximate by design, so plain
//! `f64` series are the right tool rather than anything the rest of this
//! engine uses for exact arithmetic.

const EULER_MASCHERONI: f64 = 0.5772156649015329;

/// `Li(x)`, the logarithmic integral, via the convergent series
/// `li(x) = gamma + ln(ln x) + sum_{k=1}^inf (ln x)^k / (k * k!)`.
pub fn li(x: f64) -> f64 {
    if x < 2.0 {
        return 0.0;
    }
    let lnx = x.ln();
    let mut term = 1.0;
    let mut sum = 0.0;
    for k in 1..200 {
        term *= lnx / k as f64;
        let contribution = term / k as f64;
        sum += contribution;
        if contribution.abs() < 1e-14 * sum.abs().max(1.0) {
            break;
        }
    }
    EULER_MASCHERONI + lnx.ln() + sum
}

/// `Li^-1(x)`: inverts [`li`] by Newton's method, seeded by the classic
/// `x * ln(x)` estimate. `li'(t) = 1 / ln(t)`.
pub fn li_inverse(x: f64) -> f64 {
    if x < 2.0 {
        return 2.0;
    }
    let mut t = (x * x.max(2.0).ln()).max(2.0);
    for _ in 0..100 {
        let f = li(t) - x;
        let deriv = 1.0 / t.ln().max(1e-10);
        let step = f / deriv;
        let next = t - step;
        if !next.is_finite() || next < 2.0 {
            break;
        }
        if (next - t).abs() < 1e-6 * t.max(1.0) {
            t = next;
            break;
        }
        t = next;
    }
    t
}

/// Mobius function, computed by trial division; only ever called with the
/// small `n` that occur in [`riemann_r`]'s truncated series.
fn mobius(mut n: u64) -> i64 {
    if n == 1 {
        return 1;
    }
    let mut factors = 0;
    let mut p = 2u64;
    while p * p <= n {
        if n % p == 0 {
            n /= p;
            factors += 1;
            if n % p == 0 {
                return 0;
            }
        }
        p += 1;
    }
    if n > 1 {
        factors += 1;
    }
    if factors % 2 == 0 {
        1
    } else {
        -1
    }
}

/// `R(x) = sum_{n=1}^inf mu(n)/n * li(x^(1/n))`, Riemann's prime-counting
/// approximation, truncated once `x^(1/n) < 2`.
pub fn riemann_r(x: f64) -> f64 {
    if x < 2.0 {
        return 0.0;
    }
    let mut sum = 0.0;
    for n in 1..64u64 {
        let root = x.powf(1.0 / n as f64);
        if root < 2.0 {
            break;
        }
        let mu = mobius(n);
        if mu != 0 {
            sum += mu as f64 / n as f64 * li(root);
        }
    }
    sum
}

/// `R^-1(x)`: inverts [`riemann_r`] by Newton's method seeded from
/// [`li_inverse`], since `R` and `li` agree asymptotically.
pub fn riemann_r_inverse(x: f64) -> f64 {
    if x < 2.0 {
        return 2.0;
    }
    let mut t = li_inverse(x).max(2.0);
    for _ in 0..100 {
        let f = riemann_r(t) - x;
        let deriv = 1.0 / t.ln().max(1e-10);
        let next = t - f / deriv;
        if !next.is_finite() || next < 2.0 {
            break;
        }
        if (next - t).abs() < 1e-6 * t.max(1.0) {
            t = next;
            break;
        }
        t = next;
    }
    t
}

/// Bisects `pi` around the `Li^-1(n)` estimate to find the n-th prime.
/// `pi_fn` is the caller's exact prime-counting function (so this module
/// never depends on the drivers directly).
pub fn nth_prime(n: u64, pi_fn: impl Fn(u128) -> u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let seed = li_inverse(n as f64).max(2.0) as u128;
    let mut lo = seed.saturating_sub(seed / 8).max(2);
    let mut hi = seed + seed / 8 + 1000;

    while pi_fn(lo) >= n as u128 {
        lo = lo.saturating_sub((lo / 2).max(64)).max(2);
        if lo == 2 {
            break;
        }
    }
    while pi_fn(hi) < n as u128 {
        hi = hi.saturating_mul(2).max(hi + 1000);
    }

    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pi_fn(mid) < n as u128 {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn li_matches_known_anchors() {
        // li(10^6) ~ 78627.5, pi(10^6) = 78498: close within the known
        // error bound for this range.
        let v = li(1_000_000.0);
        assert!((v - 78627.5).abs() < 5.0, "li(10^6) = {v}");
    }

    #[test]
    fn li_inverse_round_trips() {
        let x = 1_000_000.0;
        let y = li(x);
        let back = li_inverse(y);
        assert!((back - x).abs() < 1.0, "expected ~{x}, got {back}");
    }

    #[test]
    fn riemann_r_is_closer_to_pi_than_li_at_moderate_x() {
        let x = 1_000_000.0;
        let pi_x = 78498.0;
        let li_err = (li(x) - pi_x).abs();
        let r_err = (riemann_r(x) - pi_x).abs();
        assert!(r_err <= li_err + 1.0, "R err {r_err} not <= li err {li_err}");
    }

    #[test]
    fn nth_prime_matches_known_values() {
        let primes = crate::sieve::primes_vector_1indexed(2_000_000);
        let pi_fn = |x: u128| -> u128 {
            let x = x.min(2_000_000) as u64;
            primes.iter().skip(1).filter(|&&p| p <= x).count() as u128
        };
        assert_eq!(nth_prime(1, &pi_fn), 2);
        assert_eq!(nth_prime(2, &pi_fn), 3);
        assert_eq!(nth_prime(10, &pi_fn), 29);
        assert_eq!(nth_prime(1000, &pi_fn), 7919);
    }

    #[test]
    fn mobius_matches_known_values() {
        assert_eq!(mobius(1), 1);
        assert_eq!(mobius(2), -1);
        assert_eq!(mobius(4), 0);
        assert_eq!(mobius(6), 1);
        assert_eq!(mobius(30), -1);
    }
}
