//! Gourdon's closed-form correction sums `Sigma0..Sigma6`.
//!
//! Gourdon's decomposition leaves behind six boundary terms that can be
//! evaluated directly from `pi` at the algorithm's own cutoffs
//! (`x^(1/3)`, `sqrt(x)`, `sqrt(y)`, `sqrt(z)`, and the prime-index cutoff
//! `k`) without any leaf enumeration — the combinatorics of how many
//! square-free numbers of each shape survive the `A`/`B`/`C`/`D`/`Phi0`
//! split, counted in closed form rather than by sieving.
//!
//! `Sigma6` is the one exception: it sums `pi(floor(sqrt(x/p)))^2` over
//! primes `p` in `(sqrt(z), sqrt(y)]`, one `pi` lookup per prime. It does
//! *not* collapse into a closed form in `p`, because the square root
//! inside breaks the telescoping the other five terms rely on — so unlike
//! `Sigma0..Sigma5` it is summed one prime at a time here, not algebraically
//! simplified.

use crate::tables::pi_table::PiTable;

fn pi_at(n: u64, pi: &PiTable) -> i64 {
    pi.pi(n.min(pi.max_cached())) as i64
}

/// `Sigma0 = (k - 1) * (pi(x13) - k + 2)`, the contribution of numbers
/// `m <= x13` entirely built from the first `k` primes.
pub fn sigma0(x13: u64, k: u64, pi: &PiTable) -> i64 {
    let pi_x13 = pi_at(x13, pi);
    (k as i64 - 1) * (pi_x13 - k as i64 + 2)
}

/// `Sigma1 = pi(x13) * (pi(x13) - 1) / 2 - pi(y) * (pi(y) - 1) / 2`, the
/// pair-count difference between the `x13` and `y` prime ranges.
pub fn sigma1(x13: u64, y: u64, pi: &PiTable) -> i64 {
    let a = pi_at(x13, pi);
    let b = pi_at(y, pi);
    triangular(a) - triangular(b)
}

/// `Sigma2 = -(pi(sqrtz) - k + 1) * (pi(sqrtz) - k) / 2`, removing
/// prime-pairs already covered by the hard leaves below `sqrt(z)`.
pub fn sigma2(sqrtz: u64, k: u64, pi: &PiTable) -> i64 {
    let a = pi_at(sqrtz, pi) - k as i64 + 1;
    -triangular(a)
}

/// `Sigma3 = (pi(sqrty) - k + 1) * (k - 1)`, cross terms between the first
/// `k` primes and primes in `(sqrt(z), sqrt(y)]`.
pub fn sigma3(sqrty: u64, k: u64, pi: &PiTable) -> i64 {
    (pi_at(sqrty, pi) - k as i64 + 1) * (k as i64 - 1)
}

/// `Sigma4 = -sum_{k <= b < pi(sqrtz)} b`, the running prime-index total
/// consumed by the hard leaves' own `b` range.
pub fn sigma4(sqrtz: u64, k: u64, pi: &PiTable) -> i64 {
    let lo = k as i64;
    let hi = pi_at(sqrtz, pi);
    if hi < lo {
        return 0;
    }
    -(triangular(hi) - triangular(lo - 1))
}

/// `Sigma5 = pi(sqrtx) - pi(sqrty)`, the leftover prime count between
/// `sqrt(y)` and `sqrt(x)` that neither `A`/`C` nor `D` ever visits.
pub fn sigma5(sqrtx: u64, sqrty: u64, pi: &PiTable) -> i64 {
    pi_at(sqrtx, pi) - pi_at(sqrty, pi)
}

/// `Sigma6 = -sum_{sqrt(z) < p <= sqrt(y)} pi(floor(sqrt(x/p)))^2`.
pub fn sigma6(x: u128, sqrty: u64, sqrtz: u64, primes: &[u64], pi: &PiTable) -> i64 {
    let mut sum = 0i64;
    for &p in primes.iter() {
        if p <= sqrtz {
            continue;
        }
        if p > sqrty {
            break;
        }
        let inner = crate::math::isqrt(x / p as u128);
        let count = pi_at(inner, pi);
        sum -= count * count;
    }
    sum
}

fn triangular(n: i64) -> i64 {
    if n <= 0 {
        0
    } else {
        n * (n - 1) / 2
    }
}

/// The full `Sigma(x, y, z, k)` sum, `Sigma0 + Sigma1 + ... + Sigma6`.
#[allow(clippy::too_many_arguments)]
pub fn sigma_sum(
    x: u128,
    x13: u64,
    sqrtx: u64,
    y: u64,
    sqrty: u64,
    sqrtz: u64,
    k: u64,
    primes: &[u64],
    pi: &PiTable,
) -> i64 {
    sigma0(x13, k, pi)
        + sigma1(x13, y, pi)
        + sigma2(sqrtz, k, pi)
        + sigma3(sqrty, k, pi)
        + sigma4(sqrtz, k, pi)
        + sigma5(sqrtx, sqrty, pi)
        + sigma6(x, sqrty, sqrtz, primes, pi)
}
