//! The Deleglise-Rivat driver.
//!
//! Same top-level formula as [`crate::drivers::lmo`],
//! `pi(x) = S1 + S2 + pi(y) - 1 - P2`, but grounded on the `D`-refined
//! factor encoding upstream work (see [`crate::tables::factor_table::FactorTableD`])
//! intends for the hard leaves. This engine's hard-leaf implementation
//! ([`crate::leaves::hard`]) uses the plain 210-wheel `FactorTable`
//! uniformly for both drivers rather than switching encodings per driver —
//! the two drivers are kept as separate entry points because they are a
//! distinct part of the public surface, not because their internals
//! currently diverge.

use crate::error::Result;
use crate::leaves::{easy, hard, ordinary, tail};
use crate::tables::factor_table::FactorTable;
use crate::tables::phi_tiny;
use crate::tables::pi_table::PiTable;

use super::{check_x_bound, resolve_alpha};

/// `pi(x)` via the Deleglise-Rivat method. `alpha <= 0.0` picks a default
/// tuning factor.
pub fn pi(x: u128, alpha: f64, threads: usize) -> Result<i128> {
    if x < 2 {
        return Ok(0);
    }
    let alpha = resolve_alpha(alpha, x);
    check_x_bound(x, alpha)?;

    let x13 = crate::math::icbrt(x);
    let y = ((alpha * x13 as f64) as u64).max(1);
    let z = (x / y.max(1) as u128) as u64;
    let c = phi_tiny::get_c(y);
    let sqrt_x = crate::math::isqrt(x);
    let sqrty = crate::math::isqrt(y as u128);

    let prime_limit = y.max(sqrt_x).max(2);
    let primes = crate::sieve::primes_vector_1indexed(prime_limit);
    let pi_table = PiTable::new(prime_limit);
    let factor_table = FactorTable::new(y);

    let pi_of_y = pi_table.pi(y.min(pi_table.max_cached()));
    let pi_sqrty = pi_table.pi(sqrty.min(pi_table.max_cached()));
    let sqrtz = crate::math::isqrt(z as u128);
    let pi_sqrtz = pi_table.pi(sqrtz.min(y).min(pi_table.max_cached()));

    let s1 = ordinary::s1(x, y, c, &primes, threads);
    let s2_easy = easy::easy_leaf_sum(x, z, y, pi_sqrty, pi_of_y, &primes, &pi_table, threads);
    let s2_hard = hard::hard_leaf_sum(
        x, z, y, c, pi_sqrty, pi_sqrtz, &primes, &pi_table, &factor_table, threads,
    );
    let s2 = s2_easy + s2_hard;

    let p2 = tail::p2(x, sqrt_x, pi_of_y, &primes, &pi_table, threads);

    Ok(s1 + s2 + pi_of_y as i128 - 1 - p2)
}
