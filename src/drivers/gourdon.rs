//! The Gourdon driver.
//!
//! `pi(x) = A - B + C + D + Phi0 + Sigma`, with independently tunable
//! `y = floor(alpha_y * x^(1/3))` and `z = floor(alpha_z * y)`, each clamped
//! to stay within `[x^(1/3), sqrt(x))`, and `k = get_k(x)`.
//!
//! This engine's easy-leaf module ([`crate::leaves::easy`]) answers both the
//! clustered term `A` and the trivial term `C` with a single `pi`-table
//! lookup formula; Gourdon's split normally routes `A` through
//! [`crate::tables::segmented_pi_table::SegmentedPiTable`] to avoid
//! materializing a dense `pi` table out to `sqrt(x)`. Here `A` and `C` are
//! computed together as one combined value (`ac`, playing the role of
//! `A + C` in the formula below) against the dense [`PiTable`] this driver
//! already builds for `B`'s own lookups.
//!
//! `ac` and `d` share the same `pi_sqrty`/`pi_sqrtz` split the
//! Deleglise-Rivat driver uses for `S2_easy`/`S2_hard`: `d` (the hard
//! leaves) owns `b` up to `pi_sqrtz`, `ac` owns `b` above `pi_sqrty` up to
//! `pi_x13` (Gourdon's own upper bound for the easy leaves, in place of
//! `pi(y)`), and the two overlap on `(pi_sqrty, pi_sqrtz]` exactly the way
//! `easy_leaf_row`'s `min_sparse` bound and `hard_leaf_sum`'s prime-pair
//! loop partition that range between them.

use crate::error::Result;
use crate::leaves::{easy, hard, ordinary, sigma, tail};
use crate::tables::factor_table::FactorTable;
use crate::tables::phi_tiny;
use crate::tables::pi_table::PiTable;

use super::check_x_bound;

/// `pi(x)` via Gourdon's method. `alpha_y <= 0.0` / `alpha_z <= 0.0` pick
/// default tuning factors.
pub fn pi(x: u128, alpha_y: f64, alpha_z: f64, threads: usize) -> Result<i128> {
    if x < 2 {
        return Ok(0);
    }
    let alpha_y = if alpha_y > 0.0 { alpha_y } else { super::default_alpha(x) };
    let alpha_z = if alpha_z > 0.0 { alpha_z } else { 1.0 };
    check_x_bound(x, alpha_y)?;

    let x13 = crate::math::icbrt(x).max(2);
    let sqrt_x = crate::math::isqrt(x).max(x13 + 2);

    let y_raw = (alpha_y * x13 as f64) as u64;
    let y = y_raw.clamp(x13 + 1, sqrt_x.saturating_sub(1).max(x13 + 1));

    let z_raw = (alpha_z * y as f64) as u64;
    let z = z_raw.clamp(y, sqrt_x.saturating_sub(1).max(y));

    let k = phi_tiny::get_k(x);
    let sqrty = crate::math::isqrt(y as u128);
    let sqrtz = crate::math::isqrt(z as u128);

    let prime_limit = sqrt_x.max(y).max(z);
    let primes = crate::sieve::primes_vector_1indexed(prime_limit);
    let pi_table = PiTable::new(prime_limit);
    let factor_table = FactorTable::new(y);

    let pi_x13 = pi_table.pi(x13.min(pi_table.max_cached()));
    let pi_y = pi_table.pi(y.min(pi_table.max_cached()));
    let pi_sqrty = pi_table.pi(sqrty.min(pi_table.max_cached()));
    let pi_sqrtz = pi_table.pi(sqrtz.min(y).min(pi_table.max_cached()));

    let ac = easy::easy_leaf_sum(x, z, y, pi_sqrty, pi_x13, &primes, &pi_table, threads);
    let d = hard::hard_leaf_sum(
        x, z, y, k, pi_sqrty, pi_sqrtz, &primes, &pi_table, &factor_table, threads,
    );
    let b_term = tail::b(x, sqrt_x, pi_y, &primes, &pi_table, threads);
    let phi0 = ordinary::phi0(x, z, k, &primes, threads);
    let sigma_term = sigma::sigma_sum(x, x13, sqrt_x, y, sqrty, sqrtz, k, &primes, &pi_table);

    Ok(ac - b_term + d + phi0 + sigma_term as i128)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gourdon_matches_known_small_values() {
        for &(x, expected) in &[(100u128, 25i128), (1_000, 168), (10_000, 1229)] {
            let got = pi(x, 2.0, 1.0, 1).unwrap();
            assert_eq!(got, expected, "pi({x}) mismatch");
        }
    }

    #[test]
    fn gourdon_agrees_with_lmo() {
        for x in [50_000u128, 300_000] {
            let g = pi(x, 2.0, 1.0, 1).unwrap();
            let lmo = crate::drivers::lmo::pi(x, 1.5, 1).unwrap();
            assert_eq!(g, lmo, "pi({x}) driver disagreement");
        }
    }

    #[test]
    fn gourdon_below_two_is_zero() {
        assert_eq!(pi(0, 2.0, 1.0, 1).unwrap(), 0);
        assert_eq!(pi(1, 2.0, 1.0, 1).unwrap(), 0);
    }

    #[test]
    fn gourdon_is_thread_invariant() {
        let x = 300_000u128;
        let single = pi(x, 2.0, 1.0, 1).unwrap();
        let multi = pi(x, 2.0, 1.0, 4).unwrap();
        assert_eq!(single, multi);
    }
}
