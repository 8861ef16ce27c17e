//! Standalone partial-sum entry points, one per CLI flag that asks for a
//! single term of a driver's formula instead of the full `pi(x)`. Each
//! function repeats the table/prime setup its parent driver does, scoped
//! down to whatever that one term needs.

use crate::error::Result;
use crate::leaves::{easy, hard, ordinary, sigma, tail};
use crate::tables::factor_table::FactorTable;
use crate::tables::phi_tiny;
use crate::tables::pi_table::PiTable;

use super::{check_x_bound, resolve_alpha};

/// `P2(x, y)`, the two-large-primes tail from the LMO / Deleglise-Rivat
/// formula.
pub fn p2(x: u128, alpha: f64, threads: usize) -> Result<i128> {
    let alpha = resolve_alpha(alpha, x);
    check_x_bound(x, alpha)?;
    let x13 = crate::math::icbrt(x);
    let y = ((alpha * x13 as f64) as u64).max(1);
    let sqrt_x = crate::math::isqrt(x);
    let primes = crate::sieve::primes_vector_1indexed(y.max(sqrt_x).max(2));
    let pi_table = PiTable::new(y.max(sqrt_x).max(2));
    let pi_of_y = pi_table.pi(y.min(pi_table.max_cached()));
    Ok(tail::p2(x, sqrt_x, pi_of_y, &primes, &pi_table, threads))
}

/// `S1(x, y, c)`, the ordinary-leaf sum from the LMO / Deleglise-Rivat
/// formula.
pub fn s1(x: u128, alpha: f64, threads: usize) -> Result<i128> {
    let alpha = resolve_alpha(alpha, x);
    check_x_bound(x, alpha)?;
    let x13 = crate::math::icbrt(x);
    let y = ((alpha * x13 as f64) as u64).max(1);
    let c = phi_tiny::get_c(y);
    let primes = crate::sieve::primes_vector_1indexed(y.max(2));
    Ok(ordinary::s1(x, y, c, &primes, threads))
}

/// `S2_hard(x, y, z, c)`, the hard-leaf sum from the LMO / Deleglise-Rivat
/// formula.
pub fn s2_hard(x: u128, alpha: f64, threads: usize) -> Result<i128> {
    let alpha = resolve_alpha(alpha, x);
    check_x_bound(x, alpha)?;
    let x13 = crate::math::icbrt(x);
    let y = ((alpha * x13 as f64) as u64).max(1);
    let z = (x / y.max(1) as u128) as u64;
    let c = phi_tiny::get_c(y);
    let sqrt_x = crate::math::isqrt(x);
    let sqrty = crate::math::isqrt(y as u128);
    let sqrtz = crate::math::isqrt(z as u128);
    let prime_limit = y.max(sqrt_x).max(2);
    let primes = crate::sieve::primes_vector_1indexed(prime_limit);
    let pi_table = PiTable::new(prime_limit);
    let factor_table = FactorTable::new(y);
    let pi_sqrty = pi_table.pi(sqrty.min(pi_table.max_cached()));
    let pi_sqrtz = pi_table.pi(sqrtz.min(y).min(pi_table.max_cached()));
    Ok(hard::hard_leaf_sum(
        x, z, y, c, pi_sqrty, pi_sqrtz, &primes, &pi_table, &factor_table, threads,
    ))
}

fn gourdon_bounds(x: u128, alpha_y: f64, alpha_z: f64) -> (u64, u64, u64, u64, u64) {
    let x13 = crate::math::icbrt(x).max(2);
    let sqrt_x = crate::math::isqrt(x).max(x13 + 2);
    let alpha_y = if alpha_y > 0.0 { alpha_y } else { super::default_alpha(x) };
    let alpha_z = if alpha_z > 0.0 { alpha_z } else { 1.0 };
    let y_raw = (alpha_y * x13 as f64) as u64;
    let y = y_raw.clamp(x13 + 1, sqrt_x.saturating_sub(1).max(x13 + 1));
    let z_raw = (alpha_z * y as f64) as u64;
    let z = z_raw.clamp(y, sqrt_x.saturating_sub(1).max(y));
    (x13, sqrt_x, y, z, phi_tiny::get_k(x))
}

/// `A(x, y) + C(x, y)`, Gourdon's clustered and trivial easy leaves, computed
/// together as this engine's [`easy`] module does.
pub fn ac(x: u128, alpha_y: f64, alpha_z: f64, threads: usize) -> Result<i128> {
    check_x_bound(x, if alpha_y > 0.0 { alpha_y } else { super::default_alpha(x) })?;
    let (x13, sqrt_x, y, z, _k) = gourdon_bounds(x, alpha_y, alpha_z);
    let sqrty = crate::math::isqrt(y as u128);
    let prime_limit = sqrt_x.max(y).max(z);
    let primes = crate::sieve::primes_vector_1indexed(prime_limit);
    let pi_table = PiTable::new(prime_limit);
    let pi_x13 = pi_table.pi(x13.min(pi_table.max_cached()));
    let pi_sqrty = pi_table.pi(sqrty.min(pi_table.max_cached()));
    Ok(easy::easy_leaf_sum(x, z, y, pi_sqrty, pi_x13, &primes, &pi_table, threads))
}

/// `B(x, y)`, Gourdon's ordinary-leaf tail term.
pub fn b(x: u128, alpha_y: f64, alpha_z: f64, threads: usize) -> Result<i128> {
    check_x_bound(x, if alpha_y > 0.0 { alpha_y } else { super::default_alpha(x) })?;
    let (_x13, sqrt_x, y, z, _k) = gourdon_bounds(x, alpha_y, alpha_z);
    let prime_limit = sqrt_x.max(y).max(z);
    let primes = crate::sieve::primes_vector_1indexed(prime_limit);
    let pi_table = PiTable::new(prime_limit);
    let pi_y = pi_table.pi(y.min(pi_table.max_cached()));
    Ok(tail::b(x, sqrt_x, pi_y, &primes, &pi_table, threads))
}

/// `D(x, y, z, k)`, Gourdon's hard-leaf sum.
pub fn d(x: u128, alpha_y: f64, alpha_z: f64, threads: usize) -> Result<i128> {
    check_x_bound(x, if alpha_y > 0.0 { alpha_y } else { super::default_alpha(x) })?;
    let (_x13, sqrt_x, y, z, k) = gourdon_bounds(x, alpha_y, alpha_z);
    let sqrty = crate::math::isqrt(y as u128);
    let sqrtz = crate::math::isqrt(z as u128);
    let prime_limit = sqrt_x.max(y).max(z);
    let primes = crate::sieve::primes_vector_1indexed(prime_limit);
    let pi_table = PiTable::new(prime_limit);
    let factor_table = FactorTable::new(y);
    let pi_sqrty = pi_table.pi(sqrty.min(pi_table.max_cached()));
    let pi_sqrtz = pi_table.pi(sqrtz.min(y).min(pi_table.max_cached()));
    Ok(hard::hard_leaf_sum(
        x, z, y, k, pi_sqrty, pi_sqrtz, &primes, &pi_table, &factor_table, threads,
    ))
}

/// `Phi0(x, z, k)`, Gourdon's ordinary-leaf head term.
pub fn phi0(x: u128, alpha_y: f64, alpha_z: f64, threads: usize) -> Result<i128> {
    check_x_bound(x, if alpha_y > 0.0 { alpha_y } else { super::default_alpha(x) })?;
    let (_x13, sqrt_x, y, z, k) = gourdon_bounds(x, alpha_y, alpha_z);
    let prime_limit = sqrt_x.max(y).max(z);
    let primes = crate::sieve::primes_vector_1indexed(prime_limit);
    Ok(ordinary::phi0(x, z, k, &primes, threads))
}

/// `Sigma(x, y, z, k)`, Gourdon's closed-form correction terms.
pub fn sigma(x: u128, alpha_y: f64, alpha_z: f64) -> Result<i128> {
    check_x_bound(x, if alpha_y > 0.0 { alpha_y } else { super::default_alpha(x) })?;
    let (x13, sqrt_x, y, z, k) = gourdon_bounds(x, alpha_y, alpha_z);
    let sqrty = crate::math::isqrt(y as u128);
    let sqrtz = crate::math::isqrt(z as u128);
    let prime_limit = sqrt_x.max(y).max(z);
    let primes = crate::sieve::primes_vector_1indexed(prime_limit);
    let pi_table = PiTable::new(prime_limit);
    Ok(sigma::sigma_sum(x, x13, sqrt_x, y, sqrty, sqrtz, k, &primes, &pi_table) as i128)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_lmo_terms_reconstruct_pi() {
        let x = 100_000u128;
        let alpha = 1.5;
        let threads = 1;
        let s1 = s1(x, alpha, threads).unwrap();
        let s2_hard = s2_hard(x, alpha, threads).unwrap();
        let p2 = p2(x, alpha, threads).unwrap();

        let x13 = crate::math::icbrt(x);
        let y = ((alpha * x13 as f64) as u64).max(1);
        let z = (x / y.max(1) as u128) as u64;
        let sqrt_x = crate::math::isqrt(x);
        let prime_limit = y.max(sqrt_x).max(2);
        let primes = crate::sieve::primes_vector_1indexed(prime_limit);
        let pi_table = PiTable::new(prime_limit);
        let sqrty = crate::math::isqrt(y as u128);
        let pi_of_y = pi_table.pi(y.min(pi_table.max_cached()));
        let pi_sqrty = pi_table.pi(sqrty.min(pi_table.max_cached()));
        let s2_easy = easy::easy_leaf_sum(x, z, y, pi_sqrty, pi_of_y, &primes, &pi_table, threads);

        assert_eq!(s1 + s2_easy + s2_hard + pi_of_y as i128 - 1 - p2, 9592);
    }

    #[test]
    fn partial_gourdon_terms_reconstruct_pi() {
        let x = 100_000u128;
        let expected = crate::drivers::gourdon::pi(x, 2.0, 1.0, 1).unwrap();
        let ac = ac(x, 2.0, 1.0, 1).unwrap();
        let b = b(x, 2.0, 1.0, 1).unwrap();
        let d = d(x, 2.0, 1.0, 1).unwrap();
        let phi0 = phi0(x, 2.0, 1.0, 1).unwrap();
        let sigma = sigma(x, 2.0, 1.0).unwrap();
        assert_eq!(ac - b + d + phi0 + sigma, expected);
    }
}
