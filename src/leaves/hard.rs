//! The hard leaves: `S2_hard` (LMO / Deleglise-Rivat) and `D` (Gourdon).
//!
//! Unlike the easy leaves (see [`crate::leaves::easy`]), prime index
//! `b <= pi(sqrt(y))` admits composite `m`, so there is no shortcut to a
//! single `pi`-table lookup: `phi(x/(primes[b]*m), b-1)` is answered by
//! tracking, per prime `primes[b]`, how many integers in a segment survive
//! sieving out `primes[1..b]` — the job of [`crate::engine_sieve::Sieve`].
//! [`crate::tables::factor_table::FactorTable`] supplies `mu(m)` and
//! `lpf(m)` in one packed lookup so the `lpf(m) > primes[b]` leaf condition
//! is a single comparison (`prime < factor_table.raw(idx)`).
//!
//! For `b` in `(pi(sqrt(y)), pi(sqrt(z))]`, `m` is itself forced prime (the
//! same square-free/`lpf` argument [`crate::leaves::easy`] relies on), but
//! `n = x/(primes[b]*m)` can still range well past what a dense `pi`-table
//! covers affordably, so this range is swept by the same segmented sieve as
//! the composite range below it rather than handed to `easy_leaf_sum`: `m`
//! is walked directly down the prime list instead of filtered out of a
//! `FactorTable` lookup, but `phi(n, b-1)` is still read off the sieve's
//! running count, not the `pi(n) - b + 2` shortcut.
//!
//! `min_b` is pinned at `max(c+1, 4)` (`primes[4] = 7`): every sieving prime
//! this module crosses off is `>= 7`, so the plain 210-wheel `FactorTable`
//! (which already excludes 2, 3, 5, 7) stays valid for every `m` it is
//! asked about. Blocks are handed out by [`LoadBalancerS2`], embarrassingly
//! parallel: each thread seeds its own `phi[]` row via
//! [`generate_phi`] at the start of its block, so no inter-thread state
//! survives past a single `get_work` call besides the running total.

use std::sync::Arc;

use crate::engine_sieve::Sieve;
use crate::load_balancer::{LoadBalancerS2, ThreadSettings};
use crate::phi_cache::generate_phi;
use crate::progress::ProgressBar;
use crate::tables::factor_table::FactorTable;
use crate::tables::pi_table::PiTable;

/// `S2_hard(x, y, z, c)` / `D(x, y, z, c)`, summed over prime index
/// `b` in `[max(c+1, 4), max_b]` and blocks of `[1, z]` handed out by a
/// fresh [`LoadBalancerS2`]. `b <= pi_sqrty` sums over composite `m`
/// (`FactorTable`-driven); `pi_sqrty < b <= max_b` sums over prime `m`
/// (walked directly off `primes`) to cover the range the easy leaves can't
/// reach with a dense `pi`-table lookup.
#[allow(clippy::too_many_arguments)]
pub fn hard_leaf_sum(
    x: u128,
    z: u64,
    y: u64,
    c: u64,
    pi_sqrty: u64,
    max_b: u64,
    primes: &[u64],
    pi: &PiTable,
    factor_table: &FactorTable,
    threads: usize,
) -> i128 {
    let min_b = (c as usize + 1).max(4);
    if min_b as u64 > max_b || min_b >= primes.len() {
        return 0;
    }
    let balancer = LoadBalancerS2::new(z);
    let num_threads = threads.max(1);
    let progress = crate::config::show_progress()
        .then(|| Arc::new(ProgressBar::new(z as usize, "S2_hard / D hard leaves")));

    let partials: Vec<i128> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..num_threads)
            .map(|_| {
                let progress = progress.clone();
                let balancer = &balancer;
                scope.spawn(move || {
                    let mut sieve = Sieve::new();
                    let mut local_sum = 0i128;
                    let mut prev: Option<ThreadSettings> = None;
                    while let Some((low, segments, segment_size)) = balancer.get_work(prev) {
                        let mut phi = generate_phi(low - 1, max_b, primes, pi);
                        let high = (low + segments * segment_size).min(z + 1);
                        if low < high {
                            local_sum += process_hard_block(
                                x,
                                y,
                                z,
                                min_b,
                                pi_sqrty as usize,
                                max_b as usize,
                                primes,
                                pi,
                                factor_table,
                                &mut sieve,
                                &mut phi,
                                low,
                                high,
                            );
                            if let Some(progress) = &progress {
                                progress.update((high - low) as usize);
                            }
                        }
                        prev = Some(ThreadSettings {
                            low,
                            segments,
                            segment_size,
                            sum: 0,
                            secs: 0.0,
                        });
                    }
                    local_sum
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    if let Some(progress) = progress {
        progress.finish();
    }

    partials.into_iter().sum()
}

/// One `[low, high)` block's contribution, for every `b` in
/// `[min_b, max_b]`. `phi[b]` is threaded through so each prime's sieve
/// state (and running unsieved count) only ever moves forward within this
/// block.
#[allow(clippy::too_many_arguments)]
fn process_hard_block(
    x: u128,
    y: u64,
    z: u64,
    min_b: usize,
    pi_sqrty: usize,
    max_b: usize,
    primes: &[u64],
    pi: &PiTable,
    factor_table: &FactorTable,
    sieve: &mut Sieve,
    phi: &mut [i64],
    low: u64,
    high: u64,
) -> i128 {
    sieve.pre_sieve(primes, min_b - 1, low, high, max_b);
    let mut sum = 0i128;
    let last_b = max_b.min(primes.len() - 1);

    for b in min_b..=last_b {
        let prime = primes[b];
        let xp = x / prime as u128;

        if b <= pi_sqrty {
            let min_m = ((xp / high as u128) as u64)
                .max(y / prime.max(1))
                .max(prime);
            let max_m = ((xp / low.max(1) as u128) as u64).min(y);

            if prime < max_m && min_m < max_m {
                let mut m = max_m;
                while m > min_m {
                    if FactorTable::is_representable(m) {
                        let idx = factor_table.to_index(m);
                        if idx < factor_table.upper_bound() {
                            let raw = factor_table.raw(idx);
                            if raw != 0 && prime < raw {
                                let xpm = (xp / m as u128) as u64;
                                let cnt = sieve.count(xpm - low) as i64;
                                let phi_xpm = phi[b] + cnt;
                                let mu_m: i64 = if raw & 1 == 1 { -1 } else { 1 };
                                sum -= mu_m as i128 * phi_xpm as i128;
                            }
                        }
                    }
                    m -= 1;
                }
            }
        } else {
            // m is forced prime here: walk `primes[l]` directly instead of
            // filtering composites out of the FactorTable, which only
            // covers m up to y and would need resizing to z otherwise.
            let min_hard = ((xp / high as u128) as u64)
                .max(y / prime.max(1))
                .max(prime);
            let max_l_bound = ((xp / low.max(1) as u128) as u64)
                .min(z / prime.max(1))
                .min(y);

            if prime < max_l_bound {
                let mut l = pi.pi(max_l_bound.min(pi.max_cached())) as usize;
                while l > b && l < primes.len() && primes[l] > min_hard {
                    let m = primes[l];
                    let xpm = (xp / m as u128) as u64;
                    if xpm >= low {
                        let cnt = sieve.count(xpm - low) as i64;
                        let phi_xpm = phi[b] + cnt;
                        sum += phi_xpm as i128;
                    }
                    l -= 1;
                }
            }
        }

        phi[b] += sieve.get_total_count() as i64;
        if b + 1 < primes.len() {
            sieve.cross_off_count(prime, b);
        }
    }

    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mu(mut n: u64) -> i64 {
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

    fn lpf(mut n: u64) -> u64 {
        let mut p = 2u64;
        while p * p <= n {
            if n % p == 0 {
                return p;
            }
            p += 1;
        }
        n
    }

    fn phi_bruteforce(n: u64, a: usize, primes: &[u64]) -> i64 {
        (1..=n)
            .filter(|&v| (1..=a).all(|i| v % primes[i] != 0))
            .count() as i64
    }

    // Brute-force the general phi-based double sum this module specializes
    // to a sieve-driven running count, on a range small enough to
    // trial-divide directly. Covers both the composite-m and prime-m
    // regimes since the underlying identity (`-mu(m)*phi(x/(p*m), b-1)`)
    // is the same either way.
    fn bruteforce(x: u128, y: u64, c: u64, max_b: u64, primes: &[u64]) -> i128 {
        let mut expected = 0i128;
        let min_b = (c as usize + 1).max(4);
        for b in min_b..=max_b as usize {
            let prime = primes[b];
            let xp = x / prime as u128;
            for m in (prime + 1)..=y.min(xp as u64) {
                if lpf(m) <= prime {
                    continue;
                }
                let mu_m = mu(m);
                if mu_m == 0 {
                    continue;
                }
                let n = (xp / m as u128) as u64;
                let phi_n = phi_bruteforce(n, b - 1, primes);
                expected -= mu_m as i128 * phi_n as i128;
            }
        }
        expected
    }

    #[test]
    fn hard_leaf_matches_general_phi_definition() {
        let primes = crate::sieve::primes_vector_1indexed(5_000);
        let pi = PiTable::new(10_000);
        let x: u128 = 500_000;
        let y = 300u64;
        let c = 2u64;
        let pi_sqrty = crate::sieve::primes_below(crate::math::isqrt(y as u128)).len() as u64;
        let factor_table = FactorTable::new(y);

        // z == y here restricts the whole range to the composite-m loop,
        // matching the bruteforce helper above (which only models that
        // loop); the prime-m loop is covered separately below.
        let got = hard_leaf_sum(
            x, y, y, c, pi_sqrty, pi_sqrty, &primes, &pi, &factor_table, 1,
        );
        let expected = bruteforce(x, y, c, pi_sqrty, &primes);
        assert_eq!(got, expected);
    }

    #[test]
    fn hard_leaf_parallel_matches_single_threaded() {
        let primes = crate::sieve::primes_vector_1indexed(5_000);
        let pi = PiTable::new(10_000);
        let x: u128 = 500_000;
        let y = 300u64;
        let z = 2_000u64;
        let c = 2u64;
        let pi_sqrty = crate::sieve::primes_below(crate::math::isqrt(y as u128)).len() as u64;
        let sqrtz = crate::math::isqrt(z as u128);
        let pi_sqrtz = crate::sieve::primes_below(sqrtz.min(y)).len() as u64;
        let factor_table = FactorTable::new(y);

        let single = hard_leaf_sum(
            x, z, y, c, pi_sqrty, pi_sqrtz, &primes, &pi, &factor_table, 1,
        );
        let multi = hard_leaf_sum(
            x, z, y, c, pi_sqrty, pi_sqrtz, &primes, &pi, &factor_table, 4,
        );
        assert_eq!(single, multi);
    }

    // Reproduces the reviewer's counterexample: x = 200_000, y = 80. With
    // z = 2_500, b = 5 (prime 11) falls in the prime-m regime and its
    // contribution now comes from this module instead of being silently
    // mis-handled by an unbounded easy-leaf row.
    #[test]
    fn hard_leaf_covers_prime_m_regime_above_pi_sqrty() {
        let primes = crate::sieve::primes_vector_1indexed(5_000);
        let pi = PiTable::new(10_000);
        let x: u128 = 200_000;
        let y = 80u64;
        let z = 2_500u64;
        let c = 0u64;
        let pi_sqrty = crate::sieve::primes_below(crate::math::isqrt(y as u128)).len() as u64;
        let sqrtz = crate::math::isqrt(z as u128);
        let pi_sqrtz = crate::sieve::primes_below(sqrtz.min(y)).len() as u64;
        let factor_table = FactorTable::new(y);

        let mut expected = 0i128;
        let min_b = (c as usize + 1).max(4);
        for b in min_b..=pi_sqrtz as usize {
            let prime = primes[b];
            let xp = x / prime as u128;
            for m in (prime + 1)..=y.min(xp as u64) {
                if lpf(m) <= prime {
                    continue;
                }
                let mu_m = mu(m);
                if mu_m == 0 {
                    continue;
                }
                let n = (xp / m as u128) as u64;
                let phi_n = phi_bruteforce(n, b - 1, &primes);
                expected -= mu_m as i128 * phi_n as i128;
            }
        }

        let got = hard_leaf_sum(
            x, z, y, c, pi_sqrty, pi_sqrtz, &primes, &pi, &factor_table, 1,
        );
        assert_eq!(got, expected);
    }
}
