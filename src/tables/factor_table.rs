//! `FactorTable` / `FactorTableD`: compressed mu(n)/lpf(n)/mpf(n) lookup.
//!
//! Both variants pack three pieces of information about each `n` into a
//! single integer, on a residue wheel that skips multiples of the smallest
//! primes (wheel-210 = {2,3,5,7} for the plain table used by LMO/DR,
//! wheel-2310 = {2,3,5,7,11} for the `D`-variant used by Gourdon's hard
//! leaves). See the module-level encoding table in the spec this engine
//! implements; reproduced here at each accessor.

const T_MAX: u32 = u32::MAX;

/// Precomputed residue wheel: which remainders mod `modulus` are coprime to
/// the wheel's base primes, plus the inverse map.
struct Wheel {
    modulus: u64,
    residues: Vec<u64>,
    index_of: Vec<i32>,
}

impl Wheel {
    fn new(modulus: u64, base_primes: &[u64]) -> Self {
        let mut residues = Vec::new();
        let mut index_of = vec![-1i32; modulus as usize];
        for r in 1..modulus {
            if base_primes.iter().all(|&p| r % p != 0) {
                index_of[r as usize] = residues.len() as i32;
                residues.push(r);
            }
        }
        Wheel {
            modulus,
            residues,
            index_of,
        }
    }

    fn to_number(&self, index: u64) -> u64 {
        let len = self.residues.len() as u64;
        let q = index / len;
        let r = (index % len) as usize;
        self.modulus * q + self.residues[r]
    }

    fn to_index(&self, number: u64) -> u64 {
        let q = number / self.modulus;
        let r = (number % self.modulus) as usize;
        let len = self.residues.len() as u64;
        len * q + self.index_of[r] as u64
    }
}

/// The plain `FactorTable`, used by the LMO and Deleglise-Rivat drivers for
/// `n <= y`. Wheel-210 (skips multiples of 2, 3, 5, 7).
pub struct FactorTable {
    wheel: Wheel,
    factors: Vec<u32>,
}

impl FactorTable {
    pub fn new(y: u64) -> Self {
        let wheel = Wheel::new(210, &[2, 3, 5, 7]);
        let y = y.max(8);
        let len = wheel.to_index(y) as usize + 1;
        let mut factors = vec![T_MAX; len];
        factors[0] = T_MAX - 1; // n = 1

        let sqrty = crate::math::isqrt(y as u128);
        let primes = crate::sieve::primes_below(y);

        for &p in &primes {
            if p <= 7 {
                continue;
            }
            let idx = wheel.to_index(p);
            if (idx as usize) < factors.len() && p < T_MAX as u64 {
                factors[idx as usize] = p as u32;
            }
            let mut i = 0u64;
            loop {
                let m = p * wheel.to_number(i);
                if m > y {
                    break;
                }
                if m >= p && m != p {
                    let mi = wheel.to_index(m) as usize;
                    if factors[mi] == T_MAX {
                        factors[mi] = p as u32;
                    } else if factors[mi] != 0 {
                        factors[mi] ^= 1;
                    }
                }
                i += 1;
            }
            if p <= sqrty {
                let square = p * p;
                let mut j = 0u64;
                loop {
                    let m = square * wheel.to_number(j);
                    if m > y {
                        break;
                    }
                    factors[wheel.to_index(m) as usize] = 0;
                    j += 1;
                }
            }
        }

        FactorTable { wheel, factors }
    }

    pub fn to_index(&self, n: u64) -> u64 {
        self.wheel.to_index(n)
    }

    pub fn to_number(&self, index: u64) -> u64 {
        self.wheel.to_number(index)
    }

    /// Whether `n` is coprime to this table's wheel base (2, 3, 5, 7); `n`
    /// not satisfying this can never pass the hard-leaf `lpf(n) > prime`
    /// test once `prime >= 7`, so callers skip such `n` without a lookup.
    pub fn is_representable(n: u64) -> bool {
        n % 2 != 0 && n % 3 != 0 && n % 5 != 0 && n % 7 != 0
    }

    /// Mobius function value; undefined (panics in debug) when `mu(n) == 0`.
    pub fn mu(&self, index: u64) -> i64 {
        let v = self.factors[index as usize];
        debug_assert_ne!(v, 0, "mu(n) == 0 is not representable");
        if v & 1 == 1 {
            -1
        } else {
            1
        }
    }

    /// Least prime factor, encoded per the table above (0 if `mu(n) == 0`).
    pub fn lpf(&self, index: u64) -> u64 {
        self.factors[index as usize] as u64
    }

    /// The raw encoded value, usable directly in the hard-leaf
    /// short-circuit `prime < factor(n)`, which is true exactly when
    /// `mu(n) != 0 && lpf(n) > prime`.
    pub fn raw(&self, index: u64) -> u64 {
        self.factors[index as usize] as u64
    }

    pub fn upper_bound(&self) -> u64 {
        self.factors.len() as u64
    }

    pub fn max() -> u64 {
        ((T_MAX as u64 - 1) * (T_MAX as u64 - 1)) - 1
    }
}

/// `FactorTableD`: the Gourdon hard-leaf variant, additionally zeroing any
/// `n` with a prime factor `> y`, which collapses the `D`-formula's
/// three-way test `mu(n) != 0 && lpf(n) > prime && mpf(n) <= y` into the
/// single comparison `prime < factor(n)`.
pub struct FactorTableD {
    wheel: Wheel,
    factors: Vec<u32>,
}

impl FactorTableD {
    pub fn new(y: u64, z: u64) -> Self {
        let wheel = Wheel::new(2310, &[2, 3, 5, 7, 11]);
        let z = z.max(1);
        let len = wheel.to_index(z) as usize + 1;
        let mut factors = vec![T_MAX; len];
        factors[0] = T_MAX ^ 1; // n = 1, mu = 1 (even parity)

        let sqrtz = crate::math::isqrt(z as u128);
        let primes = crate::sieve::primes_below(z);

        for &p in &primes {
            if p <= 11 {
                continue;
            }
            let idx = wheel.to_index(p);
            if (idx as usize) < factors.len() && p < T_MAX as u64 {
                factors[idx as usize] = p as u32;
            }
            let mut i = 0u64;
            loop {
                let m = p * wheel.to_number(i);
                if m > z {
                    break;
                }
                if m != p {
                    let mi = wheel.to_index(m) as usize;
                    if factors[mi] == T_MAX {
                        factors[mi] = p as u32;
                    } else if factors[mi] != 0 {
                        factors[mi] ^= 1;
                    }
                }
                i += 1;
            }
            if p <= sqrtz {
                let square = p * p;
                let mut j = 0u64;
                loop {
                    let m = square * wheel.to_number(j);
                    if m > z {
                        break;
                    }
                    factors[wheel.to_index(m) as usize] = 0;
                    j += 1;
                }
            }
        }

        // Zero out every n with a prime factor > y: primes in (y, z] and
        // all of their multiples encode "has a prime factor > y".
        if y < z {
            for &p in primes.iter().filter(|&&p| p > y) {
                let mut i = 0u64;
                loop {
                    let m = p * wheel.to_number(i);
                    if m > z {
                        break;
                    }
                    factors[wheel.to_index(m) as usize] = 0;
                    i += 1;
                }
            }
        }

        FactorTableD { wheel, factors }
    }

    pub fn to_index(&self, n: u64) -> u64 {
        self.wheel.to_index(n)
    }

    pub fn to_number(&self, index: u64) -> u64 {
        self.wheel.to_number(index)
    }

    /// The raw encoded value, used directly by the hard-leaf short-circuit
    /// `prime < factor(n)`.
    pub fn is_leaf(&self, index: u64) -> u64 {
        self.factors[index as usize] as u64
    }

    pub fn mu(&self, index: u64) -> i64 {
        let v = self.factors[index as usize];
        debug_assert_ne!(v, 0);
        if v & 1 == 1 {
            -1
        } else {
            1
        }
    }

    pub fn max() -> u64 {
        ((T_MAX as u64 - 1) * (T_MAX as u64 - 1)) - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mobius_bruteforce(n: u64) -> i64 {
        if n == 1 {
            return 1;
        }
        let mut n = n;
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

    fn lpf_bruteforce(n: u64) -> u64 {
        let mut p = 2u64;
        while p * p <= n {
            if n % p == 0 {
                return p;
            }
            p += 1;
        }
        n
    }

    #[test]
    fn factor_table_round_trips_index() {
        let table = FactorTable::new(1000);
        for n in (1..1000u64).filter(|n| n % 2 != 0 && n % 3 != 0 && n % 5 != 0 && n % 7 != 0) {
            let idx = table.to_index(n);
            assert_eq!(table.to_number(idx), n);
        }
    }

    #[test]
    fn factor_table_mu_and_lpf_match_bruteforce() {
        let y = 2000u64;
        let table = FactorTable::new(y);
        for n in (1..=y).filter(|n| n % 2 != 0 && n % 3 != 0 && n % 5 != 0 && n % 7 != 0) {
            let idx = table.to_index(n);
            let expected_mu = mobius_bruteforce(n);
            if expected_mu == 0 {
                assert_eq!(table.lpf(idx), 0, "expected mu=0 at n={n}");
                continue;
            }
            assert_eq!(table.mu(idx), expected_mu, "mu mismatch at n={n}");
            let lpf = lpf_bruteforce(n);
            if n == lpf && n != 1 {
                // prime: stored directly as n
                assert_eq!(table.lpf(idx), n);
            } else if expected_mu == 1 {
                assert_eq!(table.lpf(idx), lpf - 1);
            } else {
                assert_eq!(table.lpf(idx), lpf);
            }
        }
    }

    #[test]
    fn factor_table_d_zeroes_large_prime_factors() {
        let y = 30u64;
        let z = 200u64;
        let table = FactorTableD::new(y, z);
        for n in (1..=z).filter(|n| {
            n % 2 != 0 && n % 3 != 0 && n % 5 != 0 && n % 7 != 0 && n % 11 != 0
        }) {
            let idx = table.to_index(n);
            let has_large_factor = lpf_of_largest(n) > y;
            if has_large_factor {
                assert_eq!(table.is_leaf(idx), 0, "n={n} should be zeroed (mpf > y)");
            }
        }
    }

    fn lpf_of_largest(mut n: u64) -> u64 {
        let mut largest = 1;
        let mut p = 2u64;
        while p * p <= n {
            while n % p == 0 {
                largest = p;
                n /= p;
            }
            p += 1;
        }
        if n > 1 {
            largest = largest.max(n);
        }
        largest
    }
}
