//! `SegmentedPiTable`: a sliding window of [`super::pi_table::PiTable`].
//!
//! A dense `pi` table covering all of `[0, x^(1/2)]` would cost too much
//! memory once `x` approaches `10^31`, so Gourdon's `A` formula instead
//! keeps only one window `[low, high)` of size roughly `z` in memory at a
//! time, and slides it forward with [`SegmentedPiTable::next`].

use crate::sieve;
use crate::tables::block_table::BlockTable;

pub struct SegmentedPiTable {
    table: BlockTable,
    low: u64,
    high: u64,
    window: u64,
    base_count: u64,
    max: u64,
}

impl SegmentedPiTable {
    /// `window` is rounded up to a multiple of 240 as the reference
    /// implementation does, since records are 240-wide.
    pub fn new(window: u64, max: u64) -> Self {
        let window = window.max(240).div_ceil(240) * 240;
        let mut t = SegmentedPiTable {
            table: BlockTable::build(1, |_| false),
            low: 0,
            high: 0,
            window,
            base_count: 0,
            max,
        };
        t.init(0);
        t
    }

    fn init(&mut self, low: u64) {
        self.low = low;
        self.high = (low + self.window).min(self.max + 1);
        let span = self.high.saturating_sub(self.low);
        let primes_in_window: Vec<u64> = sieve::PrimeIterator::starting_after(if low == 0 { 0 } else { low - 1 })
            .take_while(|&p| p < self.high)
            .collect();
        let is_member = {
            let mut bits = vec![false; span as usize];
            for p in &primes_in_window {
                if *p >= self.low {
                    bits[(p - self.low) as usize] = true;
                }
            }
            bits
        };
        self.table = BlockTable::build(span, |rel| {
            is_member.get(rel as usize).copied().unwrap_or(false)
        });
        self.base_count = if low == 0 {
            0
        } else {
            sieve::primes_below(low - 1).len() as u64
        };
    }

    /// `pi(n)` for `low <= n < high`.
    pub fn pi(&self, n: u64) -> u64 {
        debug_assert!(n >= self.low && n < self.high);
        self.base_count + self.table.count_le(n - self.low)
    }

    pub fn low(&self) -> u64 {
        self.low
    }

    pub fn high(&self) -> u64 {
        self.high
    }

    /// Slides the window forward to `[high, high + window)`.
    pub fn next(&mut self) {
        self.init(self.high);
    }

    /// True once the window has reached `max`.
    pub fn finished(&self) -> bool {
        self.high > self.max
    }
}
