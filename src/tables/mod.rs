//! Compressed lookup tables shared by the leaf formulas: [`phi_tiny`] for
//! O(1) partial-sieve values at small `a`, [`pi_table`] / [`segmented_pi_table`]
//! for O(1) prime-counting lookups, and [`factor_table`] for packed
//! mu/lpf/mpf queries.

pub mod block_table;
pub mod factor_table;
pub mod phi_tiny;
pub mod pi_table;
pub mod segmented_pi_table;
