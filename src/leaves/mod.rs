//! The five leaf families that make up `pi(x)` once the small terms are
//! subtracted off: ordinary leaves ([`ordinary`]), easy/clustered leaves
//! ([`easy`]), hard leaves ([`hard`]), the two-large-primes tail
//! ([`tail`]), and Gourdon's closed-form sums ([`sigma`]).

pub mod easy;
pub mod hard;
pub mod ordinary;
pub mod sigma;
pub mod tail;
