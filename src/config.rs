//! Process-wide, lazily-defaulted configuration: thread count and the
//! optional verification/double-check switches.
//!
//! These mirror the reference implementation's function-local static
//! tables: a single set of process-wide flags, read by every driver
//! invocation, mutated only through the setters below.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

static NUM_THREADS: AtomicUsize = AtomicUsize::new(0);
static VERIFY_COMPUTATION: AtomicBool = AtomicBool::new(false);
static DOUBLE_CHECK: AtomicBool = AtomicBool::new(false);
static SHOW_PROGRESS: AtomicBool = AtomicBool::new(false);

/// Sets the number of threads used by subsequent `pi(x)` calls.
///
/// `n == 0` restores the default of one thread per logical CPU.
pub fn set_num_threads(n: usize) {
    NUM_THREADS.store(n, Ordering::Relaxed);
}

/// Returns the thread count that will be used by the next `pi(x)` call.
pub fn get_num_threads() -> usize {
    let n = NUM_THREADS.load(Ordering::Relaxed);
    if n == 0 {
        num_cpus::get().max(1)
    } else {
        n
    }
}

/// Enables or disables the double-check path: if `true`, every `pi(x)`
/// call is repeated with a different alpha and the two results are
/// compared; a mismatch is reported as [`crate::error::PrimeCountError::VerificationMismatch`].
pub fn set_verify_computation(enabled: bool) {
    VERIFY_COMPUTATION.store(enabled, Ordering::Relaxed);
}

pub fn verify_computation() -> bool {
    VERIFY_COMPUTATION.load(Ordering::Relaxed)
}

/// Alias for [`set_verify_computation`]; the reference API exposes both
/// names and they control the same switch.
pub fn set_double_check(enabled: bool) {
    DOUBLE_CHECK.store(enabled, Ordering::Relaxed);
    set_verify_computation(enabled);
}

pub fn double_check() -> bool {
    DOUBLE_CHECK.load(Ordering::Relaxed) || verify_computation()
}

/// Returns the crate version string, e.g. for the CLI's `--version` flag.
pub fn primecount_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Enables or disables the CLI's `--status` progress bar for the hard-leaf
/// computation ([`crate::leaves::hard::hard_leaf_sum`]). Off by default so
/// library callers never see stray terminal output.
pub fn set_show_progress(enabled: bool) {
    SHOW_PROGRESS.store(enabled, Ordering::Relaxed);
}

pub fn show_progress() -> bool {
    SHOW_PROGRESS.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threads_is_at_least_one() {
        set_num_threads(0);
        assert!(get_num_threads() >= 1);
    }

    #[test]
    fn explicit_thread_count_round_trips() {
        set_num_threads(3);
        assert_eq!(get_num_threads(), 3);
        set_num_threads(0);
    }

    #[test]
    fn verify_and_double_check_flags_round_trip() {
        set_verify_computation(false);
        set_double_check(false);
        assert!(!verify_computation());
        assert!(!double_check());

        set_verify_computation(true);
        assert!(verify_computation());
        assert!(double_check());
        set_verify_computation(false);
    }

    #[test]
    fn show_progress_round_trips() {
        set_show_progress(false);
        assert!(!show_progress());
        set_show_progress(true);
        assert!(show_progress());
        set_show_progress(false);
    }
}
