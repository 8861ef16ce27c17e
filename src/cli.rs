//! Command-line argument parsing for the `primecount` binary.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "primecount", version = crate::config::primecount_version())]
pub struct Args {
    /// The number to count primes up to. Required unless --phi, --nth-prime,
    /// --Li, --Li-inverse, --Ri, --Ri-inverse, or --test is given instead.
    pub x: Option<String>,

    /// Use the Deleglise-Rivat algorithm.
    #[arg(long = "deleglise-rivat")]
    pub deleglise_rivat: bool,

    /// Use Gourdon's algorithm (the default for large x).
    #[arg(long)]
    pub gourdon: bool,

    /// Use the Lagarias-Miller-Odlyzko algorithm.
    #[arg(long)]
    pub lmo: bool,

    /// Compute only the P2(x, y) / B(x, y) two-large-primes tail.
    #[arg(long = "P2")]
    pub p2: bool,

    /// Compute only S1(x, y, c).
    #[arg(long = "S1")]
    pub s1: bool,

    /// Compute only S2_hard / D(x, y, z, k).
    #[arg(long = "S2-hard")]
    pub s2_hard: bool,

    /// Compute only A + C (the clustered/trivial easy leaves).
    #[arg(long = "AC")]
    pub ac: bool,

    /// Compute only B(x, y).
    #[arg(long = "B")]
    pub b: bool,

    /// Compute only D(x, y, z, k).
    #[arg(long = "D")]
    pub d: bool,

    /// Compute only Phi0(x, z, k).
    #[arg(long = "Phi0")]
    pub phi0: bool,

    /// Compute only Sigma(x, y, z, k).
    #[arg(long = "Sigma")]
    pub sigma: bool,

    /// Tuning factor alpha (LMO / Deleglise-Rivat).
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Tuning factor alpha_y (Gourdon).
    #[arg(long = "alpha-y")]
    pub alpha_y: Option<f64>,

    /// Tuning factor alpha_z (Gourdon).
    #[arg(long = "alpha-z")]
    pub alpha_z: Option<f64>,

    /// Number of threads to use (0 = one per logical CPU).
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Print progress status while computing, refreshing at most this many
    /// times per second worth of digits of precision (default: on).
    #[arg(long)]
    pub status: Option<Option<u32>>,

    /// Print the wall-clock time taken.
    #[arg(long)]
    pub time: bool,

    /// Compute the n-th prime instead of pi(x).
    #[arg(long = "nth-prime")]
    pub nth_prime: bool,

    /// Compute phi(X, A): pass X and A as the two positional values after
    /// this flag, e.g. `--phi 1000 5`.
    #[arg(long)]
    pub phi: Vec<String>,

    /// Compute the logarithmic integral Li(x).
    #[arg(long = "Li")]
    pub li: bool,

    /// Compute the inverse logarithmic integral Li^-1(x).
    #[arg(long = "Li-inverse")]
    pub li_inverse: bool,

    /// Compute the Riemann R(x) approximation.
    #[arg(long = "Ri")]
    pub ri: bool,

    /// Compute the inverse Riemann R^-1(x) approximation.
    #[arg(long = "Ri-inverse")]
    pub ri_inverse: bool,

    /// Run the built-in correctness test suite against known anchors.
    #[arg(long)]
    pub test: bool,
}
