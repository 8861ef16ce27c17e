use clap::Parser;
use primecount::cli::Args;
use primecount::error::PrimeCountError;
use primecount::{config, drivers};
use std::time::Instant;

fn parse_x(s: &str) -> Result<u128, PrimeCountError> {
    s.trim()
        .parse::<u128>()
        .map_err(|_| PrimeCountError::ParseError(s.to_string()))
}

fn run() -> Result<(), PrimeCountError> {
    let args = Args::parse();

    if args.threads > 0 {
        config::set_num_threads(args.threads);
    }
    let threads = config::get_num_threads();

    if args.status.is_some() {
        config::set_show_progress(true);
    }

    if args.test {
        return run_self_test();
    }

    if !args.phi.is_empty() {
        if args.phi.len() != 2 {
            eprintln!("--phi requires exactly two values: X A");
            std::process::exit(1);
        }
        let x = parse_x(&args.phi[0])?;
        let a: u64 = args.phi[1]
            .parse()
            .map_err(|_| PrimeCountError::ParseError(args.phi[1].clone()))?;
        println!("{}", primecount::phi(x, a));
        return Ok(());
    }

    let x_str = match &args.x {
        Some(s) => s.clone(),
        None => {
            if args.nth_prime || args.li || args.li_inverse || args.ri || args.ri_inverse {
                eprintln!("missing required numeric argument");
                std::process::exit(1);
            }
            eprintln!("usage: primecount X [options]");
            std::process::exit(1);
        }
    };

    if args.nth_prime {
        let n: u64 = x_str
            .parse()
            .map_err(|_| PrimeCountError::ParseError(x_str.clone()))?;
        println!("{}", primecount::nth_prime(n));
        return Ok(());
    }
    if args.li {
        println!("{}", primecount::li(x_str.parse().unwrap_or(0.0)));
        return Ok(());
    }
    if args.li_inverse {
        println!("{}", primecount::li_inverse(x_str.parse().unwrap_or(0.0)));
        return Ok(());
    }
    if args.ri {
        println!("{}", primecount::riemann_r(x_str.parse().unwrap_or(0.0)));
        return Ok(());
    }
    if args.ri_inverse {
        println!(
            "{}",
            primecount::riemann_r_inverse(x_str.parse().unwrap_or(0.0))
        );
        return Ok(());
    }

    let x = parse_x(&x_str)?;
    let alpha = args.alpha.unwrap_or(-1.0);
    let alpha_y = args.alpha_y.unwrap_or(-1.0);
    let alpha_z = args.alpha_z.unwrap_or(-1.0);

    let start = Instant::now();

    let result = if args.p2 {
        drivers::partial::p2(x, alpha, threads)?
    } else if args.s1 {
        drivers::partial::s1(x, alpha, threads)?
    } else if args.s2_hard {
        drivers::partial::s2_hard(x, alpha, threads)?
    } else if args.ac {
        drivers::partial::ac(x, alpha_y, alpha_z, threads)?
    } else if args.b {
        drivers::partial::b(x, alpha_y, alpha_z, threads)?
    } else if args.d {
        drivers::partial::d(x, alpha_y, alpha_z, threads)?
    } else if args.phi0 {
        drivers::partial::phi0(x, alpha_y, alpha_z, threads)?
    } else if args.sigma {
        drivers::partial::sigma(x, alpha_y, alpha_z)?
    } else if args.deleglise_rivat {
        drivers::deleglise_rivat::pi(x, alpha, threads)?
    } else if args.lmo {
        drivers::lmo::pi(x, alpha, threads)?
    } else if args.gourdon {
        drivers::gourdon::pi(x, alpha_y, alpha_z, threads)?
    } else {
        primecount::pi(x as i128)? as i128
    };

    println!("{}", result);
    if args.time {
        eprintln!("Elapsed: {:.3}s", start.elapsed().as_secs_f64());
    }

    Ok(())
}

fn run_self_test() -> Result<(), PrimeCountError> {
    // OEIS A006880 anchors, small enough to run in a reasonable time.
    let anchors: &[(u128, u128)] = &[
        (10, 4),
        (100, 25),
        (1_000, 168),
        (10_000, 1229),
        (100_000, 9592),
        (1_000_000, 78498),
        (10_000_000, 620_998),
    ];
    for &(x, expected) in anchors {
        let got = primecount::pi(x as i128)?;
        if got != expected {
            eprintln!("FAIL: pi({x}) = {got}, expected {expected}");
            std::process::exit(1);
        }
        println!("OK: pi({x}) = {got}");
    }
    println!("All tests passed");
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
