use lunch_lottery::algorithm::algo_cumulative::AlgoCumulative;
use lunch_lottery::algorithm::algo_rejection::AlgoRejection;
use lunch_lottery::algorithm::DrawStrategy;
use lunch_lottery::parameters::{get_and_check_options, Parameters, SamplingAlgorithm};
use lunch_lottery::prelude::*;
use lunch_lottery::report::report_distribution;
use std::io::stdout;
use std::time::Instant;

use pcg_rand::Pcg64;
use rand::{RngCore, SeedableRng};
use tracing::{info, Level};

fn execute<R: RngCore, D: DrawStrategy>(mut rng: R, opt: &Parameters) -> Result<()> {
    let engine = SamplingEngine::<D>::default();
    let mut pool = WeightedPool::new(opt.weights())?;
    info!(candidates = pool.len(), total_weight = pool.total_weight(), "pool ready");

    if opt.report_distribution {
        report_distribution(&pool, &mut stdout().lock())?;
    }

    let start = Instant::now();
    let winners = engine.sample_n(&mut pool, opt.winners, &mut rng)?;
    let runtime = start.elapsed();

    for winner in &winners {
        println!("{}", winner);
    }

    println!("runtime_s:{}", runtime.as_secs_f64());
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let opt = get_and_check_options();
    init_logging(opt.verbose);

    let rng = if let Some(seed_value) = opt.seed_value {
        Pcg64::seed_from_u64(seed_value)
    } else {
        Pcg64::from_entropy()
    };

    match opt.algorithm {
        SamplingAlgorithm::Cumulative => execute::<_, AlgoCumulative>(rng, &opt),
        SamplingAlgorithm::Rejection => execute::<_, AlgoRejection>(rng, &opt),
    }
}
