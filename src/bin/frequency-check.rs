use lunch_lottery::algorithm::algo_cumulative::AlgoCumulative;
use lunch_lottery::algorithm::algo_rejection::AlgoRejection;
use lunch_lottery::algorithm::DrawStrategy;
use lunch_lottery::prelude::*;
use lunch_lottery::report::selection_frequencies;
use pcg_rand::Pcg64;
use rand::SeedableRng;
use std::time::{Duration, Instant};

const NUM_TRIALS: usize = 50_000;
const MAX_CANDIDATES: usize = 64;

fn weights(num_candidates: usize) -> Vec<(usize, Weight)> {
    (0..num_candidates).map(|i| (i, 1.0 + i as f64)).collect()
}

fn check<D: DrawStrategy>(name: &str, rng: &mut Pcg64, num_candidates: usize) -> Duration {
    let engine = SamplingEngine::<D>::default();
    let template = WeightedPool::new(weights(num_candidates)).unwrap();
    let total = template.total_weight();

    let start = Instant::now();
    let first_winners = (0..NUM_TRIALS).filter_map(|_| {
        let mut pool = template.clone();
        engine.sample_one(&mut pool, &mut *rng)
    });
    let counts = selection_frequencies(first_winners);
    let elapsed = start.elapsed();

    let max_deviation = counts
        .iter()
        .map(|&(key, n)| {
            let expected = template.weight(&key).unwrap() / total;
            (n as f64 / NUM_TRIALS as f64 - expected).abs()
        })
        .fold(0.0, f64::max);

    println!(
        "{},{},{:.5},{}",
        name,
        num_candidates,
        max_deviation,
        elapsed.as_nanos() / NUM_TRIALS as u128
    );

    elapsed
}

fn main() {
    let mut rng = Pcg64::seed_from_u64(123456);

    println!("algo,candidates,max_deviation,ns_per_draw");
    let mut num_candidates = 2;
    while num_candidates <= MAX_CANDIDATES {
        let cdf = check::<AlgoCumulative>("cumulative", &mut rng, num_candidates);
        let rej = check::<AlgoRejection>("rejection", &mut rng, num_candidates);
        println!(
            "fac,{},{}",
            num_candidates,
            rej.as_secs_f64() / cdf.as_secs_f64()
        );
        num_candidates *= 2;
    }

    let algo = AlgoRejection::default();
    let mut pool = WeightedPool::new(weights(MAX_CANDIDATES)).unwrap();
    while algo.draw_one(&mut pool, &mut rng).is_some() {}
    println!("Proposals per draw: {}", algo.proposals_per_draw());
}
