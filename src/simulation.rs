//! Monte-Carlo driver: repeated trials from a shared pity snapshot

use crate::config::SimulationConfig;
use crate::error::{Result, SimError};
use crate::rng::{trial_seed, FastRng, WishRng};
use crate::stats::{Estimate, Tally, TrialResult};
use crate::wish::roll_wish;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, info};

/// Run one trial of `wish_count` wishes from the configured initial state
pub fn run_trial<R: WishRng>(config: &SimulationConfig, rng: &mut R) -> Result<TrialResult> {
    let rules = config.rules();
    // PityState is Copy: every trial mutates its own snapshot
    let mut state = config.initial_pity_state;
    let mut result = TrialResult::default();

    for _ in 0..config.wish_count {
        let outcome = roll_wish(&mut state, &rules, rng)?;
        result.record(outcome);
    }

    result.success = result.limited >= config.target_count;
    debug!(
        limited = result.limited,
        five_stars = result.five_stars,
        success = result.success,
        "trial finished"
    );
    Ok(result)
}

/// Run all trials sequentially over one injected random source
pub fn run_trials_sequential<R: WishRng>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<Tally> {
    let mut tally = Tally::default();
    for _ in 0..config.simulation_count {
        let result = run_trial(config, rng)?;
        tally.push(&result);
    }
    Ok(tally)
}

/// Pool size for parallel runs: an explicit setting, else 70% of available cores
pub fn worker_threads(threads: Option<usize>) -> usize {
    if let Some(threads) = threads {
        return threads.max(1);
    }
    let num_cores = num_cpus::get();
    ((num_cores as f64 * 0.70).round() as usize)
        .max(2)
        .min(num_cores.saturating_sub(1).max(1))
}

/// Run all trials on a rayon pool, one independently seeded generator per trial
pub fn run_trials_parallel(config: &SimulationConfig, base_seed: u64) -> Result<Tally> {
    let threads = worker_threads(config.threads);
    let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
    debug!(threads, base_seed, "starting parallel trials");

    pool.install(|| {
        let count = config.simulation_count as usize;
        let chunk_size = (count / threads).max(1);

        (0..count)
            .into_par_iter()
            .with_min_len(chunk_size.min(100))
            .map(|i| {
                let mut rng = FastRng::new(trial_seed(base_seed, i as u64));
                run_trial(config, &mut rng)
            })
            .try_fold(Tally::default, |mut tally, result| {
                tally.push(&result?);
                Ok::<Tally, SimError>(tally)
            })
            .try_reduce(Tally::default, |a, b| Ok(a.merge(b)))
    })
}

/// Validate, run every trial and aggregate. Sequential unless `config.parallel`.
pub fn run_and_aggregate(config: &SimulationConfig) -> Result<Estimate> {
    config.validate()?;
    let base_seed = config.seed.unwrap_or_else(rand::random::<u64>);
    info!(
        wish_count = config.wish_count,
        target_count = config.target_count,
        banner_pity = config.banner_pity,
        simulation_count = config.simulation_count,
        parallel = config.parallel,
        seed = base_seed,
        "running simulation"
    );

    let tally = if config.parallel {
        run_trials_parallel(config, base_seed)?
    } else {
        let mut rng = FastRng::new(base_seed);
        run_trials_sequential(config, &mut rng)?
    };

    let estimate = Estimate::from_tally(&tally);
    info!(
        probability = estimate.probability,
        successes = estimate.successes,
        "simulation finished"
    );
    Ok(estimate)
}

/// Probability of reaching `target_count` limited 5-stars within `wish_count` wishes
pub fn estimate_probability(config: &SimulationConfig) -> Result<f64> {
    run_and_aggregate(config).map(|estimate| estimate.probability)
}

/// Sequential estimate over a caller-supplied random source
pub fn estimate_probability_with_rng<R: WishRng>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<f64> {
    config.validate()?;
    let tally = run_trials_sequential(config, rng)?;
    Ok(Estimate::from_tally(&tally).probability)
}

/// Per-trial limited counts, in trial order
pub fn limited_counts(config: &SimulationConfig) -> Result<Vec<u32>> {
    config.validate()?;
    let mut rng = match config.seed {
        Some(seed) => FastRng::new(seed),
        None => FastRng::from_entropy(),
    };
    (0..config.simulation_count)
        .map(|_| run_trial(config, &mut rng).map(|r| r.limited))
        .collect()
}
