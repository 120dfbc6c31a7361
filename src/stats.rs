//! Per-trial results and the aggregated estimate

use crate::config::SimulationConfig;
use crate::wish::WishOutcome;
use serde::{Deserialize, Serialize};

/// Outcome of one full run of wishes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialResult {
    pub limited: u32,
    pub five_stars: u32,
    pub off_banner: u32,
    pub radiance_procs: u32,
    pub success: bool,
}

impl TrialResult {
    #[inline]
    pub fn record(&mut self, outcome: WishOutcome) {
        match outcome {
            WishOutcome::Miss => return,
            WishOutcome::OffBanner => self.off_banner += 1,
            WishOutcome::CapturingRadiance => {
                self.radiance_procs += 1;
                self.limited += 1;
            }
            WishOutcome::WonFiftyFifty | WishOutcome::Guaranteed => self.limited += 1,
        }
        self.five_stars += 1;
    }
}

/// Running totals; merging is a plain sum so partial results combine in any order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub trials: u64,
    pub successes: u64,
    pub limited: u64,
    pub five_stars: u64,
    pub off_banner: u64,
    pub radiance_procs: u64,
    pub min_limited: Option<u32>,
    pub max_limited: u32,
}

impl Tally {
    pub fn push(&mut self, result: &TrialResult) {
        self.trials += 1;
        self.successes += result.success as u64;
        self.limited += result.limited as u64;
        self.five_stars += result.five_stars as u64;
        self.off_banner += result.off_banner as u64;
        self.radiance_procs += result.radiance_procs as u64;
        self.min_limited = Some(self.min_limited.map_or(result.limited, |m| m.min(result.limited)));
        self.max_limited = self.max_limited.max(result.limited);
    }

    pub fn merge(mut self, other: Tally) -> Tally {
        self.trials += other.trials;
        self.successes += other.successes;
        self.limited += other.limited;
        self.five_stars += other.five_stars;
        self.off_banner += other.off_banner;
        self.radiance_procs += other.radiance_procs;
        self.min_limited = match (self.min_limited, other.min_limited) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self.max_limited = self.max_limited.max(other.max_limited);
        self
    }
}

/// Aggregated statistics over all trials
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
    pub probability: f64,
    pub successes: u64,
    pub simulations: u64,
    pub avg_limited: f64,
    pub avg_five_stars: f64,
    pub avg_off_banner: f64,
    pub avg_radiance_procs: f64,
    pub min_limited: u32,
    pub max_limited: u32,
}

impl Estimate {
    pub fn from_tally(tally: &Tally) -> Self {
        if tally.trials == 0 {
            return Self::default();
        }
        let n = tally.trials as f64;
        Self {
            probability: tally.successes as f64 / n,
            successes: tally.successes,
            simulations: tally.trials,
            avg_limited: tally.limited as f64 / n,
            avg_five_stars: tally.five_stars as f64 / n,
            avg_off_banner: tally.off_banner as f64 / n,
            avg_radiance_procs: tally.radiance_procs as f64 / n,
            min_limited: tally.min_limited.unwrap_or(0),
            max_limited: tally.max_limited,
        }
    }

    pub fn from_results(results: &[TrialResult]) -> Self {
        let mut tally = Tally::default();
        for result in results {
            tally.push(result);
        }
        Self::from_tally(&tally)
    }
}

/// The one-line human-readable summary
pub fn describe(probability: f64, config: &SimulationConfig) -> String {
    format!(
        "The probability of getting {} limited 5-stars in {} wishes is approximately {:.2}% \
         (Calculated using {} simulations)",
        config.target_count,
        config.wish_count,
        probability * 100.0,
        config.simulation_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trial(limited: u32, success: bool) -> TrialResult {
        TrialResult {
            limited,
            five_stars: limited + 1,
            off_banner: 1,
            radiance_procs: 0,
            success,
        }
    }

    #[test]
    fn test_record_counts_outcomes() {
        let mut result = TrialResult::default();
        for outcome in [
            WishOutcome::Miss,
            WishOutcome::OffBanner,
            WishOutcome::Guaranteed,
            WishOutcome::WonFiftyFifty,
            WishOutcome::CapturingRadiance,
        ] {
            result.record(outcome);
        }
        assert_eq!(result.five_stars, 4);
        assert_eq!(result.limited, 3);
        assert_eq!(result.off_banner, 1);
        assert_eq!(result.radiance_procs, 1);
    }

    #[test]
    fn test_estimate_from_results() {
        let results = [trial(3, true), trial(1, false), trial(2, true), trial(0, false)];
        let estimate = Estimate::from_results(&results);
        assert_eq!(estimate.simulations, 4);
        assert_eq!(estimate.successes, 2);
        assert!((estimate.probability - 0.5).abs() < 1e-12);
        assert!((estimate.avg_limited - 1.5).abs() < 1e-12);
        assert_eq!(estimate.min_limited, 0);
        assert_eq!(estimate.max_limited, 3);
    }

    #[test]
    fn test_merge_matches_sequential_push() {
        let results = [
            trial(4, true),
            trial(0, false),
            trial(2, true),
            trial(5, true),
            trial(1, false),
        ];
        let mut all = Tally::default();
        results.iter().for_each(|r| all.push(r));

        let mut left = Tally::default();
        let mut right = Tally::default();
        results[..2].iter().for_each(|r| left.push(r));
        results[2..].iter().for_each(|r| right.push(r));

        assert_eq!(right.merge(left), all);
        assert_eq!(left.merge(Tally::default()), left);
    }

    #[test]
    fn test_empty_estimate() {
        assert_eq!(Estimate::from_results(&[]), Estimate::default());
    }

    #[test]
    fn test_describe_sentence() {
        let config = SimulationConfig::new(300, 3, 90);
        assert_eq!(
            describe(0.623456, &config),
            "The probability of getting 3 limited 5-stars in 300 wishes is approximately 62.35% \
             (Calculated using 10000 simulations)"
        );
    }
}
