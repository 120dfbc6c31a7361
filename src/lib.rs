//! Monte-Carlo estimator for limited 5-star odds under gacha pity rules
//!
//! A wish either misses or yields a 5-star. 5-stars become certain at hard
//! pity and grow more likely across the soft pity window before it. Each
//! 5-star is then resolved as the limited item or an off-banner one through a
//! 50/50, a carried guarantee and the capturing radiance streak counter.
//! [`estimate_probability`] repeats whole runs of wishes and reports the
//! fraction that reached the target count.

pub mod config;
pub mod error;
pub mod rng;
pub mod simulation;
pub mod stats;
pub mod wish;

#[cfg(feature = "python")]
mod python;

pub use config::{PityState, RadianceRule, SimulationConfig};
pub use error::{ConfigError, RngError, SimError};
pub use simulation::{estimate_probability, run_and_aggregate};
pub use stats::Estimate;
pub use wish::{draw_one_wish, WishOutcome};
