//! Simulation parameters and the pity state every trial starts from

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_SOFT_PITY_WINDOW: u32 = 16;
pub const DEFAULT_SIMULATION_COUNT: u32 = 10_000;
/// Capturing radiance fires when a 50/50 is lost at this score
pub const RADIANCE_THRESHOLD: u32 = 3;

/// Pity counters carried from wish to wish within one trial
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PityState {
    #[serde(default)]
    pub current_pity: u32,
    #[serde(default)]
    pub is_guaranteed: bool,
    #[serde(default = "default_cr_score")]
    pub cr_score: u32,
}

fn default_cr_score() -> u32 {
    1
}

impl Default for PityState {
    fn default() -> Self {
        Self {
            current_pity: 0,
            is_guaranteed: false,
            cr_score: default_cr_score(),
        }
    }
}

impl PityState {
    pub fn new(current_pity: u32, is_guaranteed: bool, cr_score: u32) -> Self {
        Self {
            current_pity,
            is_guaranteed,
            cr_score,
        }
    }
}

/// What a capturing-radiance win does to the guarantee flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RadianceRule {
    /// The forced win already satisfied the banner, so no guarantee follows
    #[default]
    ClearsGuarantee,
    /// The forced win still counts as a lost 50/50 and sets the guarantee
    SetsGuarantee,
}

// Case-insensitive, accepts snake_case and CamelCase spellings
impl<'de> Deserialize<'de> for RadianceRule {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.to_lowercase().replace('_', "").as_str() {
            "clearsguarantee" => Ok(RadianceRule::ClearsGuarantee),
            "setsguarantee" => Ok(RadianceRule::SetsGuarantee),
            _ => Err(serde::de::Error::unknown_variant(
                &s,
                &["clears_guarantee", "sets_guarantee"],
            )),
        }
    }
}

/// Banner rules the wish engine needs on every draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BannerRules {
    pub banner_pity: u32,
    pub soft_pity_window: u32,
    pub radiance_rule: RadianceRule,
}

impl BannerRules {
    pub fn new(banner_pity: u32) -> Self {
        Self {
            banner_pity,
            soft_pity_window: DEFAULT_SOFT_PITY_WINDOW,
            radiance_rule: RadianceRule::default(),
        }
    }
}

/// Full simulation configuration loaded from YAML/JSON or built in code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub wish_count: u32,
    #[serde(alias = "target_5_star_count")]
    pub target_count: u32,
    pub banner_pity: u32,
    #[serde(default = "default_soft_pity_window")]
    pub soft_pity_window: u32,
    #[serde(default = "default_simulation_count")]
    pub simulation_count: u32,
    #[serde(default, alias = "pity")]
    pub initial_pity_state: PityState,
    #[serde(default)]
    pub radiance_rule: RadianceRule,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub parallel: bool,
    #[serde(default)]
    pub threads: Option<usize>,
}

fn default_soft_pity_window() -> u32 {
    DEFAULT_SOFT_PITY_WINDOW
}

fn default_simulation_count() -> u32 {
    DEFAULT_SIMULATION_COUNT
}

impl SimulationConfig {
    pub fn new(wish_count: u32, target_count: u32, banner_pity: u32) -> Self {
        Self {
            wish_count,
            target_count,
            banner_pity,
            soft_pity_window: DEFAULT_SOFT_PITY_WINDOW,
            simulation_count: DEFAULT_SIMULATION_COUNT,
            initial_pity_state: PityState::default(),
            radiance_rule: RadianceRule::default(),
            seed: None,
            parallel: false,
            threads: None,
        }
    }

    pub fn with_pity(mut self, current_pity: u32, is_guaranteed: bool) -> Self {
        self.initial_pity_state.current_pity = current_pity;
        self.initial_pity_state.is_guaranteed = is_guaranteed;
        self
    }

    pub fn with_cr_score(mut self, cr_score: u32) -> Self {
        self.initial_pity_state.cr_score = cr_score;
        self
    }

    pub fn with_simulation_count(mut self, simulation_count: u32) -> Self {
        self.simulation_count = simulation_count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_radiance_rule(mut self, rule: RadianceRule) -> Self {
        self.radiance_rule = rule;
        self
    }

    pub fn with_parallel(mut self, parallel: bool, threads: Option<usize>) -> Self {
        self.parallel = parallel;
        self.threads = threads;
        self
    }

    pub fn rules(&self) -> BannerRules {
        BannerRules {
            banner_pity: self.banner_pity,
            soft_pity_window: self.soft_pity_window,
            radiance_rule: self.radiance_rule,
        }
    }

    /// Reject parameters outside their documented domain
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.wish_count == 0 {
            return Err(ConfigError::NoWishes);
        }
        if self.simulation_count == 0 {
            return Err(ConfigError::NoSimulations);
        }
        if self.banner_pity == 0 {
            return Err(ConfigError::NoBannerPity);
        }
        if self.soft_pity_window == 0 {
            return Err(ConfigError::NoSoftPityWindow);
        }
        let pity = &self.initial_pity_state;
        if pity.current_pity > self.banner_pity {
            return Err(ConfigError::PityAboveBanner {
                current: pity.current_pity,
                banner: self.banner_pity,
            });
        }
        if !(1..=RADIANCE_THRESHOLD).contains(&pity.cr_score) {
            return Err(ConfigError::RadianceOutOfRange(pity.cr_score));
        }
        if self.threads == Some(0) {
            return Err(ConfigError::Field {
                field: "threads",
                reason: "must be at least 1 when given".to_string(),
            });
        }
        Ok(())
    }

    /// Load and validate a configuration file (JSON by extension, YAML otherwise)
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)?;
        let path_str = path.as_ref().to_string_lossy().to_lowercase();

        let config: SimulationConfig = if path_str.ends_with(".json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Load and validate from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SimulationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
