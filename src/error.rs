//! Error types shared by the simulator and its front ends

use thiserror::Error;

/// A configuration value outside its documented domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("wish count must be at least 1")]
    NoWishes,
    #[error("simulation count must be at least 1")]
    NoSimulations,
    #[error("banner pity must be at least 1")]
    NoBannerPity,
    #[error("soft pity window must be at least 1")]
    NoSoftPityWindow,
    #[error("current pity {current} exceeds banner pity {banner}")]
    PityAboveBanner { current: u32, banner: u32 },
    #[error("capturing radiance score {0} is outside 1..=3")]
    RadianceOutOfRange(u32),
    #[error("invalid value for {field}: {reason}")]
    Field { field: &'static str, reason: String },
}

/// The random source could not honour a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RngError {
    #[error("empty range {low}..={high}")]
    EmptyRange { low: u32, high: u32 },
    #[error("random source unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("random source failure: {0}")]
    RandomSourceFailure(#[from] RngError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

impl From<serde_json::Error> for SimError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}

impl From<serde_yaml::Error> for SimError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Parse(value.to_string())
    }
}

impl From<rayon::ThreadPoolBuildError> for SimError {
    fn from(value: rayon::ThreadPoolBuildError) -> Self {
        Self::ThreadPool(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;
