//! Shared domain types and configuration for the testimony credibility engine.
//!
//! Holds the raw item shape handed over by acquisition collaborators, the rule
//! tables the scoring engine is constructed from, and the env-driven
//! application config used by the binaries.

pub mod app_config;
pub mod config;
pub mod items;
mod lenient;
pub mod rules;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use items::{Engagement, Platform, RawItem};
pub use rules::{
    load_rules, parse_rules, validate_rules, AgeRange, AgeRule, CategoryRule, PlatformWeights,
    RuleSet, ScoringCoefficients,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read rules file {path}: {source}")]
    RulesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rules file: {0}")]
    RulesFileParse(#[from] serde_yaml::Error),

    #[error("rules validation failed: {0}")]
    Validation(String),
}
