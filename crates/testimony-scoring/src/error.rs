use thiserror::Error;

/// Failures that stop the engine from being built.
///
/// Per-item problems never surface here; they degrade to neutral defaults
/// and are reported as [`crate::Fallback`] entries on the annotated item.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("invalid rule set: {0}")]
    Config(#[from] testimony_core::ConfigError),

    #[error("failed to compile keywords for {table}: {source}")]
    Pattern {
        table: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
