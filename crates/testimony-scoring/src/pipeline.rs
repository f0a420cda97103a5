//! Batch classification.
//!
//! Items are independent, so a batch is a plain parallel map over
//! [`Engine::classify`]. Output order always matches input order.

use rayon::prelude::*;
use testimony_core::RawItem;

use crate::classifier::Engine;
use crate::error::ScoringError;
use crate::types::AnnotatedItem;

/// Classify every item on the global rayon pool.
///
/// Returns exactly one annotated item per input, in input order.
#[must_use]
pub fn classify_batch(engine: &Engine, items: &[RawItem]) -> Vec<AnnotatedItem> {
    let annotated: Vec<AnnotatedItem> = items.par_iter().map(|i| engine.classify(i)).collect();

    let degraded = annotated.iter().filter(|a| !a.fallbacks.is_empty()).count();
    tracing::info!(
        items = annotated.len(),
        degraded,
        "batch classification complete"
    );
    annotated
}

/// Classify every item on a dedicated pool of `workers` threads.
///
/// `workers == 0` uses the global pool.
///
/// # Errors
///
/// Returns [`ScoringError::WorkerPool`] if the thread pool cannot be built.
pub fn classify_batch_with_workers(
    engine: &Engine,
    items: &[RawItem],
    workers: usize,
) -> Result<Vec<AnnotatedItem>, ScoringError> {
    if workers == 0 {
        return Ok(classify_batch(engine, items));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()?;
    tracing::debug!(workers, items = items.len(), "classifying on dedicated pool");
    Ok(pool.install(|| classify_batch(engine, items)))
}
