//! Credibility scoring and classification for testimony posts.
//!
//! Turns a [`RawItem`](testimony_core::RawItem) (title, body, comment thread
//! and engagement counters) into an [`AnnotatedItem`]: a bounded credibility
//! score, a believer flag, an age-range estimate and category tags. The engine
//! is a pure function of its rule tables; it performs no I/O.

pub mod classifier;
pub mod engagement;
pub mod error;
pub mod keywords;
pub mod pipeline;
pub mod report;
pub mod scorer;
pub mod sentiment;
pub mod types;

pub use classifier::Engine;
pub use engagement::{Aggregator, EngagementProfile, Stance};
pub use error::ScoringError;
pub use keywords::{KeywordClassifiers, GENERAL_CATEGORY};
pub use pipeline::{classify_batch, classify_batch_with_workers};
pub use report::{filter_items, summarize, BatchSummary, ItemFilter};
pub use scorer::{CredibilityScore, ScoreBreakdown, Scorer};
pub use sentiment::estimate as estimate_sentiment;
pub use types::{AnnotatedItem, ClassificationResult, Fallback};
