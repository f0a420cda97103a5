use std::collections::BTreeSet;

use serde::Serialize;
use testimony_core::{AgeRange, RawItem};

use crate::engagement::EngagementProfile;
use crate::scorer::{CredibilityScore, ScoreBreakdown};

/// Output of the three keyword classifiers for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub is_believer: bool,
    pub age_range: AgeRange,
    /// Never empty; `{"General"}` when no category matched.
    pub categories: BTreeSet<String>,
}

/// A neutral default substituted for a missing or malformed signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Fallback {
    /// No comments: ratios are 0 and average sentiment reads as neutral.
    NoComments,
    /// Title and body are both blank.
    EmptyText,
    /// Platform is missing from the weight table; the default weight applied.
    UnknownPlatform { platform: String },
    /// A counter was outside its documented range and was clamped.
    ClampedInput { field: &'static str },
}

impl std::fmt::Display for Fallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Fallback::NoComments => write!(f, "no comments"),
            Fallback::EmptyText => write!(f, "empty text"),
            Fallback::UnknownPlatform { platform } => write!(f, "unknown platform '{platform}'"),
            Fallback::ClampedInput { field } => write!(f, "clamped {field}"),
        }
    }
}

/// A raw item together with everything the engine derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotatedItem {
    #[serde(flatten)]
    pub item: RawItem,
    pub credibility_score: CredibilityScore,
    #[serde(flatten)]
    pub classification: ClassificationResult,
    pub profile: EngagementProfile,
    pub breakdown: ScoreBreakdown,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<Fallback>,
}
