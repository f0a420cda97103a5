//! Weighted additive credibility formula.
//!
//! All coefficients come from [`ScoringCoefficients`]; see its docs for the
//! formula. The result is clamped to `[0, 100]` before rounding, so no input
//! combination can escape the range.

use serde::Serialize;
use testimony_core::{Platform, PlatformWeights, RuleSet, ScoringCoefficients};

use crate::engagement::{unit, EngagementProfile, NEUTRAL_AVERAGE_SENTIMENT};

/// Credibility on an integer `0..=100` scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CredibilityScore(u8);

impl CredibilityScore {
    pub const MIN: CredibilityScore = CredibilityScore(0);
    pub const MAX: CredibilityScore = CredibilityScore(100);

    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn from_raw(raw: f64) -> Self {
        let bounded = if raw.is_finite() {
            raw.clamp(0.0, 100.0)
        } else {
            0.0
        };
        CredibilityScore(bounded.round() as u8)
    }
}

impl std::fmt::Display for CredibilityScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// Contribution of each term to the raw (pre-clamp) score, in score points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub base: f32,
    pub posting_frequency: f32,
    pub sentiment: f32,
    pub ridicule: f32,
    pub repost: f32,
    pub reaction: f32,
    pub platform: f32,
    /// Table weight actually applied.
    pub platform_weight: f32,
    /// `false` when the platform fell back to the default weight.
    pub platform_known: bool,
    /// Sum of all terms before clamping.
    pub raw: f32,
}

#[derive(Debug, Clone)]
pub struct Scorer {
    coefficients: ScoringCoefficients,
    platforms: PlatformWeights,
}

impl Scorer {
    #[must_use]
    pub fn new(coefficients: ScoringCoefficients, platforms: PlatformWeights) -> Self {
        Self {
            coefficients,
            platforms,
        }
    }

    #[must_use]
    pub fn from_rules(rules: &RuleSet) -> Self {
        Self::new(rules.coefficients.clone(), rules.platforms.clone())
    }

    /// Table weight for `platform` and whether the platform was known.
    #[must_use]
    pub fn platform_weight(&self, platform: &Platform) -> (f32, bool) {
        match self.platforms.weight_for(platform) {
            Some(weight) => (unit(weight), true),
            None => (unit(self.platforms.default_weight), false),
        }
    }

    #[must_use]
    pub fn score(&self, profile: &EngagementProfile, platform: &Platform) -> CredibilityScore {
        self.score_with_breakdown(profile, platform).0
    }

    /// Score plus the per-term contributions that produced it.
    ///
    /// Profile fields outside their documented range are clamped first;
    /// non-finite values count as neutral.
    #[must_use]
    pub fn score_with_breakdown(
        &self,
        profile: &EngagementProfile,
        platform: &Platform,
    ) -> (CredibilityScore, ScoreBreakdown) {
        let c = &self.coefficients;
        let w = |x: f32| f64::from(x);

        let average = if profile.average_sentiment.is_finite() {
            profile.average_sentiment.clamp(0.0, 1.0)
        } else {
            NEUTRAL_AVERAGE_SENTIMENT
        };
        let reaction = if profile.reaction_balance.is_finite() {
            profile.reaction_balance.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let (platform_weight, platform_known) = self.platform_weight(platform);

        let base = w(c.base);
        let frequency = w(c.frequency_weight)
            * w(unit(profile.posting_frequency))
            * 100.0
            * w(c.frequency_scale);
        let sentiment =
            w(c.sentiment_weight) * (2.0 * w(average) - 1.0) * 100.0 * w(c.sentiment_scale);
        let ridicule = w(c.ridicule_weight)
            * (w(unit(profile.supportive_ratio)) - w(unit(profile.ridicule_ratio)))
            * 100.0;
        let repost = w(c.repost_weight) * w(unit(profile.repost_factor)) * 100.0;
        let reaction_term = w(c.reaction_weight) * w(reaction) * 100.0;
        let platform_term = w(c.platform_weight) * w(platform_weight) * 100.0;

        let raw = base + frequency + sentiment + ridicule + repost + reaction_term + platform_term;

        #[allow(clippy::cast_possible_truncation)]
        let breakdown = ScoreBreakdown {
            base: base as f32,
            posting_frequency: frequency as f32,
            sentiment: sentiment as f32,
            ridicule: ridicule as f32,
            repost: repost as f32,
            reaction: reaction_term as f32,
            platform: platform_term as f32,
            platform_weight,
            platform_known,
            raw: raw as f32,
        };

        (CredibilityScore::from_raw(raw), breakdown)
    }
}

impl Default for Scorer {
    fn default() -> Self {
        Self::from_rules(&RuleSet::default())
    }
}
