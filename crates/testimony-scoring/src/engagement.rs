//! Reduce a comment thread plus raw counters into normalized engagement ratios.

use serde::Serialize;
use testimony_core::{Engagement, RuleSet};

use crate::sentiment;

/// Average sentiment on the `[0, 1]` scale used when there are no comments.
pub const NEUTRAL_AVERAGE_SENTIMENT: f32 = 0.5;

/// How a single comment reads once its polarity is thresholded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stance {
    Supportive,
    Ridiculing,
    Neutral,
}

impl Stance {
    /// Supportive above `+threshold`, ridiculing below `-threshold`, neutral otherwise.
    #[must_use]
    pub fn from_polarity(polarity: f32, threshold: f32) -> Self {
        if polarity > threshold {
            Stance::Supportive
        } else if polarity < -threshold {
            Stance::Ridiculing
        } else {
            Stance::Neutral
        }
    }
}

/// Normalized audience reaction for one item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementProfile {
    /// Share of judged comments that read as supportive, in `[0, 1]`.
    pub supportive_ratio: f32,
    /// Share of judged comments that read as ridiculing, in `[0, 1]`.
    pub ridicule_ratio: f32,
    /// `min(1, reposts / repost_cap)`.
    pub repost_factor: f32,
    /// Clamped copy of the reported posting frequency.
    pub posting_frequency: f32,
    /// Mean comment polarity rescaled to `[0, 1]`; 0.5 when there are no comments.
    pub average_sentiment: f32,
    /// `(supportive - ridicule) / (supportive + ridicule)` over the raw counters, in `[-1, 1]`.
    pub reaction_balance: f32,
    pub judged_comments: usize,
}

impl Default for EngagementProfile {
    fn default() -> Self {
        Self {
            supportive_ratio: 0.0,
            ridicule_ratio: 0.0,
            repost_factor: 0.0,
            posting_frequency: 0.0,
            average_sentiment: NEUTRAL_AVERAGE_SENTIMENT,
            reaction_balance: 0.0,
            judged_comments: 0,
        }
    }
}

/// Clamp to `[0, 1]`, mapping NaN and infinities to 0.
pub(crate) fn unit(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(count: usize, total: usize) -> f32 {
    count as f32 / total.max(1) as f32
}

/// Names of counter fields that are outside their documented range.
#[must_use]
pub fn malformed_fields(engagement: &Engagement) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if engagement.supportive_count < 0 {
        fields.push("supportive_count");
    }
    if engagement.ridicule_count < 0 {
        fields.push("ridicule_count");
    }
    if engagement.repost_count < 0 {
        fields.push("repost_count");
    }
    let freq = engagement.posting_frequency;
    if !freq.is_finite() || !(0.0..=1.0).contains(&freq) {
        fields.push("posting_frequency");
    }
    fields
}

/// Comment-thread aggregator configured with the stance threshold and repost cap.
#[derive(Debug, Clone)]
pub struct Aggregator {
    threshold: f32,
    repost_cap: f32,
}

impl Aggregator {
    #[must_use]
    pub fn new(threshold: f32, repost_cap: f32) -> Self {
        Self {
            threshold,
            repost_cap,
        }
    }

    #[must_use]
    pub fn from_rules(rules: &RuleSet) -> Self {
        Self::new(rules.sentiment_threshold, rules.repost_cap)
    }

    /// Build the engagement profile for one item.
    ///
    /// Counters outside their documented range are clamped, never rejected.
    #[must_use]
    pub fn aggregate<S: AsRef<str>>(
        &self,
        comments: &[S],
        engagement: &Engagement,
    ) -> EngagementProfile {
        let polarities: Vec<f32> = comments
            .iter()
            .map(|c| sentiment::estimate(c.as_ref()))
            .collect();

        let mut supportive = 0_usize;
        let mut ridiculing = 0_usize;
        for &p in &polarities {
            match Stance::from_polarity(p, self.threshold) {
                Stance::Supportive => supportive += 1,
                Stance::Ridiculing => ridiculing += 1,
                Stance::Neutral => {}
            }
        }

        let average_sentiment = if polarities.is_empty() {
            NEUTRAL_AVERAGE_SENTIMENT
        } else {
            #[allow(clippy::cast_precision_loss)]
            let mean = polarities.iter().sum::<f32>() / polarities.len() as f32;
            unit((mean + 1.0) / 2.0)
        };

        #[allow(clippy::cast_precision_loss)]
        let reposts = engagement.repost_count.max(0) as f32;
        let repost_factor = unit(reposts / self.repost_cap);

        let support_votes = engagement.supportive_count.max(0);
        let ridicule_votes = engagement.ridicule_count.max(0);
        let votes = support_votes.saturating_add(ridicule_votes).max(1);
        #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
        let reaction_balance =
            ((support_votes - ridicule_votes) as f64 / votes as f64).clamp(-1.0, 1.0) as f32;

        EngagementProfile {
            supportive_ratio: ratio(supportive, polarities.len()),
            ridicule_ratio: ratio(ridiculing, polarities.len()),
            repost_factor,
            posting_frequency: unit(engagement.posting_frequency),
            average_sentiment,
            reaction_balance,
            judged_comments: polarities.len(),
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::from_rules(&RuleSet::default())
    }
}
