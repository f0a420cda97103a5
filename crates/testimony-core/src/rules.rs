//! Rule tables the scoring engine is constructed from.
//!
//! A [`RuleSet`] bundles the platform weight table, believer keywords, the
//! category taxonomy, the ordered age-range rules and the scoring
//! coefficients. The built-in set is available via `RuleSet::default()`;
//! alternates can be loaded from YAML with [`load_rules`].

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::items::Platform;
use crate::ConfigError;

/// Age bracket assigned by the age-range estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeRange {
    #[serde(rename = "13-19")]
    Teen,
    #[serde(rename = "18-25")]
    Youth,
    #[serde(rename = "26-35")]
    YoungAdult,
    #[serde(rename = "30-50")]
    Parent,
    #[serde(rename = "51+")]
    Elder,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl AgeRange {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AgeRange::Teen => "13-19",
            AgeRange::Youth => "18-25",
            AgeRange::YoungAdult => "26-35",
            AgeRange::Parent => "30-50",
            AgeRange::Elder => "51+",
            AgeRange::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for AgeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Per-platform trust weights in `(0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformWeights {
    /// Used for any platform missing from `weights`.
    pub default_weight: f32,
    /// Keyed by lowercase platform name (see [`Platform::key`]).
    pub weights: BTreeMap<String, f32>,
}

impl PlatformWeights {
    /// Weight for a known platform, `None` when the platform is not in the table.
    #[must_use]
    pub fn weight_for(&self, platform: &Platform) -> Option<f32> {
        self.weights.get(&platform.key()).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeRule {
    pub range: AgeRange,
    pub keywords: Vec<String>,
}

/// Coefficients of the additive credibility formula.
///
/// ```text
/// raw = base
///     + frequency_weight * posting_frequency * 100 * frequency_scale
///     + sentiment_weight * (2 * average_sentiment - 1) * 100 * sentiment_scale
///     + ridicule_weight  * (supportive_ratio - ridicule_ratio) * 100
///     + repost_weight    * repost_factor * 100
///     + reaction_weight  * reaction_balance * 100
///     + platform_weight  * platform table weight * 100
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringCoefficients {
    pub base: f32,
    pub frequency_weight: f32,
    pub frequency_scale: f32,
    pub sentiment_weight: f32,
    pub sentiment_scale: f32,
    pub ridicule_weight: f32,
    pub repost_weight: f32,
    pub reaction_weight: f32,
    pub platform_weight: f32,
}

impl Default for ScoringCoefficients {
    fn default() -> Self {
        Self {
            base: 50.0,
            frequency_weight: 0.4,
            frequency_scale: 0.25,
            sentiment_weight: 0.3,
            sentiment_scale: 0.5,
            ridicule_weight: 0.2,
            repost_weight: 0.05,
            reaction_weight: 0.05,
            platform_weight: 0.1,
        }
    }
}

fn default_repost_cap() -> f32 {
    5.0
}

fn default_sentiment_threshold() -> f32 {
    0.2
}

/// Complete configuration of the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub platforms: PlatformWeights,
    pub believer_keywords: Vec<String>,
    pub categories: Vec<CategoryRule>,
    /// Scanned in order; the first rule with a matching keyword wins.
    pub age_rules: Vec<AgeRule>,
    #[serde(default)]
    pub coefficients: ScoringCoefficients,
    /// Repost count at which the repost factor saturates at 1.0.
    #[serde(default = "default_repost_cap")]
    pub repost_cap: f32,
    /// Polarity magnitude above which a comment counts as supportive or ridiculing.
    #[serde(default = "default_sentiment_threshold")]
    pub sentiment_threshold: f32,
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}

impl Default for RuleSet {
    fn default() -> Self {
        let weights = [("youtube", 1.0), ("reddit", 0.9), ("tiktok", 0.8)]
            .into_iter()
            .map(|(k, w)| (k.to_string(), w))
            .collect();

        let category = |name: &str, keywords: &[&str]| CategoryRule {
            name: name.to_string(),
            keywords: words(keywords),
        };
        let age = |range: AgeRange, keywords: &[&str]| AgeRule {
            range,
            keywords: words(keywords),
        };

        Self {
            platforms: PlatformWeights {
                default_weight: 0.85,
                weights,
            },
            believer_keywords: words(&[
                "jesus",
                "christ",
                "god",
                "lord",
                "faith",
                "salvation",
                "bible",
                "christian",
                "testimony",
                "gospel",
            ]),
            categories: vec![
                category("Rapture", &["rapture", "caught up", "taken up"]),
                category(
                    "Second Coming",
                    &["second coming", "jesus return", "christ's return"],
                ),
                category(
                    "End Times",
                    &["end times", "tribulation", "apocalypse", "mark of the beast"],
                ),
                category(
                    "Visions & Dreams",
                    &["visions", "a vision", "the vision", "dream", "prophetic word"],
                ),
                category(
                    "Healing",
                    &["healed", "healing", "miracle", "was cured", "been cured"],
                ),
                category(
                    "Deliverance",
                    &["addiction", "delivered", "set free", "demonic", "possessed"],
                ),
                category(
                    "Near-Death Experience",
                    &["near death", "near-death", "died and came back", "saw heaven"],
                ),
            ],
            age_rules: vec![
                age(
                    AgeRange::Teen,
                    &[
                        "teen", "teens", "teenage", "teenaged", "teenager", "teenagers",
                        "high school",
                    ],
                ),
                age(
                    AgeRange::Youth,
                    &["youth", "college", "university", "student", "students", "campus"],
                ),
                age(
                    AgeRange::YoungAdult,
                    &["newlywed", "fiance", "fiancee", "first job", "my twenties"],
                ),
                age(
                    AgeRange::Parent,
                    &[
                        "father", "fathers", "mother", "mothers", "dad", "dads", "mom", "moms",
                        "parent", "parents", "husband", "wife", "my kids", "my children",
                    ],
                ),
                age(
                    AgeRange::Elder,
                    &[
                        "grandfather", "grandfathers", "grandmother", "grandmothers", "grandma",
                        "grandpa", "grandparents", "retired", "widow", "widowed",
                    ],
                ),
            ],
            coefficients: ScoringCoefficients::default(),
            repost_cap: default_repost_cap(),
            sentiment_threshold: default_sentiment_threshold(),
        }
    }
}

impl RuleSet {
    /// Lowercase and trim every keyword and platform key.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let norm = |list: &mut Vec<String>| {
            for kw in list.iter_mut() {
                *kw = kw.trim().to_lowercase();
            }
        };

        norm(&mut self.believer_keywords);
        for category in &mut self.categories {
            category.name = category.name.trim().to_string();
            norm(&mut category.keywords);
        }
        for rule in &mut self.age_rules {
            norm(&mut rule.keywords);
        }
        self.platforms.weights = std::mem::take(&mut self.platforms.weights)
            .into_iter()
            .map(|(k, w)| (k.trim().to_lowercase(), w))
            .collect();
        self
    }

    #[must_use]
    pub fn category_names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }
}

/// Load, validate and normalize a rule set from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_rules(path: &Path) -> Result<RuleSet, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RulesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_rules(&content)
}

/// Parse, validate and normalize a rule set from YAML text.
///
/// Validation runs before normalization so keys differing only in case are
/// reported instead of merged.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_rules(content: &str) -> Result<RuleSet, ConfigError> {
    let rules: RuleSet = serde_yaml::from_str(content)?;
    validate_rules(&rules)?;
    Ok(rules.normalized())
}

/// Check that a rule set can drive the engine.
///
/// # Errors
///
/// Returns `ConfigError::Validation` describing the first problem found.
pub fn validate_rules(rules: &RuleSet) -> Result<(), ConfigError> {
    let invalid = |msg: String| Err(ConfigError::Validation(msg));
    let valid_weight = |w: f32| w.is_finite() && w > 0.0 && w <= 1.0;

    if rules.platforms.weights.is_empty() {
        return invalid("platform weight table must not be empty".to_string());
    }
    if !valid_weight(rules.platforms.default_weight) {
        return invalid(format!(
            "default platform weight {} must be in (0, 1]",
            rules.platforms.default_weight
        ));
    }
    let mut seen_platforms = HashSet::new();
    for (platform, weight) in &rules.platforms.weights {
        if platform.trim().is_empty() {
            return invalid("platform name must be non-empty".to_string());
        }
        if !seen_platforms.insert(platform.trim().to_lowercase()) {
            return invalid(format!("duplicate platform weight: '{platform}'"));
        }
        if !valid_weight(*weight) {
            return invalid(format!(
                "platform '{platform}' has weight {weight}; must be in (0, 1]"
            ));
        }
    }

    check_keywords("believer_keywords", &rules.believer_keywords)?;

    if rules.categories.is_empty() {
        return invalid("category table must not be empty".to_string());
    }
    let mut seen = HashSet::new();
    for category in &rules.categories {
        if category.name.trim().is_empty() {
            return invalid("category name must be non-empty".to_string());
        }
        if !seen.insert(category.name.trim().to_lowercase()) {
            return invalid(format!("duplicate category: '{}'", category.name));
        }
        check_keywords(&format!("category '{}'", category.name), &category.keywords)?;
    }

    if rules.age_rules.is_empty() {
        return invalid("age rule list must not be empty".to_string());
    }
    for (idx, rule) in rules.age_rules.iter().enumerate() {
        if rule.range == AgeRange::Unknown {
            return invalid(format!(
                "age rule {idx} maps to Unknown; Unknown is reserved for no match"
            ));
        }
        check_keywords(&format!("age rule {idx} ({})", rule.range), &rule.keywords)?;
    }

    let c = &rules.coefficients;
    let named = [
        ("base", c.base),
        ("frequency_weight", c.frequency_weight),
        ("frequency_scale", c.frequency_scale),
        ("sentiment_weight", c.sentiment_weight),
        ("sentiment_scale", c.sentiment_scale),
        ("ridicule_weight", c.ridicule_weight),
        ("repost_weight", c.repost_weight),
        ("reaction_weight", c.reaction_weight),
        ("platform_weight", c.platform_weight),
    ];
    for (name, value) in named {
        if !value.is_finite() || value < 0.0 {
            return invalid(format!(
                "coefficient {name} = {value} must be finite and non-negative"
            ));
        }
    }

    if !rules.repost_cap.is_finite() || rules.repost_cap <= 0.0 {
        return invalid(format!(
            "repost_cap {} must be a positive number",
            rules.repost_cap
        ));
    }
    if !(0.0..1.0).contains(&rules.sentiment_threshold) {
        return invalid(format!(
            "sentiment_threshold {} must be in [0, 1)",
            rules.sentiment_threshold
        ));
    }

    Ok(())
}

fn check_keywords(owner: &str, keywords: &[String]) -> Result<(), ConfigError> {
    if keywords.is_empty() {
        return Err(ConfigError::Validation(format!(
            "{owner} must list at least one keyword"
        )));
    }
    if keywords.iter().any(|k| k.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "{owner} contains a blank keyword"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "rules_test.rs"]
mod tests;
