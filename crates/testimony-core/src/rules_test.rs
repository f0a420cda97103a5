use pretty_assertions::assert_eq;

use super::*;

const MINIMAL_YAML: &str = r#"
platforms:
  default_weight: 0.5
  weights:
    YouTube: 1.0
believer_keywords: ["  Faith "]
categories:
  - name: Rapture
    keywords: ["RAPTURE"]
age_rules:
  - range: "13-19"
    keywords: ["teen"]
"#;

#[test]
fn default_rules_are_valid() {
    validate_rules(&RuleSet::default()).unwrap();
}

#[test]
fn shipped_rules_file_matches_defaults() {
    let shipped = parse_rules(include_str!("../../../config/rules.yaml")).unwrap();
    assert_eq!(shipped, RuleSet::default());
}

#[test]
fn minimal_rules_fill_defaults_and_normalize() {
    let rules = parse_rules(MINIMAL_YAML).unwrap();
    assert_eq!(rules.believer_keywords, vec!["faith".to_string()]);
    assert_eq!(rules.categories[0].keywords, vec!["rapture".to_string()]);
    assert_eq!(rules.platforms.weight_for(&Platform::YouTube), Some(1.0));
    assert_eq!(rules.coefficients, ScoringCoefficients::default());
    assert!((rules.repost_cap - 5.0).abs() < f32::EPSILON);
    assert!((rules.sentiment_threshold - 0.2).abs() < f32::EPSILON);
}

#[test]
fn weight_for_unknown_platform_is_none() {
    let rules = RuleSet::default();
    assert_eq!(
        rules
            .platforms
            .weight_for(&Platform::Other("Mastodon".to_string())),
        None
    );
    assert_eq!(rules.platforms.weight_for(&Platform::Reddit), Some(0.9));
}

#[test]
fn validate_rejects_empty_platform_table() {
    let mut rules = RuleSet::default();
    rules.platforms.weights.clear();
    let err = validate_rules(&rules).unwrap_err();
    assert!(err.to_string().contains("platform weight table"));
}

#[test]
fn validate_rejects_weight_above_one() {
    let mut rules = RuleSet::default();
    rules.platforms.weights.insert("reddit".to_string(), 1.5);
    let err = validate_rules(&rules).unwrap_err();
    assert!(err.to_string().contains("reddit"), "got: {err}");
}

#[test]
fn validate_rejects_zero_default_weight() {
    let mut rules = RuleSet::default();
    rules.platforms.default_weight = 0.0;
    assert!(matches!(
        validate_rules(&rules),
        Err(ConfigError::Validation(_))
    ));
}

#[test]
fn validate_rejects_empty_believer_keywords() {
    let mut rules = RuleSet::default();
    rules.believer_keywords.clear();
    let err = validate_rules(&rules).unwrap_err();
    assert!(err.to_string().contains("believer_keywords"));
}

#[test]
fn validate_rejects_empty_category_table() {
    let mut rules = RuleSet::default();
    rules.categories.clear();
    let err = validate_rules(&rules).unwrap_err();
    assert!(err.to_string().contains("category table"));
}

#[test]
fn validate_rejects_duplicate_category() {
    let mut rules = RuleSet::default();
    rules.categories.push(CategoryRule {
        name: "rapture".to_string(),
        keywords: vec!["caught up".to_string()],
    });
    let err = validate_rules(&rules).unwrap_err();
    assert!(err.to_string().contains("duplicate category"));
}

#[test]
fn validate_rejects_platform_keys_differing_only_in_case() {
    let mut rules = RuleSet::default();
    rules.platforms.weights.insert("YouTube".to_string(), 0.2);
    let err = validate_rules(&rules).unwrap_err();
    assert!(err.to_string().contains("duplicate platform weight"), "got: {err}");
}

#[test]
fn parse_rejects_case_colliding_platform_keys() {
    let yaml = r#"
platforms:
  default_weight: 0.5
  weights:
    YouTube: 0.2
    youtube: 1.0
believer_keywords: ["faith"]
categories:
  - name: Rapture
    keywords: ["rapture"]
age_rules:
  - range: "13-19"
    keywords: ["teen"]
"#;
    let err = parse_rules(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate platform")));
}

#[test]
fn validate_rejects_duplicate_category_with_padding() {
    let mut rules = RuleSet::default();
    rules.categories.push(CategoryRule {
        name: "  Healing ".to_string(),
        keywords: vec!["recovered".to_string()],
    });
    assert!(validate_rules(&rules).is_err());
}

#[test]
fn validate_rejects_blank_keyword() {
    let mut rules = RuleSet::default();
    rules.categories[0].keywords.push("  ".to_string());
    let err = validate_rules(&rules).unwrap_err();
    assert!(err.to_string().contains("blank keyword"));
}

#[test]
fn validate_rejects_unknown_age_rule() {
    let mut rules = RuleSet::default();
    rules.age_rules.push(AgeRule {
        range: AgeRange::Unknown,
        keywords: vec!["someone".to_string()],
    });
    let err = validate_rules(&rules).unwrap_err();
    assert!(err.to_string().contains("Unknown"));
}

#[test]
fn validate_rejects_negative_coefficient() {
    let mut rules = RuleSet::default();
    rules.coefficients.ridicule_weight = -0.2;
    let err = validate_rules(&rules).unwrap_err();
    assert!(err.to_string().contains("ridicule_weight"));
}

#[test]
fn validate_rejects_non_positive_repost_cap() {
    let mut rules = RuleSet::default();
    rules.repost_cap = 0.0;
    let err = validate_rules(&rules).unwrap_err();
    assert!(err.to_string().contains("repost_cap"));
}

#[test]
fn parse_rejects_malformed_yaml() {
    let result = parse_rules("platforms: [");
    assert!(matches!(result, Err(ConfigError::RulesFileParse(_))));
}

#[test]
fn load_rules_reports_missing_file() {
    let result = load_rules(Path::new("/nonexistent/rules.yaml"));
    assert!(matches!(result, Err(ConfigError::RulesFileIo { .. })));
}

#[test]
fn age_range_serializes_as_bracket_label() {
    let json = serde_json::to_string(&AgeRange::Elder).unwrap();
    assert_eq!(json, "\"51+\"");
    assert_eq!(AgeRange::Teen.to_string(), "13-19");
}
