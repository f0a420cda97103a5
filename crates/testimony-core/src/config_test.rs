use std::collections::HashMap;
use std::env::VarError;
use std::path::PathBuf;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
}

#[test]
fn parse_environment_production() {
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "TESTIMONY_ENV"));
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.rules_path.is_none());
    assert_eq!(cfg.batch_workers, 0);
}

#[test]
fn build_app_config_reads_rules_path() {
    let mut map = HashMap::new();
    map.insert("TESTIMONY_RULES_PATH", "./config/rules.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.rules_path, Some(PathBuf::from("./config/rules.yaml")));
}

#[test]
fn build_app_config_blank_rules_path_is_none() {
    let mut map = HashMap::new();
    map.insert("TESTIMONY_RULES_PATH", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.rules_path.is_none());
}

#[test]
fn build_app_config_batch_workers_override() {
    let mut map = HashMap::new();
    map.insert("TESTIMONY_BATCH_WORKERS", "4");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.batch_workers, 4);
}

#[test]
fn build_app_config_batch_workers_invalid() {
    let mut map = HashMap::new();
    map.insert("TESTIMONY_BATCH_WORKERS", "many");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "TESTIMONY_BATCH_WORKERS"),
        "expected InvalidEnvVar(TESTIMONY_BATCH_WORKERS), got: {result:?}"
    );
}

#[test]
fn build_app_config_log_level_override() {
    let mut map = HashMap::new();
    map.insert("TESTIMONY_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "debug");
}
