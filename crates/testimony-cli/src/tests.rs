use clap::Parser;

use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["testimony"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.rules.is_none());
}

#[test]
fn parses_sentiment_command() {
    let cli = Cli::try_parse_from(["testimony", "sentiment", "Praise God!"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Sentiment { ref text }) if text == "Praise God!"
    ));
}

#[test]
fn parses_classify_defaults() {
    let cli = Cli::try_parse_from(["testimony", "classify", "--input", "items.json"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Classify {
            ref input,
            ref platforms,
            believers_only: false,
            json: false,
        }) if input == &PathBuf::from("items.json") && platforms.is_empty()
    ));
}

#[test]
fn parses_classify_with_filters() {
    let cli = Cli::try_parse_from([
        "testimony",
        "classify",
        "--input",
        "items.json",
        "--platform",
        "youtube",
        "--platform",
        "reddit",
        "--believers-only",
        "--json",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Classify {
            ref platforms,
            believers_only: true,
            json: true,
            ..
        }) if platforms == &["youtube".to_string(), "reddit".to_string()]
    ));
}

#[test]
fn classify_requires_input() {
    assert!(Cli::try_parse_from(["testimony", "classify"]).is_err());
}

#[test]
fn parses_report_with_global_rules_flag() {
    let cli = Cli::try_parse_from([
        "testimony",
        "report",
        "--input",
        "items.json",
        "--rules",
        "custom.yaml",
    ])
    .unwrap();
    assert_eq!(cli.rules, Some(PathBuf::from("custom.yaml")));
    assert!(matches!(
        cli.command,
        Some(Commands::Report {
            believers_only: false,
            ..
        })
    ));
}

#[test]
fn parses_rules_check() {
    let cli = Cli::try_parse_from(["testimony", "rules", "check", "config/rules.yaml"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Rules {
            command: RulesCommands::Check { ref path }
        }) if path == &PathBuf::from("config/rules.yaml")
    ));
}

#[test]
fn parses_rules_show() {
    let cli = Cli::try_parse_from(["testimony", "rules", "show"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Rules {
            command: RulesCommands::Show
        })
    ));
}

#[test]
fn ansi_logs_disabled_only_in_production() {
    assert!(use_ansi(&Environment::Development));
    assert!(use_ansi(&Environment::Test));
    assert!(!use_ansi(&Environment::Production));
}
