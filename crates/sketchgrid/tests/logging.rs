//! Tests for logging configuration
//!
//! Only one global subscriber can be installed per process, so these tests
//! accept either outcome of a repeated `init_logging` call.

use sketchgrid::core::logging::{init_logging, resolve_format, resolve_level, LogFormat};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("Pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("JSON").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("xml").is_err());
    assert_eq!(LogFormat::default(), LogFormat::Compact);
}

#[test]
fn test_log_format_variants() {
    assert_eq!(LogFormat::variants(), &["compact", "pretty", "json"]);
}

#[test]
fn test_explicit_arguments_win() {
    assert_eq!(resolve_level(Some("debug")), "debug");
    assert_eq!(resolve_format(Some("json")).unwrap(), LogFormat::Json);
    assert!(resolve_format(Some("nope")).is_err());
}

#[test]
fn test_init_logging_invalid_format() {
    assert!(init_logging(Some("info"), Some("invalid_format")).is_err());
}

#[test]
fn test_rendering_with_subscriber_installed() {
    let _ = init_logging(Some("trace"), Some("compact"));
    let _ = init_logging(Some("warn"), Some("json"));

    let art = sketchgrid::render("graph LR\nA-->B\nB-->A\nC-->C", false).unwrap();
    assert!(art.contains("│ C │"));
    let art = sketchgrid::render("sequenceDiagram\nA->>B: hi\nbogus line", false).unwrap();
    assert!(art.contains("hi"));
}
