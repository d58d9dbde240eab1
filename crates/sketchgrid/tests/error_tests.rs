//! Tests for the error surface

use sketchgrid::core::DiagramError;
use sketchgrid::{parse_flowchart, parse_sequence, render};

#[test]
fn test_error_messages() {
    assert!(DiagramError::EmptyInput.to_string().contains("Empty input"));
}

#[test]
fn test_empty_input_is_typed() {
    for input in ["", "   ", "\n\t\n"] {
        let err = render(input, false).unwrap_err();
        assert!(
            matches!(err.downcast_ref::<DiagramError>(), Some(DiagramError::EmptyInput)),
            "unexpected error for {:?}: {}",
            input,
            err
        );
    }
}

#[test]
fn test_parsers_reject_empty_input() {
    assert!(parse_flowchart("").is_err());
    assert!(parse_sequence("  ").is_err());
}

#[test]
fn test_malformed_lines_never_error() {
    let inputs = [
        "graph LR\n[[[\n-->\nA -- B",
        "graph TD\nA{unclosed --> B",
        "sequenceDiagram\n->>B: nobody\nA->>: nobody\n: colon",
        "%% only a comment",
        "}}}",
    ];
    for input in inputs {
        assert!(render(input, false).is_ok(), "failed on {:?}", input);
    }
}

#[test]
fn test_ensure_not_empty() {
    assert!(DiagramError::ensure_not_empty("A").is_ok());
    assert!(matches!(
        DiagramError::ensure_not_empty(" \n "),
        Err(DiagramError::EmptyInput)
    ));
}
