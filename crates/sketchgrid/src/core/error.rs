//! Core error types for diagram processing
//!
//! The engine absorbs malformed lines, cycles and dangling references with
//! fallback behavior, so empty input is the only failure left.

use thiserror::Error;

/// Core error types for diagram processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Empty input: nothing to render")]
    EmptyInput,
}

impl DiagramError {
    /// Fail with `EmptyInput` when the text holds nothing but whitespace
    pub fn ensure_not_empty(input: &str) -> Result<(), Self> {
        if input.trim().is_empty() {
            Err(Self::EmptyInput)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_message() {
        assert_eq!(
            DiagramError::EmptyInput.to_string(),
            "Empty input: nothing to render"
        );
    }

    #[test]
    fn test_ensure_not_empty() {
        assert!(matches!(
            DiagramError::ensure_not_empty(""),
            Err(DiagramError::EmptyInput)
        ));
        assert!(matches!(
            DiagramError::ensure_not_empty(" \n\t \n"),
            Err(DiagramError::EmptyInput)
        ));
        assert!(DiagramError::ensure_not_empty("A-->B").is_ok());
    }

    #[test]
    fn test_empty_input_through_anyhow() {
        let err: anyhow::Error = DiagramError::EmptyInput.into();
        assert!(matches!(
            err.downcast_ref::<DiagramError>(),
            Some(DiagramError::EmptyInput)
        ));
    }
}
