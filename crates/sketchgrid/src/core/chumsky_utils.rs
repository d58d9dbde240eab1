//! Shared chumsky parser utilities for diagram parsing

use chumsky::prelude::*;

/// Parse inline whitespace only (spaces and tabs).
///
/// Uses explicit character matching to avoid the "repeated combinator making
/// no progress" issue of `chumsky::text::whitespace().repeated()`.
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().ignored()
}

/// Parse a word identifier: letters, digits and underscores, at least one.
pub fn word<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    any()
        .filter(|c: &char| c.is_alphanumeric() || *c == '_')
        .repeated()
        .at_least(1)
        .collect::<String>()
        .labelled("identifier")
}
