//! Sequence statement grammar using chumsky

use chumsky::prelude::*;

use crate::core::chumsky_utils::{inline_whitespace, word};
use crate::core::LineStyle;

/// `participant <id> [as <label>]` or `actor <id> [as <label>]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantDecl {
    pub id: String,
    pub alias: Option<String>,
}

/// `<from><arrow><to>: <text>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageLine {
    pub from: String,
    pub to: String,
    pub text: String,
    pub style: LineStyle,
}

/// Message arrows, longest first
pub const ARROWS: [&str; 5] = ["-->>", "->>", "-->", "->", "..>"];

pub fn parse_participant(input: &str) -> Option<ParticipantDecl> {
    participant_parser().parse(input.trim()).into_result().ok()
}

pub fn parse_message(input: &str) -> Option<MessageLine> {
    message_parser().parse(input.trim()).into_result().ok()
}

/// Returns true for the `sequenceDiagram` header, in any case
pub fn is_header(line: &str) -> bool {
    line.trim().to_lowercase().starts_with("sequencediagram")
}

fn arrow<'src>() -> impl Parser<'src, &'src str, LineStyle> + Clone {
    choice((
        just("-->>"),
        just("->>"),
        just("-->"),
        just("->"),
        just("..>"),
    ))
    .map(|arrow| {
        if arrow.contains("--") || arrow.starts_with('.') {
            LineStyle::Dotted
        } else {
            LineStyle::Solid
        }
    })
}

fn participant_parser<'src>() -> impl Parser<'src, &'src str, ParticipantDecl> + Clone {
    let spaces = one_of(" \t").repeated().at_least(1);
    let token = none_of(" \t").repeated().at_least(1).to_slice();

    let keyword = word().filter(|w: &String| {
        w.eq_ignore_ascii_case("participant") || w.eq_ignore_ascii_case("actor")
    });

    let alias = spaces
        .clone()
        .ignore_then(word().filter(|w: &String| w.eq_ignore_ascii_case("as")))
        .ignore_then(spaces.clone())
        .ignore_then(any().repeated().at_least(1).to_slice())
        .map(|label| label.trim().to_string());

    keyword
        .ignore_then(spaces)
        .ignore_then(token)
        .then(alias.or_not())
        .then_ignore(end())
        .map(|(id, alias)| ParticipantDecl {
            id: id.to_string(),
            alias: alias.filter(|a| !a.is_empty()),
        })
}

fn message_parser<'src>() -> impl Parser<'src, &'src str, MessageLine> + Clone {
    let from = none_of(" \t")
        .and_is(arrow().not())
        .repeated()
        .at_least(1)
        .to_slice();
    let to = none_of(" \t:").repeated().at_least(1).to_slice();
    let text = any().repeated().to_slice();

    from.then_ignore(inline_whitespace())
        .then(arrow())
        .then_ignore(inline_whitespace())
        .then(to)
        .then_ignore(inline_whitespace())
        .then_ignore(just(':'))
        .then(text)
        .map(|(((from, style), to), text)| MessageLine {
            from: from.to_string(),
            to: to.to_string(),
            text: text.trim().to_string(),
            style,
        })
}
