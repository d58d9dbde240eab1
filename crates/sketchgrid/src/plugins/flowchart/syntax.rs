//! Flowchart statement grammar using chumsky
//!
//! Small, full-match grammars for the pieces of an edge chain: the node
//! reference on either side of a connector, the connector itself and the
//! `graph`/`flowchart` header. Splitting a line into those pieces is the
//! parser's job.

use chumsky::prelude::*;

use crate::core::chumsky_utils::{inline_whitespace, word};
use crate::core::{Direction, LineStyle, NodeShape};

/// A node mention with an optional inline declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRef {
    pub id: String,
    /// Label and shape when the mention carries delimiters (`A[label]`)
    pub declaration: Option<(String, NodeShape)>,
}

/// A parsed arrow or line between two node groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    pub style: LineStyle,
    pub arrow: bool,
    pub label: Option<String>,
}

/// Keywords whose statements are accepted and ignored
pub const DIRECTIVE_KEYWORDS: &[&str] = &["classdef", "class", "style", "linkstyle", "subgraph", "end"];

/// Parse a complete node reference such as `A`, `A[Go]` or `A([Done])`
pub fn parse_node_ref(input: &str) -> Option<NodeRef> {
    node_ref_parser().parse(input.trim()).into_result().ok()
}

/// Parse a complete connector slice such as `-->`, `-.->` or `--|yes|>`
pub fn parse_connector(input: &str) -> Option<Connector> {
    connector_parser().then_ignore(end()).parse(input).into_result().ok()
}

/// Length in bytes of the connector starting at the beginning of `input`
pub fn connector_len(input: &str) -> Option<usize> {
    connector_parser()
        .to_slice()
        .then_ignore(any().repeated())
        .parse(input)
        .into_result()
        .ok()
        .map(str::len)
}

/// Parse a diagram header
///
/// Returns `Some(None)` for a bare `graph`/`flowchart` keyword and
/// `Some(Some(direction))` when a direction follows it.
pub fn parse_header(input: &str) -> Option<Option<Direction>> {
    header_parser().parse(input.trim()).into_result().ok()
}

/// Returns true for `classDef`, `style`, `subgraph`, `end` and similar lines
pub fn is_directive(input: &str) -> bool {
    let keyword: String = input
        .trim_start()
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    DIRECTIVE_KEYWORDS.contains(&keyword.to_lowercase().as_str())
}

fn header_parser<'src>() -> impl Parser<'src, &'src str, Option<Direction>> + Clone {
    let keyword = word().filter(|w: &String| {
        w.eq_ignore_ascii_case("graph") || w.eq_ignore_ascii_case("flowchart")
    });

    let direction = one_of(" \t").repeated().at_least(1).ignore_then(
        word()
            .filter(|w: &String| w.parse::<Direction>().is_ok())
            .map(|w| w.parse::<Direction>().unwrap_or_default()),
    );

    keyword
        .ignore_then(direction.or_not())
        .then_ignore(inline_whitespace())
        .then_ignore(end())
}

fn node_ref_parser<'src>() -> impl Parser<'src, &'src str, NodeRef> + Clone {
    let shaped = delimited_label("([", "])")
        .map(|label| (label, NodeShape::Stadium))
        .or(delimited_label("[[", "]]").map(|label| (label, NodeShape::Rect)))
        .or(delimited_label("[", "]").map(|label| (label, NodeShape::Rect)))
        .or(delimited_label("(", ")").map(|label| (label, NodeShape::Round)))
        .or(delimited_label("{", "}").map(|label| (label, NodeShape::Diamond)));

    word()
        .labelled("node identifier")
        .then(shaped.map(Some).or(end().to(None)))
        .map(|(id, declaration)| {
            let declaration = declaration.map(|(label, shape): (String, NodeShape)| {
                let label = clean_label(&label);
                let label = if label.is_empty() { id.clone() } else { label };
                (label, shape)
            });
            NodeRef { id, declaration }
        })
}

/// Label between `open` and a `close` that ends the input
fn delimited_label<'src>(
    open: &'static str,
    close: &'static str,
) -> impl Parser<'src, &'src str, String> + Clone {
    just(open)
        .ignore_then(
            any()
                .and_is(just(close).then(end()).not())
                .repeated()
                .at_least(1)
                .collect::<String>(),
        )
        .then_ignore(just(close))
        .then_ignore(end())
}

fn clean_label(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed)
        .to_string()
}

fn connector_parser<'src>() -> impl Parser<'src, &'src str, Connector> + Clone {
    let arrowhead = just('>').or_not().map(|head| head.is_some());

    let solid = just('-')
        .repeated()
        .at_least(2)
        .ignore_then(arrowhead.clone())
        .map(|arrow| (LineStyle::Solid, arrow));

    let thick = just('=')
        .repeated()
        .at_least(2)
        .ignore_then(arrowhead.clone())
        .map(|arrow| (LineStyle::Solid, arrow));

    let dotted_close = just('-')
        .ignore_then(arrowhead)
        .or(just('>').to(true));
    let dotted = just('-')
        .ignore_then(just('.').repeated().at_least(1))
        .ignore_then(dotted_close)
        .map(|arrow| (LineStyle::Dotted, arrow));

    let label = inline_whitespace()
        .ignore_then(just('|'))
        .ignore_then(none_of('|').repeated().at_least(1).collect::<String>())
        .then_ignore(just('|'))
        .then(just('>').or_not())
        .or_not();

    dotted
        .or(solid)
        .or(thick)
        .then(label)
        .map(|((style, arrow), label)| {
            let (label, trailing_head) = match label {
                Some((text, head)) => (Some(text.trim().to_string()), head.is_some()),
                None => (None, false),
            };
            Connector {
                style,
                arrow: arrow || trailing_head,
                label: label.filter(|l| !l.is_empty()),
            }
        })
}
