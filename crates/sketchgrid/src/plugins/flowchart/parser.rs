//! Flowchart parser implementation
//!
//! Classifies each statement in order (header, ignored directive, edge
//! chain, bare node reference) and feeds the result into the database.
//! Anything it cannot interpret is skipped rather than rejected.

use anyhow::Result;
use tracing::{debug, info, span, trace, Level};

use super::syntax::{self, Connector};
use super::{FlowchartDatabase, GraphEdge};
use crate::core::{Database, DiagramError, Parser};

/// Flowchart parser implementation
pub struct FlowchartParser;

impl FlowchartParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FlowchartParser {
    fn default() -> Self {
        Self::new()
    }
}

/// One classified statement
#[derive(Debug, Clone, PartialEq, Eq)]
enum Statement<'a> {
    Header(Option<crate::core::Direction>),
    Directive,
    Content(&'a str),
}

impl Parser<FlowchartDatabase> for FlowchartParser {
    fn parse(&self, input: &str, database: &mut FlowchartDatabase) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_flowchart", input_len = input.len());
        let _enter = parse_span.enter();

        DiagramError::ensure_not_empty(input)?;

        for (line_no, statement) in extract_statements(input) {
            match classify(statement) {
                Statement::Header(Some(direction)) => {
                    debug!(line = line_no, %direction, "Direction declared");
                    database.set_direction(direction);
                }
                Statement::Header(None) => {
                    trace!(line = line_no, "Header without direction");
                }
                Statement::Directive => {
                    trace!(line = line_no, statement, "Skipped directive");
                }
                Statement::Content(text) => apply_chain(text, line_no, database)?,
            }
        }

        info!(
            node_count = database.node_count(),
            edge_count = database.edge_count(),
            direction = %database.direction(),
            "Parsed flowchart"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "flowchart"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

/// Non-empty, non-comment statements with their 1-based line numbers
fn extract_statements(input: &str) -> Vec<(usize, &str)> {
    input
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with("%%"))
        .flat_map(|(line_no, line)| {
            split_statements(line)
                .into_iter()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(move |s| (line_no, s))
        })
        .collect()
}

/// Split a line at `;` separators
///
/// A `;` inside a node label (`[...]`, `(...)`, `{...}`) or an edge label
/// (`|...|`) is text, not a separator.
fn split_statements(line: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_pipe = false;
    let mut start = 0;

    for (idx, c) in line.char_indices() {
        match c {
            '|' if depth == 0 => in_pipe = !in_pipe,
            '[' | '(' | '{' if !in_pipe => depth += 1,
            ']' | ')' | '}' if !in_pipe => depth = depth.saturating_sub(1),
            ';' if depth == 0 && !in_pipe => {
                parts.push(&line[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }

    parts.push(&line[start..]);
    parts
}

fn classify(statement: &str) -> Statement<'_> {
    if let Some(direction) = syntax::parse_header(statement) {
        Statement::Header(direction)
    } else if syntax::is_directive(statement) {
        Statement::Directive
    } else {
        Statement::Content(statement)
    }
}

/// Split a statement into node groups and the connectors between them
///
/// Connector-like text inside `[...]`, `(...)` or `{...}` belongs to a label
/// and is never split on.
fn split_chain(statement: &str) -> (Vec<&str>, Vec<Connector>) {
    let mut groups = Vec::new();
    let mut connectors = Vec::new();
    let mut depth = 0usize;
    let mut group_start = 0;
    let mut cursor = 0;

    while cursor < statement.len() {
        let rest = &statement[cursor..];
        let Some(c) = rest.chars().next() else {
            break;
        };

        match c {
            '[' | '(' | '{' => depth += 1,
            ']' | ')' | '}' => depth = depth.saturating_sub(1),
            '-' | '=' if depth == 0 => {
                if let Some(len) = syntax::connector_len(rest) {
                    if let Some(connector) = syntax::parse_connector(&rest[..len]) {
                        groups.push(&statement[group_start..cursor]);
                        connectors.push(connector);
                        cursor += len;
                        group_start = cursor;
                        continue;
                    }
                }
            }
            _ => {}
        }
        cursor += c.len_utf8();
    }

    groups.push(&statement[group_start..]);
    (groups, connectors)
}

/// Split an `&`-separated endpoint list
fn endpoints(group: &str) -> Vec<&str> {
    group
        .split('&')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Declare the node behind a reference; `None` when it does not parse
fn declare(raw: &str, database: &mut FlowchartDatabase) -> Option<String> {
    let Some(node_ref) = syntax::parse_node_ref(raw) else {
        debug!(reference = raw, "Skipped unparseable node reference");
        return None;
    };
    database.declare_node(
        &node_ref.id,
        node_ref
            .declaration
            .as_ref()
            .map(|(label, shape)| (label.as_str(), *shape)),
    );
    Some(node_ref.id)
}

fn apply_chain(statement: &str, line_no: usize, database: &mut FlowchartDatabase) -> Result<()> {
    let (groups, connectors) = split_chain(statement);

    if connectors.is_empty() {
        for raw in endpoints(statement) {
            declare(raw, database);
        }
        return Ok(());
    }

    for (i, connector) in connectors.iter().enumerate() {
        // Every parseable endpoint is declared, even when the other side is malformed.
        let sources: Vec<String> = endpoints(groups[i])
            .into_iter()
            .filter_map(|raw| declare(raw, database))
            .collect();
        let targets: Vec<String> = endpoints(groups[i + 1])
            .into_iter()
            .filter_map(|raw| declare(raw, database))
            .collect();

        for from in &sources {
            for to in &targets {
                let mut edge = GraphEdge::new(from.clone(), to.clone())
                    .with_style(connector.style)
                    .with_arrow(connector.arrow);
                if let Some(label) = &connector.label {
                    edge = edge.with_label(label.clone());
                }
                trace!(line = line_no, from = %edge.from, to = %edge.to, "Parsed edge");
                database.add_edge(edge)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Direction, LineStyle, NodeShape};

    fn parse(input: &str) -> FlowchartDatabase {
        let parser = FlowchartParser::new();
        let mut database = FlowchartDatabase::new();
        parser.parse(input, &mut database).unwrap();
        database
    }

    fn edge_pairs(db: &FlowchartDatabase) -> Vec<(String, String)> {
        db.edges().map(|e| (e.from.clone(), e.to.clone())).collect()
    }

    fn pairs(list: &[(&str, &str)]) -> Vec<(String, String)> {
        list.iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn test_extract_statements() {
        let statements = extract_statements("graph LR; A-->B\n\n%% note; X-->Y\n  C ");
        assert_eq!(
            statements,
            vec![(1, "graph LR"), (1, "A-->B"), (4, "C")]
        );
    }

    #[test]
    fn test_parser_sets_direction() {
        assert_eq!(parse("graph TD\nA-->B").direction(), Direction::TopDown);
        assert_eq!(parse("flowchart tb\nA-->B").direction(), Direction::TopDown);
        assert_eq!(parse("graph RL\nA-->B").direction(), Direction::RightLeft);
        assert_eq!(parse("graph BT\nA-->B").direction(), Direction::BottomUp);
        assert_eq!(parse("A-->B").direction(), Direction::LeftRight);
        assert_eq!(parse("graph\nA-->B").direction(), Direction::LeftRight);
    }

    #[test]
    fn test_simple_edge() {
        let db = parse("graph LR\nA-->B");
        assert_eq!(db.edge_count(), 1);
        let edge = db.edges().next().unwrap();
        assert_eq!((edge.from.as_str(), edge.to.as_str()), ("A", "B"));
        assert!(edge.arrow);
        assert_eq!(edge.style, LineStyle::Solid);
        assert_eq!(edge.label, None);
    }

    #[test]
    fn test_chained_edges() {
        let db = parse("A --> B --> C");
        assert_eq!(edge_pairs(&db), pairs(&[("A", "B"), ("B", "C")]));
        let ids: Vec<_> = db.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_fan_out_and_fan_in() {
        let db = parse("A --> B & C");
        assert_eq!(edge_pairs(&db), pairs(&[("A", "B"), ("A", "C")]));

        let db = parse("A & B --> C");
        assert_eq!(edge_pairs(&db), pairs(&[("A", "C"), ("B", "C")]));

        let db = parse("A & B --> C & D");
        assert_eq!(db.edge_count(), 4);
    }

    #[test]
    fn test_inline_declarations() {
        let db = parse("A[Start] --> B{Ok?} --> C(Retry)\nC --> D([Done])");
        assert_eq!(db.get_node("A").unwrap().label, "Start");
        assert_eq!(db.get_node("B").unwrap().shape, NodeShape::Diamond);
        assert_eq!(db.get_node("C").unwrap().shape, NodeShape::Round);
        assert_eq!(db.get_node("C").unwrap().label, "Retry");
        assert_eq!(db.get_node("D").unwrap().shape, NodeShape::Stadium);
    }

    #[test]
    fn test_connector_variants() {
        let db = parse("A -.-> B\nB ==> C\nC --- D\nD -->|yes| E\nE -.- F");
        let edges: Vec<_> = db.edges().collect();
        assert_eq!(edges[0].style, LineStyle::Dotted);
        assert!(edges[0].arrow);
        assert_eq!(edges[1].style, LineStyle::Solid);
        assert!(edges[1].arrow);
        assert!(!edges[2].arrow);
        assert_eq!(edges[3].label.as_deref(), Some("yes"));
        assert_eq!(edges[4].style, LineStyle::Dotted);
        assert!(!edges[4].arrow);
    }

    #[test]
    fn test_arrows_inside_labels_are_not_split() {
        let db = parse("A[a --> b] --> B");
        assert_eq!(db.edge_count(), 1);
        assert_eq!(db.get_node("A").unwrap().label, "a --> b");
    }

    #[test]
    fn test_directives_are_skipped() {
        let db = parse(
            "graph TD\nclassDef hot fill:#f00\nsubgraph one\nA --> B\nend\nstyle A fill:#fff\nclass A hot\nlinkStyle 0 stroke:#0f0",
        );
        assert_eq!(db.node_count(), 2);
        assert_eq!(db.edge_count(), 1);
    }

    #[test]
    fn test_bare_declarations() {
        let db = parse("A[Alpha]\nB & C\nA");
        assert_eq!(db.node_count(), 3);
        assert_eq!(db.edge_count(), 0);
        assert_eq!(db.get_node("A").unwrap().label, "Alpha");
    }

    #[test]
    fn test_redeclaration_updates_label_only_when_given() {
        let db = parse("A --> B\nA[First]\nA --> C\nA(Second)");
        let node = db.get_node("A").unwrap();
        assert_eq!(node.label, "Second");
        assert_eq!(node.shape, NodeShape::Round);
    }

    #[test]
    fn test_malformed_lines_are_ignored() {
        let db = parse("graph LR\nthis is not valid\nA --> B\n-->\n%% comment\nA B --> C");
        assert_eq!(edge_pairs(&db), pairs(&[("A", "B")]));
    }

    #[test]
    fn test_unparseable_source_still_declares_target() {
        let db = parse("graph LR\nA B --> C");
        assert_eq!(db.edge_count(), 0);
        assert_eq!(db.node_count(), 1);
        assert_eq!(db.get_node("C").unwrap().label, "C");

        let db = parse("graph LR\nX & A B --> C[Sink]");
        assert_eq!(edge_pairs(&db), pairs(&[("X", "C")]));
        assert_eq!(db.get_node("C").unwrap().label, "Sink");
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let parser = FlowchartParser::new();
        let mut database = FlowchartDatabase::new();
        let err = parser.parse("  \n ", &mut database).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiagramError>(),
            Some(DiagramError::EmptyInput)
        ));
    }

    #[test]
    fn test_semicolon_statements() {
        let db = parse("graph LR; A-->B; B-->C");
        assert_eq!(db.direction(), Direction::LeftRight);
        assert_eq!(db.edge_count(), 2);
    }

    #[test]
    fn test_semicolons_inside_labels() {
        let db = parse("graph LR\nA[x; y] --> B");
        assert_eq!(db.get_node("A").unwrap().label, "x; y");
        assert_eq!(edge_pairs(&db), pairs(&[("A", "B")]));

        let db = parse("graph LR; A -->|yes; really| B; B --> C");
        assert_eq!(edge_pairs(&db), pairs(&[("A", "B"), ("B", "C")]));
        let labels: Vec<Option<String>> = db.edges().map(|e| e.label.clone()).collect();
        assert_eq!(labels, vec![Some("yes; really".to_string()), None]);
    }

    #[test]
    fn test_split_statements() {
        assert_eq!(split_statements("A-->B; B-->C"), vec!["A-->B", " B-->C"]);
        assert_eq!(split_statements("A{a;b}-->B(c;d)"), vec!["A{a;b}-->B(c;d)"]);
        assert_eq!(split_statements("A-->|p;q|B;C"), vec!["A-->|p;q|B", "C"]);
    }
}
