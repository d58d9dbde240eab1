//! Sequence diagram parser
//!
//! Parses sequence diagram syntax into the database. Lines are tried as a
//! participant declaration first, then as a message; anything else is
//! dropped.

use anyhow::Result;
use tracing::{debug, info, span, trace, Level};

use super::syntax;
use super::{Message, Participant, SequenceDatabase};
use crate::core::{DiagramError, Parser};

/// Sequence diagram parser
pub struct SequenceParser;

impl SequenceParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SequenceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<SequenceDatabase> for SequenceParser {
    fn parse(&self, input: &str, database: &mut SequenceDatabase) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_sequence", input_len = input.len());
        let _enter = parse_span.enter();

        DiagramError::ensure_not_empty(input)?;

        for (idx, raw) in input.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with("%%") || syntax::is_header(line) {
                continue;
            }

            if let Some(decl) = syntax::parse_participant(line) {
                let participant = match decl.alias {
                    Some(alias) => Participant::with_label(decl.id, alias),
                    None => Participant::new(decl.id),
                };
                trace!(line = line_no, id = %participant.id, "Parsed participant");
                database.add_participant(participant)?;
                continue;
            }

            if let Some(msg) = syntax::parse_message(line) {
                trace!(line = line_no, from = %msg.from, to = %msg.to, "Parsed message");
                database.add_message(Message::new(msg.from, msg.to, msg.text).with_style(msg.style))?;
                continue;
            }

            debug!(line = line_no, content = line, "Skipped unrecognized line");
        }

        info!(
            participant_count = database.participant_count(),
            message_count = database.message_count(),
            "Parsed sequence diagram"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "sequence"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LineStyle;

    fn parse(input: &str) -> SequenceDatabase {
        let mut db = SequenceDatabase::new();
        SequenceParser::new().parse(input, &mut db).unwrap();
        db
    }

    #[test]
    fn test_parse_simple_message() {
        let db = parse("sequenceDiagram\n    Alice->>Bob: Hello");
        assert_eq!(db.participant_count(), 2);
        assert_eq!(db.message_count(), 1);

        let msg = &db.messages()[0];
        assert_eq!(msg.from, "Alice");
        assert_eq!(msg.to, "Bob");
        assert_eq!(msg.text, "Hello");
        assert_eq!(msg.style, LineStyle::Solid);
    }

    #[test]
    fn test_parse_dotted_arrows() {
        let db = parse("sequenceDiagram\nB-->>A: ok\nB-->A: ok\nB..>A: ok\nB->A: ok");
        let styles: Vec<_> = db.messages().iter().map(|m| m.style).collect();
        assert_eq!(
            styles,
            vec![
                LineStyle::Dotted,
                LineStyle::Dotted,
                LineStyle::Dotted,
                LineStyle::Solid
            ]
        );
    }

    #[test]
    fn test_explicit_participants_keep_declaration_order() {
        let db = parse("sequenceDiagram\nparticipant Alice\nparticipant Bob\nBob->>Alice: Hi");
        let ids: Vec<_> = db.participants().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_alias_is_keyed_by_id() {
        let db = parse("sequenceDiagram\nparticipant A as Alice\nparticipant B as Bob\nA->>B: Hello");
        assert_eq!(db.participant_count(), 2);
        assert_eq!(db.participants()[0].label, "Alice");
        assert_eq!(db.participants()[1].label, "Bob");
        assert_eq!(db.messages()[0].from, "A");
    }

    #[test]
    fn test_actor_keyword() {
        let db = parse("sequenceDiagram\nactor User\nUser->>System: Request");
        assert_eq!(db.participants()[0].id, "User");
        assert_eq!(db.participant_count(), 2);
    }

    #[test]
    fn test_unrecognized_lines_are_dropped() {
        let db = parse(
            "sequenceDiagram\n%% comment\nloop Every minute\nA->>B: ping\nend\nNote right of B: hmm\nnonsense",
        );
        assert_eq!(db.message_count(), 1);
        assert_eq!(db.participant_count(), 2);
    }

    #[test]
    fn test_self_message_is_kept() {
        let db = parse("sequenceDiagram\nA->>A: loop");
        assert_eq!(db.message_count(), 1);
        assert!(db.messages()[0].is_self_message());
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let mut db = SequenceDatabase::new();
        let err = SequenceParser::new().parse("\n\t", &mut db).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiagramError>(),
            Some(DiagramError::EmptyInput)
        ));
    }

    #[test]
    fn test_header_only_parses_to_nothing() {
        let db = parse("sequenceDiagram");
        assert_eq!(db.participant_count(), 0);
    }
}
