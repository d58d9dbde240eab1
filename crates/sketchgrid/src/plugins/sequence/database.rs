//! Sequence diagram database implementation
//!
//! Stores participants in first-seen order and messages in declaration order.

use anyhow::Result;
use std::collections::HashMap;
use tracing::trace;

use crate::core::{Database, LineStyle};

/// A participant in the sequence diagram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Key used in message lines
    pub id: String,
    /// Header text (differs from id via `as` syntax)
    pub label: String,
}

impl Participant {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
        }
    }

    pub fn with_label(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A message between two participants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Source participant id
    pub from: String,
    /// Target participant id
    pub to: String,
    pub text: String,
    pub style: LineStyle,
}

impl Message {
    pub fn new(from: impl Into<String>, to: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            text: text.into(),
            style: LineStyle::Solid,
        }
    }

    pub fn with_style(mut self, style: LineStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns true if the message starts and ends on the same lifeline
    pub fn is_self_message(&self) -> bool {
        self.from == self.to
    }
}

/// Sequence diagram database
#[derive(Debug, Default, Clone)]
pub struct SequenceDatabase {
    participants: Vec<Participant>,
    index: HashMap<String, usize>,
    messages: Vec<Message>,
}

impl SequenceDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a participant; the first declaration of an id wins
    pub fn add_participant(&mut self, participant: Participant) -> Result<()> {
        if self.index.contains_key(&participant.id) {
            trace!(id = %participant.id, "Participant already declared");
            return Ok(());
        }
        trace!(id = %participant.id, label = %participant.label, "Added participant");
        self.index
            .insert(participant.id.clone(), self.participants.len());
        self.participants.push(participant);
        Ok(())
    }

    /// Register an implicit participant labelled with its id
    pub fn ensure_participant(&mut self, id: &str) -> Result<()> {
        if !self.index.contains_key(id) {
            self.add_participant(Participant::new(id))?;
        }
        Ok(())
    }

    /// Add a message, creating any participant it mentions
    pub fn add_message(&mut self, message: Message) -> Result<()> {
        self.ensure_participant(&message.from)?;
        self.ensure_participant(&message.to)?;
        trace!(
            from = %message.from,
            to = %message.to,
            style = %message.style,
            "Added message"
        );
        self.messages.push(message);
        Ok(())
    }

    /// All participants in column order
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// All messages in top-to-bottom order
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Column index of a participant
    pub fn participant_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }
}

impl Database for SequenceDatabase {
    type Node = Participant;
    type Edge = Message;

    fn add_node(&mut self, node: Participant) -> Result<()> {
        self.add_participant(node)
    }

    fn add_edge(&mut self, edge: Message) -> Result<()> {
        self.add_message(edge)
    }

    fn get_node(&self, id: &str) -> Option<&Participant> {
        self.participant_index(id).map(|idx| &self.participants[idx])
    }

    fn nodes(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    fn clear(&mut self) {
        self.participants.clear();
        self.index.clear();
        self.messages.clear();
    }

    fn node_count(&self) -> usize {
        self.participant_count()
    }

    fn edge_count(&self) -> usize {
        self.message_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_participant() {
        let mut db = SequenceDatabase::new();
        db.add_participant(Participant::new("Alice")).unwrap();
        db.add_participant(Participant::new("Bob")).unwrap();
        assert_eq!(db.participant_count(), 2);
        assert_eq!(db.participant_index("Bob"), Some(1));
    }

    #[test]
    fn test_first_declaration_wins() {
        let mut db = SequenceDatabase::new();
        db.add_participant(Participant::with_label("A", "Alice")).unwrap();
        db.add_participant(Participant::with_label("A", "Other")).unwrap();
        assert_eq!(db.participant_count(), 1);
        assert_eq!(db.get_node("A").unwrap().label, "Alice");
    }

    #[test]
    fn test_messages_create_implicit_participants() {
        let mut db = SequenceDatabase::new();
        db.add_participant(Participant::new("Charlie")).unwrap();
        db.add_message(Message::new("Alice", "Bob", "Hello")).unwrap();

        let ids: Vec<_> = db.participants().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["Charlie", "Alice", "Bob"]);
        assert_eq!(db.message_count(), 1);
    }

    #[test]
    fn test_self_message() {
        let mut db = SequenceDatabase::new();
        db.add_message(Message::new("A", "A", "loop")).unwrap();
        assert_eq!(db.participant_count(), 1);
        assert!(db.messages()[0].is_self_message());
    }

    #[test]
    fn test_clear() {
        let mut db = SequenceDatabase::new();
        db.add_message(Message::new("A", "B", "x").with_style(LineStyle::Dotted))
            .unwrap();
        assert_eq!(db.messages()[0].style, LineStyle::Dotted);
        db.clear();
        assert!(db.is_empty());
        assert_eq!(db.participant_index("A"), None);
    }
}
