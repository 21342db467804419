//! Chat session and turn types for SchoolCatch.
//!
//! A session is an identifier plus an append-only list of turns. Turns are
//! owned by their session's history and are never edited after they are
//! appended.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::llm::Message;

/// Identifier of a chat session.
///
/// Comes from the caller (browser cookie, CLI flag); freshly issued
/// identifiers are UUID v7 strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Wrap a caller-supplied identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Issue a new, time-sortable identifier.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" | "human" => Ok(TurnRole::User),
            "assistant" | "ai" => Ok(TurnRole::Assistant),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// One message in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    fn new(role: TurnRole, content: String) -> Self {
        Self {
            role,
            content,
            created_at: Utc::now(),
        }
    }

    /// Convert to the provider-agnostic LLM message shape.
    pub fn to_message(&self) -> Message {
        match self.role {
            TurnRole::User => Message::user(self.content.clone()),
            TurnRole::Assistant => Message::assistant(self.content.clone()),
        }
    }
}

/// Ordered, append-only turn history of one session.
///
/// Turns can only be added as complete user/assistant exchanges, so a
/// history always alternates user, assistant, user, ... and holds an even
/// number of turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHistory {
    turns: Vec<Turn>,
}

impl SessionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one question/answer exchange as two turns.
    pub fn push_exchange(&mut self, question: impl Into<String>, answer: impl Into<String>) {
        self.turns.push(Turn::new(TurnRole::User, question.into()));
        self.turns.push(Turn::new(TurnRole::Assistant, answer.into()));
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Drop every turn. Used by the "new conversation" action.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// The history as LLM messages, oldest first.
    pub fn to_messages(&self) -> Vec<Message> {
        self.turns.iter().map(Turn::to_message).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MessageRole;

    #[test]
    fn test_session_id_generate_is_unique() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(a.as_str()).is_ok());
    }

    #[test]
    fn test_session_id_serializes_as_plain_string() {
        let id = SessionId::new("abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");
    }

    #[test]
    fn test_turn_role_accepts_ai_alias() {
        assert_eq!("ai".parse::<TurnRole>().unwrap(), TurnRole::Assistant);
        assert_eq!("human".parse::<TurnRole>().unwrap(), TurnRole::User);
        assert!("system".parse::<TurnRole>().is_err());
    }

    #[test]
    fn test_push_exchange_alternates_roles() {
        let mut history = SessionHistory::new();
        history.push_exchange("장학금 알려줘", "다자녀 장학금이 있습니다.");
        history.push_exchange("그럼 신청 기간은?", "9월 1일부터입니다.");

        assert_eq!(history.len(), 4);
        let roles: Vec<TurnRole> = history.turns().iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![
                TurnRole::User,
                TurnRole::Assistant,
                TurnRole::User,
                TurnRole::Assistant
            ]
        );
        assert_eq!(history.turns()[2].content, "그럼 신청 기간은?");
    }

    #[test]
    fn test_turns_are_ordered_by_arrival() {
        let mut history = SessionHistory::new();
        history.push_exchange("q1", "a1");
        history.push_exchange("q2", "a2");
        let turns = history.turns();
        assert!(turns.windows(2).all(|w| w[0].created_at <= w[1].created_at));
    }

    #[test]
    fn test_to_messages_maps_roles() {
        let mut history = SessionHistory::new();
        history.push_exchange("q", "a");
        let messages = history.to_messages();
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[1].role, MessageRole::Assistant);
        assert_eq!(messages[1].content, "a");
    }

    #[test]
    fn test_clear_empties_history() {
        let mut history = SessionHistory::new();
        history.push_exchange("q", "a");
        history.clear();
        assert!(history.is_empty());
    }
}
