use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A state-changing event recorded in the journal. `type` is the uppercase
/// spelling of the variant on the wire (`ORDER_SUBMITTED`, ...); an unknown
/// token read back from disk maps to `OrderUpdated` rather than failing the
/// whole line (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalEventType {
    OrderSubmitted,
    OrderUpdated,
    FillApplied,
    PositionOpened,
    PositionReduced,
    PositionClosed,
    PolicyChanged,
}

impl Default for JournalEventType {
    fn default() -> Self {
        JournalEventType::OrderUpdated
    }
}

impl JournalEventType {
    pub fn as_str(self) -> &'static str {
        match self {
            JournalEventType::OrderSubmitted => "ORDER_SUBMITTED",
            JournalEventType::OrderUpdated => "ORDER_UPDATED",
            JournalEventType::FillApplied => "FILL_APPLIED",
            JournalEventType::PositionOpened => "POSITION_OPENED",
            JournalEventType::PositionReduced => "POSITION_REDUCED",
            JournalEventType::PositionClosed => "POSITION_CLOSED",
            JournalEventType::PolicyChanged => "POLICY_CHANGED",
        }
    }

    /// Never fails: an unrecognized token falls back to `OrderUpdated`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "ORDER_SUBMITTED" => JournalEventType::OrderSubmitted,
            "ORDER_UPDATED" => JournalEventType::OrderUpdated,
            "FILL_APPLIED" => JournalEventType::FillApplied,
            "POSITION_OPENED" => JournalEventType::PositionOpened,
            "POSITION_REDUCED" => JournalEventType::PositionReduced,
            "POSITION_CLOSED" => JournalEventType::PositionClosed,
            "POLICY_CHANGED" => JournalEventType::PolicyChanged,
            _ => JournalEventType::OrderUpdated,
        }
    }
}

impl Serialize for JournalEventType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for JournalEventType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TokenVisitor;
        impl<'de> Visitor<'de> for TokenVisitor {
            type Value = JournalEventType;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a journal event type token")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(JournalEventType::from_token(v))
            }
        }
        deserializer.deserialize_str(TokenVisitor)
    }
}

/// One line in the append-only journal file.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEvent {
    pub seq: u64,
    pub ts_ms: i64,
    pub event_type: JournalEventType,
    pub market: String,
    pub entity_id: String,
    pub payload: serde_json::Value,
}

impl JournalEvent {
    pub fn new(
        ts_ms: i64,
        event_type: JournalEventType,
        market: impl Into<String>,
        entity_id: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            seq: 0,
            ts_ms,
            event_type,
            market: market.into(),
            entity_id: entity_id.into(),
            payload,
        }
    }
}
