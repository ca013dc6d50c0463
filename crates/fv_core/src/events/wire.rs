//! Wire schema of recorded game-event payloads.
//!
//! Field names follow the service's camelCase JSON; unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Event type codes used by the play-by-play service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum EventType {
    DLine,
    OLine,
    Pull,
    Throw,
    Goal,
    Turnover,
    /// Codes without a known meaning (13, 15, 16 have been observed)
    Other(u32),
}

impl EventType {
    pub fn code(self) -> u32 {
        match self {
            EventType::DLine => 1,
            EventType::OLine => 2,
            EventType::Pull => 7,
            EventType::Throw => 18,
            EventType::Goal => 19,
            EventType::Turnover => 22,
            EventType::Other(code) => code,
        }
    }
}

impl From<u32> for EventType {
    fn from(code: u32) -> Self {
        match code {
            1 => EventType::DLine,
            2 => EventType::OLine,
            7 => EventType::Pull,
            18 => EventType::Throw,
            19 => EventType::Goal,
            22 => EventType::Turnover,
            other => EventType::Other(other),
        }
    }
}

impl From<EventType> for u32 {
    fn from(t: EventType) -> Self {
        t.code()
    }
}

/// One event exactly as recorded. Every payload field except `type` is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(rename = "type")]
    pub event_type: u32,
    /// Missing timestamps are treated as 0
    #[serde(default)]
    pub timestamp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thrower: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thrower_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thrower_y: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_y: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnover_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turnover_y: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub puller: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_ms: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<i64>,
}

impl RawEvent {
    pub fn kind(&self) -> EventType {
        EventType::from(self.event_type)
    }
}

/// Which team's event stream to read from a game payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl std::str::FromStr for TeamSide {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "home" => Ok(TeamSide::Home),
            "away" => Ok(TeamSide::Away),
            other => Err(format!("Unknown team side: {other} (expected home or away)")),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEventsData {
    #[serde(default)]
    pub home_events: Vec<RawEvent>,
    #[serde(default)]
    pub away_events: Vec<RawEvent>,
}

/// A recorded `gameEvents` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameEventsPayload {
    pub data: GameEventsData,
}

impl GameEventsPayload {
    pub fn events_for(&self, side: TeamSide) -> &[RawEvent] {
        match side {
            TeamSide::Home => &self.data.home_events,
            TeamSide::Away => &self.data.away_events,
        }
    }
}
