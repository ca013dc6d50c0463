//! Typed game events.
//!
//! `parse_event` is strict: a throw, goal or turnover without the coordinates it
//! needs is rejected. `parse_events_lenient` skips such events and counts them.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::wire::{EventType, RawEvent};
use crate::error::{CoreError, Result};
use crate::field::FieldPos;

/// A completed throw (type 18) or goal (type 19).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Throw {
    pub timestamp: i64,
    pub thrower: Option<String>,
    pub receiver: Option<String>,
    pub thrower_pos: FieldPos,
    pub receiver_pos: FieldPos,
}

/// Possession lost at `turnover_pos` (type 22).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turnover {
    pub timestamp: i64,
    pub thrower: Option<String>,
    pub thrower_pos: FieldPos,
    pub turnover_pos: FieldPos,
}

/// Pull that starts a point (type 7). Coordinates are optional on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pull {
    pub timestamp: i64,
    pub puller: Option<String>,
    pub landing_pos: Option<FieldPos>,
    pub hang_time_ms: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Line on the field for a point; `offense` is true for an O-line (type 2)
    Line { offense: bool, players: Vec<String>, time: Option<i64> },
    Pull(Pull),
    Throw(Throw),
    Goal(Throw),
    Turnover(Turnover),
    Other(u32),
}

impl GameEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            GameEvent::Line { offense: true, .. } => EventType::OLine,
            GameEvent::Line { offense: false, .. } => EventType::DLine,
            GameEvent::Pull(_) => EventType::Pull,
            GameEvent::Throw(_) => EventType::Throw,
            GameEvent::Goal(_) => EventType::Goal,
            GameEvent::Turnover(_) => EventType::Turnover,
            GameEvent::Other(code) => EventType::Other(*code),
        }
    }
}

fn require_pos(
    raw: &RawEvent,
    x: Option<f64>,
    y: Option<f64>,
    x_name: &str,
    y_name: &str,
) -> Result<FieldPos> {
    match (x, y) {
        (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Ok(FieldPos::new(x, y)),
        (Some(_), Some(_)) => {
            Err(CoreError::malformed(raw.event_type, format!("non-finite {x_name}/{y_name}")))
        }
        (None, _) => Err(CoreError::malformed(raw.event_type, format!("missing {x_name}"))),
        (_, None) => Err(CoreError::malformed(raw.event_type, format!("missing {y_name}"))),
    }
}

fn parse_throw(raw: &RawEvent) -> Result<Throw> {
    Ok(Throw {
        timestamp: raw.timestamp,
        thrower: raw.thrower.clone(),
        receiver: raw.receiver.clone(),
        thrower_pos: require_pos(raw, raw.thrower_x, raw.thrower_y, "throwerX", "throwerY")?,
        receiver_pos: require_pos(raw, raw.receiver_x, raw.receiver_y, "receiverX", "receiverY")?,
    })
}

/// Convert a recorded event into a typed game event.
pub fn parse_event(raw: &RawEvent) -> Result<GameEvent> {
    let event = match raw.kind() {
        kind @ (EventType::DLine | EventType::OLine) => GameEvent::Line {
            offense: kind == EventType::OLine,
            players: raw.line.clone().unwrap_or_default(),
            time: raw.time,
        },
        EventType::Pull => GameEvent::Pull(Pull {
            timestamp: raw.timestamp,
            puller: raw.puller.clone(),
            landing_pos: match (raw.pull_x, raw.pull_y) {
                (Some(x), Some(y)) => Some(FieldPos::new(x, y)),
                _ => None,
            },
            hang_time_ms: raw.pull_ms,
        }),
        EventType::Throw => GameEvent::Throw(parse_throw(raw)?),
        EventType::Goal => GameEvent::Goal(parse_throw(raw)?),
        EventType::Turnover => GameEvent::Turnover(Turnover {
            timestamp: raw.timestamp,
            thrower: raw.thrower.clone(),
            thrower_pos: require_pos(raw, raw.thrower_x, raw.thrower_y, "throwerX", "throwerY")?,
            turnover_pos: require_pos(
                raw,
                raw.turnover_x,
                raw.turnover_y,
                "turnoverX",
                "turnoverY",
            )?,
        }),
        EventType::Other(code) => GameEvent::Other(code),
    };
    Ok(event)
}

/// Parse every event, failing on the first malformed one.
pub fn parse_events(raw: &[RawEvent]) -> Result<Vec<GameEvent>> {
    raw.iter().map(parse_event).collect()
}

/// Result of lenient parsing.
#[derive(Debug, Clone, Default)]
pub struct ParsedEvents {
    pub events: Vec<GameEvent>,
    /// Events dropped because they were malformed
    pub skipped: usize,
}

/// Parse every event, skipping malformed ones with a warning.
pub fn parse_events_lenient(raw: &[RawEvent]) -> ParsedEvents {
    let mut parsed = ParsedEvents { events: Vec::with_capacity(raw.len()), skipped: 0 };
    for (idx, ev) in raw.iter().enumerate() {
        match parse_event(ev) {
            Ok(event) => parsed.events.push(event),
            Err(e) => {
                warn!(index = idx, error = %e, "skipping malformed event");
                parsed.skipped += 1;
            }
        }
    }
    parsed
}
