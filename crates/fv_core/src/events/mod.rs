//! # Events Module
//!
//! Typed boundary between recorded play-by-play payloads and the sector model.
//!
//! - `wire` - serde model of the play-by-play service's event schema
//! - `game_event` - validated, typed game events
//! - `transition` - completion/turnover records consumed by the sector model

pub mod game_event;
pub mod transition;
pub mod wire;

pub use game_event::{parse_event, parse_events, parse_events_lenient, GameEvent, ParsedEvents, Pull, Throw, Turnover};
pub use transition::{classify, TransitionRecord};
pub use wire::{EventType, GameEventsData, GameEventsPayload, RawEvent, TeamSide};
