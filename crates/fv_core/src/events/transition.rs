//! Completion and turnover records, the input contract of the sector model.

use serde::{Deserialize, Serialize};

use super::game_event::GameEvent;
use crate::field::FieldPos;

/// A spatial transition between two field positions.
///
/// Coordinates are pre-normalized to a single direction of play.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransitionRecord {
    /// Completed pass; `is_score` marks a goal
    Completion { source: FieldPos, dest: FieldPos, is_score: bool },
    /// Possession lost at `turnover`
    Turnover { source: FieldPos, turnover: FieldPos },
}

impl TransitionRecord {
    pub fn pass(source: FieldPos, dest: FieldPos) -> Self {
        TransitionRecord::Completion { source, dest, is_score: false }
    }

    pub fn score(source: FieldPos, dest: FieldPos) -> Self {
        TransitionRecord::Completion { source, dest, is_score: true }
    }

    pub fn turnover(source: FieldPos, turnover: FieldPos) -> Self {
        TransitionRecord::Turnover { source, turnover }
    }

    pub fn source(&self) -> FieldPos {
        match *self {
            TransitionRecord::Completion { source, .. } | TransitionRecord::Turnover { source, .. } => source,
        }
    }
}

/// Keep throws, goals and turnovers in input order; drop everything else.
pub fn classify(events: &[GameEvent]) -> Vec<TransitionRecord> {
    events
        .iter()
        .filter_map(|event| match event {
            GameEvent::Throw(t) => Some(TransitionRecord::pass(t.thrower_pos, t.receiver_pos)),
            GameEvent::Goal(t) => Some(TransitionRecord::score(t.thrower_pos, t.receiver_pos)),
            GameEvent::Turnover(t) => Some(TransitionRecord::turnover(t.thrower_pos, t.turnover_pos)),
            GameEvent::Line { .. } | GameEvent::Pull(_) | GameEvent::Other(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::game_event::{Throw, Turnover};

    fn throw(from: (f64, f64), to: (f64, f64)) -> Throw {
        Throw {
            timestamp: 0,
            thrower: None,
            receiver: None,
            thrower_pos: FieldPos::new(from.0, from.1),
            receiver_pos: FieldPos::new(to.0, to.1),
        }
    }

    #[test]
    fn test_classify_keeps_order_and_drops_other_events() {
        let events = vec![
            GameEvent::Line { offense: true, players: vec![], time: None },
            GameEvent::Throw(throw((0.0, 20.0), (5.0, 40.0))),
            GameEvent::Other(13),
            GameEvent::Turnover(Turnover {
                timestamp: 3,
                thrower: None,
                thrower_pos: FieldPos::new(5.0, 40.0),
                turnover_pos: FieldPos::new(8.0, 70.0),
            }),
            GameEvent::Goal(throw((1.0, 90.0), (2.0, 105.0))),
        ];

        let records = classify(&events);
        assert_eq!(
            records,
            vec![
                TransitionRecord::pass(FieldPos::new(0.0, 20.0), FieldPos::new(5.0, 40.0)),
                TransitionRecord::turnover(FieldPos::new(5.0, 40.0), FieldPos::new(8.0, 70.0)),
                TransitionRecord::score(FieldPos::new(1.0, 90.0), FieldPos::new(2.0, 105.0)),
            ]
        );
        assert_eq!(records[1].source(), FieldPos::new(5.0, 40.0));
    }

    #[test]
    fn test_record_json_shape() {
        let json = r#"{"kind":"completion","source":{"x":1.0,"y":2.0},"dest":{"x":3.0,"y":4.0},"is_score":true}"#;
        let record: TransitionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record, TransitionRecord::score(FieldPos::new(1.0, 2.0), FieldPos::new(3.0, 4.0)));
    }
}
