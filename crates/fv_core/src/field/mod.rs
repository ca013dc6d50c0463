//! # Field Module
//!
//! Spatial quantization of continuous field coordinates into sectors.
//!
//! ## Coordinate System
//! - Coordinates arrive pre-normalized to a single direction of play
//! - A sector is the grid cell `(floor(x / w), floor(y / w))` for cell width `w`
//! - Negative coordinates quantize with the same floor rule (no sign special-casing)

use serde::{Deserialize, Serialize};

use crate::events::TransitionRecord;

/// Default cell width in field-distance units (yards).
pub const DEFAULT_CELL_WIDTH: f64 = 5.0;

/// A continuous position on the field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldPos {
    pub x: f64,
    pub y: f64,
}

impl FieldPos {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A discrete grid cell of the playing field.
///
/// Identity is purely structural: two sectors with equal indices are the same graph key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Sector {
    pub x: i64,
    pub y: i64,
}

impl Sector {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Lower-left corner of this sector in field units.
    #[inline]
    pub fn origin(self, cell_width: f64) -> FieldPos {
        FieldPos { x: self.x as f64 * cell_width, y: self.y as f64 * cell_width }
    }
}

impl std::fmt::Display for Sector {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Floor of a cell quotient, snapping quotients within rounding error of an integer.
///
/// `k * w / w` can land a few ulps below `k` for non-dyadic widths (3.3, 0.7, ...),
/// which would otherwise floor a sector origin into the neighbouring cell.
#[inline]
fn cell_index(quotient: f64) -> i64 {
    let nearest = quotient.round();
    if (quotient - nearest).abs() <= 4.0 * f64::EPSILON * quotient.abs().max(1.0) {
        nearest as i64
    } else {
        quotient.floor() as i64
    }
}

/// Map a field position to the sector containing it.
///
/// `cell_width` must be positive; callers validate it through `ValueConfig::validate`.
#[inline]
pub fn quantize(pos: FieldPos, cell_width: f64) -> Sector {
    debug_assert!(cell_width > 0.0, "cell width must be positive, got {cell_width}");
    Sector { x: cell_index(pos.x / cell_width), y: cell_index(pos.y / cell_width) }
}

/// Classification of a sector-tagged transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransitionKind {
    /// Completed pass that did not score
    Pass,
    /// Completed pass into the scoring zone
    Score,
    /// Possession lost
    Turnover,
}

impl TransitionKind {
    /// Edge weight: 0 inherits the destination value, anything else is a fixed reward.
    pub fn weight(self) -> i32 {
        match self {
            TransitionKind::Pass => 0,
            TransitionKind::Score => 1,
            TransitionKind::Turnover => -1,
        }
    }

    pub fn is_completion(self) -> bool {
        !matches!(self, TransitionKind::Turnover)
    }
}

/// A transition record annotated with its source and destination sectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorTransition {
    pub source: Sector,
    pub dest: Sector,
    pub kind: TransitionKind,
}

impl SectorTransition {
    pub fn new(source: Sector, dest: Sector, kind: TransitionKind) -> Self {
        Self { source, dest, kind }
    }

    /// Quantize both endpoints of a transition record.
    pub fn from_record(record: &TransitionRecord, cell_width: f64) -> Self {
        match *record {
            TransitionRecord::Completion { source, dest, is_score } => Self {
                source: quantize(source, cell_width),
                dest: quantize(dest, cell_width),
                kind: if is_score { TransitionKind::Score } else { TransitionKind::Pass },
            },
            TransitionRecord::Turnover { source, turnover } => Self {
                source: quantize(source, cell_width),
                dest: quantize(turnover, cell_width),
                kind: TransitionKind::Turnover,
            },
        }
    }
}

/// Tag every record with its source and destination sector, preserving order.
pub fn quantize_records(records: &[TransitionRecord], cell_width: f64) -> Vec<SectorTransition> {
    records.iter().map(|r| SectorTransition::from_record(r, cell_width)).collect()
}
