//! # fv_core - Field Value Engine
//!
//! Estimates the expected value of holding possession in each region ("sector")
//! of the field from historical play-by-play data.
//!
//! ## Pipeline
//! 1. `events` - typed game events → completion/turnover records
//! 2. `field` - quantize record endpoints into sectors
//! 3. `graph` - sector transition graph (arena of nodes, weighted edges)
//! 4. `relax` - fixed-sweep value relaxation over the graph
//! 5. `surface` - flatten to `(x, y, value)` points for rendering
//!
//! ## Features
//! - Deterministic: identical input and configuration give identical output
//! - Diagnostics returned as data (`RelaxReport`), also emitted through `tracing`
//! - JSON API (`api::compute_surface_json`) for embedding

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]

pub mod api;
pub mod config;
pub mod error;
pub mod events;
pub mod field;
pub mod graph;
pub mod pipeline;
pub mod relax;
pub mod surface;

pub use api::{compute_surface_json, SurfaceRequest, SurfaceResponse};
pub use config::ValueConfig;
pub use error::{CoreError, Result};
pub use events::{classify, parse_event, GameEvent, GameEventsPayload, RawEvent, TeamSide, TransitionRecord};
pub use field::{quantize, FieldPos, Sector, SectorTransition, TransitionKind};
pub use graph::{Edge, Node, NodeId, SectorGraph};
pub use pipeline::{build_relaxed_graph, compute_value_surface};
pub use relax::{relax, RelaxReport, SweepStats, UpdateMode};
pub use surface::{export_surface, SectorSummary, ValuePoint, ValueSurface};
