//! JSON entry point for value-surface computation.
//!
//! Request: recorded events plus an optional configuration. Malformed events are
//! skipped and counted rather than failing the whole request.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::ValueConfig;
use crate::events::{classify, parse_events_lenient, RawEvent};
use crate::pipeline::compute_value_surface;
use crate::relax::SweepStats;
use crate::surface::ValuePoint;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurfaceRequest {
    pub events: Vec<RawEvent>,
    /// Falls back to `ValueConfig::default()` when absent
    #[serde(default)]
    pub config: Option<ValueConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceResponse {
    pub points: Vec<ValuePoint>,
    pub sweeps: Vec<SweepStats>,
    pub node_count: usize,
    pub edge_count: usize,
    pub skipped_events: usize,
}

/// Compute a value surface from a JSON `SurfaceRequest`, returning a JSON `SurfaceResponse`.
pub fn compute_surface_json(request_json: &str) -> Result<String, String> {
    let request: SurfaceRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid request JSON: {e}"))?;

    let config = request.config.unwrap_or_default();
    let parsed = parse_events_lenient(&request.events);
    if parsed.skipped > 0 {
        warn!(skipped = parsed.skipped, total = request.events.len(), "malformed events skipped");
    }
    let records = classify(&parsed.events);

    let surface = compute_value_surface(&records, &config).map_err(|e| e.to_string())?;

    let response = SurfaceResponse {
        node_count: surface.node_count(),
        edge_count: surface.edge_count,
        points: surface.points,
        sweeps: surface.report.sweeps,
        skipped_events: parsed.skipped,
    };
    serde_json::to_string(&response).map_err(|e| format!("Failed to serialize response: {e}"))
}
