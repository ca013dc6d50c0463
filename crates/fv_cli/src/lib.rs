//! Field Value CLI Library
//!
//! Recorded game-events payload → value surface → CSV / JSON files

use anyhow::{Context, Result};
use fv_core::events::{classify, parse_events_lenient, GameEventsPayload, TeamSide};
use fv_core::{compute_value_surface, ValueConfig, ValuePoint, ValueSurface};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Output format for the value surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// Load a recorded `gameEvents` response from disk
pub fn load_payload(path: &Path) -> Result<GameEventsPayload> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read events file: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse events JSON: {}", path.display()))
}

/// Compute the surface for one team's events in a payload
pub fn surface_for_side(
    payload: &GameEventsPayload,
    side: TeamSide,
    config: &ValueConfig,
) -> Result<ValueSurface> {
    let raw = payload.events_for(side);
    let parsed = parse_events_lenient(raw);
    if parsed.skipped > 0 {
        warn!(skipped = parsed.skipped, total = raw.len(), "malformed events skipped");
    }

    let records = classify(&parsed.events);
    info!(events = raw.len(), transitions = records.len(), ?side, "events classified");

    compute_value_surface(&records, config).context("Value surface computation failed")
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    Ok(())
}

/// Write `x,y,value` rows with a header line
pub fn write_csv(path: &Path, points: &[ValuePoint]) -> Result<()> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
    for point in points {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the full surface (points, sector summaries, sweep diagnostics) as pretty JSON
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent(path)?;
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write output file: {}", path.display()))?;
    Ok(())
}

pub fn write_surface(path: &Path, surface: &ValueSurface, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(path, &surface.points),
        OutputFormat::Json => write_json(path, surface),
    }
}

/// Human-readable run summary
pub fn render_summary(surface: &ValueSurface) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "   Sectors:     {} ({} edges, cell width {})\n",
        surface.node_count(),
        surface.edge_count,
        surface.cell_width
    ));
    out.push_str(&format!("   Sweeps:      {} ({:?})\n", surface.report.sweeps.len(), surface.report.mode));
    if let Some(err) = surface.report.final_error() {
        out.push_str(&format!("   Final error: {:.4}\n", err));
    }
    if let Some((lo, hi)) = surface.value_range() {
        out.push_str(&format!("   Value range: {:.2} .. {:.2}\n", lo, hi));
    }
    out
}
