//! End-to-end computation: quantize → build → relax → export.

use tracing::info;

use crate::config::ValueConfig;
use crate::error::Result;
use crate::events::TransitionRecord;
use crate::field::quantize_records;
use crate::graph::SectorGraph;
use crate::relax::relax;
use crate::surface::{export_surface, summaries, ValueSurface};

/// Build the relaxed sector graph for `records`.
///
/// The configuration is validated before any work is done.
pub fn build_relaxed_graph(
    records: &[TransitionRecord],
    config: &ValueConfig,
) -> Result<(SectorGraph, crate::relax::RelaxReport)> {
    config.validate()?;
    let transitions = quantize_records(records, config.cell_width);
    let mut graph = SectorGraph::build(&transitions);
    let report = relax(&mut graph, config.iteration_count, config.update_mode);
    Ok((graph, report))
}

/// Compute the per-sector value surface for a set of transition records.
pub fn compute_value_surface(records: &[TransitionRecord], config: &ValueConfig) -> Result<ValueSurface> {
    let (graph, report) = build_relaxed_graph(records, config)?;

    info!(
        records = records.len(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        sweeps = report.sweeps.len(),
        final_error = report.final_error().unwrap_or(0.0),
        "value surface computed"
    );

    Ok(ValueSurface {
        cell_width: config.cell_width,
        points: export_surface(&graph, config.cell_width),
        sectors: summaries(&graph),
        edge_count: graph.edge_count(),
        report,
    })
}
