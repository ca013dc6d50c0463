//! # Value Surface
//!
//! Flattens the relaxed graph into `(x, y, value)` points in field units.
//! One point per node, in graph insertion order, with no aggregation.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::field::Sector;
use crate::graph::SectorGraph;
use crate::relax::RelaxReport;

/// One sector's value, positioned at the sector's origin in field units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuePoint {
    pub x: f64,
    pub y: f64,
    pub value: f64,
}

pub fn export_surface(graph: &SectorGraph, cell_width: f64) -> Vec<ValuePoint> {
    graph
        .nodes()
        .iter()
        .map(|node| {
            let origin = node.sector.origin(cell_width);
            ValuePoint { x: origin.x, y: origin.y, value: node.value }
        })
        .collect()
}

/// Per-sector summary line: value plus outgoing edge count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorSummary {
    pub sector: Sector,
    pub value: f64,
    pub edge_count: usize,
}

pub fn summaries(graph: &SectorGraph) -> Vec<SectorSummary> {
    graph
        .nodes()
        .iter()
        .map(|node| {
            trace!(sector = %node.sector, value = node.value, edges = node.edges.len(), "sector value");
            SectorSummary { sector: node.sector, value: node.value, edge_count: node.edges.len() }
        })
        .collect()
}

/// Result of a full computation run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ValueSurface {
    pub cell_width: f64,
    pub points: Vec<ValuePoint>,
    pub sectors: Vec<SectorSummary>,
    pub report: RelaxReport,
    pub edge_count: usize,
}

impl ValueSurface {
    pub fn node_count(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(min, max)` of the point values, `None` when empty.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.points.iter().map(|p| p.value).fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    pub fn mean_value(&self) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points.iter().map(|p| p.value).sum::<f64>() / self.points.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relax::{relax, UpdateMode};

    #[test]
    fn test_export_scales_sector_indices() {
        let mut g = SectorGraph::new();
        g.add_edge(Sector::new(2, 9), Sector::new(3, 10), 1);
        g.add_edge(Sector::new(-1, 4), Sector::new(2, 9), 0);
        relax(&mut g, 2, UpdateMode::GaussSeidel);

        let points = export_surface(&g, 5.0);
        assert_eq!(
            points,
            vec![
                ValuePoint { x: 10.0, y: 45.0, value: 1.0 },
                ValuePoint { x: 15.0, y: 50.0, value: 0.0 },
                ValuePoint { x: -5.0, y: 20.0, value: 1.0 },
            ]
        );
    }

    #[test]
    fn test_summaries_report_edge_counts() {
        let mut g = SectorGraph::new();
        g.add_edge(Sector::new(0, 0), Sector::new(0, 1), 0);
        g.add_edge(Sector::new(0, 0), Sector::new(0, 1), -1);

        let rows = summaries(&g);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].edge_count, 2);
        assert_eq!(rows[1].edge_count, 0);
    }

    #[test]
    fn test_value_range_and_mean() {
        let surface = ValueSurface {
            points: vec![
                ValuePoint { x: 0.0, y: 0.0, value: -0.5 },
                ValuePoint { x: 5.0, y: 0.0, value: 1.0 },
                ValuePoint { x: 10.0, y: 0.0, value: 0.0 },
            ],
            ..Default::default()
        };
        assert_eq!(surface.value_range(), Some((-0.5, 1.0)));
        assert_eq!(surface.mean_value(), Some(0.5 / 3.0));
        assert_eq!(ValueSurface::default().value_range(), None);
    }
}
