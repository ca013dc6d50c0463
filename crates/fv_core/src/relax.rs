//! # Value Relaxation
//!
//! Fixed-sweep iterative relaxation of per-sector expected values.
//!
//! For a node `n` with outgoing edges `e_1..e_k`:
//!
//! ```text
//! contribution(e) = e.weight            if e.weight != 0
//!                 = value(e.to)         if e.weight == 0 and e.to != n
//!                 = (skipped)           if e.weight == 0 and e.to == n
//!
//! value(n) = mean of the defined contributions
//! ```
//!
//! Sink nodes (no outgoing edges) are never updated. Nodes whose only edges are
//! non-terminal self-loops have no defined mean and are left untouched for the sweep.
//!
//! ## Update modes
//! - `GaussSeidel` (default): nodes are visited in insertion order and each new
//!   value is written back immediately, so later nodes in the same sweep read
//!   values already updated during that sweep.
//! - `Synchronized`: every node reads the values from the start of the sweep.
//!   Same fixed point, different trajectory on graphs with cycles; results do
//!   not depend on node insertion order.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::graph::{Node, NodeId, SectorGraph};

/// Default number of sweeps.
pub const DEFAULT_ITERATIONS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    /// In-place update in insertion order
    #[default]
    GaussSeidel,
    /// Double-buffered update (Jacobi)
    Synchronized,
}

/// Diagnostics for one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepStats {
    /// 1-based sweep number
    pub sweep: u32,
    /// `sum(|old - new|) / node_count` over the nodes updated this sweep
    pub mean_abs_change: f64,
    pub updated_nodes: usize,
    /// Nodes skipped because all of their edges were non-terminal self-loops
    pub degenerate_nodes: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RelaxReport {
    pub mode: UpdateMode,
    pub sweeps: Vec<SweepStats>,
}

impl RelaxReport {
    /// Mean absolute change of the last sweep.
    pub fn final_error(&self) -> Option<f64> {
        self.sweeps.last().map(|s| s.mean_abs_change)
    }

    pub fn errors(&self) -> Vec<f64> {
        self.sweeps.iter().map(|s| s.mean_abs_change).collect()
    }

    /// True when no sweep changed values more than the sweep before it.
    pub fn is_non_increasing(&self) -> bool {
        self.sweeps.windows(2).all(|w| w[1].mean_abs_change <= w[0].mean_abs_change)
    }
}

/// Mean of the defined edge contributions, reading destination values through `value_of`.
///
/// Returns `None` for sinks and for nodes with no contributing edge.
fn updated_value(node: &Node, value_of: impl Fn(NodeId) -> f64) -> Option<f64> {
    let mut total = 0.0;
    let mut count = 0usize;
    for edge in node.contributing_edges() {
        total += if edge.is_terminal() { edge.weight as f64 } else { value_of(edge.to) };
        count += 1;
    }
    (count > 0).then(|| total / count as f64)
}

/// Run `iterations` sweeps over `graph`, updating node values in place.
pub fn relax(graph: &mut SectorGraph, iterations: u32, mode: UpdateMode) -> RelaxReport {
    let mut report = RelaxReport { mode, sweeps: Vec::with_capacity(iterations as usize) };
    for sweep in 1..=iterations {
        let stats = match mode {
            UpdateMode::GaussSeidel => sweep_in_place(graph, sweep),
            UpdateMode::Synchronized => sweep_synchronized(graph, sweep),
        };
        debug!(
            sweep,
            mean_abs_change = stats.mean_abs_change,
            updated = stats.updated_nodes,
            "relaxation sweep"
        );
        if stats.degenerate_nodes > 0 {
            warn!(sweep, count = stats.degenerate_nodes, "nodes with only self-loop edges left unchanged");
        }
        report.sweeps.push(stats);
    }
    report
}

fn sweep_in_place(graph: &mut SectorGraph, sweep: u32) -> SweepStats {
    let mut stats = SweepStats { sweep, mean_abs_change: 0.0, updated_nodes: 0, degenerate_nodes: 0 };
    let mut total_change = 0.0;

    for i in 0..graph.node_count() {
        let new_value = {
            let nodes = graph.nodes();
            let node = &nodes[i];
            if node.is_sink() {
                continue;
            }
            updated_value(node, |to| nodes[to.index()].value)
        };
        let Some(new_value) = new_value else {
            stats.degenerate_nodes += 1;
            continue;
        };
        let node = &mut graph.nodes_mut()[i];
        total_change += (node.value - new_value).abs();
        node.value = new_value;
        stats.updated_nodes += 1;
    }

    stats.mean_abs_change = mean_change(total_change, graph.node_count());
    stats
}

fn sweep_synchronized(graph: &mut SectorGraph, sweep: u32) -> SweepStats {
    let mut stats = SweepStats { sweep, mean_abs_change: 0.0, updated_nodes: 0, degenerate_nodes: 0 };
    let snapshot = graph.values();

    let updates: Vec<Option<f64>> = graph
        .nodes()
        .iter()
        .map(|node| {
            if node.is_sink() {
                return None;
            }
            let value = updated_value(node, |to| snapshot[to.index()]);
            if value.is_none() {
                stats.degenerate_nodes += 1;
            }
            value
        })
        .collect();

    let mut total_change = 0.0;
    for (node, update) in graph.nodes_mut().iter_mut().zip(updates) {
        if let Some(new_value) = update {
            total_change += (node.value - new_value).abs();
            node.value = new_value;
            stats.updated_nodes += 1;
        }
    }

    stats.mean_abs_change = mean_change(total_change, graph.node_count());
    stats
}

#[inline]
fn mean_change(total: f64, node_count: usize) -> f64 {
    if node_count == 0 {
        0.0
    } else {
        total / node_count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Sector, SectorTransition, TransitionKind};

    const A: Sector = Sector::new(0, 0);
    const B: Sector = Sector::new(0, 1);
    const C: Sector = Sector::new(0, 2);
    const D: Sector = Sector::new(0, 3);

    fn set_value(graph: &mut SectorGraph, sector: Sector, value: f64) {
        let id = graph.id_of(sector).unwrap();
        graph.nodes_mut()[id.index()].value = value;
    }

    fn value(graph: &SectorGraph, sector: Sector) -> f64 {
        graph.value_of(sector).unwrap()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-12, "expected {expected}, got {actual}");
    }

    #[test]
    fn test_edge_multiplicity_weights_destination() {
        let mut g = SectorGraph::new();
        g.add_edge(A, B, 0);
        g.add_edge(A, B, 0);
        g.add_edge(A, C, 1);
        set_value(&mut g, B, 0.4);

        relax(&mut g, 1, UpdateMode::GaussSeidel);

        // B counted twice: (0.4 + 0.4 + 1) / 3
        assert_close(value(&g, A), 0.6);
    }

    #[test]
    fn test_self_loop_excluded_from_mean() {
        let mut g = SectorGraph::new();
        g.add_edge(A, A, 0);
        g.add_edge(A, A, 0);
        g.add_edge(A, B, 1);

        relax(&mut g, 1, UpdateMode::GaussSeidel);

        assert_close(value(&g, A), 1.0);
    }

    #[test]
    fn test_terminal_self_loop_contributes_weight() {
        let mut g = SectorGraph::new();
        g.add_edge(A, A, -1);
        g.add_edge(A, A, 0);
        g.add_edge(A, B, 1);
        set_value(&mut g, A, 0.9);

        let report = relax(&mut g, 1, UpdateMode::GaussSeidel);

        // mean(-1, +1); the pass self-loop is ignored
        assert_close(value(&g, A), 0.0);
        assert_eq!(report.sweeps[0].degenerate_nodes, 0);
    }

    #[test]
    fn test_terminal_rewards_ignore_neighbor_values() {
        let mut g = SectorGraph::new();
        g.add_edge(A, B, -1);
        g.add_edge(A, C, 1);
        set_value(&mut g, B, 7.5);
        set_value(&mut g, C, -3.0);

        relax(&mut g, 1, UpdateMode::GaussSeidel);

        assert_close(value(&g, A), 0.0);
    }

    #[test]
    fn test_sink_nodes_never_change() {
        let mut g = SectorGraph::new();
        g.add_edge(A, B, 0);
        g.add_edge(B, C, 1);
        g.add_edge(A, D, -1);
        set_value(&mut g, D, 0.25);

        for mode in [UpdateMode::GaussSeidel, UpdateMode::Synchronized] {
            relax(&mut g, 50, mode);
            assert_eq!(value(&g, C), 0.0);
            assert_eq!(value(&g, D), 0.25);
        }
    }

    #[test]
    fn test_degenerate_node_is_noop() {
        let mut g = SectorGraph::new();
        g.add_edge(A, A, 0);
        g.add_edge(B, A, 0);
        set_value(&mut g, A, 0.5);

        let report = relax(&mut g, 3, UpdateMode::GaussSeidel);

        assert_eq!(value(&g, A), 0.5);
        assert!(value(&g, A).is_finite());
        assert_close(value(&g, B), 0.5);
        assert!(report.sweeps.iter().all(|s| s.degenerate_nodes == 1));

        let mut g2 = SectorGraph::new();
        g2.add_edge(A, A, 0);
        let report = relax(&mut g2, 2, UpdateMode::Synchronized);
        assert_eq!(value(&g2, A), 0.0);
        assert_eq!(report.sweeps[0].degenerate_nodes, 1);
        assert_eq!(report.sweeps[0].updated_nodes, 0);
    }

    /// A→B twice (pass), B→C (score). Processing order decides sweep-1 values.
    fn scenario(b_first: bool) -> SectorGraph {
        let pass = SectorTransition::new(A, B, TransitionKind::Pass);
        let score = SectorTransition::new(B, C, TransitionKind::Score);
        let transitions = if b_first { vec![score, pass, pass] } else { vec![pass, pass, score] };
        SectorGraph::build(&transitions)
    }

    #[test]
    fn test_scenario_source_processed_before_destination() {
        let mut g = scenario(false);
        let order: Vec<Sector> = g.nodes().iter().map(|n| n.sector).collect();
        assert_eq!(order, vec![A, B, C]);

        let report = relax(&mut g, 1, UpdateMode::GaussSeidel);
        assert_eq!(value(&g, A), 0.0);
        assert_eq!(value(&g, B), 1.0);
        assert_eq!(value(&g, C), 0.0);
        assert_close(report.sweeps[0].mean_abs_change, 1.0 / 3.0);

        relax(&mut g, 1, UpdateMode::GaussSeidel);
        assert_eq!(value(&g, A), 1.0);
    }

    #[test]
    fn test_scenario_destination_processed_first() {
        let mut g = scenario(true);
        let order: Vec<Sector> = g.nodes().iter().map(|n| n.sector).collect();
        assert_eq!(order, vec![B, C, A]);

        let report = relax(&mut g, 1, UpdateMode::GaussSeidel);
        // A reads B's value written earlier in the same sweep
        assert_eq!(value(&g, B), 1.0);
        assert_eq!(value(&g, A), 1.0);
        assert_close(report.sweeps[0].mean_abs_change, 2.0 / 3.0);
    }

    #[test]
    fn test_synchronized_is_order_independent() {
        for b_first in [false, true] {
            let mut g = scenario(b_first);
            relax(&mut g, 1, UpdateMode::Synchronized);
            assert_eq!(value(&g, B), 1.0);
            assert_eq!(value(&g, A), 0.0, "b_first={b_first}");

            relax(&mut g, 1, UpdateMode::Synchronized);
            assert_eq!(value(&g, A), 1.0);
        }
    }

    #[test]
    fn test_pass_and_turnover_to_same_sector() {
        // A→B pass, A→B turnover, B→C goal
        let mut g = SectorGraph::new();
        g.add_edge(A, B, 0);
        g.add_edge(B, C, 1);
        g.add_edge(A, B, -1);

        let report = relax(&mut g, 2, UpdateMode::GaussSeidel);
        assert_eq!(report.sweeps.len(), 2);
        // sweep 1: A = mean(0, -1), sweep 2: A = mean(1, -1)
        assert_eq!(value(&g, A), 0.0);
        assert_eq!(value(&g, B), 1.0);
    }

    fn cycle_graph() -> SectorGraph {
        let mut g = SectorGraph::new();
        g.add_edge(A, B, 0);
        g.add_edge(B, A, 0);
        g.add_edge(A, C, 1);
        g.add_edge(B, D, -1);
        g
    }

    #[test]
    fn test_cycle_converges_in_both_modes() {
        // Fixed point: a = (b + 1) / 2, b = (a - 1) / 2 → a = 1/3, b = -1/3
        for mode in [UpdateMode::GaussSeidel, UpdateMode::Synchronized] {
            let mut g = cycle_graph();
            let report = relax(&mut g, 60, mode);
            assert!((value(&g, A) - 1.0 / 3.0).abs() < 1e-9, "{mode:?}");
            assert!((value(&g, B) + 1.0 / 3.0).abs() < 1e-9, "{mode:?}");
            assert!(report.final_error().unwrap() < 1e-9);
        }
    }

    #[test]
    fn test_gauss_seidel_first_sweeps_on_cycle() {
        let mut g = cycle_graph();
        let report = relax(&mut g, 10, UpdateMode::GaussSeidel);
        assert!(report.is_non_increasing(), "{:?}", report.errors());
        // sweep 1: A = 0.5, B = (0.5 - 1) / 2 → |0.5| + |-0.25| over 4 nodes
        assert_close(report.sweeps[0].mean_abs_change, 0.75 / 4.0);
        assert_eq!(report.sweeps[9].sweep, 10);
    }

    #[test]
    fn test_relax_is_deterministic() {
        let run = || {
            let mut g = cycle_graph();
            g.add_edge(C, A, 0);
            g.add_edge(D, D, 0);
            let report = relax(&mut g, 10, UpdateMode::GaussSeidel);
            (g.values(), report)
        };
        let (v1, r1) = run();
        let (v2, r2) = run();
        assert_eq!(v1, v2);
        assert_eq!(r1, r2);
    }

    #[test]
    fn test_empty_graph() {
        let mut g = SectorGraph::new();
        let report = relax(&mut g, 3, UpdateMode::GaussSeidel);
        assert_eq!(report.errors(), vec![0.0, 0.0, 0.0]);
        assert_eq!(report.final_error(), Some(0.0));
    }
}
