//! Route reconstruction from a successor table.

use tracing::trace;

use crate::domain::{Route, VertexKey};

use super::builder::DepartureGraph;
use super::shortest_path::SuccessorTable;

/// Walk `table` from `from` towards `to` and collect the edges taken.
///
/// The walk stops at a vertex with no outgoing edges or when the next hop
/// is unreachable, and never takes more than V steps. Returns `None` when
/// no edge was taken or the collected edges do not form a valid route.
pub fn reconstruct(
    graph: &DepartureGraph,
    from: VertexKey,
    to: VertexKey,
    table: &SuccessorTable,
) -> Option<Route> {
    let start = graph.vertex(from)?;
    let weighting = table.weighting();

    let mut segments = Vec::new();
    let mut current = start;

    for _ in 0..graph.vertex_count() {
        if current.key() == to || current.is_final_destination() {
            break;
        }
        let Some(next) = table.next_hop(current.key(), to) else {
            break;
        };
        let edge = current.connection_to(next, weighting)?;
        segments.push(edge.clone());
        current = graph.vertex(next)?;
    }

    if current.key() != to {
        trace!(?from, ?to, "Walk did not reach target");
        return None;
    }

    Route::new(start.clone(), segments).ok()
}
