//! All-pairs shortest paths over the departure graph.
//!
//! Floyd–Warshall is run once per weighting. Each run owns a flat V×V
//! distance buffer and a V×V successor buffer; only the successor buffer
//! survives the run. Successor entries are "next hop from i", so a route
//! is recovered by repeatedly looking up `next(current, target)`.
//!
//! INFINITE distances absorb: they are never added, and a sum that does
//! not fit in `u32` is treated as INFINITE.

use std::time::Instant;

use rayon::prelude::*;
use tracing::debug;

use crate::domain::{VertexKey, Weighting};
use crate::planner::PlannerConfig;

use super::builder::DepartureGraph;

/// Distance of an unreachable pair.
pub const INFINITE: u32 = u32::MAX;

/// Successor entry of an unreachable pair.
const UNREACHABLE: u32 = u32::MAX;

/// Next-hop lookup for one weighting.
///
/// Built once, read-only afterwards.
#[derive(Debug, Clone)]
pub struct SuccessorTable {
    weighting: Weighting,
    size: usize,
    next: Vec<u32>,
}

impl SuccessorTable {
    /// The vertex to move to next on the shortest path from `from` to `to`.
    ///
    /// `None` if `to` is unreachable from `from` or either key is out of range.
    pub fn next_hop(&self, from: VertexKey, to: VertexKey) -> Option<VertexKey> {
        if from.0 >= self.size || to.0 >= self.size {
            return None;
        }
        match self.next[from.0 * self.size + to.0] {
            UNREACHABLE => None,
            hop => Some(VertexKey(hop as usize)),
        }
    }

    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    /// V: the table is `size × size`.
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Shortest distances for one weighting.
#[derive(Debug, Clone)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<u32>,
}

impl DistanceMatrix {
    /// Shortest distance from `from` to `to`, or `None` if unreachable.
    pub fn distance(&self, from: VertexKey, to: VertexKey) -> Option<u32> {
        if from.0 >= self.size || to.0 >= self.size {
            return None;
        }
        match self.cells[from.0 * self.size + to.0] {
            INFINITE => None,
            d => Some(d),
        }
    }
}

/// Compute the successor table for `weighting`.
pub fn precompute(
    graph: &DepartureGraph,
    weighting: Weighting,
    config: &PlannerConfig,
) -> SuccessorTable {
    solve(graph, weighting, config).1
}

/// Compute both the distances and the successor table for `weighting`.
pub fn solve(
    graph: &DepartureGraph,
    weighting: Weighting,
    config: &PlannerConfig,
) -> (DistanceMatrix, SuccessorTable) {
    let started = Instant::now();
    let n = graph.vertex_count();

    let mut dist = vec![INFINITE; n * n];
    let mut next = vec![UNREACHABLE; n * n];

    for vertex in graph.vertices() {
        let i = vertex.key().0;
        for edge in vertex.connections() {
            let j = edge.to.0;
            let weight = edge.weight(weighting);
            // Parallel edges: keep the cheapest.
            if weight < dist[i * n + j] {
                dist[i * n + j] = weight;
                next[i * n + j] = j as u32;
            }
        }
    }

    let parallel = config.use_parallel_relaxation(n);

    for k in 0..n {
        // Row k cannot improve during pass k with non-negative weights.
        let via: Vec<u32> = dist[k * n..(k + 1) * n].to_vec();

        if parallel {
            dist.par_chunks_mut(n)
                .zip(next.par_chunks_mut(n))
                .for_each(|(dist_row, next_row)| relax_row(dist_row, next_row, &via, k));
        } else {
            dist.chunks_mut(n)
                .zip(next.chunks_mut(n))
                .for_each(|(dist_row, next_row)| relax_row(dist_row, next_row, &via, k));
        }
    }

    debug!(
        ?weighting,
        vertices = n,
        parallel,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Precomputed shortest paths"
    );

    (
        DistanceMatrix { size: n, cells: dist },
        SuccessorTable {
            weighting,
            size: n,
            next,
        },
    )
}

/// Relax row i through intermediate vertex k.
fn relax_row(dist_row: &mut [u32], next_row: &mut [u32], via: &[u32], k: usize) {
    let to_k = dist_row[k];
    if to_k == INFINITE {
        return;
    }
    let hop = next_row[k];

    for (j, &from_k) in via.iter().enumerate() {
        if from_k == INFINITE {
            continue;
        }
        if let Some(candidate) = to_k.checked_add(from_k) {
            if candidate < dist_row[j] {
                dist_row[j] = candidate;
                next_row[j] = hop;
            }
        }
    }
}
