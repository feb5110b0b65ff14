//! Complexity estimator.
//!
//! Computes, per node, a saturated upper bound on the number of distinct
//! length-`K` contexts reaching it, via a DAG sweep in topological order
//! followed by a fixed point over back-edges. Grounded directly on
//! `original_source/src/graph/complexity_estimator.h`'s three-phase
//! algorithm, restated with a `BinaryHeap<Reverse<_>>` min-heap in place of
//! the original's custom-comparator `priority_queue`.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use crate::config::Config;
use crate::error::{Result, TrieGraphError};
use crate::graph::{EdgeId, Graph, NodeId, TopologicalOrder};

/// Per-node complexity bounds produced by [`estimate`].
#[derive(Debug, Clone)]
pub struct ComplexityEstimate {
    /// Running sum of contributions before the per-node ceiling is
    /// applied; exposed mainly for diagnostics and tests.
    pub start: Vec<u64>,
    /// `end[n] = min(start[n], σ^max(0, K - |seg(n)|))`: the saturated
    /// upper bound on distinct length-`K` contexts entering node `n`.
    pub end: Vec<u64>,
}

impl ComplexityEstimate {
    pub fn end_at(&self, node: NodeId) -> u64 {
        self.end[node as usize]
    }
}

/// `σ^exp`, or `None` if it would overflow `u64`.
fn checked_pow(sigma: u64, exp: u32) -> Option<u64> {
    let mut acc = 1u64;
    for _ in 0..exp {
        acc = acc.checked_mul(sigma)?;
    }
    Some(acc)
}

/// Verify `2 * σ^K` fits in `u64` — the width the estimator's saturating
/// arithmetic assumes is safe.
fn validate_ceiling(sigma: u64, k: u32) -> Result<u64> {
    let ceiling = checked_pow(sigma, k).ok_or(TrieGraphError::CeilingOverflow)?;
    ceiling.checked_mul(2).ok_or(TrieGraphError::CeilingOverflow)?;
    Ok(ceiling)
}

fn saturating_incr(slot: &mut u64, amount: u64, ceiling: u64) {
    *slot = slot.saturating_add(amount).min(ceiling);
}

/// Compute the complexity estimate for a `K`-mer window over an alphabet
/// of size `SIGMA`.
pub fn estimate<const K: usize, const SIGMA: u64, G: Graph + ?Sized>(
    graph: &G,
    topo: &TopologicalOrder,
    config: &Config,
) -> Result<ComplexityEstimate> {
    let ceiling = validate_ceiling(SIGMA, K as u32)?;

    // σ^i for i in 0..=K; safe since σ^K (and 2·σ^K) were just validated.
    let mut pwr = Vec::with_capacity(K + 1);
    pwr.push(1u64);
    for i in 1..=K {
        pwr.push(pwr[i - 1] * SIGMA);
    }
    let max_end = |seg_len: usize| -> u64 {
        if seg_len >= K {
            1
        } else {
            pwr[K - seg_len]
        }
    };

    let n = graph.num_nodes() as usize;
    let mut start = vec![0u64; n];
    let mut end = vec![0u64; n];

    log::debug!("estimator: DAG sweep over {n} nodes (k={K}, sigma={SIGMA})");

    // Phase 1: DAG sweep in topological order.
    let mut by_rank: Vec<NodeId> = (0..graph.num_nodes()).collect();
    by_rank.sort_by_key(|&node| topo.rank(node));

    for node in by_rank {
        let idx = node as usize;
        if graph.backward_from(node).is_empty() {
            start[idx] = 1;
            end[idx] = 1;
            continue;
        }
        for bwd in graph.backward_from(node) {
            if topo.is_backedge(graph.reverse_edge(bwd.edge_id)) {
                saturating_incr(&mut start[idx], config.backedge_init, ceiling);
            } else {
                saturating_incr(&mut start[idx], end[bwd.node_id as usize], ceiling);
            }
        }
        end[idx] = start[idx].min(max_end(graph.node_seg(node).len()));
    }

    log::debug!("estimator: seeding back-edges");

    // Phase 2: seed back-edges.
    let mut pushed: HashMap<EdgeId, u64> = HashMap::new();
    let mut trav: HashMap<EdgeId, u32> = HashMap::new();
    let mut in_heap = vec![false; n];
    let mut heap: BinaryHeap<Reverse<(u32, NodeId)>> = BinaryHeap::new();

    let push = |heap: &mut BinaryHeap<Reverse<(u32, NodeId)>>,
                in_heap: &mut [bool],
                node: NodeId| {
        if !in_heap[node as usize] {
            in_heap[node as usize] = true;
            heap.push(Reverse((topo.rank(node), node)));
        }
    };

    for edge in graph.forward_edges() {
        if topo.is_backedge(edge.edge_id) && end[edge.from as usize] > config.backedge_init {
            let from_end = end[edge.from as usize];
            saturating_incr(
                &mut start[edge.to as usize],
                from_end - config.backedge_init,
                ceiling,
            );
            pushed.insert(edge.edge_id, from_end);
            trav.insert(edge.edge_id, 1);
            push(&mut heap, &mut in_heap, edge.to);
        }
    }

    log::debug!("estimator: fixed point over loops");

    // Phase 3: push around until done.
    while let Some(Reverse((_, node))) = heap.pop() {
        let idx = node as usize;
        in_heap[idx] = false;

        let new_end = start[idx].min(max_end(graph.node_seg(node).len()));
        if new_end == end[idx] {
            continue;
        }
        let delta = new_end - end[idx];
        end[idx] = new_end;

        for fwd in graph.forward_from(node) {
            if topo.is_backedge(fwd.edge_id) {
                let old_pushed = *pushed.get(&fwd.edge_id).unwrap_or(&config.backedge_init);
                if new_end > old_pushed {
                    let t = trav.entry(fwd.edge_id).or_insert(0);
                    *t += 1;
                    let new_pushed = if *t == config.backedge_max_trav {
                        max_end(graph.node_seg(node).len())
                    } else {
                        new_end
                    };
                    pushed.insert(fwd.edge_id, new_pushed);
                    saturating_incr(
                        &mut start[fwd.node_id as usize],
                        new_pushed - old_pushed,
                        ceiling,
                    );
                    push(&mut heap, &mut in_heap, fwd.node_id);
                }
            } else {
                saturating_incr(&mut start[fwd.node_id as usize], delta, ceiling);
                push(&mut heap, &mut in_heap, fwd.node_id);
            }
        }
    }

    Ok(ComplexityEstimate { start, end })
}
