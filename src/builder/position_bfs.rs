//! Position-BFS Builder: level-synchronous BFS per start, with fast paths
//! for the common case and an early-cut heuristic for branchy graphs.
//!
//! Grounded on `original_source/src/trie/builder/pbfs.h`'s three fast
//! paths and two-queue level sweep.

use crate::alphabet::{Kmer, Letter};
use crate::config::Config;
use crate::error::Result;
use crate::graph::{Graph, NodeId, TopologicalOrder};
use crate::position::{LetterLocData, NodePos};
use crate::sink::PairSink;

use super::TrieBuilder;

/// Per-start level-synchronous BFS; exact as long as no level's frontier
/// exceeds `Config::cut_early_threshold`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionBfsBuilder<const K: usize, const SIGMA: u64>;

impl<const K: usize, const SIGMA: u64> PositionBfsBuilder<K, SIGMA> {
    pub fn new() -> Self {
        Self
    }

    /// Concatenate `seg(node)[offset..offset+len]` onto `kmer`.
    fn extend<G: Graph + ?Sized>(
        kmer: &mut Kmer<K, SIGMA>,
        graph: &G,
        node: NodeId,
        offset: usize,
        len: usize,
    ) {
        let seg = graph.node_seg(node);
        for &b in &seg[offset..offset + len] {
            kmer.push_back(Letter(b));
        }
    }

    fn bfs<G: Graph + ?Sized, S: PairSink<K, SIGMA>>(
        graph: &G,
        lloc: &LetterLocData,
        config: &Config,
        start: NodePos,
        sink: &mut S,
    ) {
        let seg = graph.node_seg(start.node);
        let offset = start.offset as usize;

        // Fast path: short k-mer, safely inside the node with room to
        // spare.
        if offset + K + 1 < seg.len() {
            let mut kmer = Kmer::empty();
            Self::extend(&mut kmer, graph, start.node, offset, K);
            sink.push(
                kmer,
                lloc.compress(NodePos::new(start.node, start.offset + K as u32)),
            );
            return;
        }

        let left = seg.len() - offset;
        if left < K {
            // Fast path: short-next (exactly one neighbor covers the
            // rest).
            if let Some(nxt) = graph.forward_one(start.node) {
                let nxt_len = graph.node_seg(nxt).len();
                if K - left < nxt_len {
                    let mut kmer = Kmer::empty();
                    Self::extend(&mut kmer, graph, start.node, offset, left);
                    Self::extend(&mut kmer, graph, nxt, 0, K - left);
                    sink.push(kmer, lloc.compress(NodePos::new(nxt, (K - left) as u32)));
                    return;
                }
            }

            // Fast path: fast split (every neighbor covers the rest).
            let neighbors = graph.forward_from(start.node);
            if !neighbors.is_empty()
                && neighbors
                    .iter()
                    .all(|fwd| K - left < graph.node_seg(fwd.node_id).len())
            {
                for fwd in neighbors {
                    let mut kmer = Kmer::empty();
                    Self::extend(&mut kmer, graph, start.node, offset, left);
                    Self::extend(&mut kmer, graph, fwd.node_id, 0, K - left);
                    sink.push(
                        kmer,
                        lloc.compress(NodePos::new(fwd.node_id, (K - left) as u32)),
                    );
                }
                return;
            }
        }

        // General path: level-synchronous BFS over (prefix, position).
        let mut current: Vec<(Kmer<K, SIGMA>, NodePos)> = vec![(Kmer::empty(), start)];
        let mut next: Vec<(Kmer<K, SIGMA>, NodePos)> = Vec::new();

        let mut level = 0usize;
        while level < K
            && !current.is_empty()
            && (config.cut_early_threshold == 0
                || (current.len() as u32) < config.cut_early_threshold)
        {
            next.clear();
            for (kmer, np) in &current {
                let seg = graph.node_seg(np.node);
                let mut nkmer = kmer.clone();
                nkmer.push_back(Letter(seg[np.offset as usize]));
                if (np.offset as usize + 1) < seg.len() {
                    next.push((nkmer, NodePos::new(np.node, np.offset + 1)));
                } else {
                    for fwd in graph.forward_from(np.node) {
                        next.push((nkmer.clone(), NodePos::new(fwd.node_id, 0)));
                    }
                }
            }
            std::mem::swap(&mut current, &mut next);
            level += 1;
        }

        sink.reserve(current.len());
        for (kmer, np) in current {
            sink.push(kmer, lloc.compress(np));
        }
    }
}

impl<const K: usize, const SIGMA: u64> TrieBuilder<K, SIGMA> for PositionBfsBuilder<K, SIGMA> {
    fn compute_pairs<G: Graph + ?Sized, S: PairSink<K, SIGMA>>(
        &mut self,
        graph: &G,
        lloc: &LetterLocData,
        _topo: &TopologicalOrder,
        config: &Config,
        starts: &[NodePos],
        sink: &mut S,
    ) -> Result<()> {
        log::debug!("position-bfs builder: {} start positions", starts.len());
        for &start in starts {
            Self::bfs(graph, lloc, config, start, sink);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "position-bfs"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VecGraph;
    use crate::sink::VecPairSink;

    #[test]
    fn exact_when_under_threshold_matches_backtrack() {
        use crate::builder::BackTrackBuilder;

        // Same graph as the Back-Track split case: both builders must
        // agree when nothing trips the early cut.
        let mut b = VecGraph::builder();
        let n0 = b.add_node([0u8, 1]);
        let n1 = b.add_node([2u8]);
        let n2 = b.add_node([3u8]);
        b.add_edge(n0, n1).unwrap();
        b.add_edge(n0, n2).unwrap();
        let g = b.build().unwrap();
        let lloc = LetterLocData::from_graph(&g);
        let topo = TopologicalOrder::build(&g);
        let config = Config::default();

        let starts = vec![NodePos::new(n0, 0), NodePos::new(n0, 1)];

        let mut pbfs_sink = VecPairSink::<2, 4>::new();
        PositionBfsBuilder::<2, 4>::new()
            .compute_pairs(&g, &lloc, &topo, &config, &starts, &mut pbfs_sink)
            .unwrap();

        let mut bt_sink = VecPairSink::<2, 4>::new();
        BackTrackBuilder::<2, 4>::new()
            .compute_pairs(&g, &lloc, &topo, &config, &starts, &mut bt_sink)
            .unwrap();

        let mut got = pbfs_sink.into_pairs();
        let mut want = bt_sink.into_pairs();
        got.sort_by_key(|(_, l)| l.0);
        want.sort_by_key(|(_, l)| l.0);
        assert_eq!(got, want);
    }

    #[test]
    fn early_cut_caps_frontier_and_emits_short_prefixes() {
        // A root branching 4 ways, each branch branching 4 ways again.
        // threshold=4: after expanding once the frontier is already at 4,
        // so the loop's pre-expansion check stops it there — one level of
        // expansion, 4 length-1 prefixes emitted.
        let mut b = VecGraph::builder();
        let root = b.add_node([0u8]);
        for _ in 0..4 {
            let child = b.add_node([1u8]);
            b.add_edge(root, child).unwrap();
        }
        let g = b.build().unwrap();
        let lloc = LetterLocData::from_graph(&g);
        let topo = TopologicalOrder::build(&g);
        let config = Config {
            cut_early_threshold: 4,
            ..Config::default()
        };

        let mut sink = VecPairSink::<5, 4>::new();
        PositionBfsBuilder::<5, 4>::new()
            .compute_pairs(
                &g,
                &lloc,
                &topo,
                &config,
                &[NodePos::new(root, 0)],
                &mut sink,
            )
            .unwrap();

        let pairs = sink.into_pairs();
        assert_eq!(pairs.len(), 4);
        for (kmer, _) in &pairs {
            assert_eq!(kmer.size(), 1);
            assert!(!kmer.is_complete());
        }
    }
}
