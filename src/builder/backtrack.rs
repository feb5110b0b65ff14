//! Back-Track Builder: exact DFS enumeration.
//!
//! Grounded on `original_source/src/trie/builder/bt.h`, restated one symbol
//! at a time instead of porting its "jump to the node's last symbol" fast
//! path — that batching only trims recursion depth, it changes no emitted
//! pair, and the single-symbol form is easier to see is correct against
//! the completion check that must run before every recursive step.

use crate::alphabet::{Kmer, Letter};
use crate::config::Config;
use crate::error::Result;
use crate::graph::{Graph, TopologicalOrder};
use crate::position::{LetterLocData, NodePos};
use crate::sink::PairSink;

use super::TrieBuilder;

/// Walks every directed path from each start position exactly `K` symbols
/// deep, emitting a pair the instant the carried k-mer completes.
#[derive(Debug, Clone)]
pub struct BackTrackBuilder<const K: usize, const SIGMA: u64> {
    kmer: Kmer<K, SIGMA>,
}

impl<const K: usize, const SIGMA: u64> Default for BackTrackBuilder<K, SIGMA> {
    fn default() -> Self {
        Self {
            kmer: Kmer::empty(),
        }
    }
}

impl<const K: usize, const SIGMA: u64> BackTrackBuilder<K, SIGMA> {
    pub fn new() -> Self {
        Self::default()
    }

    fn walk<G: Graph + ?Sized, S: PairSink<K, SIGMA>>(
        &mut self,
        graph: &G,
        lloc: &LetterLocData,
        pos: NodePos,
        sink: &mut S,
    ) {
        if self.kmer.is_complete() {
            sink.push(self.kmer.clone(), lloc.compress(pos));
            return;
        }

        let seg = graph.node_seg(pos.node);
        let offset = pos.offset as usize;
        if offset < seg.len() {
            self.kmer.push_back(Letter(seg[offset]));
            self.walk(graph, lloc, NodePos::new(pos.node, pos.offset + 1), sink);
            self.kmer.pop_back();
        } else {
            for fwd in graph.forward_from(pos.node) {
                self.walk(graph, lloc, NodePos::new(fwd.node_id, 0), sink);
            }
        }
    }
}

impl<const K: usize, const SIGMA: u64> TrieBuilder<K, SIGMA> for BackTrackBuilder<K, SIGMA> {
    fn compute_pairs<G: Graph + ?Sized, S: PairSink<K, SIGMA>>(
        &mut self,
        graph: &G,
        lloc: &LetterLocData,
        _topo: &TopologicalOrder,
        _config: &Config,
        starts: &[NodePos],
        sink: &mut S,
    ) -> Result<()> {
        log::debug!("backtrack builder: {} start positions", starts.len());
        for &start in starts {
            debug_assert_eq!(self.kmer.size(), 0, "kmer must be empty between starts");
            self.walk(graph, lloc, start, sink);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "backtrack"
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::graph::VecGraph;
    use crate::position::LetterLoc;
    use crate::sink::VecPairSink;

    fn kmer2(a: u8, b: u8) -> Kmer<2, 4> {
        let mut k = Kmer::empty();
        k.push_back(Letter(a));
        k.push_back(Letter(b));
        k
    }

    #[test]
    fn single_linear_node_every_start_offset() {
        // seg = "ACGT" encoded as 0,1,2,3; k=2. Exhausting every valid
        // start offset of the single node yields every completed k-mer:
        // {(AC,(0,2)), (CG,(0,3)), (GT,(0,4))}.
        let mut b = VecGraph::builder();
        b.add_node([0u8, 1, 2, 3]);
        let g = b.build().unwrap();
        let lloc = LetterLocData::from_graph(&g);
        let topo = TopologicalOrder::build(&g);

        let starts: Vec<NodePos> = (0..3).map(|off| NodePos::new(0, off)).collect();
        let mut sink = VecPairSink::<2, 4>::new();
        let mut builder = BackTrackBuilder::<2, 4>::new();
        builder
            .compute_pairs(&g, &lloc, &topo, &Config::default(), &starts, &mut sink)
            .unwrap();

        let mut got: Vec<_> = sink.into_pairs();
        got.sort_by_key(|(_, loc)| loc.0);
        assert_eq!(
            got,
            vec![
                (kmer2(0, 1), lloc.compress(NodePos::new(0, 2))),
                (kmer2(1, 2), lloc.compress(NodePos::new(0, 3))),
                (kmer2(2, 3), lloc.compress(NodePos::new(0, 4))),
            ]
        );
    }

    #[test]
    fn two_node_split_every_start_offset() {
        // 0: "AC", 1: "G", 2: "T", edges 0->1, 0->2, k=2.
        let mut b = VecGraph::builder();
        let n0 = b.add_node([0u8, 1]);
        let n1 = b.add_node([2u8]);
        let n2 = b.add_node([3u8]);
        b.add_edge(n0, n1).unwrap();
        b.add_edge(n0, n2).unwrap();
        let g = b.build().unwrap();
        let lloc = LetterLocData::from_graph(&g);
        let topo = TopologicalOrder::build(&g);

        let starts = vec![NodePos::new(n0, 0), NodePos::new(n0, 1)];
        let mut sink = VecPairSink::<2, 4>::new();
        let mut builder = BackTrackBuilder::<2, 4>::new();
        builder
            .compute_pairs(&g, &lloc, &topo, &Config::default(), &starts, &mut sink)
            .unwrap();

        let mut got: Vec<_> = sink.into_pairs();
        got.sort_by_key(|(_, loc)| loc.0);
        let mut want = vec![
            (kmer2(0, 1), lloc.compress(NodePos::new(n0, 2))),
            (kmer2(1, 2), lloc.compress(NodePos::new(n1, 1))),
            (kmer2(1, 3), lloc.compress(NodePos::new(n2, 1))),
        ];
        want.sort_by_key(|(_, loc): &(_, LetterLoc)| loc.0);
        assert_eq!(got, want);
    }

    #[test]
    fn no_branch_sink_with_short_runway_emits_nothing() {
        // A start placed so that fewer than k symbols remain anywhere
        // reachable: a single node "A" with k=2 and no successors never
        // completes a k-mer.
        let mut b = VecGraph::builder();
        b.add_node([0u8]);
        let g = b.build().unwrap();
        let lloc = LetterLocData::from_graph(&g);
        let topo = TopologicalOrder::build(&g);

        let mut sink = VecPairSink::<2, 4>::new();
        let mut builder = BackTrackBuilder::<2, 4>::new();
        builder
            .compute_pairs(
                &g,
                &lloc,
                &topo,
                &Config::default(),
                &[NodePos::new(0, 0)],
                &mut sink,
            )
            .unwrap();
        assert!(sink.is_empty());
    }
}
