//! Node-BFS Builder: per-node deduplicated BFS driven by topological rank.
//!
//! Grounded on `original_source/src/triegraph/triegraph_builder_nbfs.h`.
//! That source shares one live k-mer across all prefixes reaching a "long"
//! node (`seg.len() >= K`) for the tail walk past position `K`, relying on
//! every incoming prefix having already converged to an identical trailing
//! window by the time it gets there. That convergence does not hold in
//! general — prefixes of different lengths that reach the same node can
//! still disagree on their last few symbols when the node itself is
//! shorter than the gap between them. This builder instead walks every new
//! prefix independently over its own node range, long or short, which
//! costs a few redundant symbol pushes on long nodes but makes no such
//! assumption.

use std::collections::{BinaryHeap, HashSet};
use std::cmp::Reverse;

use crate::alphabet::{Kmer, Letter};
use crate::config::Config;
use crate::error::Result;
use crate::graph::{Graph, NodeId, TopologicalOrder};
use crate::position::{LetterLocData, NodePos};
use crate::sink::PairSink;

use super::TrieBuilder;

/// Per-node set of distinct prefixes seen so far, switching from a linear
/// scan to a `HashSet` once a node accumulates enough of them
/// (`Config::set_cutoff`) that the scan would dominate.
struct KmerBuildData<const K: usize, const SIGMA: u64> {
    kmers: Vec<Vec<Kmer<K, SIGMA>>>,
    kmer_set: Vec<HashSet<Kmer<K, SIGMA>>>,
    done_idx: Vec<usize>,
    set_cutoff: usize,
}

impl<const K: usize, const SIGMA: u64> KmerBuildData<K, SIGMA> {
    fn new(num_nodes: usize, set_cutoff: usize) -> Self {
        Self {
            kmers: vec![Vec::new(); num_nodes],
            kmer_set: (0..num_nodes).map(|_| HashSet::new()).collect(),
            done_idx: vec![0; num_nodes],
            set_cutoff,
        }
    }

    fn exists(&self, node: NodeId, kmer: &Kmer<K, SIGMA>) -> bool {
        let idx = node as usize;
        if self.kmers[idx].len() >= self.set_cutoff {
            self.kmer_set[idx].contains(kmer)
        } else {
            self.kmers[idx].iter().any(|k| k == kmer)
        }
    }

    /// Record a new prefix at `node`. Caller must have already checked
    /// [`Self::exists`].
    fn add_kmer(&mut self, node: NodeId, kmer: Kmer<K, SIGMA>) {
        let idx = node as usize;
        self.kmers[idx].push(kmer.clone());
        if self.kmers[idx].len() == self.set_cutoff {
            self.kmer_set[idx] = self.kmers[idx].iter().cloned().collect();
        } else if self.kmers[idx].len() > self.set_cutoff {
            self.kmer_set[idx].insert(kmer);
        }
    }
}

/// Deduplicated BFS over nodes, ordered by topological rank so a node is
/// only ever popped once all its shorter-ranked predecessors have
/// contributed their prefixes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeBfsBuilder<const K: usize, const SIGMA: u64>;

impl<const K: usize, const SIGMA: u64> NodeBfsBuilder<K, SIGMA> {
    pub fn new() -> Self {
        Self
    }

    /// Walk prefix `kmer` through `seg[0..]`, pushing one symbol at a time
    /// and emitting whenever it completes.
    fn walk_node<G: Graph + ?Sized, S: PairSink<K, SIGMA>>(
        graph: &G,
        lloc: &LetterLocData,
        node: NodeId,
        mut kmer: Kmer<K, SIGMA>,
        sink: &mut S,
    ) -> Kmer<K, SIGMA> {
        let seg = graph.node_seg(node);
        for (i, &b) in seg.iter().enumerate() {
            kmer.push_back(Letter(b));
            if kmer.is_complete() {
                sink.push(kmer.clone(), lloc.compress(NodePos::new(node, (i + 1) as u32)));
            }
        }
        kmer
    }

    fn push_neighbours<G: Graph + ?Sized>(
        graph: &G,
        kd: &mut KmerBuildData<K, SIGMA>,
        in_queue: &mut [bool],
        heap: &mut BinaryHeap<Reverse<(u32, NodeId)>>,
        topo: &TopologicalOrder,
        node: NodeId,
        kmer: &Kmer<K, SIGMA>,
    ) {
        for fwd in graph.forward_from(node) {
            if !kd.exists(fwd.node_id, kmer) {
                kd.add_kmer(fwd.node_id, kmer.clone());
                let idx = fwd.node_id as usize;
                if !in_queue[idx] {
                    in_queue[idx] = true;
                    heap.push(Reverse((topo.rank(fwd.node_id), fwd.node_id)));
                }
            }
        }
    }
}

impl<const K: usize, const SIGMA: u64> TrieBuilder<K, SIGMA> for NodeBfsBuilder<K, SIGMA> {
    fn compute_pairs<G: Graph + ?Sized, S: PairSink<K, SIGMA>>(
        &mut self,
        graph: &G,
        lloc: &LetterLocData,
        topo: &TopologicalOrder,
        config: &Config,
        starts: &[NodePos],
        sink: &mut S,
    ) -> Result<()> {
        let n = graph.num_nodes() as usize;
        let mut kd = KmerBuildData::<K, SIGMA>::new(n, config.set_cutoff);
        let mut in_queue = vec![false; n];
        let mut heap: BinaryHeap<Reverse<(u32, NodeId)>> = BinaryHeap::new();

        log::debug!("node-bfs builder: {} start positions", starts.len());

        for &start in starts {
            let empty = Kmer::empty();
            if !kd.exists(start.node, &empty) {
                kd.add_kmer(start.node, empty);
                let idx = start.node as usize;
                if !in_queue[idx] {
                    in_queue[idx] = true;
                    heap.push(Reverse((topo.rank(start.node), start.node)));
                }
            }
        }

        while let Some(Reverse((_, node))) = heap.pop() {
            let idx = node as usize;
            in_queue[idx] = false;

            let count = kd.kmers[idx].len();
            for i in kd.done_idx[idx]..count {
                let prefix = kd.kmers[idx][i].clone();
                let kmer = Self::walk_node(graph, lloc, node, prefix, sink);
                Self::push_neighbours(graph, &mut kd, &mut in_queue, &mut heap, topo, node, &kmer);
            }
            kd.done_idx[idx] = kd.kmers[idx].len();
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "node-bfs"
    }
}
