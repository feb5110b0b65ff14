//! Positions inside a sequence graph and their compressed form.

use serde::{Deserialize, Serialize};

use crate::graph::{Graph, NodeId};

/// A location inside (or just past) a node's segment.
///
/// `offset == seg.size()` is the virtual slot immediately past the node,
/// used as a cursor during construction — it never names a symbol itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodePos {
    pub node: NodeId,
    pub offset: u32,
}

impl NodePos {
    pub fn new(node: NodeId, offset: u32) -> Self {
        Self { node, offset }
    }
}

impl std::fmt::Display for NodePos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.node, self.offset)
    }
}

/// An opaque, dense integer encoding of a [`NodePos`].
///
/// No ordering contract is relied upon by the builders; the prefix-sum
/// layout used by [`LetterLocData`] happens to preserve node order, but
/// that is an implementation detail, not part of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LetterLoc(pub u64);

impl std::ops::Add<u32> for LetterLoc {
    type Output = LetterLoc;
    fn add(self, rhs: u32) -> LetterLoc {
        LetterLoc(self.0 + rhs as u64)
    }
}

/// Compresses `(node, offset)` positions into dense [`LetterLoc`] values.
///
/// Built once from a graph's node lengths via a prefix sum: node `n`'s
/// positions occupy `[offsets[n], offsets[n] + len(n)]` inclusive of the
/// one-past-the-end virtual slot, so every valid `NodePos` has a distinct
/// `LetterLoc` and the map is total over the valid position domain.
#[derive(Debug, Clone)]
pub struct LetterLocData {
    /// `offsets[n]` is the `LetterLoc` of `(n, 0)`.
    offsets: Vec<u64>,
}

impl LetterLocData {
    /// Build the compressor from a graph's node segment lengths.
    pub fn from_graph<G: Graph + ?Sized>(graph: &G) -> Self {
        let mut offsets = Vec::with_capacity(graph.num_nodes() as usize + 1);
        let mut acc = 0u64;
        for n in 0..graph.num_nodes() {
            offsets.push(acc);
            acc += graph.node_seg(n).len() as u64 + 1;
        }
        offsets.push(acc);
        Self { offsets }
    }

    /// Compress a position into its dense address.
    pub fn compress(&self, pos: NodePos) -> LetterLoc {
        LetterLoc(self.offsets[pos.node as usize] + pos.offset as u64)
    }

    /// Total number of distinct addresses this compressor can produce.
    pub fn domain_size(&self) -> u64 {
        *self.offsets.last().unwrap_or(&0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VecGraph;

    #[test]
    fn compress_is_total_and_distinct() {
        let mut b = VecGraph::builder();
        let a = b.add_node(b"AC");
        let c = b.add_node(b"G");
        b.add_edge(a, c).unwrap();
        let g = b.build().unwrap();

        let lloc = LetterLocData::from_graph(&g);
        let mut seen = std::collections::HashSet::new();
        for n in 0..g.num_nodes() {
            for off in 0..=g.node_seg(n).len() as u32 {
                let loc = lloc.compress(NodePos::new(n, off));
                assert!(seen.insert(loc), "duplicate LetterLoc for ({n}, {off})");
            }
        }
    }
}
