//! A concrete, in-memory adjacency-list [`Graph`].
//!
//! Not part of the algorithmic core — the core only depends on the
//! [`Graph`] trait — but a crate with no concrete graph is not testable
//! end to end, so this is the one loader shipped here.

use indexmap::IndexMap;

use crate::error::{Result, TrieGraphError};

use super::{EdgeRef, ForwardEdge, Graph, NodeId};

/// In-memory sequence graph built via [`VecGraphBuilder`].
#[derive(Debug, Clone, Default)]
pub struct VecGraph {
    segs: Vec<Vec<u8>>,
    seg_ids: Vec<String>,
    /// Name -> id lookup, in insertion order.
    by_seg_id: IndexMap<String, NodeId>,
    forward: Vec<Vec<EdgeRef>>,
    backward: Vec<Vec<EdgeRef>>,
    forward_edges: Vec<ForwardEdge>,
}

impl Graph for VecGraph {
    fn num_nodes(&self) -> NodeId {
        self.segs.len() as NodeId
    }

    fn node_seg(&self, id: NodeId) -> &[u8] {
        &self.segs[id as usize]
    }

    fn node_seg_id(&self, id: NodeId) -> &str {
        &self.seg_ids[id as usize]
    }

    fn forward_from(&self, id: NodeId) -> &[EdgeRef] {
        &self.forward[id as usize]
    }

    fn backward_from(&self, id: NodeId) -> &[EdgeRef] {
        &self.backward[id as usize]
    }

    fn forward_edges(&self) -> &[ForwardEdge] {
        &self.forward_edges
    }

    fn reverse_edge(&self, edge_id: super::EdgeId) -> super::EdgeId {
        edge_id ^ 1
    }
}

/// Builds a [`VecGraph`] one node and edge at a time.
///
/// Nodes are accumulated first (in insertion order, which becomes their
/// dense id), then edges are validated and indexed on [`VecGraphBuilder::build`].
#[derive(Debug, Clone, Default)]
pub struct VecGraphBuilder {
    segs: Vec<Vec<u8>>,
    seg_ids: Vec<String>,
    edges: Vec<(NodeId, NodeId)>,
}

impl VecGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node carrying `seg`, auto-naming its `seg_id` from its index.
    pub fn add_node(&mut self, seg: impl AsRef<[u8]>) -> NodeId {
        let id = self.segs.len() as NodeId;
        self.seg_ids.push(id.to_string());
        self.segs.push(seg.as_ref().to_vec());
        id
    }

    /// Add a node carrying `seg` with an explicit, human-readable `seg_id`.
    pub fn add_node_with_id(&mut self, seg: impl AsRef<[u8]>, seg_id: impl Into<String>) -> NodeId {
        let id = self.segs.len() as NodeId;
        self.seg_ids.push(seg_id.into());
        self.segs.push(seg.as_ref().to_vec());
        id
    }

    /// Add a directed edge `from -> to`. Both endpoints must already have
    /// been added via [`VecGraphBuilder::add_node`].
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        let n = self.segs.len() as NodeId;
        if from >= n || to >= n {
            return Err(TrieGraphError::GraphShapeViolation(format!(
                "edge ({from} -> {to}) references a node outside [0, {n})"
            )));
        }
        self.edges.push((from, to));
        Ok(())
    }

    /// Finalize the graph, building forward/backward adjacency lists.
    ///
    /// Edge ids are assigned in pairs: the `i`-th added edge gets forward
    /// id `2*i` and reverse id `2*i + 1`, so [`Graph::reverse_edge`] is a
    /// simple XOR with `1`.
    pub fn build(self) -> Result<VecGraph> {
        let num_nodes = self.segs.len();
        let mut forward = vec![Vec::new(); num_nodes];
        let mut backward = vec![Vec::new(); num_nodes];
        let mut forward_edges = Vec::with_capacity(self.edges.len());

        for (i, (from, to)) in self.edges.iter().copied().enumerate() {
            let fwd_id = (2 * i) as super::EdgeId;
            let rev_id = fwd_id + 1;
            forward[from as usize].push(EdgeRef {
                edge_id: fwd_id,
                node_id: to,
            });
            backward[to as usize].push(EdgeRef {
                edge_id: rev_id,
                node_id: from,
            });
            forward_edges.push(ForwardEdge {
                edge_id: fwd_id,
                from,
                to,
            });
        }

        let by_seg_id = self
            .seg_ids
            .iter()
            .enumerate()
            .map(|(id, seg_id)| (seg_id.clone(), id as NodeId))
            .collect();

        Ok(VecGraph {
            segs: self.segs,
            seg_ids: self.seg_ids,
            by_seg_id,
            forward,
            backward,
            forward_edges,
        })
    }
}

impl VecGraph {
    pub fn builder() -> VecGraphBuilder {
        VecGraphBuilder::new()
    }

    /// Look up a node by the human-readable id passed to
    /// [`VecGraphBuilder::add_node_with_id`] (or the auto-assigned index
    /// string from [`VecGraphBuilder::add_node`]).
    pub fn node_by_seg_id(&self, seg_id: &str) -> Option<NodeId> {
        self.by_seg_id.get(seg_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_linear_node() {
        let mut b = VecGraph::builder();
        b.add_node(b"ACGT");
        let g = b.build().unwrap();
        assert_eq!(g.num_nodes(), 1);
        assert_eq!(g.node_seg(0), b"ACGT");
        assert!(g.forward_from(0).is_empty());
    }

    #[test]
    fn two_node_split_adjacency() {
        // 0: "AC", 1: "G", 2: "T", edges 0->1, 0->2
        let mut b = VecGraph::builder();
        let n0 = b.add_node(b"AC");
        let n1 = b.add_node(b"G");
        let n2 = b.add_node(b"T");
        b.add_edge(n0, n1).unwrap();
        b.add_edge(n0, n2).unwrap();
        let g = b.build().unwrap();

        assert_eq!(g.forward_from(n0).len(), 2);
        assert_eq!(g.forward_one(n0), None);
        assert_eq!(g.backward_from(n1).len(), 1);
        assert_eq!(g.backward_from(n1)[0].node_id, n0);

        let fwd_edge_id = g.forward_from(n0)[0].edge_id;
        let back_edge_id = g.backward_from(n1)[0].edge_id;
        assert_eq!(g.reverse_edge(fwd_edge_id), back_edge_id);
        assert_eq!(g.reverse_edge(g.reverse_edge(fwd_edge_id)), fwd_edge_id);
    }

    #[test]
    fn looks_up_nodes_by_seg_id() {
        let mut b = VecGraph::builder();
        let exon1 = b.add_node_with_id(b"AC", "exon1");
        b.add_node(b"G"); // auto id "1"
        let g = b.build().unwrap();

        assert_eq!(g.node_by_seg_id("exon1"), Some(exon1));
        assert_eq!(g.node_by_seg_id("1"), Some(1));
        assert_eq!(g.node_by_seg_id("missing"), None);
    }

    #[test]
    fn rejects_out_of_range_edge() {
        let mut b = VecGraph::builder();
        b.add_node(b"A");
        assert!(b.add_edge(0, 5).is_err());
    }
}
