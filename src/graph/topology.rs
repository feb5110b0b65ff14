//! Topological order with back-edge classification.

use std::collections::HashSet;

use super::{EdgeId, Graph, NodeId};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// A linearization of the graph's nodes consistent with every non-back
/// edge, plus the set of edges a DFS classified as back-edges.
///
/// Built by an iterative DFS that colors nodes white/gray/black; an edge
/// `(u -> v)` found while `v` is gray is a back-edge. [`rank`] gives the
/// position in that linearization (smaller rank = earlier), derived from
/// the DFS postorder reversed.
///
/// DFS start order is fixed for reproducibility: nodes with no incoming
/// edges first, ascending by id, then any remaining undiscovered node,
/// ascending by id.
pub struct TopologicalOrder {
    rank: Vec<u32>,
    backedges: HashSet<EdgeId>,
}

impl TopologicalOrder {
    /// Classify a graph's edges and compute a topological rank for every
    /// node.
    pub fn build<G: Graph + ?Sized>(graph: &G) -> Self {
        let n = graph.num_nodes() as usize;
        let mut color = vec![Color::White; n];
        let mut backedges: HashSet<EdgeId> = HashSet::new();
        let mut postorder = Vec::with_capacity(n);

        for &start in &Self::start_order(graph) {
            if color[start as usize] != Color::White {
                continue;
            }
            Self::dfs_from(graph, start, &mut color, &mut backedges, &mut postorder);
        }

        let mut rank = vec![0u32; n];
        for (i, &node) in postorder.iter().rev().enumerate() {
            rank[node as usize] = i as u32;
        }

        Self { rank, backedges }
    }

    /// Position of `node` in the topological linearization; smaller ranks
    /// come first. For every non-back-edge `(u -> v)`, `rank(u) <
    /// rank(v)`.
    pub fn rank(&self, node: NodeId) -> u32 {
        self.rank[node as usize]
    }

    /// Whether `edge_id` — in either its forward or reverse
    /// representation — was classified as a back-edge.
    pub fn is_backedge(&self, edge_id: EdgeId) -> bool {
        self.backedges.contains(&(edge_id & !1))
    }

    fn start_order<G: Graph + ?Sized>(graph: &G) -> Vec<NodeId> {
        let n = graph.num_nodes();
        let mut is_root = vec![false; n as usize];
        let mut roots: Vec<NodeId> = Vec::new();
        for node in 0..n {
            if graph.backward_from(node).is_empty() {
                is_root[node as usize] = true;
                roots.push(node);
            }
        }
        roots.sort_unstable();
        let mut order = roots;
        order.extend((0..n).filter(|&node| !is_root[node as usize]));
        order
    }

    fn dfs_from<G: Graph + ?Sized>(
        graph: &G,
        start: NodeId,
        color: &mut [Color],
        backedges: &mut HashSet<EdgeId>,
        postorder: &mut Vec<NodeId>,
    ) {
        // (node, index of next forward edge to examine)
        let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];
        color[start as usize] = Color::Gray;

        while let Some(&mut (node, ref mut idx)) = stack.last_mut() {
            let edges = graph.forward_from(node);
            if *idx < edges.len() {
                let edge = edges[*idx];
                *idx += 1;
                match color[edge.node_id as usize] {
                    Color::White => {
                        color[edge.node_id as usize] = Color::Gray;
                        stack.push((edge.node_id, 0));
                    }
                    Color::Gray => {
                        // back-edge: normalize to the even (forward)
                        // representation so is_backedge agrees for both.
                        backedges.insert(edge.edge_id & !1);
                    }
                    Color::Black => {
                        // forward or cross edge, not a back-edge.
                    }
                }
            } else {
                color[node as usize] = Color::Black;
                postorder.push(node);
                stack.pop();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VecGraph;

    #[test]
    fn linear_chain_is_strictly_increasing() {
        let mut b = VecGraph::builder();
        let a = b.add_node(b"A");
        let c = b.add_node(b"C");
        let d = b.add_node(b"D");
        b.add_edge(a, c).unwrap();
        b.add_edge(c, d).unwrap();
        let g = b.build().unwrap();

        let top = TopologicalOrder::build(&g);
        assert!(top.rank(a) < top.rank(c));
        assert!(top.rank(c) < top.rank(d));
        assert!(!top.is_backedge(g.forward_from(a)[0].edge_id));
    }

    #[test]
    fn cycle_classifies_one_backedge() {
        // 0 -> 1 -> 0
        let mut b = VecGraph::builder();
        let n0 = b.add_node(b"A");
        let n1 = b.add_node(b"C");
        b.add_edge(n0, n1).unwrap();
        b.add_edge(n1, n0).unwrap();
        let g = b.build().unwrap();

        let top = TopologicalOrder::build(&g);
        let e01 = g.forward_from(n0)[0].edge_id;
        let e10 = g.forward_from(n1)[0].edge_id;
        // exactly one of the two edges is the back-edge
        assert_ne!(top.is_backedge(e01), top.is_backedge(e10));
    }
}
