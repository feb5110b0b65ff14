//! Trie builders: three independent strategies for turning a set of start
//! positions into `(kmer, position)` pairs.
//!
//! All three implement the same [`TrieBuilder`] contract: one method that
//! does the work, one that names the algorithm. Which positions are passed
//! as `starts` is a caller policy, not part of this trait.

pub mod backtrack;
pub mod node_bfs;
pub mod position_bfs;

pub use backtrack::BackTrackBuilder;
pub use node_bfs::NodeBfsBuilder;
pub use position_bfs::PositionBfsBuilder;

use crate::config::Config;
use crate::error::Result;
use crate::graph::{Graph, TopologicalOrder};
use crate::position::{LetterLocData, NodePos};
use crate::sink::PairSink;

/// Computes `(kmer, position)` pairs reachable from a set of starts.
///
/// `topo` and `config` are accepted uniformly even though a given builder
/// may not need both (`BackTrackBuilder` uses neither; `PositionBfsBuilder`
/// only uses `config`) — callers shouldn't need to special-case the
/// signature per strategy.
pub trait TrieBuilder<const K: usize, const SIGMA: u64> {
    fn compute_pairs<G: Graph + ?Sized, S: PairSink<K, SIGMA>>(
        &mut self,
        graph: &G,
        lloc: &LetterLocData,
        topo: &TopologicalOrder,
        config: &Config,
        starts: &[NodePos],
        sink: &mut S,
    ) -> Result<()>;

    /// Human-readable name for this builder, for logging/diagnostics.
    fn name(&self) -> &'static str;
}

/// Run independent copies of a builder over disjoint start-set partitions
/// in parallel. Parallelism across disjoint start sets is permissible but
/// never required — a single-threaded caller can ignore this entirely.
///
/// Each partition gets its own builder instance and its own buffer, so no
/// state is shared across threads — consistent with the single-threaded
/// contract of an individual [`TrieBuilder`].
#[cfg(feature = "parallel")]
pub fn build_many<const K: usize, const SIGMA: u64, G, B>(
    graph: &G,
    lloc: &LetterLocData,
    topo: &TopologicalOrder,
    config: &Config,
    start_groups: &[Vec<NodePos>],
) -> Result<Vec<Vec<(crate::alphabet::Kmer<K, SIGMA>, crate::position::LetterLoc)>>>
where
    G: Graph + Sync,
    B: TrieBuilder<K, SIGMA> + Default,
{
    use rayon::prelude::*;

    start_groups
        .par_iter()
        .map(|starts| {
            let mut builder = B::default();
            let mut sink = crate::sink::VecPairSink::<K, SIGMA>::new();
            builder.compute_pairs(graph, lloc, topo, config, starts, &mut sink)?;
            Ok(sink.into_pairs())
        })
        .collect()
}
