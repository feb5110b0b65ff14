//! Tunables for the estimator and trie builders.
//!
//! This crate does not parse any config file format itself — callers own
//! that — but the tunables still need a typed home with sensible defaults,
//! which is all [`Config`] is.

/// Per-node k-mer presence check switches from a linear scan to a hash set
/// once a node has accumulated at least this many distinct prefixes.
pub const DEFAULT_SET_CUTOFF: usize = 500;

/// Position-BFS halts a level once its frontier reaches this size; `0`
/// disables the guard entirely.
pub const DEFAULT_CUT_EARLY_THRESHOLD: u32 = 128;

/// Free initial weight given to every back-edge on its first pass through
/// the complexity estimator.
pub const DEFAULT_BACKEDGE_INIT: u64 = 1;

/// Number of times a single back-edge may re-propagate growth through the
/// fixed-point loop before its contribution is treated as the node's
/// ceiling.
pub const DEFAULT_BACKEDGE_MAX_TRAV: u32 = 2;

/// Aggregate settings shared by the estimator and the trie builders.
///
/// A plain struct with a
/// sensible `Default`, passed by reference into the algorithms that need it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Weight given to a back-edge's first pass through the estimator.
    pub backedge_init: u64,

    /// Cap on how many times a back-edge re-propagates before its pushed
    /// value is treated as "infinity" for the remainder of the fixed point.
    pub backedge_max_trav: u32,

    /// Position-BFS early-cut frontier size; `0` disables the guard.
    pub cut_early_threshold: u32,

    /// Linear-scan-to-hash-set crossover for Node-BFS's per-node presence
    /// check.
    pub set_cutoff: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backedge_init: DEFAULT_BACKEDGE_INIT,
            backedge_max_trav: DEFAULT_BACKEDGE_MAX_TRAV,
            cut_early_threshold: DEFAULT_CUT_EARLY_THRESHOLD,
            set_cutoff: DEFAULT_SET_CUTOFF,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::default();
        assert_eq!(cfg.backedge_init, 1);
        assert_eq!(cfg.backedge_max_trav, 2);
        assert_eq!(cfg.cut_early_threshold, 128);
        assert_eq!(cfg.set_cutoff, 500);
    }
}
