//! # triegraph
//!
//! Builds a mapping from fixed-length k-mers over a finite alphabet to
//! compressed positions in a directed sequence graph.
//!
//! ## Overview
//!
//! A sequence graph's nodes each carry a short string over an alphabet of
//! size `SIGMA`; edges denote valid concatenations of adjacent nodes'
//! strings. This crate enumerates, for every length-`K` window ("k-mer")
//! reachable by walking the graph, at least one position where that window
//! ends, compressed into a single dense integer ([`position::LetterLoc`]).
//!
//! ## Modules
//!
//! - [`alphabet`] — the rolling k-mer type
//! - [`graph`] — the read-only graph trait, an in-memory implementation,
//!   topological ordering with back-edge classification, and
//!   connected-component start discovery
//! - [`position`] — node positions and their compressed encoding
//! - [`estimator`] — per-node complexity bounds used to size output
//!   buffers ahead of a build
//! - [`builder`] — the three interchangeable strategies for turning a set
//!   of start positions into `(kmer, position)` pairs: Back-Track,
//!   Position-BFS, Node-BFS
//! - [`sink`] — the seam builders write pairs to
//! - [`config`] — tunables shared across the estimator and builders
//! - [`error`] — the crate-wide error type
//!
//! ## Example
//!
//! ```rust,ignore
//! use triegraph::config::Config;
//! use triegraph::graph::{Graph, TopologicalOrder, VecGraph};
//! use triegraph::position::{LetterLocData, NodePos};
//! use triegraph::builder::{BackTrackBuilder, TrieBuilder};
//! use triegraph::sink::VecPairSink;
//!
//! let mut b = VecGraph::builder();
//! let n0 = b.add_node(b"ACGT");
//! let g = b.build()?;
//!
//! let lloc = LetterLocData::from_graph(&g);
//! let topo = TopologicalOrder::build(&g);
//! let config = Config::default();
//!
//! let mut sink = VecPairSink::<3, 4>::new();
//! BackTrackBuilder::<3, 4>::new()
//!     .compute_pairs(&g, &lloc, &topo, &config, &[NodePos::new(n0, 0)], &mut sink)?;
//! # Ok::<(), triegraph::error::TrieGraphError>(())
//! ```
//!
//! ## References
//!
//! Distilled from `triegraph`'s trie-over-sequence-graph construction
//! pipeline: <https://github.com/ichernev/triegraph>

pub mod alphabet;
pub mod builder;
pub mod config;
pub mod error;
pub mod estimator;
pub mod graph;
pub mod position;
pub mod sink;

pub use alphabet::{Kmer, Letter};
pub use config::Config;
pub use error::{Result, TrieGraphError};
pub use graph::{Graph, NodeId, TopologicalOrder, VecGraph};
pub use position::{LetterLoc, LetterLocData, NodePos};
