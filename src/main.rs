//! triegraph CLI
//!
//! Builds a k-mer-to-position trie over a small DNA sequence graph
//! described in a plain-text format, and reports the result.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use serde::Serialize;

use triegraph::builder::{BackTrackBuilder, NodeBfsBuilder, PositionBfsBuilder, TrieBuilder};
use triegraph::config::Config;
use triegraph::estimator;
use triegraph::graph::{connected_component_starts, Graph, TopologicalOrder, VecGraph, VecGraphBuilder};
use triegraph::position::{LetterLocData, NodePos};
use triegraph::sink::VecPairSink;

/// Run summary, emitted as JSON with `--json` instead of the plain-text
/// report.
#[derive(Debug, Serialize)]
struct Report {
    k: usize,
    strategy: &'static str,
    num_nodes: u32,
    start_count: usize,
    estimated_complexity: u64,
    emitted_pairs: usize,
}

/// DNA alphabet: A/C/G/T (case-insensitive) map to 0..4.
const SIGMA: u64 = 4;

fn encode_dna(s: &str) -> Result<Vec<u8>, String> {
    s.chars()
        .map(|c| match c.to_ascii_uppercase() {
            'A' => Ok(0u8),
            'C' => Ok(1u8),
            'G' => Ok(2u8),
            'T' => Ok(3u8),
            other => Err(format!("'{other}' is not a valid DNA symbol (expected A/C/G/T)")),
        })
        .collect()
}

/// Parses the CLI's plain-text graph format:
///
/// ```text
/// # comment
/// node ACGT
/// node GG
/// edge 0 1
/// ```
///
/// Nodes are numbered by declaration order; edges reference those numbers.
fn parse_graph(text: &str) -> Result<VecGraph, String> {
    let mut builder = VecGraphBuilder::new();
    let mut node_count = 0u32;

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("node") => {
                let seg = parts
                    .next()
                    .ok_or_else(|| format!("line {}: `node` needs a sequence", lineno + 1))?;
                builder.add_node(encode_dna(seg)?);
                node_count += 1;
            }
            Some("edge") => {
                let from: u32 = parts
                    .next()
                    .ok_or_else(|| format!("line {}: `edge` needs two node indices", lineno + 1))?
                    .parse()
                    .map_err(|e| format!("line {}: {e}", lineno + 1))?;
                let to: u32 = parts
                    .next()
                    .ok_or_else(|| format!("line {}: `edge` needs two node indices", lineno + 1))?
                    .parse()
                    .map_err(|e| format!("line {}: {e}", lineno + 1))?;
                builder
                    .add_edge(from, to)
                    .map_err(|e| format!("line {}: {e}", lineno + 1))?;
            }
            Some(other) => return Err(format!("line {}: unknown directive '{other}'", lineno + 1)),
            None => {}
        }
    }

    if node_count == 0 {
        return Err("graph file declares no nodes".to_string());
    }
    builder.build().map_err(|e| e.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    BackTrack,
    PositionBfs,
    NodeBfs,
}

impl Strategy {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "backtrack" => Some(Self::BackTrack),
            "position-bfs" => Some(Self::PositionBfs),
            "node-bfs" => Some(Self::NodeBfs),
            _ => None,
        }
    }
}

/// Builds and reports the trie for a fixed k, dispatching at compile time
/// since `K` is a const generic parameter of every core type.
macro_rules! run_for_k {
    ($k:expr, $graph:expr, $strategy:expr, $config:expr, $json:expr) => {{
        let graph = $graph;
        let lloc = LetterLocData::from_graph(graph);
        let topo = TopologicalOrder::build(graph);

        let estimate = match estimator::estimate::<$k, SIGMA, _>(graph, &topo, $config) {
            Ok(e) => e,
            Err(e) => {
                eprintln!("estimator error: {e}");
                return ExitCode::FAILURE;
            }
        };
        let total_estimate: u64 = (0..graph.num_nodes()).map(|n| estimate.end_at(n)).sum();

        let starts: Vec<NodePos> = connected_component_starts(graph)
            .into_iter()
            .map(|n| NodePos::new(n, 0))
            .collect();

        let mut sink = VecPairSink::<$k, SIGMA>::new();
        let mut builder_name = "backtrack";
        let result = match $strategy {
            Strategy::BackTrack => {
                let mut b = BackTrackBuilder::<$k, SIGMA>::new();
                builder_name = b.name();
                b.compute_pairs(graph, &lloc, &topo, $config, &starts, &mut sink)
            }
            Strategy::PositionBfs => {
                let mut b = PositionBfsBuilder::<$k, SIGMA>::new();
                builder_name = b.name();
                b.compute_pairs(graph, &lloc, &topo, $config, &starts, &mut sink)
            }
            Strategy::NodeBfs => {
                let mut b = NodeBfsBuilder::<$k, SIGMA>::new();
                builder_name = b.name();
                b.compute_pairs(graph, &lloc, &topo, $config, &starts, &mut sink)
            }
        };
        if let Err(e) = result {
            eprintln!("builder error: {e}");
            return ExitCode::FAILURE;
        }

        let report = Report {
            k: $k,
            strategy: builder_name,
            num_nodes: graph.num_nodes(),
            start_count: starts.len(),
            estimated_complexity: total_estimate,
            emitted_pairs: sink.len(),
        };

        if $json {
            match serde_json::to_string_pretty(&report) {
                Ok(j) => println!("{j}"),
                Err(e) => {
                    eprintln!("error serializing report: {e}");
                    return ExitCode::FAILURE;
                }
            }
        } else {
            println!("estimated complexity (sum of per-node bounds): {}", report.estimated_complexity);
            println!("start positions: {}", report.start_count);
            println!("emitted pairs: {}", report.emitted_pairs);
        }
        ExitCode::SUCCESS
    }};
}

fn print_usage() {
    eprintln!("Usage: triegraph <graph.txt> --k <K> [--strategy backtrack|position-bfs|node-bfs]");
    eprintln!();
    eprintln!("Graph file format (DNA alphabet, A/C/G/T):");
    eprintln!("  node <sequence>   declare a node, numbered by order");
    eprintln!("  edge <from> <to>  declare a directed edge between node numbers");
    eprintln!();
    eprintln!("Supported --k values: 2, 3, 4, 6, 8, 12, 16, 21, 31 (default 8)");
    eprintln!("Pass --json for a machine-readable report instead of plain text.");
    eprintln!();
    eprintln!("Config overrides (each falls back to Config::default() if omitted):");
    eprintln!("  --backedge-init <u64>          estimator back-edge initial weight");
    eprintln!("  --backedge-max-trav <u32>      estimator back-edge re-propagation cap");
    eprintln!("  --cut-early-threshold <u32>    position-bfs frontier guard (0 disables it)");
    eprintln!("  --set-cutoff <usize>           node-bfs linear-scan-to-hash-set crossover");
}

fn flag<T: std::str::FromStr>(args: &[String], name: &str) -> Option<T> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    let input_path = PathBuf::from(&args[1]);
    let k: usize = args
        .iter()
        .position(|a| a == "--k")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);
    let strategy = args
        .iter()
        .position(|a| a == "--strategy")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| Strategy::parse(s))
        .unwrap_or(Strategy::BackTrack);
    let json = args.iter().any(|a| a == "--json");

    let text = match fs::read_to_string(&input_path) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error reading {input_path:?}: {e}");
            return ExitCode::FAILURE;
        }
    };

    let graph = match parse_graph(&text) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("error parsing graph: {e}");
            return ExitCode::FAILURE;
        }
    };

    let defaults = Config::default();
    let config = Config {
        backedge_init: flag(&args, "--backedge-init").unwrap_or(defaults.backedge_init),
        backedge_max_trav: flag(&args, "--backedge-max-trav").unwrap_or(defaults.backedge_max_trav),
        cut_early_threshold: flag(&args, "--cut-early-threshold").unwrap_or(defaults.cut_early_threshold),
        set_cutoff: flag(&args, "--set-cutoff").unwrap_or(defaults.set_cutoff),
    };
    let graph_ref = &graph;

    match k {
        2 => run_for_k!(2, graph_ref, strategy, &config, json),
        3 => run_for_k!(3, graph_ref, strategy, &config, json),
        4 => run_for_k!(4, graph_ref, strategy, &config, json),
        6 => run_for_k!(6, graph_ref, strategy, &config, json),
        8 => run_for_k!(8, graph_ref, strategy, &config, json),
        12 => run_for_k!(12, graph_ref, strategy, &config, json),
        16 => run_for_k!(16, graph_ref, strategy, &config, json),
        21 => run_for_k!(21, graph_ref, strategy, &config, json),
        31 => run_for_k!(31, graph_ref, strategy, &config, json),
        other => {
            eprintln!("unsupported --k {other}");
            print_usage();
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_nodes_and_edges() {
        let g = parse_graph("node ACGT\nnode GG\nedge 0 1\n").unwrap();
        assert_eq!(g.num_nodes(), 2);
        assert_eq!(g.node_seg(0), [0u8, 1, 2, 3]);
        assert_eq!(g.forward_from(0).len(), 1);
    }

    #[test]
    fn rejects_non_dna_symbols() {
        assert!(parse_graph("node ACGX\n").is_err());
    }

    #[test]
    fn config_flags_override_defaults() {
        let args: Vec<String> = vec![
            "triegraph", "g.txt", "--backedge-init", "3", "--set-cutoff", "10",
        ]
        .into_iter()
        .map(String::from)
        .collect();
        assert_eq!(flag::<u64>(&args, "--backedge-init"), Some(3));
        assert_eq!(flag::<usize>(&args, "--set-cutoff"), Some(10));
        assert_eq!(flag::<u32>(&args, "--backedge-max-trav"), None);
    }

    #[test]
    fn round_trips_through_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "node AC\nnode GT\nedge 0 1\n").unwrap();

        let text = fs::read_to_string(file.path()).unwrap();
        let g = parse_graph(&text).unwrap();
        assert_eq!(g.num_nodes(), 2);
    }
}
