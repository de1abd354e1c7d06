//! Reading graphs from their plain-text description.
//!
//! The description is a sequence of whitespace-separated integers: the node
//! count, followed by pairs of zero-based node indices, one pair per edge.
//!
//! ```text
//! 3
//! 0 1
//! 1 2
//! ```
//!
//! Parsing stops at the end of the input or at the first pair that does not
//! consist of two non-negative integers; the edges read up to that point are
//! kept. An unreadable node count yields an empty graph, a count too large to
//! allocate is an error.

use std::{fs::File, io::Read, path::Path};

use tracing::{debug, warn};

use crate::{
    error::{GraphError, LoadError},
    graph::Graph,
};

/// Builds a graph from its textual description. All nodes start at the origin.
pub fn parse_graph(text: &str) -> Result<Graph, GraphError> {
    let mut tokens = text.split_whitespace();

    let node_count = match tokens.next().map(str::parse::<usize>) {
        Some(Ok(n)) => n,
        Some(Err(_)) | None => {
            warn!("graph description has no valid node count, using an empty graph");
            return Ok(Graph::with_node_count(0));
        }
    };

    let mut graph = Graph::try_with_node_count(node_count)?;
    loop {
        let (Some(start), Some(end)) = (tokens.next(), tokens.next()) else {
            break;
        };
        let (Ok(start), Ok(end)) = (start.parse::<usize>(), end.parse::<usize>()) else {
            debug!(start, end, "stopped reading edges at malformed pair");
            break;
        };
        graph.add_edge(start, end)?;
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "parsed graph"
    );
    Ok(graph)
}

/// Reads a whole description from `reader` and parses it.
pub fn read_graph<R: Read>(mut reader: R) -> Result<Graph, LoadError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(parse_graph(&text)?)
}

/// Opens the file at `path` and parses it.
pub fn load_graph(path: impl AsRef<Path>) -> Result<Graph, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::File {
        path: path.to_path_buf(),
        source,
    })?;
    read_graph(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::Edge;

    fn edges(graph: &Graph) -> Vec<Edge> {
        graph.edges().copied().collect()
    }

    #[test]
    fn test_parse_graph() {
        let g = parse_graph("4\n0 1\n1 2\n2 3\n3 0\n").unwrap();
        assert_eq!(g.node_count(), 4);
        assert_eq!(
            edges(&g),
            vec![Edge::new(0, 1), Edge::new(1, 2), Edge::new(2, 3), Edge::new(3, 0)]
        );
    }

    #[test]
    fn test_parse_graph_ignores_layout_of_whitespace() {
        let g = parse_graph("  3 0\t1\n\n 1   2 ").unwrap();
        assert_eq!(edges(&g), vec![Edge::new(0, 1), Edge::new(1, 2)]);
    }

    #[test]
    fn test_parse_graph_stops_at_malformed_pair() {
        let g = parse_graph("3\n0 1\n1 x\n1 2\n").unwrap();
        assert_eq!(g.node_count(), 3);
        assert_eq!(edges(&g), vec![Edge::new(0, 1)]);
    }

    #[test]
    fn test_parse_graph_drops_trailing_half_pair() {
        let g = parse_graph("3 0 1 2").unwrap();
        assert_eq!(edges(&g), vec![Edge::new(0, 1)]);
    }

    #[test]
    fn test_parse_graph_rejects_negative_index() {
        let g = parse_graph("2 0 -1 0 1").unwrap();
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_parse_graph_bad_node_count() {
        assert_eq!(parse_graph("three 0 1").unwrap().node_count(), 0);
        assert_eq!(parse_graph("").unwrap().node_count(), 0);
    }

    #[test]
    fn test_parse_graph_out_of_range_edge() {
        assert_eq!(
            parse_graph("2 0 1 1 5"),
            Err(GraphError::InvalidEdge {
                start: 1,
                end: 5,
                node_count: 2
            })
        );
    }

    #[test]
    fn test_parse_graph_node_count_too_large() {
        assert_eq!(
            parse_graph("18446744073709551615 0 1"),
            Err(GraphError::TooManyNodes {
                requested: usize::MAX
            })
        );
    }

    #[test]
    fn test_read_graph_node_count_too_large() {
        let err = read_graph("18446744073709551615\n".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Graph(GraphError::TooManyNodes { .. })
        ));
    }

    #[test]
    fn test_parse_graph_keeps_self_loops() {
        let g = parse_graph("1 0 0").unwrap();
        assert_eq!(edges(&g), vec![Edge::new(0, 0)]);
    }

    #[test]
    fn test_read_graph_from_reader() {
        let g = read_graph("2\n0 1\n".as_bytes()).unwrap();
        assert_eq!(g.node_count(), 2);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn test_load_graph_missing_file() {
        let err = load_graph("/definitely/not/a/graph.txt").unwrap_err();
        assert!(matches!(err, LoadError::File { .. }));
    }
}
