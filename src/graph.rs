use std::{f64::consts::PI, slice::Iter};

use glam::DVec2;
use petgraph::{
    visit::{EdgeRef, IntoEdgeReferences},
    EdgeType,
};

use crate::{
    error::GraphError,
    properties::{Edge, Node},
};

/// Nodes and edges of the layout.
///
/// The node count is fixed when the graph is created. Edges can only be
/// appended and always reference existing nodes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Creates a graph with `node_count` nodes at the origin and no edges.
    pub fn with_node_count(node_count: usize) -> Self {
        Self {
            nodes: vec![Node::default(); node_count],
            edges: vec![],
        }
    }

    /// Like [`Graph::with_node_count`], but fails instead of aborting when the
    /// nodes cannot be allocated.
    pub fn try_with_node_count(node_count: usize) -> Result<Self, GraphError> {
        let mut nodes = Vec::new();
        nodes
            .try_reserve_exact(node_count)
            .map_err(|_| GraphError::TooManyNodes {
                requested: node_count,
            })?;
        nodes.resize(node_count, Node::default());

        Ok(Self {
            nodes,
            edges: vec![],
        })
    }

    /// Creates a graph with one node per position and no edges.
    pub fn from_positions<I>(positions: I) -> Self
    where
        I: IntoIterator<Item = DVec2>,
    {
        Self {
            nodes: positions.into_iter().map(Node::new).collect(),
            edges: vec![],
        }
    }

    /// Appends the edge `(start, end)`.
    ///
    /// Self-loops and duplicate edges are accepted. Fails if either endpoint
    /// is not a valid node index.
    pub fn add_edge(&mut self, start: usize, end: usize) -> Result<(), GraphError> {
        let node_count = self.nodes.len();
        if start >= node_count || end >= node_count {
            return Err(GraphError::InvalidEdge {
                start,
                end,
                node_count,
            });
        }
        self.edges.push(Edge::new(start, end));
        Ok(())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn edges(&self) -> Iter<'_, Edge> {
        self.edges.iter()
    }

    /// Arranges the nodes evenly on the unit circle, node `k` of `n` at angle `2πk/n`.
    pub fn place_on_circle(&mut self) {
        let n = self.nodes.len() as f64;
        for (k, node) in self.nodes.iter_mut().enumerate() {
            let angle = 2.0 * PI * k as f64 / n;
            node.position = DVec2::new(angle.cos(), angle.sin());
        }
    }

    /// Lower left and upper right corner of all finite node positions.
    pub fn bounds(&self) -> Option<(DVec2, DVec2)> {
        let mut finite = self.nodes.iter().filter(|n| n.is_finite());
        let first = finite.next()?.position;

        let (mut min, mut max) = (first, first);
        for node in finite {
            min = min.min(node.position);
            max = max.max(node.position);
        }
        Some((min, max))
    }

    /// Whether any node position holds a NaN or infinite coordinate.
    pub fn has_non_finite(&self) -> bool {
        self.nodes.iter().any(|n| !n.is_finite())
    }
}

impl<N, E, Ty, Ix> From<&petgraph::Graph<N, E, Ty, Ix>> for Graph
where
    Ty: EdgeType,
    Ix: petgraph::graph::IndexType,
{
    /// Copies the structure of a petgraph graph. Edge direction is dropped and
    /// every node starts at the origin.
    fn from(graph: &petgraph::Graph<N, E, Ty, Ix>) -> Self {
        let mut g = Self::with_node_count(graph.node_count());
        g.edges = graph
            .edge_references()
            .map(|e| Edge::new(e.source().index(), e.target().index()))
            .collect();
        g
    }
}

impl<N, E, Ty, Ix> From<petgraph::Graph<N, E, Ty, Ix>> for Graph
where
    Ty: EdgeType,
    Ix: petgraph::graph::IndexType,
{
    fn from(graph: petgraph::Graph<N, E, Ty, Ix>) -> Self {
        Self::from(&graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: DVec2, b: DVec2) {
        assert!(a.abs_diff_eq(b, 1e-12), "{a} != {b}");
    }

    #[test]
    fn test_with_node_count_starts_at_origin() {
        let g = Graph::with_node_count(3);
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 0);
        assert!(g.nodes().iter().all(|n| n.position == DVec2::ZERO));
    }

    #[test]
    fn test_try_with_node_count() {
        let g = Graph::try_with_node_count(5).unwrap();
        assert_eq!(g, Graph::with_node_count(5));
        assert_eq!(
            Graph::try_with_node_count(usize::MAX),
            Err(GraphError::TooManyNodes {
                requested: usize::MAX
            })
        );
    }

    #[test]
    fn test_place_on_circle_four_nodes() {
        let mut g = Graph::with_node_count(4);
        g.place_on_circle();

        assert_close(g.nodes()[0].position, DVec2::new(1.0, 0.0));
        assert_close(g.nodes()[1].position, DVec2::new(0.0, 1.0));
        assert_close(g.nodes()[2].position, DVec2::new(-1.0, 0.0));
        assert_close(g.nodes()[3].position, DVec2::new(0.0, -1.0));
    }

    #[test]
    fn test_place_on_circle_distinct_positions() {
        let mut g = Graph::with_node_count(16);
        g.place_on_circle();

        for i in 0..16 {
            for j in (i + 1)..16 {
                let d = g.nodes()[i].position.distance(g.nodes()[j].position);
                assert!(d.is_finite() && d > 0.0);
            }
        }
    }

    #[test]
    fn test_place_on_circle_empty_graph() {
        let mut g = Graph::with_node_count(0);
        g.place_on_circle();
        assert_eq!(g.node_count(), 0);
    }

    #[test]
    fn test_add_edge_rejects_out_of_range() {
        let mut g = Graph::with_node_count(2);
        assert_eq!(
            g.add_edge(0, 2),
            Err(GraphError::InvalidEdge {
                start: 0,
                end: 2,
                node_count: 2
            })
        );
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn test_add_edge_accepts_self_loops_and_duplicates() {
        let mut g = Graph::with_node_count(2);
        g.add_edge(1, 1).unwrap();
        g.add_edge(0, 1).unwrap();
        g.add_edge(0, 1).unwrap();

        let edges: Vec<_> = g.edges().copied().collect();
        assert_eq!(
            edges,
            vec![Edge::new(1, 1), Edge::new(0, 1), Edge::new(0, 1)]
        );
        assert!(edges[0].is_self_loop());
    }

    #[test]
    fn test_node_mut_writes_position() {
        let mut g = Graph::with_node_count(2);
        g.node_mut(1).unwrap().position = DVec2::new(3.0, 4.0);
        assert_eq!(g.node(1).unwrap().position, DVec2::new(3.0, 4.0));
        assert!(g.node(2).is_none());
    }

    #[test]
    fn test_bounds_skip_non_finite() {
        let g = Graph::from_positions([
            DVec2::new(-1.0, 2.0),
            DVec2::new(f64::NAN, 0.0),
            DVec2::new(3.0, -4.0),
        ]);
        assert_eq!(
            g.bounds(),
            Some((DVec2::new(-1.0, -4.0), DVec2::new(3.0, 2.0)))
        );
        assert!(g.has_non_finite());
        assert_eq!(Graph::with_node_count(0).bounds(), None);
    }

    #[test]
    fn test_from_petgraph() {
        let mut pg: petgraph::Graph<(), ()> = petgraph::Graph::new();
        let a = pg.add_node(());
        let b = pg.add_node(());
        let c = pg.add_node(());
        pg.add_edge(a, b, ());
        pg.add_edge(c, a, ());

        let g = Graph::from(&pg);
        assert_eq!(g.node_count(), 3);
        let edges: Vec<_> = g.edges().copied().collect();
        assert_eq!(edges, vec![Edge::new(0, 1), Edge::new(2, 0)]);
    }
}
