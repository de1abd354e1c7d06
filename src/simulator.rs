use std::time::{Duration, Instant};

use glam::DVec2;
use tracing::{debug, trace, warn};

use crate::{error::RenderError, graph::Graph, renderer::Render};

/// Outcome of a time-bounded run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: usize,
    pub elapsed: Duration,
}

#[derive(Clone, Debug)]
pub struct Simulator {
    repel_force_const: f64,
    attract_force_const: f64,
    guard_coincident: bool,
}

impl Simulator {
    pub fn builder() -> SimulatorBuilder {
        SimulatorBuilder::default()
    }

    pub fn repel_force_const(&self) -> f64 {
        self.repel_force_const
    }

    pub fn attract_force_const(&self) -> f64 {
        self.attract_force_const
    }

    /// Runs a single tick: every node is displaced by the net force computed
    /// from the positions the graph held before the tick.
    pub fn simulation_step(&self, graph: &mut Graph) {
        let f_vec = self.compute_forces(graph);
        Self::update_node_position(graph, &f_vec);
    }

    /// Repeats `simulation_step` until `duration` of wall-clock time has passed,
    /// calling `renderer` after every tick.
    ///
    /// Time is only checked after a tick has been rendered, so at least one
    /// tick always runs and the run may overshoot `duration` by one tick.
    pub fn run_for<R>(
        &self,
        graph: &mut Graph,
        duration: Duration,
        renderer: &mut R,
    ) -> Result<RunSummary, RenderError>
    where
        R: Render + ?Sized,
    {
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            ?duration,
            "starting layout"
        );

        let start = Instant::now();
        let mut ticks = 0;
        let mut reported_non_finite = false;

        loop {
            self.simulation_step(graph);
            ticks += 1;
            trace!(tick = ticks, "tick finished");

            if !reported_non_finite && graph.has_non_finite() {
                warn!(tick = ticks, "node positions became non-finite");
                reported_non_finite = true;
            }

            renderer.render(graph)?;

            if start.elapsed() >= duration {
                break;
            }
        }

        let summary = RunSummary {
            ticks,
            elapsed: start.elapsed(),
        };
        debug!(ticks, elapsed = ?summary.elapsed, "layout finished");
        Ok(summary)
    }

    /// Net force on every node, indexed like `graph.nodes()`.
    pub fn compute_forces(&self, graph: &Graph) -> Vec<DVec2> {
        let nodes = graph.nodes();
        let mut f_vec = vec![DVec2::ZERO; nodes.len()];

        #[allow(clippy::needless_range_loop)]
        for i in 0..nodes.len() {
            for j in (i + 1)..nodes.len() {
                let (p_i, p_j) = (nodes[i].position, nodes[j].position);
                if self.guard_coincident && p_i == p_j {
                    continue;
                }

                let force = self.repel_force(p_i, p_j);
                f_vec[i] -= force;
                f_vec[j] += force;
            }
        }

        for edge in graph.edges() {
            let force = self.attract_force(
                nodes[edge.start].position,
                nodes[edge.end].position,
            );
            f_vec[edge.start] += force;
            f_vec[edge.end] -= force;
        }

        f_vec
    }

    /// Repulsion between two nodes, pointing from `p1` towards `p2`.
    /// Added to the second node and subtracted from the first.
    ///
    /// Coincident positions yield a non-finite vector. For nodes at `(1, 0)` and
    /// `(-1, 0)` the first node is pushed by `+repel_force / 2` along x, away from the second.
    pub fn repel_force(&self, p1: DVec2, p2: DVec2) -> DVec2 {
        let dir_vec = p2 - p1;
        let f = self.repel_force_const / dir_vec.length();

        Self::direction(dir_vec) * f
    }

    /// Attraction along an edge, pointing from `start` towards `end`.
    /// Added to `start` and subtracted from `end`.
    pub fn attract_force(&self, start: DVec2, end: DVec2) -> DVec2 {
        let dir_vec = end - start;
        let f = self.attract_force_const * dir_vec.length_squared();

        Self::direction(dir_vec) * f
    }

    // Unit vector at the angle of `dir_vec`; a zero vector maps to angle 0.
    fn direction(dir_vec: DVec2) -> DVec2 {
        let theta = dir_vec.y.atan2(dir_vec.x);
        DVec2::new(theta.cos(), theta.sin())
    }

    fn update_node_position(graph: &mut Graph, f_vec: &[DVec2]) {
        for (node, force) in graph.nodes_mut().iter_mut().zip(f_vec) {
            node.position += *force;
        }
    }
}

impl Default for Simulator {
    fn default() -> Self {
        SimulatorBuilder::default().build()
    }
}

/// Builder for `Simulator`
pub struct SimulatorBuilder {
    repel_force_const: f64,
    attract_force_const: f64,
    guard_coincident: bool,
}

impl SimulatorBuilder {
    /// Get a Instance of `SimulatorBuilder` with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// How strong nodes push each other away.
    /// The repulsion between two nodes is `repel_force / distance`.
    pub fn repel_force(mut self, repel_force_const: f64) -> Self {
        self.repel_force_const = repel_force_const;
        self
    }

    /// How strong edges pull their nodes together.
    /// The attraction along an edge is `attract_force * distance²`.
    pub fn attract_force(mut self, attract_force_const: f64) -> Self {
        self.attract_force_const = attract_force_const;
        self
    }

    /// Skip the repulsion between two nodes at exactly the same position.
    ///
    /// Off by default: coincident nodes then receive an infinite force and their
    /// positions turn non-finite. Turning this on changes the trajectory of any
    /// layout where nodes collide.
    pub fn guard_coincident(mut self, guard: bool) -> Self {
        self.guard_coincident = guard;
        self
    }

    /// Constructs a instance of `Simulator`
    pub fn build(self) -> Simulator {
        Simulator {
            repel_force_const: self.repel_force_const,
            attract_force_const: self.attract_force_const,
            guard_coincident: self.guard_coincident,
        }
    }
}

impl Default for SimulatorBuilder {
    /// Get a Instance of `SimulatorBuilder` with default values
    fn default() -> Self {
        Self {
            repel_force_const: 0.001,
            attract_force_const: 0.001,
            guard_coincident: false,
        }
    }
}
