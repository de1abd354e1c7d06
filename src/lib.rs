//! Force-directed layout of undirected graphs.
//!
//! Every pair of nodes repels, every edge pulls its endpoints together, and
//! each simulation step moves every node by the sum of the forces acting on it.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use forcelayout::{loader::parse_graph, renderer::from_fn, simulator::SimulatorBuilder};
//!
//! let mut graph = parse_graph("4\n0 1\n1 2\n2 3\n").unwrap();
//! graph.place_on_circle();
//!
//! let simulator = SimulatorBuilder::new().repel_force(0.001).attract_force(0.001).build();
//! let summary = simulator
//!     .run_for(&mut graph, Duration::from_millis(10), &mut from_fn(|_| Ok(())))
//!     .unwrap();
//! assert!(summary.ticks >= 1);
//! ```

pub mod error;
pub mod graph;
pub mod input;
pub mod loader;
pub mod properties;
pub mod renderer;
pub mod simulator;
