//! Error types shared by the graph model, the loader and the render hook.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Errors raised while building a `Graph`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// An edge endpoint does not reference an existing node.
    #[error("edge ({start}, {end}) references a node outside 0..{node_count}")]
    InvalidEdge {
        start: usize,
        end: usize,
        node_count: usize,
    },

    /// The node storage for the requested count could not be allocated.
    #[error("cannot allocate {requested} nodes")]
    TooManyNodes { requested: usize },
}

/// Errors raised while reading a graph description.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("could not read graph file {path:?}: {source}")]
    File { path: PathBuf, source: io::Error },

    /// The underlying reader failed.
    #[error("could not read graph description: {0}")]
    Read(#[from] io::Error),

    /// The description parsed but violates the graph invariants.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Errors raised while validating the simulation duration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("no value entered")]
    Empty,

    #[error("{0:?} is not a number")]
    NotANumber(String),

    #[error("the number of seconds must be positive, got {0}")]
    NotPositive(f64),

    #[error("{0} seconds is too long")]
    OutOfRange(f64),
}

/// Errors raised by a render hook.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("could not write frame: {0}")]
    Io(#[from] io::Error),
}
