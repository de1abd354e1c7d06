use glam::DVec2;

/// A node of the layout. Its identity is its index in the owning `Graph`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Node {
    pub position: DVec2,
}

impl Node {
    pub fn new(position: DVec2) -> Self {
        Self { position }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
    }
}

/// An edge between the nodes at index `start` and `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
}

impl Edge {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_self_loop(&self) -> bool {
        self.start == self.end
    }
}
