use std::io::Write;

use glam::DVec2;

use super::Render;
use crate::{error::RenderError, graph::Graph};

const NODE_CELL: char = 'o';
const EDGE_CELL: char = '.';
const EMPTY_CELL: char = ' ';
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Draws the graph as a grid of characters, scaled to fit the finite
/// bounding box of the nodes.
pub struct Canvas<W: Write> {
    out: W,
    width: usize,
    height: usize,
    clear_screen: bool,
}

impl<W: Write> Canvas<W> {
    pub fn new(out: W, width: usize, height: usize) -> Self {
        Self {
            out,
            width: width.max(1),
            height: height.max(1),
            clear_screen: false,
        }
    }

    /// Emit an ANSI clear-screen sequence before every frame.
    pub fn clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Rows of the frame for `graph`, top row first.
    pub fn rasterize(&self, graph: &Graph) -> Vec<String> {
        let mut cells = vec![vec![EMPTY_CELL; self.width]; self.height];

        if let Some((min, max)) = graph.bounds() {
            let span = max - min;
            let span = DVec2::new(
                if span.x > 0.0 { span.x } else { 1.0 },
                if span.y > 0.0 { span.y } else { 1.0 },
            );
            let scale = DVec2::new((self.width - 1) as f64, (self.height - 1) as f64) / span;
            let to_cell = |p: DVec2| (p - min) * scale;

            for edge in graph.edges() {
                let (a, b) = (graph.nodes()[edge.start], graph.nodes()[edge.end]);
                if !a.is_finite() || !b.is_finite() {
                    continue;
                }
                self.draw_edge(&mut cells, to_cell(a.position), to_cell(b.position));
            }

            for node in graph.nodes().iter().filter(|n| n.is_finite()) {
                self.plot(&mut cells, to_cell(node.position), NODE_CELL);
            }
        }

        cells.into_iter().map(|row| row.into_iter().collect()).collect()
    }

    fn draw_edge(&self, cells: &mut [Vec<char>], from: DVec2, to: DVec2) {
        let steps = (to - from).abs().max_element().ceil().max(1.0) as usize;
        for step in 0..=steps {
            let t = step as f64 / steps as f64;
            self.plot(cells, from.lerp(to, t), EDGE_CELL);
        }
    }

    fn plot(&self, cells: &mut [Vec<char>], cell: DVec2, c: char) {
        let col = (cell.x.round() as usize).min(self.width - 1);
        // Rows grow downwards, y grows upwards.
        let row = self.height - 1 - (cell.y.round() as usize).min(self.height - 1);
        cells[row][col] = c;
    }
}

impl<W: Write> Render for Canvas<W> {
    fn render(&mut self, graph: &Graph) -> Result<(), RenderError> {
        let rows = self.rasterize(graph);

        if self.clear_screen {
            write!(self.out, "{CLEAR_SCREEN}")?;
        }
        for row in rows {
            writeln!(self.out, "{}", row.trim_end())?;
        }
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
