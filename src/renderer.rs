use std::time::{Duration, Instant};

use crate::{error::RenderError, graph::Graph};

pub use canvas::Canvas;

mod canvas;

/// Receives the graph after every simulation tick.
///
/// Implementations only read the graph; drawing, logging or collecting
/// statistics are typical uses.
pub trait Render {
    fn render(&mut self, graph: &Graph) -> Result<(), RenderError>;
}

impl<R: Render + ?Sized> Render for &mut R {
    fn render(&mut self, graph: &Graph) -> Result<(), RenderError> {
        (**self).render(graph)
    }
}

impl<R: Render + ?Sized> Render for Box<R> {
    fn render(&mut self, graph: &Graph) -> Result<(), RenderError> {
        (**self).render(graph)
    }
}

/// Renderer that calls a closure, see [`from_fn`].
pub struct FromFn<F>(F);

/// Creates a renderer from a closure.
///
/// ```rust
/// use forcelayout::{graph::Graph, renderer::{from_fn, Render}};
///
/// let mut frames = 0;
/// let mut renderer = from_fn(|_graph| {
///     frames += 1;
///     Ok(())
/// });
/// renderer.render(&Graph::with_node_count(2)).unwrap();
/// drop(renderer);
/// assert_eq!(frames, 1);
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: FnMut(&Graph) -> Result<(), RenderError>,
{
    FromFn(f)
}

impl<F> Render for FromFn<F>
where
    F: FnMut(&Graph) -> Result<(), RenderError>,
{
    fn render(&mut self, graph: &Graph) -> Result<(), RenderError> {
        (self.0)(graph)
    }
}

/// Forwards a frame to the inner renderer only if `interval` has passed since
/// the last forwarded frame. The first frame is always forwarded.
pub struct Throttled<R> {
    inner: R,
    interval: Duration,
    last_redraw: Option<Instant>,
}

impl<R: Render> Throttled<R> {
    pub fn new(inner: R, interval: Duration) -> Self {
        Self {
            inner,
            interval,
            last_redraw: None,
        }
    }

    /// Renders through to the inner renderer regardless of the interval.
    pub fn force_render(&mut self, graph: &Graph) -> Result<(), RenderError> {
        self.last_redraw = Some(Instant::now());
        self.inner.render(graph)
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Render> Render for Throttled<R> {
    fn render(&mut self, graph: &Graph) -> Result<(), RenderError> {
        match self.last_redraw {
            Some(last) if last.elapsed() < self.interval => Ok(()),
            _ => self.force_render(graph),
        }
    }
}
