//! The contract between the layout controllers and whatever draws the scene.

use skyroute_core::geom::Point;
use skyroute_core::{Airport, Route};

/// Static scene content, handed to a sink once before the first frame.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub width: f64,
    pub height: f64,
    pub airports: &'a [Airport],
    pub routes: &'a [Route],
    /// Boundary overlay path data (`path.map`).
    pub map_path: &'a str,
    pub passengers_per_pixel: f64,
}

/// Rendered node positions for one frame. `positions[i]` belongs to `airports[i]`.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub airports: &'a [Airport],
    pub routes: &'a [Route],
    pub positions: &'a [Point],
}

impl<'a> Frame<'a> {
    pub fn nodes(&self) -> impl Iterator<Item = (&'a str, Point)> + 'a {
        self.airports
            .iter()
            .zip(self.positions.iter().copied())
            .map(|(a, p)| (a.id.as_str(), p))
    }

    /// Link endpoints, derived from the rendered positions of the linked nodes.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + 'a {
        let positions = self.positions;
        self.routes.iter().filter_map(move |r| {
            Some((*positions.get(r.source)?, *positions.get(r.target)?))
        })
    }

    pub fn position(&self, index: usize) -> Option<Point> {
        self.positions.get(index).copied()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TooltipCommand {
    Show { text: String, at: Point },
    Hide,
}

pub trait RenderSink {
    fn setup(&mut self, _scene: &Scene<'_>) {}

    fn draw(&mut self, frame: &Frame<'_>);

    fn overlay_opacity(&mut self, opacity: f64);

    fn tooltip(&mut self, command: &TooltipCommand);
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn setup(&mut self, scene: &Scene<'_>) {
        (**self).setup(scene);
    }

    fn draw(&mut self, frame: &Frame<'_>) {
        (**self).draw(frame);
    }

    fn overlay_opacity(&mut self, opacity: f64) {
        (**self).overlay_opacity(opacity);
    }

    fn tooltip(&mut self, command: &TooltipCommand) {
        (**self).tooltip(command);
    }
}
