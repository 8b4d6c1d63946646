use crate::fmt::{escape_xml_into, fmt_into};
use crate::sink::{Frame, RenderSink, Scene, TooltipCommand};
use skyroute_core::geom::Point;

#[derive(Debug, Clone, PartialEq)]
struct SceneNode {
    name: String,
    radius: f64,
}

/// A sink that keeps the latest frame and renders it as a standalone SVG document.
#[derive(Debug, Clone, Default)]
pub struct SvgScene {
    width: f64,
    height: f64,
    map_path: String,
    nodes: Vec<SceneNode>,
    links: Vec<(usize, usize)>,
    positions: Vec<Point>,
    overlay_opacity: f64,
    tooltip: Option<(String, Point)>,
    frames: usize,
}

impl SvgScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    pub fn overlay(&self) -> f64 {
        self.overlay_opacity
    }

    pub fn visible_tooltip(&self) -> Option<(&str, Point)> {
        self.tooltip.as_ref().map(|(t, p)| (t.as_str(), *p))
    }

    /// Number of frames drawn so far.
    pub fn frame_count(&self) -> usize {
        self.frames
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 "#);
        fmt_into(&mut out, self.width);
        out.push(' ');
        fmt_into(&mut out, self.height);
        out.push_str("\">");

        out.push_str(r#"<path class="map" d=""#);
        out.push_str(&self.map_path);
        out.push_str(r#"" style="opacity: "#);
        fmt_into(&mut out, self.overlay_opacity);
        out.push_str(r#";"/>"#);

        out.push_str(r##"<g class="node" stroke="#fff" stroke-width="1.5">"##);
        for (node, p) in self.nodes.iter().zip(&self.positions) {
            out.push_str(r#"<circle cx=""#);
            fmt_into(&mut out, p.x);
            out.push_str(r#"" cy=""#);
            fmt_into(&mut out, p.y);
            out.push_str(r#"" r=""#);
            fmt_into(&mut out, node.radius);
            out.push_str(r#"" fill="orange"><title>"#);
            escape_xml_into(&mut out, &node.name);
            out.push_str("</title></circle>");
        }
        out.push_str("</g>");

        out.push_str(r##"<g class="link" stroke="#999">"##);
        for &(s, t) in &self.links {
            let (Some(a), Some(b)) = (self.positions.get(s), self.positions.get(t)) else {
                continue;
            };
            out.push_str(r#"<line x1=""#);
            fmt_into(&mut out, a.x);
            out.push_str(r#"" y1=""#);
            fmt_into(&mut out, a.y);
            out.push_str(r#"" x2=""#);
            fmt_into(&mut out, b.x);
            out.push_str(r#"" y2=""#);
            fmt_into(&mut out, b.y);
            out.push_str(r#""/>"#);
        }
        out.push_str("</g>");

        if let Some((text, at)) = &self.tooltip {
            out.push_str(r#"<text class="tooltip" x=""#);
            fmt_into(&mut out, at.x);
            out.push_str(r#"" y=""#);
            fmt_into(&mut out, at.y);
            out.push_str("\">");
            escape_xml_into(&mut out, text);
            out.push_str("</text>");
        }

        out.push_str("</svg>\n");
        out
    }
}

impl RenderSink for SvgScene {
    fn setup(&mut self, scene: &Scene<'_>) {
        self.width = scene.width;
        self.height = scene.height;
        self.map_path = scene.map_path.to_string();
        self.nodes = scene
            .airports
            .iter()
            .map(|a| SceneNode {
                name: a.name.clone(),
                radius: a.passengers / scene.passengers_per_pixel,
            })
            .collect();
        self.links = scene.routes.iter().map(|r| (r.source, r.target)).collect();
        self.positions.clear();
    }

    fn draw(&mut self, frame: &Frame<'_>) {
        self.positions.clear();
        self.positions.extend_from_slice(frame.positions);
        self.frames += 1;
    }

    fn overlay_opacity(&mut self, opacity: f64) {
        self.overlay_opacity = opacity.clamp(0.0, 1.0);
    }

    fn tooltip(&mut self, command: &TooltipCommand) {
        self.tooltip = match command {
            TooltipCommand::Show { text, at } => Some((text.clone(), *at)),
            TooltipCommand::Hide => None,
        };
    }
}
