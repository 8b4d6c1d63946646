use crate::error::{Error, Result};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl Graph {
    pub fn validate(&self) -> Result<()> {
        self.resolve_links().map(|_| ())
    }

    /// Resolves every link endpoint id to a node index, failing on the first dangling reference.
    pub fn resolve_links(&self) -> Result<Vec<LinkRef>> {
        let index = self.node_index()?;
        let mut out = Vec::with_capacity(self.links.len());
        for (link, l) in self.links.iter().enumerate() {
            let resolve = |endpoint: &str| {
                index
                    .get(endpoint)
                    .copied()
                    .ok_or_else(|| Error::MissingEndpoint {
                        link,
                        endpoint: endpoint.to_string(),
                    })
            };
            out.push(LinkRef {
                source: resolve(l.source.as_str())?,
                target: resolve(l.target.as_str())?,
            });
        }
        Ok(out)
    }

    pub(crate) fn node_index(&self) -> Result<FxHashMap<&str, usize>> {
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        index.reserve(self.nodes.len());
        for (idx, n) in self.nodes.iter().enumerate() {
            if index.insert(n.id.as_str(), idx).is_some() {
                return Err(Error::DuplicateNode { id: n.id.clone() });
            }
        }
        Ok(index)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub id: String,
    /// Optional initial position. Nodes without one are seeded on a phyllotaxis spiral.
    pub position: Option<Point>,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position: None,
        }
    }

    pub fn at(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            position: Some(Point::new(x, y)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Link {
    pub source: String,
    pub target: String,
}

impl Link {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// A link whose endpoints have been resolved to body indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkRef {
    pub source: usize,
    pub target: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Fixed-position override for a body.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Pin {
    /// Moved by forces.
    #[default]
    Free,
    /// Held at the given point; forces are computed but never applied.
    Pinned(Point),
}

/// Simulated state of a single node.
#[derive(Debug, Clone)]
pub struct Body {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub pin: Pin,
}

impl Body {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn is_pinned(&self) -> bool {
        matches!(self.pin, Pin::Pinned(_))
    }
}

#[derive(Debug, Clone)]
pub struct LayoutResult {
    pub positions: std::collections::BTreeMap<String, Point>,
}

#[cfg(test)]
mod tests {
    use super::{Graph, Link, LinkRef, Node};
    use crate::Error;

    #[test]
    fn resolve_links_maps_ids_to_indices() {
        let g = Graph {
            nodes: vec![Node::new("a"), Node::new("b"), Node::new("c")],
            links: vec![Link::new("c", "a"), Link::new("b", "c")],
        };
        let links = g.resolve_links().expect("resolve");
        assert_eq!(
            links,
            vec![
                LinkRef {
                    source: 2,
                    target: 0
                },
                LinkRef {
                    source: 1,
                    target: 2
                },
            ]
        );
    }

    #[test]
    fn dangling_endpoint_is_reported_with_link_index() {
        let g = Graph {
            nodes: vec![Node::new("a"), Node::new("b")],
            links: vec![Link::new("a", "b"), Link::new("b", "zzz")],
        };
        match g.validate() {
            Err(Error::MissingEndpoint { link, endpoint }) => {
                assert_eq!(link, 1);
                assert_eq!(endpoint, "zzz");
            }
            other => panic!("expected MissingEndpoint, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_node_ids_are_rejected() {
        let g = Graph {
            nodes: vec![Node::new("a"), Node::new("a")],
            links: Vec::new(),
        };
        assert!(matches!(g.validate(), Err(Error::DuplicateNode { .. })));
    }
}
