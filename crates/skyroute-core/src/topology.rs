//! TopoJSON decoding.
//!
//! Arcs are shared between neighboring polygons. When a `transform` is present the arc
//! positions are quantized and delta-encoded, so each arc is decoded by a running sum and then
//! scaled/translated back to longitude/latitude. A negative arc index `~i` means arc `i`
//! traversed backwards.

use crate::error::{DatasetKind, Error, Result};
use crate::geo::{Feature, GeoCollection, LonLat, Polygon};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct Topology {
    #[serde(default)]
    pub transform: Option<Transform>,
    pub arcs: Vec<Vec<Vec<f64>>>,
    pub objects: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Transform {
    pub scale: [f64; 2],
    pub translate: [f64; 2],
}

impl Topology {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::unavailable(DatasetKind::Boundaries, e))
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::unavailable(DatasetKind::Boundaries, e))
    }

    pub fn object_names(&self) -> impl Iterator<Item = &str> {
        self.objects.keys().map(String::as_str)
    }

    /// Converts the named object to a polygon collection (`topojson.feature`).
    ///
    /// Only areal geometries contribute; points and lines decode to empty features.
    pub fn feature(&self, object: &str) -> Result<GeoCollection> {
        let root = self
            .objects
            .get(object)
            .ok_or_else(|| Error::MissingObject {
                name: object.to_string(),
            })?;

        let arcs = self.decoded_arcs();
        let mut features = Vec::new();
        match geometry_type(root)? {
            Some("GeometryCollection") => {
                for g in array(root, "geometries")? {
                    features.push(self.to_feature(&arcs, g)?);
                }
            }
            _ => features.push(self.to_feature(&arcs, root)?),
        }

        let collection = GeoCollection { features };
        tracing::debug!(
            object,
            features = collection.features.len(),
            "topology object decoded"
        );
        Ok(collection)
    }

    fn decoded_arcs(&self) -> Vec<Vec<LonLat>> {
        self.arcs
            .iter()
            .map(|arc| {
                let mut x = 0.0;
                let mut y = 0.0;
                arc.iter()
                    .filter(|p| p.len() >= 2)
                    .map(|p| match self.transform {
                        Some(t) => {
                            x += p[0];
                            y += p[1];
                            LonLat::new(
                                x * t.scale[0] + t.translate[0],
                                y * t.scale[1] + t.translate[1],
                            )
                        }
                        None => LonLat::new(p[0], p[1]),
                    })
                    .collect()
            })
            .collect()
    }

    fn to_feature(&self, arcs: &[Vec<LonLat>], g: &Value) -> Result<Feature> {
        let id = g.get("id").and_then(|v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });
        let mut polygons = Vec::new();
        collect_polygons(arcs, g, &mut polygons)?;
        Ok(Feature { id, polygons })
    }
}

fn geometry_type(g: &Value) -> Result<Option<&str>> {
    match g.get("type") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(Error::InvalidGeometry {
            message: format!("geometry type must be a string, got {other}"),
        }),
    }
}

fn array<'a>(g: &'a Value, key: &str) -> Result<&'a Vec<Value>> {
    g.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| Error::InvalidGeometry {
            message: format!("expected `{key}` array"),
        })
}

fn collect_polygons(arcs: &[Vec<LonLat>], g: &Value, out: &mut Vec<Polygon>) -> Result<()> {
    match geometry_type(g)? {
        Some("GeometryCollection") => {
            for child in array(g, "geometries")? {
                collect_polygons(arcs, child, out)?;
            }
        }
        Some("Polygon") => {
            out.push(polygon(arcs, array(g, "arcs")?)?);
        }
        Some("MultiPolygon") => {
            for p in array(g, "arcs")? {
                let rings = p.as_array().ok_or_else(|| Error::InvalidGeometry {
                    message: "MultiPolygon arcs must be nested arrays".to_string(),
                })?;
                out.push(polygon(arcs, rings)?);
            }
        }
        _ => {}
    }
    Ok(())
}

fn polygon(arcs: &[Vec<LonLat>], rings: &[Value]) -> Result<Polygon> {
    let mut out = Vec::with_capacity(rings.len());
    for r in rings {
        let indices = r.as_array().ok_or_else(|| Error::InvalidGeometry {
            message: "polygon ring must be an array of arc indices".to_string(),
        })?;
        let mut idx = Vec::with_capacity(indices.len());
        for v in indices {
            idx.push(v.as_i64().ok_or_else(|| Error::InvalidGeometry {
                message: format!("arc index must be an integer, got {v}"),
            })?);
        }
        out.push(ring(arcs, &idx)?);
    }
    Ok(Polygon { rings: out })
}

/// Stitches arcs into a closed ring. Consecutive arcs share their junction point, which is
/// emitted once.
fn ring(arcs: &[Vec<LonLat>], indices: &[i64]) -> Result<Vec<LonLat>> {
    let mut points: Vec<LonLat> = Vec::new();
    for &i in indices {
        let (arc_idx, reversed) = if i < 0 { (!i, true) } else { (i, false) };
        let arc = usize::try_from(arc_idx)
            .ok()
            .and_then(|a| arcs.get(a))
            .ok_or(Error::InvalidArc {
                index: i,
                available: arcs.len(),
            })?;
        points.pop();
        if reversed {
            points.extend(arc.iter().rev().copied());
        } else {
            points.extend(arc.iter().copied());
        }
    }
    if points.len() < 4 {
        if let Some(&first) = points.first() {
            points.push(first);
        }
    }
    Ok(points)
}
