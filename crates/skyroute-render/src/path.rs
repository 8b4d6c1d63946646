use crate::fmt::fmt_path_into;
use crate::projection::Projection;
use skyroute_core::{GeoCollection, LonLat};

/// Turns boundary polygons into SVG path data through a projection.
#[derive(Debug, Clone, Copy)]
pub struct GeoPath<'a, P: Projection> {
    projection: &'a P,
}

impl<'a, P: Projection> GeoPath<'a, P> {
    pub fn new(projection: &'a P) -> Self {
        Self { projection }
    }

    /// One `M…L…Z` subpath per ring. The closing point of a ring is implied by `Z`.
    pub fn path_data(&self, collection: &GeoCollection) -> String {
        let mut out = String::new();
        for ring in collection.rings() {
            self.push_ring(&mut out, ring);
        }
        out
    }

    fn push_ring(&self, out: &mut String, ring: &[LonLat]) {
        let open = match ring {
            [first, rest @ .., last] if first == last && !rest.is_empty() => &ring[..ring.len() - 1],
            _ => ring,
        };
        if open.is_empty() {
            return;
        }
        for (i, &p) in open.iter().enumerate() {
            let xy = self.projection.project_lonlat(p);
            out.push(if i == 0 { 'M' } else { 'L' });
            fmt_path_into(out, xy.x);
            out.push(',');
            fmt_path_into(out, xy.y);
        }
        out.push('Z');
    }
}
