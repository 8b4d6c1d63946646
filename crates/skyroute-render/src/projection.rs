//! Geographic to planar projection.

use crate::{Error, Result};
use skyroute_core::geom::{Box2D, Point, bounds, extent, point};
use skyroute_core::{GeoCollection, LonLat};
use std::f64::consts::{FRAC_PI_4, PI};

/// Latitude bound of the square Mercator map, in degrees.
pub const MERCATOR_MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// A pure, deterministic mapping from longitude/latitude (degrees) to planar coordinates.
pub trait Projection {
    fn project(&self, longitude: f64, latitude: f64) -> Point;

    fn project_lonlat(&self, p: LonLat) -> Point {
        self.project(p.longitude, p.latitude)
    }
}

/// Spherical Mercator. `scale` is pixels per radian; `translate` is where (0°, 0°) lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mercator {
    pub scale: f64,
    pub translate: Point,
}

impl Default for Mercator {
    fn default() -> Self {
        Self {
            scale: 961.0 / (2.0 * PI),
            translate: point(480.0, 250.0),
        }
    }
}

impl Mercator {
    pub fn new(scale: f64, translate: Point) -> Self {
        Self { scale, translate }
    }

    /// Unit-scale projection without translation, with y growing northward.
    fn raw(longitude: f64, latitude: f64) -> (f64, f64) {
        let lambda = longitude.to_radians();
        let phi = latitude
            .clamp(-MERCATOR_MAX_LATITUDE, MERCATOR_MAX_LATITUDE)
            .to_radians();
        (lambda, (FRAC_PI_4 + phi / 2.0).tan().ln())
    }

    /// Chooses scale and translate so that `collection` fits `extent`, centered on the axis
    /// with slack.
    pub fn fit_extent(extent: Box2D, collection: &GeoCollection) -> Result<Self> {
        // Bounds at unit scale; the fitted projection is a uniform scale plus translate of it.
        let unit = bounds(collection.points().map(|p| {
            let (x, y) = Self::raw(p.longitude, p.latitude);
            point(x, -y)
        }))
        .ok_or(Error::EmptyGeometry)?;
        let (x0, y0, x1, y1) = (unit.min.x, unit.min.y, unit.max.x, unit.max.y);

        let w = extent.max.x - extent.min.x;
        let h = extent.max.y - extent.min.y;
        let (bw, bh) = (x1 - x0, y1 - y0);
        let k = match (bw > 0.0, bh > 0.0) {
            (true, true) => (w / bw).min(h / bh),
            (true, false) => w / bw,
            (false, true) => h / bh,
            (false, false) => return Err(Error::DegenerateExtent { width: bw, height: bh }),
        };
        if !k.is_finite() || k <= 0.0 {
            return Err(Error::DegenerateExtent { width: w, height: h });
        }

        let tx = extent.min.x + (w - k * (x1 + x0)) / 2.0;
        let ty = extent.min.y + (h - k * (y1 + y0)) / 2.0;
        let fitted = Self::new(k, point(tx, ty));
        tracing::debug!(scale = k, tx, ty, "mercator fitted");
        Ok(fitted)
    }

    pub fn fit_size(width: f64, height: f64, collection: &GeoCollection) -> Result<Self> {
        Self::fit_extent(extent(0.0, 0.0, width, height), collection)
    }
}

impl Projection for Mercator {
    fn project(&self, longitude: f64, latitude: f64) -> Point {
        let (x, y) = Self::raw(longitude, latitude);
        point(
            self.translate.x + self.scale * x,
            self.translate.y - self.scale * y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{MERCATOR_MAX_LATITUDE, Mercator, Projection};
    use skyroute_core::geom::point;

    #[test]
    fn origin_lands_on_translate() {
        let m = Mercator::new(100.0, point(320.0, 240.0));
        assert_eq!(m.project(0.0, 0.0), point(320.0, 240.0));
    }

    #[test]
    fn north_is_up() {
        let m = Mercator::new(100.0, point(0.0, 0.0));
        assert!(m.project(0.0, 45.0).y < 0.0);
        assert!(m.project(0.0, -45.0).y > 0.0);
        assert!((m.project(90.0, 0.0).x - 100.0 * std::f64::consts::FRAC_PI_2).abs() < 1e-9);
    }

    #[test]
    fn poles_are_clamped() {
        let m = Mercator::new(1.0, point(0.0, 0.0));
        let pole = m.project(0.0, 90.0);
        assert!(pole.y.is_finite());
        assert_eq!(pole, m.project(0.0, MERCATOR_MAX_LATITUDE));
        // The square map: the clamped latitude spans the same height as 360° of longitude.
        assert!((pole.y + std::f64::consts::PI).abs() < 1e-9);
    }
}
