//! Screen-space geometry. Rendered and simulated positions share one pixel space: the viewport
//! spans `[0, width] x [0, height]` with y growing downward.

/// Unit tag for viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSpace;

pub type Point = euclid::Point2D<f64, ScreenSpace>;
pub type Vector = euclid::Vector2D<f64, ScreenSpace>;
pub type Box2D = euclid::Box2D<f64, ScreenSpace>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn vector(x: f64, y: f64) -> Vector {
    euclid::vec2(x, y)
}

/// `[[x0, y0], [x1, y1]]` extent, as used when fitting a projection to a viewport.
pub fn extent(x0: f64, y0: f64, x1: f64, y1: f64) -> Box2D {
    Box2D::new(point(x0, y0), point(x1, y1))
}

/// Smallest box holding every point, or `None` for no points.
pub fn bounds(points: impl IntoIterator<Item = Point>) -> Option<Box2D> {
    let mut it = points.into_iter();
    let first = it.next()?;
    Some(it.fold(Box2D::new(first, first), |b, p| {
        Box2D::new(b.min.min(p), b.max.max(p))
    }))
}

#[cfg(test)]
mod tests {
    use super::{bounds, extent, point};

    #[test]
    fn bounds_cover_all_points() {
        let b = bounds([point(3.0, -1.0), point(-2.0, 4.0), point(0.0, 0.0)]).unwrap();
        assert_eq!(b, extent(-2.0, -1.0, 3.0, 4.0));
        assert!(bounds(std::iter::empty()).is_none());
    }
}
