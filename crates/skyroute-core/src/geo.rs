//! Geographic polygon collections (the decoded boundary dataset).

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LonLat {
    pub longitude: f64,
    pub latitude: f64,
}

impl LonLat {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// A polygon: the first ring is the exterior, the rest are holes. Rings are closed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub rings: Vec<Vec<LonLat>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Feature {
    pub id: Option<String>,
    pub polygons: Vec<Polygon>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeoCollection {
    pub features: Vec<Feature>,
}

impl GeoCollection {
    pub fn is_empty(&self) -> bool {
        self.points().next().is_none()
    }

    pub fn polygons(&self) -> impl Iterator<Item = &Polygon> {
        self.features.iter().flat_map(|f| f.polygons.iter())
    }

    pub fn rings(&self) -> impl Iterator<Item = &[LonLat]> {
        self.polygons()
            .flat_map(|p| p.rings.iter().map(Vec::as_slice))
    }

    pub fn points(&self) -> impl Iterator<Item = LonLat> + '_ {
        self.rings().flat_map(|r| r.iter().copied())
    }
}
