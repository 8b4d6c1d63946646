#![forbid(unsafe_code)]

//! Projection and headless output for skyroute.

pub mod fmt;
pub mod path;
pub mod projection;
pub mod sink;
pub mod svg;

pub use path::GeoPath;
pub use projection::{Mercator, Projection};
pub use sink::{Frame, RenderSink, Scene, TooltipCommand};
pub use svg::SvgScene;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("cannot fit a projection to an empty geometry collection")]
    EmptyGeometry,
    #[error("cannot fit a projection to a degenerate extent {width}x{height}")]
    DegenerateExtent { width: f64, height: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
