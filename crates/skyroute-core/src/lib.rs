#![forbid(unsafe_code)]

//! Data model for skyroute (headless).
//!
//! - the airport network dataset (`nodes` + `links`), resolved and validated at load
//! - TopoJSON world boundaries decoded to polygon collections
//! - configuration with built-in defaults and dotted-path overrides
//!
//! Loading is all-or-nothing: either both datasets are available or nothing starts.

pub mod config;
pub mod error;
pub mod geo;
pub mod geom;
pub mod load;
pub mod network;
pub mod topology;

pub use config::{Config, SceneOptions};
pub use error::{DataError, DatasetKind, Error, Result};
pub use geo::{Feature, GeoCollection, LonLat, Polygon};
pub use load::Datasets;
pub use network::{Airport, Endpoint, Network, Route};
pub use topology::Topology;
