use crate::error::{DatasetKind, Error, Result};
use crate::geo::GeoCollection;
use crate::network::Network;
use crate::topology::Topology;
use std::path::Path;

/// Both datasets, loaded together. Either both are available or neither is.
#[derive(Debug, Clone)]
pub struct Datasets {
    pub network: Network,
    pub boundaries: GeoCollection,
}

impl Datasets {
    /// Parses both documents. `object` names the topology object holding the boundaries.
    pub fn from_json(network: &str, topology: &str, object: &str) -> Result<Self> {
        let network = Network::from_json_str(network)?;
        let boundaries = Topology::from_json_str(topology)?.feature(object)?;
        Ok(Self {
            network,
            boundaries,
        })
    }

    /// Reads both files before parsing either, so an I/O failure on one leaves nothing half
    /// loaded.
    pub fn load(
        network_path: impl AsRef<Path>,
        topology_path: impl AsRef<Path>,
        object: &str,
    ) -> Result<Self> {
        let network_path = network_path.as_ref();
        let topology_path = topology_path.as_ref();
        let network_bytes = std::fs::read(network_path)
            .map_err(|e| Error::unavailable(DatasetKind::Network, e))?;
        let topology_bytes = std::fs::read(topology_path)
            .map_err(|e| Error::unavailable(DatasetKind::Boundaries, e))?;

        let network = Network::from_json_slice(&network_bytes)?;
        let boundaries = Topology::from_json_slice(&topology_bytes)?.feature(object)?;
        tracing::debug!(
            network = %network_path.display(),
            topology = %topology_path.display(),
            airports = network.len(),
            "datasets loaded"
        );
        Ok(Self {
            network,
            boundaries,
        })
    }
}
