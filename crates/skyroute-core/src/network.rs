//! Airport network dataset: `{ "nodes": [...], "links": [...] }`.
//!
//! A link endpoint written as a JSON number is an index into `nodes`; a string endpoint is
//! matched against node ids. Nodes without an `id` are identified by their index.

use crate::error::{DatasetKind, Error, Result};
use rustc_hash::FxHashMap;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq)]
pub struct Airport {
    pub id: String,
    pub name: String,
    pub passengers: f64,
    pub longitude: f64,
    pub latitude: f64,
}

/// A route between two airports, by index into [`Network::airports`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub source: usize,
    pub target: usize,
}

/// Validated, immutable airport network.
#[derive(Debug, Clone)]
pub struct Network {
    airports: Vec<Airport>,
    routes: Vec<Route>,
    id_to_idx: FxHashMap<String, usize>,
}

#[derive(Debug, Deserialize)]
struct RawNetwork {
    nodes: Vec<RawAirport>,
    #[serde(default)]
    links: Vec<RawRoute>,
}

#[derive(Debug, Deserialize)]
struct RawAirport {
    #[serde(default)]
    id: Option<RawKey>,
    name: String,
    #[serde(default)]
    passengers: f64,
    longitude: f64,
    latitude: f64,
}

#[derive(Debug, Deserialize)]
struct RawRoute {
    source: RawKey,
    target: RawKey,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawKey {
    Index(u64),
    Name(String),
}

/// A route endpoint before resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Index(usize),
    Id(String),
}

impl Network {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let raw: RawNetwork = serde_json::from_str(text)
            .map_err(|e| Error::unavailable(DatasetKind::Network, e))?;
        Self::from_raw(raw)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let raw: RawNetwork = serde_json::from_slice(bytes)
            .map_err(|e| Error::unavailable(DatasetKind::Network, e))?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawNetwork) -> Result<Self> {
        let airports = raw
            .nodes
            .into_iter()
            .enumerate()
            .map(|(idx, n)| Airport {
                id: match n.id {
                    Some(RawKey::Index(i)) => i.to_string(),
                    Some(RawKey::Name(s)) => s,
                    None => idx.to_string(),
                },
                name: n.name,
                passengers: n.passengers,
                longitude: n.longitude,
                latitude: n.latitude,
            })
            .collect();
        let routes = raw
            .links
            .into_iter()
            .map(|l| (l.source.into_endpoint(), l.target.into_endpoint()))
            .collect::<Vec<(Endpoint, Endpoint)>>();
        Self::new(airports, routes)
    }

    /// Builds a network, resolving every route endpoint. Dangling endpoints and duplicate ids
    /// are rejected.
    pub fn new(airports: Vec<Airport>, routes: Vec<(Endpoint, Endpoint)>) -> Result<Self> {
        let mut id_to_idx: FxHashMap<String, usize> = FxHashMap::default();
        id_to_idx.reserve(airports.len());
        for (idx, a) in airports.iter().enumerate() {
            if id_to_idx.insert(a.id.clone(), idx).is_some() {
                return Err(Error::DuplicateAirport { id: a.id.clone() });
            }
        }

        let resolve = |route: usize, e: &Endpoint| -> Result<usize> {
            let found = match e {
                Endpoint::Index(i) => (*i < airports.len()).then_some(*i),
                Endpoint::Id(id) => id_to_idx.get(id.as_str()).copied(),
            };
            found.ok_or_else(|| Error::UnknownEndpoint {
                route,
                endpoint: match e {
                    Endpoint::Index(i) => i.to_string(),
                    Endpoint::Id(id) => id.clone(),
                },
            })
        };
        let mut resolved = Vec::with_capacity(routes.len());
        for (route, (s, t)) in routes.iter().enumerate() {
            resolved.push(Route {
                source: resolve(route, s)?,
                target: resolve(route, t)?,
            });
        }

        tracing::debug!(
            airports = airports.len(),
            routes = resolved.len(),
            "airport network loaded"
        );
        Ok(Self {
            airports,
            routes: resolved,
            id_to_idx,
        })
    }

    pub fn airports(&self) -> &[Airport] {
        &self.airports
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn airport(&self, index: usize) -> Option<&Airport> {
        self.airports.get(index)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.id_to_idx.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.airports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.airports.is_empty()
    }
}

impl RawKey {
    fn into_endpoint(self) -> Endpoint {
        match self {
            RawKey::Index(i) => Endpoint::Index(usize::try_from(i).unwrap_or(usize::MAX)),
            RawKey::Name(s) => Endpoint::Id(s),
        }
    }
}

impl From<usize> for Endpoint {
    fn from(i: usize) -> Self {
        Endpoint::Index(i)
    }
}

impl From<&str> for Endpoint {
    fn from(id: &str) -> Self {
        Endpoint::Id(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{Endpoint, RawKey};

    #[test]
    fn raw_keys_accept_numbers_and_strings() {
        let keys: Vec<RawKey> = serde_json::from_str(r#"[3, "JFK"]"#).unwrap();
        let endpoints: Vec<Endpoint> = keys.into_iter().map(RawKey::into_endpoint).collect();
        assert_eq!(
            endpoints,
            vec![Endpoint::Index(3), Endpoint::Id("JFK".to_string())]
        );
    }
}
