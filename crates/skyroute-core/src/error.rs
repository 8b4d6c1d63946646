pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Network,
    Boundaries,
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetKind::Network => f.write_str("network"),
            DatasetKind::Boundaries => f.write_str("boundaries"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{dataset} dataset unavailable: {source}")]
    DataUnavailable {
        dataset: DatasetKind,
        #[source]
        source: DataError,
    },

    #[error("route {route} references unknown airport `{endpoint}`")]
    UnknownEndpoint { route: usize, endpoint: String },

    #[error("duplicate airport id `{id}`")]
    DuplicateAirport { id: String },

    #[error("topology has no object named `{name}`")]
    MissingObject { name: String },

    #[error("topology references arc {index}, but only {available} arcs exist")]
    InvalidArc { index: i64, available: usize },

    #[error("invalid topology geometry: {message}")]
    InvalidGeometry { message: String },

    #[error("invalid config: {message}")]
    InvalidConfig { message: String },
}

impl Error {
    pub(crate) fn unavailable(dataset: DatasetKind, source: impl Into<DataError>) -> Self {
        Error::DataUnavailable {
            dataset,
            source: source.into(),
        }
    }
}
