#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("link {link} references a missing node: {endpoint}")]
    MissingEndpoint { link: usize, endpoint: String },
    #[error("graph contains a duplicate node id: {id}")]
    DuplicateNode { id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
