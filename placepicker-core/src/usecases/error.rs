use crate::repositories;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to encode the selected places")]
    Encode(#[source] serde_json::Error),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}
