use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("fetch failed: {0}")]
    FetchFailed(String),

    #[error("malformed record: {0}")]
    MalformedRecord(String),
}

pub type Result<T> = std::result::Result<T, Error>;
