// Error type shared by handlers, engines and uploads

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Bad configuration value, raised where the value is assigned
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("taxonomy store error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("graph query failed: {0}")]
    Sparql(#[from] oxigraph::sparql::EvaluationError),

    #[error("graph storage error: {0}")]
    Storage(#[from] oxigraph::store::StorageError),

    #[error("SPARQL endpoint request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("SPARQL endpoint answered {status}: {body}")]
    Endpoint { status: u16, body: String },

    #[error("CSV input error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON input error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
