use thiserror::Error;

/// Errors raised while assembling the runtime configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("the remote embedding provider requires an API key; set OPENAI_API_KEY")]
    MissingApiKey,

    #[error("unknown embedding provider: '{0}' (expected 'local' or 'openai')")]
    UnknownProvider(String),
}

/// Errors from embedding-generation calls.
#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("embedding provider error: {message}")]
    Provider { message: String },

    #[error("embedding API rate limited")]
    RateLimited,

    #[error("embedding API authentication failed")]
    AuthenticationFailed,

    #[error("failed to load embedding model: {0}")]
    ModelLoad(String),
}

/// Errors from the vector record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error: {0}")]
    Connection(String),

    #[error("store query error: {0}")]
    Query(String),

    #[error("vector dimension mismatch: table expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("table '{0}' does not exist; run ingestion first")]
    TableMissing(String),
}

/// Errors from reading the product catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog record: {0}")]
    Malformed(String),
}
