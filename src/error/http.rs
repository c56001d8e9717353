use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid host URL '{url}': {source}")]
    InvalidHost {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Host URL '{url}' must use http or https.")]
    UnsupportedScheme { url: String },
    #[error("Host URL '{url}' cannot be used as a base for request paths.")]
    HostNotABase { url: String },
    #[error("Failed to join path '{path}' onto host: {source}")]
    JoinPath {
        path: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
}
