use thiserror::Error;

/// Failures of the process plumbing around the catalog: terminal I/O,
/// HTTP client construction and subscriber installation.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not build the catalog http client")]
    ClientBuild(#[source] reqwest::Error),
    #[error("catalog base url `{url}` cannot carry a path")]
    UnusableBaseUrl { url: String },
    #[error("could not install the log subscriber: {0}")]
    Subscriber(String),
}
