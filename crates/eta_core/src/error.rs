use std::path::PathBuf;

/// Errors raised by the ETA core.
#[derive(thiserror::Error, Debug)]
pub enum EtaError {
    #[error("failed to load reference table from {path:?}: {message}")]
    DataLoad { path: Option<PathBuf>, message: String },
    #[error("no integer minutes value in ETA text {0:?}")]
    EtaParse(String),
    #[error("minutes value in ETA text {0:?} is out of range")]
    EtaOutOfRange(String),
    #[error("invalid day label {0:?}, expected one of Mon, Tue, Wed, Thu, Fri, Sat, Sun")]
    InvalidDay(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("route lookup failed: {0}")]
    RouteLookup(#[from] RouteLookupError),
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl EtaError {
    pub(crate) fn data_load(path: Option<&std::path::Path>, message: impl Into<String>) -> Self {
        EtaError::DataLoad {
            path: path.map(|p| p.to_path_buf()),
            message: message.into(),
        }
    }
}

/// Errors encountered while fetching a raw route from a mapping provider.
#[derive(thiserror::Error, Debug)]
pub enum RouteLookupError {
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("request timed out")]
    Timeout,
    #[error("provider returned status {0}")]
    Api(String),
    #[error("provider response lacks {0}")]
    MissingElement(&'static str),
    #[error("no route found between the given locations")]
    NotFound,
}

#[cfg(feature = "directions")]
impl From<reqwest::Error> for RouteLookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RouteLookupError::Timeout
        } else {
            RouteLookupError::Http(err.to_string())
        }
    }
}
