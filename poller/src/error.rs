use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Unable to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unexpected sensor output '{0}'")]
    Parse(String),
    #[error("CRC check failed: '{0}'")]
    Crc(String),
    #[error("No one-wire thermometer below {0}")]
    NoDevice(PathBuf),
    #[error("Smart plug unreachable: {0}")]
    Connection(#[from] std::io::Error),
    #[error("Smart plug protocol error: {0}")]
    Protocol(String),
}

impl ProbeError {
    pub fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> ProbeError {
        let path = path.into();
        move |source| ProbeError::Io { path, source }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("API answered {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}
