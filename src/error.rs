use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlmanacError {
    #[error("Parse error: {message}")]
    Parse { message: String, line: Option<usize> },
    #[error("Malformed mapping: {0}")]
    MalformedMapping(String),
    #[error("Internal invariant violated: {0}")]
    Invariant(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AlmanacError>;

// Helper conversions
impl From<serde_yaml::Error> for AlmanacError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<walkdir::Error> for AlmanacError {
    fn from(e: walkdir::Error) -> Self {
        Self::Io(e.into())
    }
}
