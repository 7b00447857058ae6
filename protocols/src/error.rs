use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unterminated quote")]
    UnterminatedQuote,

    #[error("{0}")]
    Shape(String),
}

impl DocumentError {
    /// One-based line of the offending input, when the decoder knows it.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Json(err) if err.line() > 0 => Some(err.line()),
            Self::Yaml(err) => err.location().map(|loc| loc.line()),
            _ => None,
        }
    }
}
