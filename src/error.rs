use std::convert::From;
use thiserror;

#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Generic(String),
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),
    #[error("Number of (stacked) arrays is not supported: {0}")]
    InvalidDivisionCount(usize),
    #[error("xaxis_location should be either above, below, or both, not {0}")]
    InvalidAxisLocation(String),
    #[error("cbar_place should be one of left, right, above, below or center, not {0}")]
    InvalidColorbarPlace(String),
    #[error("Font style not supported: {0}")]
    InvalidFontStyle(String),
    #[error("{0}")]
    Validation(String),
    #[error("Colormap not found: {0}")]
    UnknownColormap(String),
    #[error("num_colors must be at least 1")]
    InvalidColorCount,
    #[error("Colormap has {available} colors but {requested} were requested")]
    InsufficientColors { available: usize, requested: usize },
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("Image suffix not supported: {0}")]
    InvalidImageSuffix(String),
    #[error("Unable to open file for reading: {0}")]
    ReaderError(String),
    #[error("Unable to process JSON: {0}")]
    SerdeError(String),
    #[error("Unable to render figure: {0}")]
    RenderError(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::FileNotFound(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::ReaderError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SerdeError(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::SerdeError(err.to_string())
    }
}
