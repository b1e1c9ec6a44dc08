use std::path::PathBuf;
use std::{error, fmt, io};

use serde_json::Error as SerdeError;

/// Error type for building a world from a map description.
#[derive(Debug)]
pub enum WorldError {
    /// The map description has no layer tagged `"tilelayer"`.
    MissingLayer,
    /// The tile layer's cell count does not match `width * height`.
    InvalidLayerSize {
        /// `width * height` of the map
        expected: usize,
        /// number of cells actually present
        actual: usize,
    },
    /// The map or its parameters are unusable (zero tile size, non-JSON path, ...).
    InvalidMap(String),
    /// File I/O error, with the file that failed.
    Io {
        /// path being read
        path: PathBuf,
        /// underlying error
        source: io::Error,
    },
    /// JSON parse error, with the file that failed (empty for in-memory input).
    Json {
        /// path being parsed
        path: PathBuf,
        /// underlying error
        source: SerdeError,
    },
}

impl fmt::Display for WorldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldError::MissingLayer => write!(f, "Map description has no tile layer"),
            WorldError::InvalidLayerSize { expected, actual } => write!(
                f,
                "Invalid tile layer size: expected {} cells, found {}",
                expected, actual
            ),
            WorldError::InvalidMap(msg) => write!(f, "Invalid map: {}", msg),
            WorldError::Io { path, source } => {
                write!(f, "I/O error reading {}: {}", path.display(), source)
            }
            WorldError::Json { path, source } => {
                write!(f, "Failed to parse JSON {}: {}", path.display(), source)
            }
        }
    }
}

impl error::Error for WorldError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            WorldError::Io { source, .. } => Some(source),
            WorldError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<SerdeError> for WorldError {
    fn from(source: SerdeError) -> Self {
        WorldError::Json {
            path: PathBuf::new(),
            source,
        }
    }
}
