use std::{error, fmt};

/// Unified error type
///
/// Library errors from `gltf` and `serde_yaml` are fairly large so are boxed.
#[derive(Debug)]
pub enum RvError {
    UnsupportedFormat,
    NoBones,
    AlreadyLoaded,
    LoaderFailed,
    StdIoError(std::io::Error),
    SerdeYamlError(Box<serde_yaml::Error>),
    GltfError(Box<gltf::Error>),
}

impl error::Error for RvError {}

impl fmt::Display for RvError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::UnsupportedFormat => write!(f, "format is not supported"),
            Self::NoBones => write!(f, "no bones found in skeleton source"),
            Self::AlreadyLoaded => {
                write!(f, "skeleton already loaded for this session")
            }
            Self::LoaderFailed => {
                write!(f, "loader thread ended without a result")
            }
            Self::StdIoError(e) => write!(f, "std::io::Error: {}", e.kind()),
            Self::SerdeYamlError(e) => {
                write!(f, "serde_yaml::Error: {e}")
            }
            Self::GltfError(e) => write!(f, "gltf Error: {e}"),
        }
    }
}

impl From<std::io::Error> for RvError {
    fn from(e: std::io::Error) -> Self {
        Self::StdIoError(e)
    }
}

impl From<serde_yaml::Error> for RvError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::SerdeYamlError(Box::new(e))
    }
}

impl From<gltf::Error> for RvError {
    fn from(e: gltf::Error) -> Self {
        Self::GltfError(Box::new(e))
    }
}
