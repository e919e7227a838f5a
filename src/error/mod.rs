use crate::editor::MaskError;
use crate::persist::PersistError;
use crate::surface::{ExportError, SurfaceError};
use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Mask(#[from] MaskError),
    #[error(transparent)]
    Persist(#[from] PersistError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error("invalid surface size `{0}`")]
    InvalidSize(String),
    #[error("failed to access {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
}
