use std::path::PathBuf;

use hrdesk_recon::ReconError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The roster or import file cannot be read or written (permissions, disk, missing).
    #[error("store unavailable at {}: {source}", .path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("unsupported import format '{0}' (expected csv, tsv, txt, xlsx, xlsm, xls, xlsb or ods)")]
    UnsupportedFormat(String),
    #[error("cannot read workbook {}: {message}", .path.display())]
    Workbook { path: PathBuf, message: String },
    #[error(transparent)]
    Recon(#[from] ReconError),
}

impl StoreError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StoreUnavailable {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            source,
        }
    }
}
