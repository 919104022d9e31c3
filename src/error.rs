use std::path::PathBuf;

/// Why a scan produced no tree.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The package could not be opened or its directory could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// A newer scan started before this one finished; its result was discarded.
    #[error("scan {generation} was superseded by a newer scan")]
    Superseded { generation: u64 },
}

impl ScanError {
    pub(crate) fn read(path: impl Into<PathBuf>, source: anyhow::Error) -> Self {
        ScanError::Read {
            path: path.into(),
            source: source.into(),
        }
    }
}

pub type ScanResult<T> = Result<T, ScanError>;
