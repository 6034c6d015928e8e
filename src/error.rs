use std::path::PathBuf;
use thiserror::Error as ThisError;

/// Failures that abort the whole run.
///
/// Statement-level failures are not represented here; they are logged and
/// recorded in the run report while the remaining statements keep going.
#[derive(Debug, ThisError)]
pub enum ApplyError {
    #[error("failed to connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to prepare database '{database}': {source}")]
    Prepare {
        database: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("failed to read schema file {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("commit failed: {0}")]
    Commit(#[source] sqlx::Error),
}
