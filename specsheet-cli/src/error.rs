//! CLI error type

use specsheet_lib::error::{ConfigError, DocumentError, TableError};

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("config: {0}")]
    Config(#[from] ConfigError),
}
