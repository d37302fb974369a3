use std::path::PathBuf;

/// Failure of a single table operation. None of these leave the table modified.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// An insert was attempted with an id that is already stored.
    #[error("transaction with ID {0} already exists")]
    DuplicateKey(i64),
    /// A find or remove was attempted with an id that is not stored.
    #[error("transaction with ID {0} not found")]
    NotFound(i64),
    /// A linear probing insert went around the whole table without finding a free slot.
    #[error("table is full ({capacity} slots), the transaction was not inserted")]
    TableFull { capacity: usize },
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("table capacity must be greater than zero")]
    InvalidCapacity,
}

/// Rejection of a terminal command line before it reaches the table.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}. Type 'help' for available commands.")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("invalid ID '{0}', expected an integer")]
    InvalidId(String),
    #[error("invalid amount '{0}', expected a number")]
    InvalidAmount(String),
    #[error("invalid date '{0}', expected dd/mm/yyyy")]
    InvalidDate(String),
    #[error("description is {len} bytes long, the limit is {max}")]
    DescriptionTooLong { len: usize, max: usize },
}
