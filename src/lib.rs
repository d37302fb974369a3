pub mod config;
pub mod error;
pub mod event_loop;
pub mod hash_table;
pub mod logger;

pub use config::Config;
pub use error::{CommandError, ConfigError, TableError};
pub use hash_table::{
    ChainedTable, CollisionResolution, HashTable, ProbingTable, Record, Slot, TransactionTable, bucket_index,
};
