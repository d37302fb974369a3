mod chained;
mod hash_table_impl;
mod probing;
mod record;

pub use chained::ChainedTable;
pub use hash_table_impl::{CollisionResolution, HashTable};
pub use probing::{ProbingTable, Slot};
pub use record::{DATE_LEN, MAX_DESCRIPTION_LEN, Record};

use crate::error::TableError;

/// Operations shared by every table variant.
pub trait TransactionTable {
    /// Stores `record` unless its id is already present.
    fn insert(&mut self, record: Record) -> Result<(), TableError>;

    fn find(&self, id: i64) -> Result<&Record, TableError>;

    /// Unlinks the record with `id` and hands it back to the caller.
    fn remove(&mut self, id: i64) -> Result<Record, TableError>;

    /// Every stored record, in the variant's layout order.
    fn list(&self) -> Box<dyn Iterator<Item = &Record> + '_>;

    fn len(&self) -> usize;

    /// Number of buckets, fixed at construction.
    fn capacity(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Bucket for `id` in a table of `capacity` buckets.
///
/// Uses floor modulo so negative ids also land in `0..capacity`,
/// e.g. `-3` maps to bucket 7 when `capacity` is 10.
pub fn bucket_index(id: i64, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    id.rem_euclid(capacity as i64) as usize
}
