use serde::Deserialize;

use super::{ChainedTable, ProbingTable, Record, TransactionTable};
use crate::error::TableError;

/// Defines the collision resolution strategy for the hash table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionResolution {
    /// Linear probing: check next slot sequentially (i+1, i+2, ...)
    LinearProbing,
    /// Chaining: store colliding records in a chain per bucket
    #[default]
    Chaining,
}

impl CollisionResolution {
    pub fn name(self) -> &'static str {
        match self {
            CollisionResolution::LinearProbing => "linear probing",
            CollisionResolution::Chaining => "chaining",
        }
    }
}

/// Transaction table whose collision resolution is picked at runtime
#[derive(Debug, Clone)]
pub enum HashTable {
    Chaining(ChainedTable),
    LinearProbing(ProbingTable),
}

impl HashTable {
    /// Creates a new hash table with `capacity` buckets and the given collision resolution method
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize, collision_method: CollisionResolution) -> HashTable {
        match collision_method {
            CollisionResolution::Chaining => HashTable::Chaining(ChainedTable::new(capacity)),
            CollisionResolution::LinearProbing => HashTable::LinearProbing(ProbingTable::new(capacity)),
        }
    }

    /// Creates a hash table using linear probing for collision resolution
    pub fn new_linear_probing(capacity: usize) -> HashTable {
        Self::new(capacity, CollisionResolution::LinearProbing)
    }

    /// Creates a hash table using separate chaining for collision resolution
    pub fn new_chaining(capacity: usize) -> HashTable {
        Self::new(capacity, CollisionResolution::Chaining)
    }

    pub fn collision_resolution(&self) -> CollisionResolution {
        match self {
            HashTable::Chaining(_) => CollisionResolution::Chaining,
            HashTable::LinearProbing(_) => CollisionResolution::LinearProbing,
        }
    }

    /// Removed slots still awaiting reuse. Always zero for chaining.
    pub fn tombstones(&self) -> usize {
        match self {
            HashTable::Chaining(_) => 0,
            HashTable::LinearProbing(table) => table.tombstones(),
        }
    }

    /// Share of buckets holding a live record, or average chain length for chaining.
    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    fn inner(&self) -> &dyn TransactionTable {
        match self {
            HashTable::Chaining(table) => table,
            HashTable::LinearProbing(table) => table,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn TransactionTable {
        match self {
            HashTable::Chaining(table) => table,
            HashTable::LinearProbing(table) => table,
        }
    }
}

impl TransactionTable for HashTable {
    fn insert(&mut self, record: Record) -> Result<(), TableError> {
        self.inner_mut().insert(record)
    }

    fn find(&self, id: i64) -> Result<&Record, TableError> {
        self.inner().find(id)
    }

    fn remove(&mut self, id: i64) -> Result<Record, TableError> {
        self.inner_mut().remove(id)
    }

    fn list(&self) -> Box<dyn Iterator<Item = &Record> + '_> {
        match self {
            HashTable::Chaining(table) => Box::new(table.iter()),
            HashTable::LinearProbing(table) => Box::new(table.iter()),
        }
    }

    fn len(&self) -> usize {
        self.inner().len()
    }

    fn capacity(&self) -> usize {
        self.inner().capacity()
    }
}
