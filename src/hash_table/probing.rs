use super::{Record, TransactionTable, bucket_index};
use crate::error::TableError;

/// State of one open addressing slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Slot {
    /// Never held a record. Probing stops here.
    #[default]
    Empty,
    Occupied(Record),
    /// Held a record that was removed. Lookups probe past it; inserts may reuse it.
    Tombstone,
}

impl Slot {
    pub fn record(&self) -> Option<&Record> {
        match self {
            Slot::Occupied(record) => Some(record),
            Slot::Empty | Slot::Tombstone => None,
        }
    }
}

/// Hash table using open addressing with linear probing.
///
/// Every slot holds at most one record and a stored record never moves.
/// Removal leaves a [`Slot::Tombstone`] so records that probed past the
/// removed one stay reachable.
#[derive(Debug, Clone)]
pub struct ProbingTable {
    slots: Vec<Slot>,
    len: usize,
    tombstones: usize,
}

impl ProbingTable {
    /// Creates a table with `capacity` empty slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> ProbingTable {
        assert!(capacity > 0, "table capacity must be greater than zero");
        ProbingTable { slots: vec![Slot::Empty; capacity], len: 0, tombstones: 0 }
    }

    /// Index of the slot holding `id`, if any.
    fn position(&self, id: i64) -> Option<usize> {
        for index in probe_sequence(id, self.slots.len()) {
            match &self.slots[index] {
                Slot::Empty => return None,
                Slot::Occupied(record) if record.id == id => return Some(index),
                Slot::Occupied(_) | Slot::Tombstone => {}
            }
        }
        None
    }

    pub fn insert(&mut self, record: Record) -> Result<(), TableError> {
        let mut target = None;

        for index in probe_sequence(record.id, self.slots.len()) {
            match &self.slots[index] {
                Slot::Empty => {
                    target.get_or_insert(index);
                    break;
                }
                Slot::Tombstone => {
                    target.get_or_insert(index);
                }
                Slot::Occupied(existing) if existing.id == record.id => {
                    return Err(TableError::DuplicateKey(record.id));
                }
                Slot::Occupied(_) => {}
            }
        }

        let index = target.ok_or(TableError::TableFull { capacity: self.slots.len() })?;
        if matches!(self.slots[index], Slot::Tombstone) {
            self.tombstones -= 1;
        }
        self.slots[index] = Slot::Occupied(record);
        self.len += 1;
        Ok(())
    }

    pub fn find(&self, id: i64) -> Result<&Record, TableError> {
        self.position(id)
            .and_then(|index| self.slots[index].record())
            .ok_or(TableError::NotFound(id))
    }

    pub fn remove(&mut self, id: i64) -> Result<Record, TableError> {
        let index = self.position(id).ok_or(TableError::NotFound(id))?;
        let Slot::Occupied(record) = std::mem::replace(&mut self.slots[index], Slot::Tombstone) else {
            unreachable!("position() only yields occupied slots");
        };
        self.len -= 1;
        self.tombstones += 1;
        Ok(record)
    }

    /// Occupied slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.slots.iter().filter_map(Slot::record)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    pub fn slot(&self, index: usize) -> Option<&Slot> {
        self.slots.get(index)
    }
}

/// Slot indices visited for `id`: `hash(id)`, `hash(id) + 1`, ... wrapping once around.
fn probe_sequence(id: i64, capacity: usize) -> impl Iterator<Item = usize> {
    let start = bucket_index(id, capacity);
    (0..capacity).map(move |attempt| (start + attempt) % capacity)
}

impl TransactionTable for ProbingTable {
    fn insert(&mut self, record: Record) -> Result<(), TableError> {
        ProbingTable::insert(self, record)
    }

    fn find(&self, id: i64) -> Result<&Record, TableError> {
        ProbingTable::find(self, id)
    }

    fn remove(&mut self, id: i64) -> Result<Record, TableError> {
        ProbingTable::remove(self, id)
    }

    fn list(&self) -> Box<dyn Iterator<Item = &Record> + '_> {
        Box::new(self.iter())
    }

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }
}
