use std::collections::VecDeque;

use super::{Record, TransactionTable, bucket_index};
use crate::error::TableError;

/// Hash table using separate chaining.
///
/// Each bucket owns a chain of records. New records are pushed at the head,
/// so a chain reads most-recent-first.
#[derive(Debug, Clone)]
pub struct ChainedTable {
    chains: Vec<VecDeque<Record>>,
    len: usize,
}

impl ChainedTable {
    /// Creates a table with `capacity` empty chains.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> ChainedTable {
        assert!(capacity > 0, "table capacity must be greater than zero");
        ChainedTable { chains: vec![VecDeque::new(); capacity], len: 0 }
    }

    pub fn insert(&mut self, record: Record) -> Result<(), TableError> {
        let index = bucket_index(record.id, self.chains.len());
        let chain = &mut self.chains[index];

        if chain.iter().any(|entry| entry.id == record.id) {
            return Err(TableError::DuplicateKey(record.id));
        }

        chain.push_front(record);
        self.len += 1;
        Ok(())
    }

    pub fn find(&self, id: i64) -> Result<&Record, TableError> {
        let index = bucket_index(id, self.chains.len());
        self.chains[index]
            .iter()
            .find(|entry| entry.id == id)
            .ok_or(TableError::NotFound(id))
    }

    pub fn remove(&mut self, id: i64) -> Result<Record, TableError> {
        let index = bucket_index(id, self.chains.len());
        let chain = &mut self.chains[index];

        let position = chain
            .iter()
            .position(|entry| entry.id == id)
            .ok_or(TableError::NotFound(id))?;

        // Position 0 is the head; anything else relinks its predecessor.
        let removed = if position == 0 { chain.pop_front() } else { chain.remove(position) };
        let Some(removed) = removed else {
            unreachable!("position {position} was just found in this chain");
        };
        self.len -= 1;
        Ok(removed)
    }

    /// Records in bucket order, and within a bucket most-recent-first.
    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.chains.iter().flat_map(|chain| chain.iter())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.chains.len()
    }

    /// Length of the chain at `index`.
    pub fn chain_len(&self, index: usize) -> usize {
        self.chains.get(index).map_or(0, VecDeque::len)
    }
}

impl TransactionTable for ChainedTable {
    fn insert(&mut self, record: Record) -> Result<(), TableError> {
        ChainedTable::insert(self, record)
    }

    fn find(&self, id: i64) -> Result<&Record, TableError> {
        ChainedTable::find(self, id)
    }

    fn remove(&mut self, id: i64) -> Result<Record, TableError> {
        ChainedTable::remove(self, id)
    }

    fn list(&self) -> Box<dyn Iterator<Item = &Record> + '_> {
        Box::new(self.iter())
    }

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.chains.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(table: &ChainedTable) -> Vec<i64> {
        table.iter().map(|record| record.id).collect()
    }

    #[test]
    fn colliding_ids_list_most_recent_first() {
        let mut table = ChainedTable::new(10);
        table.insert(Record::new(3, 100.0, "01/01/2024", "salary")).unwrap();
        table.insert(Record::new(13, 50.0, "02/01/2024", "rent")).unwrap();

        assert_eq!(table.chain_len(3), 2);
        assert_eq!(ids(&table), vec![13, 3]);
        assert_eq!(table.find(13).unwrap().description, "rent");
        assert_eq!(table.find(3).unwrap().amount, 100.0);
    }

    #[test]
    fn list_walks_buckets_in_index_order() {
        let mut table = ChainedTable::new(5);
        for id in [9, 0, 4, 5, 2] {
            table.insert(Record::new(id, 1.0, "01/01/2024", "x")).unwrap();
        }
        // bucket 0: 5, 0; bucket 2: 2; bucket 4: 4, 9
        assert_eq!(ids(&table), vec![5, 0, 2, 4, 9]);
        // Listing has no side effects.
        assert_eq!(ids(&table), vec![5, 0, 2, 4, 9]);
    }

    #[test]
    fn duplicate_insert_keeps_original() {
        let mut table = ChainedTable::new(10);
        table.insert(Record::new(7, 10.0, "01/01/2024", "first")).unwrap();
        table.insert(Record::new(17, 20.0, "01/01/2024", "other")).unwrap();

        let err = table.insert(Record::new(7, 99.0, "09/09/2099", "second")).unwrap_err();
        assert_eq!(err, TableError::DuplicateKey(7));
        assert_eq!(table.len(), 2);
        assert_eq!(table.find(7).unwrap(), &Record::new(7, 10.0, "01/01/2024", "first"));
    }

    #[test]
    fn remove_head_interior_and_tail() {
        let mut table = ChainedTable::new(10);
        for id in [1, 11, 21, 31] {
            table.insert(Record::new(id, id as f64, "01/01/2024", "chain")).unwrap();
        }
        assert_eq!(ids(&table), vec![31, 21, 11, 1]);

        // head
        assert_eq!(table.remove(31).unwrap().id, 31);
        assert_eq!(ids(&table), vec![21, 11, 1]);
        // interior
        assert_eq!(table.remove(11).unwrap().id, 11);
        assert_eq!(ids(&table), vec![21, 1]);
        // tail
        assert_eq!(table.remove(1).unwrap().id, 1);
        assert_eq!(ids(&table), vec![21]);

        assert_eq!(table.find(31), Err(TableError::NotFound(31)));
        assert_eq!(table.find(11), Err(TableError::NotFound(11)));
        assert_eq!(table.find(1), Err(TableError::NotFound(1)));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn remove_missing_id_changes_nothing() {
        let mut table = ChainedTable::new(10);
        table.insert(Record::new(3, 1.0, "01/01/2024", "a")).unwrap();

        assert_eq!(table.remove(13), Err(TableError::NotFound(13)));
        assert_eq!(table.remove(4), Err(TableError::NotFound(4)));
        assert_eq!(ids(&table), vec![3]);
    }

    #[test]
    fn remove_then_find_keeps_collider() {
        let mut table = ChainedTable::new(10);
        table.insert(Record::new(3, 100.0, "01/01/2024", "salary")).unwrap();
        table.insert(Record::new(13, 50.0, "02/01/2024", "rent")).unwrap();

        table.remove(3).unwrap();
        assert_eq!(table.find(3), Err(TableError::NotFound(3)));
        assert_eq!(table.find(13).unwrap().description, "rent");
    }

    #[test]
    fn no_capacity_ceiling() {
        let mut table = ChainedTable::new(10);
        for id in 0..15 {
            table.insert(Record::new(id, 0.0, "01/01/2024", "bulk")).unwrap();
        }
        assert_eq!(table.len(), 15);
        assert_eq!(table.capacity(), 10);
        for id in 0..15 {
            assert_eq!(table.find(id).unwrap().id, id);
        }
    }

    #[test]
    fn negative_id_lands_in_normalized_bucket() {
        let mut table = ChainedTable::new(10);
        table.insert(Record::new(-3, 5.0, "01/01/2024", "refund")).unwrap();
        table.insert(Record::new(7, 6.0, "01/01/2024", "fee")).unwrap();

        assert_eq!(table.chain_len(7), 2);
        assert_eq!(ids(&table), vec![7, -3]);
        assert_eq!(table.remove(-3).unwrap().description, "refund");
        assert_eq!(table.find(7).unwrap().description, "fee");
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than zero")]
    fn zero_capacity_panics() {
        ChainedTable::new(0);
    }
}
