use std::fmt;

/// Length of a date in `dd/mm/yyyy` form.
pub const DATE_LEN: usize = 10;

/// Longest description, in bytes, the terminal accepts.
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// A single transaction. The id is the key and is always supplied by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub id: i64,
    pub amount: f64,
    pub date: String,
    pub description: String,
}

impl Record {
    pub fn new(id: i64, amount: f64, date: impl Into<String>, description: impl Into<String>) -> Record {
        Record { id, amount, date: date.into(), description: description.into() }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {} | Amount: {:.2} | Date: {} | Description: {}",
            self.id, self.amount, self.date, self.description
        )
    }
}
