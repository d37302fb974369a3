use crate::error::CommandError;
use crate::hash_table::{DATE_LEN, MAX_DESCRIPTION_LEN, Record};

pub const INSERT_USAGE: &str = "insert <id> <amount> <dd/mm/yyyy> <description>";
pub const FIND_USAGE: &str = "find <id>";
pub const REMOVE_USAGE: &str = "remove <id>";

/// One parsed terminal line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Insert(Record),
    Find(i64),
    Remove(i64),
    List,
    Stats,
    Help,
    Exit,
}

impl Command {
    /// Parses a line. The numbers `1` to `5` select the same entries as the menu.
    pub fn parse(input: &str) -> Result<Command, CommandError> {
        let Some((name, rest)) = next_field(input) else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        match name.to_lowercase().as_str() {
            "insert" | "1" => parse_insert(rest).map(Command::Insert),
            "find" | "get" | "2" => parse_single_id(&args, FIND_USAGE).map(Command::Find),
            "remove" | "delete" | "3" => parse_single_id(&args, REMOVE_USAGE).map(Command::Remove),
            "list" | "4" => Ok(Command::List),
            "exit" | "quit" | "5" => Ok(Command::Exit),
            "stats" => Ok(Command::Stats),
            "help" => Ok(Command::Help),
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}

/// Splits the first whitespace-delimited field off `input`, returning it and the remainder.
fn next_field(input: &str) -> Option<(&str, &str)> {
    let input = input.trim_start();
    if input.is_empty() {
        return None;
    }
    Some(input.split_once(char::is_whitespace).unwrap_or((input, "")))
}

/// `rest` is everything after the command name. The description is the rest of the line as typed.
fn parse_insert(rest: &str) -> Result<Record, CommandError> {
    let usage = || CommandError::Usage(INSERT_USAGE);
    let (id, rest) = next_field(rest).ok_or_else(usage)?;
    let (amount, rest) = next_field(rest).ok_or_else(usage)?;
    let (date, rest) = next_field(rest).ok_or_else(usage)?;
    let description = rest.trim();
    if description.is_empty() {
        return Err(usage());
    }

    let id = parse_id(id)?;
    let amount: f64 = amount.parse().map_err(|_| CommandError::InvalidAmount(amount.to_string()))?;
    let date = parse_date(date)?;
    if description.len() > MAX_DESCRIPTION_LEN {
        return Err(CommandError::DescriptionTooLong { len: description.len(), max: MAX_DESCRIPTION_LEN });
    }

    Ok(Record::new(id, amount, date, description))
}

fn parse_single_id(args: &[&str], usage: &'static str) -> Result<i64, CommandError> {
    match args {
        [id] => parse_id(id),
        _ => Err(CommandError::Usage(usage)),
    }
}

fn parse_id(raw: &str) -> Result<i64, CommandError> {
    raw.parse().map_err(|_| CommandError::InvalidId(raw.to_string()))
}

/// Checks the `dd/mm/yyyy` shape only; the calendar is not validated.
fn parse_date(raw: &str) -> Result<&str, CommandError> {
    let shaped = raw.len() == DATE_LEN
        && raw.bytes().enumerate().all(|(i, b)| match i {
            2 | 5 => b == b'/',
            _ => b.is_ascii_digit(),
        });

    if shaped { Ok(raw) } else { Err(CommandError::InvalidDate(raw.to_string())) }
}
