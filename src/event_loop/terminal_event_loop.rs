use std::io::{self, BufRead, BufReader, Write};
use std::os::unix::io::AsRawFd;
use std::time::Instant;

use log::{debug, error, info, warn};
use mio::unix::SourceFd;
use mio::{Events, Interest, Poll, Token};

use crate::event_loop::EventLoop;
use crate::event_loop::command::{Command, FIND_USAGE, INSERT_USAGE, REMOVE_USAGE};
use crate::hash_table::{CollisionResolution, HashTable, Record, TransactionTable};

pub struct TerminalEventLoop;

const STDIN_TOKEN: Token = Token(0);

impl EventLoop for TerminalEventLoop {
    fn run(&mut self, hash_table: &mut HashTable) -> io::Result<()> {
        let mut poll = Poll::new()?;
        let mut events = Events::with_capacity(128);

        let fd = io::stdin().as_raw_fd();
        let mut stdin_fd = SourceFd(&fd);
        if let Err(e) = poll.registry().register(&mut stdin_fd, STDIN_TOKEN, Interest::READABLE) {
            // epoll refuses regular files, e.g. `txn_hash < commands.txt`.
            if e.kind() == io::ErrorKind::PermissionDenied {
                info!("stdin cannot be polled ({}), reading it line by line", e);
                return serve_lines(&mut io::stdin().lock(), hash_table, &mut io::stdout());
            }
            error!("Failed to register stdin: {}", e);
            return Err(e);
        }

        let mut reader = BufReader::new(io::stdin());
        let mut out = io::stdout();
        let mut buffer = String::new();

        prompt(&mut out)?;
        loop {
            match poll.poll(&mut events, None) {
                Ok(_) => (),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    error!("Error polling for events: {}", e);
                    return Err(e);
                }
            }

            for event in events.iter() {
                if event.token() != STDIN_TOKEN {
                    continue;
                }
                // Drain every complete line already buffered; readiness only fires for new bytes.
                loop {
                    match serve_line(&mut reader, &mut buffer, hash_table, &mut out) {
                        Ok(Step::Exit) => return Ok(()),
                        Ok(Step::Continue) => {}
                        Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => break,
                        Err(e) => {
                            error!("Error reading input: {}", e);
                            return Err(e);
                        }
                    }
                    if reader.buffer().is_empty() {
                        break;
                    }
                }
            }
        }
    }
}

enum Step {
    Continue,
    Exit,
}

/// Reads and runs one line. End of input counts as an exit.
fn serve_line<R: BufRead, W: Write>(
    reader: &mut R,
    buffer: &mut String,
    hash_table: &mut HashTable,
    out: &mut W,
) -> io::Result<Step> {
    buffer.clear();
    if reader.read_line(buffer)? == 0 {
        info!("Input stream closed");
        writeln!(out, "\nInput stream closed. Exiting.")?;
        return Ok(Step::Exit);
    }

    let input = buffer.trim();
    if !input.is_empty() && handle_command(input, hash_table, out)? {
        return Ok(Step::Exit);
    }
    prompt(out)?;
    Ok(Step::Continue)
}

/// Blocking line loop for input that cannot be polled, such as a redirected file.
pub fn serve_lines<R: BufRead, W: Write>(reader: &mut R, hash_table: &mut HashTable, out: &mut W) -> io::Result<()> {
    let mut buffer = String::new();
    prompt(out)?;
    while let Step::Continue = serve_line(reader, &mut buffer, hash_table, out)? {}
    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

/// Runs one command line against `hash_table`. Returns true if the command was to exit.
pub fn handle_command<W: Write>(input: &str, hash_table: &mut HashTable, out: &mut W) -> io::Result<bool> {
    let command = match Command::parse(input) {
        Ok(command) => command,
        Err(e) => {
            warn!("Rejected command '{}': {}", input, e);
            writeln!(out, "✗ {}", e)?;
            return Ok(false);
        }
    };
    debug!("Handling command: {:?}", command);

    match command {
        Command::Exit => {
            writeln!(out, "Goodbye!")?;
            return Ok(true);
        }
        Command::Help => show_help(out)?,
        Command::Stats => show_stats(hash_table, out)?,
        Command::Insert(record) => handle_insert(hash_table, record, out)?,
        Command::Find(id) => handle_find(hash_table, id, out)?,
        Command::Remove(id) => handle_remove(hash_table, id, out)?,
        Command::List => handle_list(hash_table, out)?,
    }
    Ok(false)
}

pub fn show_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Available commands:")?;
    writeln!(out, "  1. {:<48} - Insert a transaction", INSERT_USAGE)?;
    writeln!(out, "  2. {:<48} - Find a transaction by ID", FIND_USAGE)?;
    writeln!(out, "  3. {:<48} - Remove a transaction by ID", REMOVE_USAGE)?;
    writeln!(out, "  4. {:<48} - List all transactions", "list")?;
    writeln!(out, "  5. {:<48} - Exit the program", "exit")?;
    writeln!(out, "     {:<48} - Show table statistics", "stats")?;
    writeln!(out, "     {:<48} - Show this help message", "help")
}

fn show_stats<W: Write>(hash_table: &HashTable, out: &mut W) -> io::Result<()> {
    writeln!(out, "=== Table Statistics ===")?;
    writeln!(out, "  Strategy: {}", hash_table.collision_resolution().name())?;
    writeln!(out, "  Records: {}", hash_table.len())?;
    writeln!(out, "  Capacity: {}", hash_table.capacity())?;
    writeln!(out, "  Load factor: {:.2}", hash_table.load_factor())?;
    if hash_table.collision_resolution() == CollisionResolution::LinearProbing {
        writeln!(out, "  Tombstones: {}", hash_table.tombstones())?;
    }
    Ok(())
}

fn handle_insert<W: Write>(hash_table: &mut HashTable, record: Record, out: &mut W) -> io::Result<()> {
    let id = record.id;
    let start = Instant::now();
    let result = hash_table.insert(record);
    let elapsed = start.elapsed();

    match result {
        Ok(()) => {
            info!("Inserted transaction {}", id);
            writeln!(out, "✓ Transaction with ID {} inserted", id)?;
        }
        Err(e) => {
            warn!("Insert of transaction {} failed: {}", id, e);
            writeln!(out, "✗ {}", e)?;
        }
    }
    debug!("Insert of transaction {} took {:?}", id, elapsed);
    writeln!(out, "Elapsed: {:.6} seconds", elapsed.as_secs_f64())
}

fn handle_find<W: Write>(hash_table: &HashTable, id: i64, out: &mut W) -> io::Result<()> {
    match hash_table.find(id) {
        Ok(record) => writeln!(out, "✓ Transaction found: {}", record),
        Err(e) => writeln!(out, "✗ {}", e),
    }
}

fn handle_remove<W: Write>(hash_table: &mut HashTable, id: i64, out: &mut W) -> io::Result<()> {
    match hash_table.remove(id) {
        Ok(_) => {
            info!("Removed transaction {}", id);
            writeln!(out, "✓ Transaction {} removed", id)
        }
        Err(e) => writeln!(out, "✗ {}", e),
    }
}

fn handle_list<W: Write>(hash_table: &HashTable, out: &mut W) -> io::Result<()> {
    writeln!(out, "Transactions:")?;
    for record in hash_table.list() {
        writeln!(out, "{}", record)?;
    }
    Ok(())
}
