pub mod command;
pub mod terminal_event_loop;

use std::io;

use crate::hash_table::HashTable;

pub use command::Command;
pub use terminal_event_loop::{TerminalEventLoop, handle_command};

pub trait EventLoop {
    /// Serves commands against `hash_table` until the user exits or input ends.
    fn run(&mut self, hash_table: &mut HashTable) -> io::Result<()>;
}
