use std::env;
use std::io;
use std::process::ExitCode;

use log::{LevelFilter, error, info, warn};
use txn_hash::HashTable;
use txn_hash::config::{Config, DEFAULT_CONFIG_PATH};
use txn_hash::event_loop::terminal_event_loop::show_help;
use txn_hash::event_loop::{EventLoop, TerminalEventLoop};
use txn_hash::logger::initialize_logger;

fn init() -> Option<Config> {
    let path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    match Config::load(&path) {
        Ok(Some(config)) => {
            initialize_logger(config.logging.level_filter());
            info!("Loaded configuration from {}", path);
            Some(config)
        }
        Ok(None) => {
            let config = Config::default();
            initialize_logger(config.logging.level_filter());
            warn!("{} not found, using default configuration", path);
            Some(config)
        }
        Err(e) => {
            initialize_logger(LevelFilter::Info);
            error!("Failed to initialize: {}", e);
            None
        }
    }
}

fn main() -> ExitCode {
    let Some(config) = init() else {
        return ExitCode::FAILURE;
    };

    let mut hash_table = HashTable::new(config.table.capacity, config.table.collision_resolution);
    info!(
        "Transaction table ready: {} buckets, {}",
        config.table.capacity,
        config.table.collision_resolution.name()
    );

    println!("=== Interactive Transaction Hash Table ===");
    let mut event_loop = TerminalEventLoop {};
    let result = show_help(&mut io::stdout()).and_then(|()| event_loop.run(&mut hash_table));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Terminal session failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
