use std::sync::Once;

use env_logger::Builder;
use log::LevelFilter;

static INIT: Once = Once::new();

/// Installs the global logger at `level`, the `[logging] level` from the configuration.
///
/// `RUST_LOG` takes precedence when set. Only the first call has an effect, so
/// the level cannot change once the table session has started.
pub fn initialize_logger(level: LevelFilter) {
    INIT.call_once_force(|_| {
        let mut builder = Builder::new();
        builder.filter_level(level).format_timestamp_millis().parse_default_env();

        if builder.try_init().is_err() {
            // A logger is already installed; still honor the configured ceiling.
            log::set_max_level(level);
        }
    });
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::*;
    use crate::config::Config;

    #[test]
    fn configured_level_is_applied_once() {
        let config = Config::from_toml("[logging]\nlevel = \"warn\"\n").unwrap();
        initialize_logger(config.logging.level_filter());
        initialize_logger(LevelFilter::Trace);

        if std::env::var_os("RUST_LOG").is_none() {
            assert_eq!(log::max_level(), LevelFilter::Warn);
            assert!(log::log_enabled!(Level::Warn));
            assert!(!log::log_enabled!(Level::Info));
        }
    }
}
