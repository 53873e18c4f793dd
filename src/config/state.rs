// Application state module
// Shared, read-mostly state handed to every request

use super::types::Config;
use crate::gallery::RandomPicker;

/// Application state
///
/// The configuration is immutable after startup; the picker owns the only
/// mutable pieces (random source and last-served memory) behind its own locks.
pub struct AppState {
    pub config: Config,
    pub picker: RandomPicker,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let picker = match config.random_seed {
            Some(seed) => RandomPicker::seeded(seed, config.avoid_repeat),
            None => RandomPicker::from_os_rng(config.avoid_repeat),
        };
        Self { config, picker }
    }

    /// Whether request metadata should be written to the access log
    pub const fn access_log(&self) -> bool {
        self.config.logging.verbose
    }
}
