//! Editor configuration.
//!
//! A small serde-backed config loaded from `~/.config/terse/config.json`
//! when present. Every field has a default so a partial file is fine; a
//! malformed file degrades to the defaults with a startup warning rather
//! than aborting.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Column width of a tab stop.
pub const DEFAULT_TAB_STOP: usize = 8;

/// Ctrl-Q presses required to abandon unsaved changes.
pub const DEFAULT_QUIT_CONFIRMATIONS: usize = 3;

/// How long a status message stays visible.
pub const DEFAULT_MESSAGE_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Tab stop width in rendered columns (tabs expand to the next multiple).
    pub tab_stop: usize,
    /// Number of Ctrl-Q presses needed to quit with unsaved changes.
    pub quit_confirmations: usize,
    /// Message bar expiry in milliseconds.
    pub message_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tab_stop: DEFAULT_TAB_STOP,
            quit_confirmations: DEFAULT_QUIT_CONFIRMATIONS,
            message_timeout_ms: DEFAULT_MESSAGE_TIMEOUT_MS,
        }
    }
}

impl Config {
    /// Path of the user config file, if a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("terse").join("config.json"))
    }

    /// Load the user config. Returns the config plus an optional warning to
    /// show in the message bar (missing file is not a warning).
    pub fn load() -> (Self, Option<String>) {
        let Some(path) = Self::default_path() else {
            return (Self::default(), None);
        };
        match std::fs::read_to_string(&path) {
            Ok(text) => match serde_json::from_str::<Self>(&text) {
                Ok(config) => {
                    let config = config.sanitized();
                    tracing::info!(?path, "loaded config");
                    (config, None)
                }
                Err(err) => {
                    tracing::warn!(?path, %err, "ignoring malformed config");
                    (
                        Self::default(),
                        Some(format!("Ignoring malformed config: {err}")),
                    )
                }
            },
            Err(_) => (Self::default(), None),
        }
    }

    /// Clamp nonsense values back to workable ones.
    fn sanitized(mut self) -> Self {
        if self.tab_stop == 0 {
            self.tab_stop = DEFAULT_TAB_STOP;
        }
        if self.quit_confirmations == 0 {
            self.quit_confirmations = 1;
        }
        self
    }
}
