//! Command-line options for the terminal binary.

use std::time::Duration;

use clap::Parser;

use tetris_field::core::{ConfigError, SessionConfig};
use tetris_field::types::{DEFAULT_COLUMNS, DEFAULT_ROWS, DROP_PERIOD_MS};

#[derive(Parser, Debug)]
#[command(name = "tetris-field")]
#[command(about = "Falling-block game in the terminal")]
pub struct Args {
    /// Field width in cells
    #[arg(long, default_value_t = DEFAULT_COLUMNS)]
    pub columns: u16,

    /// Field height in cells
    #[arg(long, default_value_t = DEFAULT_ROWS)]
    pub rows: u16,

    /// Drop timer period in milliseconds
    #[arg(long, default_value_t = DROP_PERIOD_MS)]
    pub period_ms: u64,

    /// Fixed seed for the shape sequence
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Args {
    /// Build a validated session config from the parsed flags
    pub fn into_config(self) -> Result<SessionConfig, ConfigError> {
        let mut config = SessionConfig::new(self.columns, self.rows)
            .with_drop_period(Duration::from_millis(self.period_ms));
        config.seed = self.seed;
        config.validate()?;
        Ok(config)
    }
}
