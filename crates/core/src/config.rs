//! Session configuration
//!
//! Field size, spawn point, drop period and RNG seed. Defaults come from the
//! constants in the types crate.

use std::time::Duration;

use thiserror::Error;

use crate::types::{DEFAULT_COLUMNS, DEFAULT_ROWS, DROP_PERIOD_MS, MAX_COLUMNS, MAX_ROWS};

/// Reasons a configuration cannot start a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one column and one row, got {columns}x{rows}")]
    EmptyGrid { columns: u16, rows: u16 },

    #[error("grid of {columns}x{rows} exceeds the {max_columns}x{max_rows} limit")]
    GridTooLarge {
        columns: u16,
        rows: u16,
        max_columns: u16,
        max_rows: u16,
    },

    #[error("drop period must be greater than zero")]
    ZeroDropPeriod,

    #[error("spawn position ({x}, {y}) is outside the {columns}x{rows} grid")]
    SpawnOutOfBounds {
        x: i32,
        y: i32,
        columns: u16,
        rows: u16,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    pub columns: u16,
    pub rows: u16,
    /// Pivot of every spawned piece; `None` means `(columns / 2, rows - 2)`
    pub spawn: Option<(i32, i32)>,
    pub drop_period: Duration,
    /// Fixed RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            columns,
            rows,
            ..Self::default()
        }
    }

    pub fn with_spawn(mut self, x: i32, y: i32) -> Self {
        self.spawn = Some((x, y));
        self
    }

    pub fn with_drop_period(mut self, period: Duration) -> Self {
        self.drop_period = period;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// The pivot new pieces spawn at
    pub fn spawn_point(&self) -> (i32, i32) {
        self.spawn
            .unwrap_or((self.columns as i32 / 2, self.rows as i32 - 2))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyGrid {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.columns > MAX_COLUMNS || self.rows > MAX_ROWS {
            return Err(ConfigError::GridTooLarge {
                columns: self.columns,
                rows: self.rows,
                max_columns: MAX_COLUMNS,
                max_rows: MAX_ROWS,
            });
        }
        if self.drop_period.is_zero() {
            return Err(ConfigError::ZeroDropPeriod);
        }

        let (x, y) = self.spawn_point();
        if x < 0 || x >= self.columns as i32 || y < 0 || y >= self.rows as i32 {
            return Err(ConfigError::SpawnOutOfBounds {
                x,
                y,
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            spawn: None,
            drop_period: Duration::from_millis(DROP_PERIOD_MS),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_spawn_point() {
        let config = SessionConfig::default();
        assert_eq!(config.spawn_point(), (5, 18));
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_explicit_spawn_overrides_default() {
        let config = SessionConfig::new(4, 4).with_spawn(1, 0);
        assert_eq!(config.spawn_point(), (1, 0));
    }

    #[test]
    fn test_empty_grid_rejected() {
        assert_eq!(
            SessionConfig::new(0, 5).validate(),
            Err(ConfigError::EmptyGrid {
                columns: 0,
                rows: 5
            })
        );
    }

    #[test]
    fn test_oversized_grid_rejected() {
        assert_eq!(SessionConfig::new(MAX_COLUMNS, MAX_ROWS).validate(), Ok(()));
        assert_eq!(
            SessionConfig::new(40000, 20).validate(),
            Err(ConfigError::GridTooLarge {
                columns: 40000,
                rows: 20,
                max_columns: MAX_COLUMNS,
                max_rows: MAX_ROWS,
            })
        );
        assert!(matches!(
            SessionConfig::new(10, MAX_ROWS + 1).validate(),
            Err(ConfigError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_zero_period_rejected() {
        let config = SessionConfig::default().with_drop_period(Duration::ZERO);
        assert_eq!(config.validate(), Err(ConfigError::ZeroDropPeriod));
    }

    #[test]
    fn test_single_row_has_no_default_spawn() {
        let err = SessionConfig::new(4, 1).validate().unwrap_err();
        assert!(matches!(err, ConfigError::SpawnOutOfBounds { y: -1, .. }));
        assert_eq!(
            err.to_string(),
            "spawn position (2, -1) is outside the 4x1 grid"
        );
    }
}
