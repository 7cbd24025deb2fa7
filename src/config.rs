use std::time::Duration;

use thiserror::Error;

use crate::types::{CoordError, MAX_SIZE};

pub const DEFAULT_BOARD_SIZE: u8 = 7;
pub const MIN_TIME_LIMIT_SECS: u64 = 1;
pub const MAX_TIME_LIMIT_SECS: u64 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("time limit must be between 1 and 100 seconds, got {0}")]
    TimeLimit(u64),
    #[error(transparent)]
    BoardSize(#[from] CoordError),
}

/// Wall-clock budget for one `solve`, in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLimit(u64);

impl TimeLimit {
    pub fn new(secs: u64) -> Result<Self, ConfigError> {
        if (MIN_TIME_LIMIT_SECS..=MAX_TIME_LIMIT_SECS).contains(&secs) {
            Ok(Self(secs))
        } else {
            Err(ConfigError::TimeLimit(secs))
        }
    }

    #[inline]
    pub fn secs(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl Default for TimeLimit {
    fn default() -> Self {
        Self(MIN_TIME_LIMIT_SECS)
    }
}

/// Startup settings for a solver session; the binaries fill it from the
/// command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolverConfig {
    pub board_size: u8,
    pub time_limit: TimeLimit,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            time_limit: TimeLimit::default(),
        }
    }
}

impl SolverConfig {
    pub fn new(board_size: u8, time_limit_secs: u64) -> Result<Self, ConfigError> {
        if board_size == 0 || board_size > MAX_SIZE {
            return Err(CoordError::BoardSize(u32::from(board_size)).into());
        }
        Ok(Self {
            board_size,
            time_limit: TimeLimit::new(time_limit_secs)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_limit_bounds() {
        assert!(TimeLimit::new(0).is_err());
        assert_eq!(TimeLimit::new(1).unwrap().secs(), 1);
        assert_eq!(TimeLimit::new(100).unwrap().as_duration(), Duration::from_secs(100));
        assert!(TimeLimit::new(101).is_err());
    }

    #[test]
    fn config_rejects_bad_board_size() {
        assert!(matches!(SolverConfig::new(9, 1), Err(ConfigError::BoardSize(_))));
        assert!(matches!(SolverConfig::new(3, 0), Err(ConfigError::TimeLimit(0))));
        assert_eq!(SolverConfig::default().board_size, DEFAULT_BOARD_SIZE);
    }
}
