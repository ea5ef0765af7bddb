use anyhow::bail;

use crate::Scan;

/// Largest multiplier tried when nothing else is configured.
pub const DEFAULT_MAX_MULTIPLIER: u32 = 999;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    max_multiplier: u32,
}

impl Config {
    pub fn new(max_multiplier: u32) -> anyhow::Result<Self> {
        if max_multiplier == 0 {
            bail!("Maximum multiplier must be at least 1");
        }

        Ok(Config { max_multiplier })
    }

    pub fn max_multiplier(&self) -> u32 {
        self.max_multiplier
    }

    pub fn scan(&self, number: u64) -> Scan {
        Scan::new(number, self.max_multiplier)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_multiplier: DEFAULT_MAX_MULTIPLIER,
        }
    }
}
