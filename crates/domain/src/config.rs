//! Engine configuration
//!
//! Explicit configuration values for the scheduling engine. The city
//! universe in particular is deliberately a plain config value rather than
//! ambient process-wide state: the calendar synthesizer needs it to decide
//! whether a "partial" block actually covers every known city.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BULK_HORIZON_DAYS;
use crate::errors::{PlanbordError, Result};

/// Configuration for the scheduling engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Full list of recognized service cities. A block naming every city in
    /// this set counts as fully blocking, the same as an all-cities block.
    pub city_universe: BTreeSet<String>,

    /// Maximum length of a bulk range assignment, in days (inclusive range).
    pub bulk_horizon_days: u32,
}

impl ScheduleConfig {
    /// Create a config with the given city universe and the default bulk
    /// horizon.
    pub fn new<I, S>(cities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            city_universe: cities.into_iter().map(Into::into).collect(),
            bulk_horizon_days: DEFAULT_BULK_HORIZON_DAYS,
        }
    }

    /// Override the bulk assignment horizon.
    pub fn with_bulk_horizon_days(mut self, days: u32) -> Self {
        self.bulk_horizon_days = days;
        self
    }

    /// Check the configuration is usable. A zero horizon would reject
    /// every bulk range, which is a deployment mistake rather than bad
    /// operator input.
    pub fn validate(&self) -> Result<()> {
        if self.bulk_horizon_days == 0 {
            return Err(PlanbordError::Config(
                "bulk_horizon_days must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self { city_universe: BTreeSet::new(), bulk_horizon_days: DEFAULT_BULK_HORIZON_DAYS }
    }
}
