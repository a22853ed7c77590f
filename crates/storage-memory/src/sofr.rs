//! Static SOFR rate source.

use async_trait::async_trait;
use dashmap::DashMap;

use equityledger_core::errors::{Error, Result};
use equityledger_core::financials::{SofrRate, SofrRateSourceTrait};

/// A manually maintained table of SOFR observations keyed by fiscal year.
///
/// Stands in for a market-data feed; rates can still be overridden per
/// period through the financials service.
#[derive(Default)]
pub struct StaticSofrRateSource {
    rates: DashMap<i32, SofrRate>,
}

impl StaticSofrRateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rate(&self, fiscal_year: i32, rate: SofrRate) {
        self.rates.insert(fiscal_year, rate);
    }
}

#[async_trait]
impl SofrRateSourceTrait for StaticSofrRateSource {
    async fn get_rate(&self, fiscal_year: i32) -> Result<SofrRate> {
        self.rates
            .get(&fiscal_year)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::NotFound(format!("SOFR rate for fiscal year {}", fiscal_year)))
    }
}
