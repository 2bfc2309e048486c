//! Summary statistics for a lookup report

use crate::report::PriceReport;

/// Counts and price spread of a report
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportStatistics {
    /// Links attempted
    pub attempted: usize,

    /// Observations with a price
    pub priced: usize,

    /// Observations whose fetch failed
    pub failed: usize,

    /// Pages read without a detectable price
    pub unpriced: usize,

    /// Lowest observed price
    pub min_price: Option<f64>,

    /// Highest observed price
    pub max_price: Option<f64>,
}

impl ReportStatistics {
    pub fn from_report(report: &PriceReport) -> Self {
        let mut stats = Self {
            attempted: report.found_links,
            ..Self::default()
        };

        for observation in &report.all {
            match (observation.price, &observation.error) {
                (Some(price), _) => {
                    stats.priced += 1;
                    stats.min_price = Some(stats.min_price.map_or(price, |m| m.min(price)));
                    stats.max_price = Some(stats.max_price.map_or(price, |m| m.max(price)));
                }
                (None, Some(_)) => stats.failed += 1,
                (None, None) => stats.unpriced += 1,
            }
        }

        stats
    }

    /// Difference between the highest and lowest price
    pub fn spread(&self) -> Option<f64> {
        Some(self.max_price? - self.min_price?)
    }

    /// Percentage of attempted links that yielded a price
    pub fn hit_rate(&self) -> f64 {
        if self.attempted == 0 {
            0.0
        } else {
            (self.priced as f64 / self.attempted as f64) * 100.0
        }
    }
}
