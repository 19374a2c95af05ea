//! Order-preserving list filters applied before rendering.

use crate::core::fund::FundRecord;
use std::cmp::Ordering;

/// Returns the visible records for the given `show_paused` toggle.
///
/// Records are borrowed from `all` in their original order, so the same
/// source list can be re-filtered whenever the toggle flips.
pub fn filter(all: &[FundRecord], show_paused: bool) -> Vec<&FundRecord> {
    all.iter()
        .filter(|fund| show_paused || !fund.is_paused())
        .collect()
}

/// Thresholds used to pick arbitrage candidates out of a full quote table.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenCriteria {
    /// Minimum premium in percent, ignored when not positive
    pub min_premium: f64,
    /// Minimum turnover in 10k CNY, ignored when not positive
    pub min_volume: f64,
    /// Drop funds whose subscriptions are fully open
    pub only_limited: bool,
    pub sort_by_premium: bool,
}

impl Default for ScreenCriteria {
    fn default() -> Self {
        ScreenCriteria {
            min_premium: 0.0,
            min_volume: 0.0,
            only_limited: false,
            sort_by_premium: true,
        }
    }
}

impl ScreenCriteria {
    /// Premium of at least 1%, turnover of at least 1000万, restricted subscriptions.
    pub fn high_premium() -> Self {
        ScreenCriteria {
            min_premium: 1.0,
            min_volume: 1000.0,
            only_limited: true,
            sort_by_premium: true,
        }
    }

    pub fn all_limited() -> Self {
        ScreenCriteria {
            only_limited: true,
            ..Default::default()
        }
    }
}

pub fn screen(funds: Vec<FundRecord>, criteria: &ScreenCriteria) -> Vec<FundRecord> {
    let mut screened: Vec<FundRecord> = funds
        .into_iter()
        .filter(|fund| {
            criteria.min_premium <= 0.0
                || fund.premium_rate.unwrap_or(0.0) >= criteria.min_premium
        })
        // Paused or limited funds stay even when thin: they are the actual arbitrage targets.
        .filter(|fund| {
            criteria.min_volume <= 0.0
                || fund.volume.unwrap_or(0.0) >= criteria.min_volume
                || fund.is_paused()
                || fund.is_limited()
        })
        .filter(|fund| !criteria.only_limited || !fund.is_open())
        .collect();

    if criteria.sort_by_premium {
        screened.sort_by(|a, b| {
            let a = a.premium_rate.unwrap_or(0.0);
            let b = b.premium_rate.unwrap_or(0.0);
            b.partial_cmp(&a).unwrap_or(Ordering::Equal)
        });
    }

    screened
}
