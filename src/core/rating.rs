//! Arbitrage difficulty rating.
//!
//! A fund is scored from 0 to 5: `0` when subscriptions are paused, otherwise
//! a tier picked from premium and turnover, demoted by one when the hold
//! period is long.

use crate::core::fund::{FundRecord, HoldPeriod};
use serde::Serialize;

pub const SUSPENDED_GLYPH: &str = "🚫";
pub const STAR_GLYPH: &str = "⭐";

/// `(min premium %, min volume in 10k CNY, tier)`, highest tier first.
const LADDER: [(f64, f64, u8); 4] = [
    (5.0, 5000.0, 5),
    (3.5, 3000.0, 4),
    (2.5, 2000.0, 3),
    (2.0, 1000.0, 2),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RatingResult {
    pub difficulty: u8,
    pub stars: String,
}

pub fn classify(fund: &FundRecord) -> u8 {
    if fund.is_paused() {
        return 0;
    }

    let premium = fund.premium_rate.unwrap_or(0.0);
    let volume = fund.volume.unwrap_or(0.0);

    let tier = LADDER
        .iter()
        .find(|(min_premium, min_volume, _)| premium >= *min_premium && volume >= *min_volume)
        .map_or(1, |(_, _, tier)| *tier);

    match fund.hold_period() {
        HoldPeriod::Long if tier > 1 => tier - 1,
        _ => tier,
    }
}

pub fn stars(difficulty: u8) -> String {
    if difficulty == 0 {
        SUSPENDED_GLYPH.to_string()
    } else {
        STAR_GLYPH.repeat(difficulty as usize)
    }
}

pub fn rate(fund: &FundRecord) -> RatingResult {
    let difficulty = classify(fund);
    RatingResult {
        difficulty,
        stars: stars(difficulty),
    }
}
