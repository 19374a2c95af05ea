//! Fixed-format display strings for fund fields.
//!
//! Every formatter falls back to a zero rendering when the value is absent
//! or not a finite number.

use chrono::{Datelike, NaiveDateTime, Timelike};

pub use crate::core::fund::{exchange, hold_period};

const HUNDRED_MILLION_UNIT: &str = "亿";
const TEN_THOUSAND_UNIT: &str = "万";

/// Volumes are quoted in 10k CNY, so this many of them make one 亿.
const TEN_THOUSANDS_PER_HUNDRED_MILLION: f64 = 10000.0;

fn finite(value: Option<f64>) -> Option<f64> {
    // Adding +0.0 folds -0.0 into 0.0 so it never prints as "-0.000".
    value.filter(|v| v.is_finite()).map(|v| v + 0.0)
}

/// Fixed-point rendering that rounds halves away from zero, so `3520.5`
/// becomes `3521` rather than the round-half-even `3520` of `{:.0}`.
fn to_fixed(value: f64, digits: usize) -> String {
    let factor = 10f64.powi(digits as i32);
    let rounded = (value * factor).round() / factor;
    format!("{rounded:.digits$}")
}

pub fn format_price(price: Option<f64>) -> String {
    to_fixed(finite(price).unwrap_or(0.0), 3)
}

pub fn format_net_value(net_value: Option<f64>) -> String {
    to_fixed(finite(net_value).unwrap_or(0.0), 3)
}

pub fn format_premium(premium: Option<f64>) -> String {
    format!("{}%", to_fixed(finite(premium).unwrap_or(0.0), 2))
}

pub fn format_change(change: Option<f64>) -> String {
    match finite(change) {
        Some(c) if c > 0.0 => format!("+{}%", to_fixed(c, 2)),
        Some(c) => format!("{}%", to_fixed(c, 2)),
        None => "0.00%".to_string(),
    }
}

pub fn format_volume(volume: Option<f64>) -> String {
    let volume = finite(volume).unwrap_or(0.0);
    if volume >= TEN_THOUSANDS_PER_HUNDRED_MILLION {
        format!(
            "{}{HUNDRED_MILLION_UNIT}",
            to_fixed(volume / TEN_THOUSANDS_PER_HUNDRED_MILLION, 2)
        )
    } else {
        format!("{}{TEN_THOUSAND_UNIT}", to_fixed(volume, 0))
    }
}

/// Renders `YYYY-MM-DD HH:MM:SS` with the year left unpadded.
pub fn format_timestamp(date: &NaiveDateTime) -> String {
    format!(
        "{}-{:02}-{:02} {:02}:{:02}:{:02}",
        date.year(),
        date.month(),
        date.day(),
        date.hour(),
        date.minute(),
        date.second()
    )
}
