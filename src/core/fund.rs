//! Fund records and the lookups derived from their identifiers

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Substring of `apply_status` marking a fund whose subscriptions are paused.
pub const PAUSE_MARKER: &str = "暂停";

/// Substring of `apply_status` marking a fund with a subscription limit.
pub const LIMIT_MARKER: &str = "限";

/// Substring of `fund_type` marking a QDII fund.
pub const QDII_MARKER: &str = "QDII";

/// A single LOF quote as delivered by a [`FundSource`](crate::core::FundSource).
///
/// Numeric fields are `None` when the upstream omitted them or sent `null`;
/// `Some(0.0)` is a real zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundRecord {
    pub fund_id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub fund_name: String,
    #[serde(default)]
    pub fund_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub apply_status: String,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(default)]
    pub premium_rate: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub net_value: Option<f64>,
    #[serde(default)]
    pub change_pct: Option<f64>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl FundRecord {
    pub fn is_paused(&self) -> bool {
        self.apply_status.contains(PAUSE_MARKER)
    }

    pub fn is_limited(&self) -> bool {
        self.apply_status.contains(LIMIT_MARKER)
    }

    /// Whether subscriptions are fully open, i.e. there is nothing to arbitrage against.
    pub fn is_open(&self) -> bool {
        matches!(self.apply_status.as_str(), "开放申购" | "开放" | "")
    }

    /// Trading is halted when the exchange reports a zero turnover.
    pub fn is_trading_halted(&self) -> bool {
        self.volume == Some(0.0)
    }

    pub fn exchange(&self) -> Exchange {
        exchange(&self.fund_id)
    }

    pub fn hold_period(&self) -> HoldPeriod {
        hold_period(self.fund_type.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exchange {
    Shanghai,
    Shenzhen,
}

impl Display for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Exchange::Shanghai => "沪",
                Exchange::Shenzhen => "深",
            }
        )
    }
}

/// Settlement lag between subscribing and being able to sell on the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoldPeriod {
    /// T+2, regular LOFs
    Short,
    /// T+3, QDII LOFs
    Long,
}

impl Display for HoldPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                HoldPeriod::Short => "T+2",
                HoldPeriod::Long => "T+3",
            }
        )
    }
}

/// Shanghai listed funds use the `50`/`51` prefixes, everything else trades in Shenzhen.
pub fn exchange(fund_id: &str) -> Exchange {
    if fund_id.starts_with("50") || fund_id.starts_with("51") {
        Exchange::Shanghai
    } else {
        Exchange::Shenzhen
    }
}

pub fn hold_period(fund_type: Option<&str>) -> HoldPeriod {
    match fund_type {
        Some(t) if t.contains(QDII_MARKER) => HoldPeriod::Long,
        _ => HoldPeriod::Short,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exchange_by_prefix() {
        assert_eq!(exchange("510050"), Exchange::Shanghai);
        assert_eq!(exchange("501018"), Exchange::Shanghai);
        assert_eq!(exchange("160001"), Exchange::Shenzhen);
        assert_eq!(exchange("5"), Exchange::Shenzhen);
        assert_eq!(exchange(""), Exchange::Shenzhen);
        assert_eq!(Exchange::Shanghai.to_string(), "沪");
        assert_eq!(Exchange::Shenzhen.to_string(), "深");
    }

    #[test]
    fn test_hold_period() {
        assert_eq!(hold_period(Some("QDII-LOF")), HoldPeriod::Long);
        assert_eq!(hold_period(Some("指数LOF")), HoldPeriod::Short);
        assert_eq!(hold_period(Some("")), HoldPeriod::Short);
        assert_eq!(hold_period(None), HoldPeriod::Short);
        assert_eq!(HoldPeriod::Long.to_string(), "T+3");
        assert_eq!(HoldPeriod::Short.to_string(), "T+2");
    }

    #[test]
    fn test_deserialize_with_missing_and_null_fields() {
        let json = r#"{
            "fund_id": "161129",
            "fund_name": "原油LOF",
            "fund_type": null,
            "apply_status": null,
            "volume": 0,
            "premium_rate": 4.25
        }"#;
        let fund: FundRecord = serde_json::from_str(json).unwrap();
        assert_eq!(fund.fund_id, "161129");
        assert_eq!(fund.apply_status, "");
        assert!(fund.fund_type.is_none());
        assert_eq!(fund.volume, Some(0.0));
        assert_eq!(fund.premium_rate, Some(4.25));
        assert!(fund.price.is_none());
        assert!(fund.is_trading_halted());
        assert!(fund.is_open());
    }

    #[test]
    fn test_status_markers() {
        let fund = FundRecord {
            apply_status: "暂停申购".to_string(),
            ..Default::default()
        };
        assert!(fund.is_paused());
        assert!(!fund.is_open());

        let fund = FundRecord {
            apply_status: "限大额".to_string(),
            ..Default::default()
        };
        assert!(fund.is_limited());
        assert!(!fund.is_paused());
        assert!(!fund.is_trading_halted());
    }
}
