//! Data-fetch abstractions and core types

use crate::core::fund::FundRecord;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// A list of funds together with the time the upstream produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FundList {
    pub funds: Vec<FundRecord>,
    pub update_time: Option<String>,
}

/// One daily snapshot of a fund's premium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: String,
    #[serde(default)]
    pub premium_rate: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub net_value: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceKind {
    #[default]
    HappyLof,
    Jisilu,
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SourceKind::HappyLof => "happy-lof",
                SourceKind::Jisilu => "jisilu",
            }
        )
    }
}

impl FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "happy-lof" | "happylof" => Ok(SourceKind::HappyLof),
            "jisilu" => Ok(SourceKind::Jisilu),
            _ => Err(anyhow::anyhow!("Invalid fund source: {}", s)),
        }
    }
}

/// Upstream for LOF quotes.
///
/// An `Err` means the upstream could not be reached or reported a failure;
/// an upstream that answered with no rows yields an empty `FundList`.
#[async_trait]
pub trait FundSource: Send + Sync {
    /// Funds with a meaningful premium and restricted subscriptions.
    async fn high_premium(&self) -> Result<FundList>;

    /// Every fund with restricted subscriptions, highest premium first.
    async fn all(&self) -> Result<FundList>;

    /// Up to `days` daily snapshots for `fund_id`, oldest first.
    async fn history(&self, fund_id: &str, days: u32) -> Result<Vec<HistoryPoint>>;
}
