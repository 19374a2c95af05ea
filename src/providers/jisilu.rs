use anyhow::{Result, anyhow, bail};
use async_trait::async_trait;
use chrono::Local;
use futures::future::join_all;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::core::filter::{ScreenCriteria, screen};
use crate::core::format::format_timestamp;
use crate::core::fund::FundRecord;
use crate::core::source::{FundList, FundSource, HistoryPoint};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const PAGE_SIZE: u32 = 100;
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Table {
    IndexLof,
    QdiiEquity,
    /// Crude oil, gold and other commodity QDII
    QdiiCommodity,
}

impl Table {
    const ALL: [Table; 3] = [Table::IndexLof, Table::QdiiEquity, Table::QdiiCommodity];

    fn endpoint(&self) -> &'static str {
        match self {
            Table::IndexLof => "/data/lof/index_lof_list/",
            Table::QdiiEquity => "/data/qdii/qdii_list/E",
            Table::QdiiCommodity => "/data/qdii/qdii_list/C",
        }
    }

    fn referer(&self) -> &'static str {
        match self {
            Table::IndexLof => "/data/lof/",
            Table::QdiiEquity | Table::QdiiCommodity => "/data/qdii/",
        }
    }

    fn fund_type(&self) -> &'static str {
        match self {
            Table::IndexLof => "指数LOF",
            Table::QdiiEquity | Table::QdiiCommodity => "QDII",
        }
    }

    fn is_qdii(&self) -> bool {
        !matches!(self, Table::IndexLof)
    }
}

#[derive(Deserialize, Debug, Default)]
struct JisiluResponse {
    #[serde(default)]
    rows: Vec<JisiluRow>,
}

#[derive(Deserialize, Debug)]
struct JisiluRow {
    #[serde(default)]
    cell: Map<String, Value>,
}

/// Parses a numeric cell that may be a JSON number or a string such as
/// `"1,234.5"`. Placeholders like `"-"` and `"--"` are treated as missing.
fn parse_number(value: Option<&Value>, strip: &[char]) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let cleaned: String = s.chars().filter(|c| !strip.contains(c)).collect();
            match cleaned.trim() {
                "" | "-" | "--" => None,
                v => v.parse().ok(),
            }
        }
        _ => None,
    }
}

fn parse_float(value: Option<&Value>) -> Option<f64> {
    parse_number(value, &[','])
}

fn parse_percentage(value: Option<&Value>) -> Option<f64> {
    parse_number(value, &['%', ' '])
}

fn parse_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn parse_row(cell: &Map<String, Value>, table: Table) -> FundRecord {
    // Published NAV lags a day for QDII, so fall back to jisilu's estimate.
    let net_value = parse_float(cell.get("fund_nav"))
        .filter(|nav| *nav != 0.0)
        .or_else(|| parse_float(cell.get("estimate_value")));

    let premium_rate = match parse_percentage(cell.get("discount_rt")) {
        None if table.is_qdii() => parse_percentage(cell.get("t1_premium_rate")),
        premium => premium,
    };

    FundRecord {
        fund_id: parse_string(cell.get("fund_id")).unwrap_or_default(),
        fund_name: parse_string(cell.get("fund_nm")).unwrap_or_default(),
        fund_type: Some(table.fund_type().to_string()),
        apply_status: parse_string(cell.get("apply_status"))
            .or_else(|| parse_string(cell.get("apply_cd")))
            .unwrap_or_default(),
        volume: parse_float(cell.get("volume")),
        premium_rate,
        price: parse_float(cell.get("price")),
        net_value,
        change_pct: parse_percentage(cell.get("increase_rt")),
    }
}

/// Scrapes the LOF and QDII tables published by jisilu.cn directly.
pub struct JisiluProvider {
    base_url: String,
}

impl JisiluProvider {
    pub fn new(base_url: &str) -> Self {
        JisiluProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    #[instrument(name = "JisiluTableFetch", skip(self))]
    async fn fetch_table(&self, table: Table) -> Result<Vec<FundRecord>> {
        let timestamp = Local::now().timestamp_millis();
        let mut url = format!(
            "{}{}?___jsl=LST___t={}&rp={}&page=1",
            self.base_url,
            table.endpoint(),
            timestamp,
            PAGE_SIZE
        );
        if table.is_qdii() {
            url.push_str("&only_lof=y");
        }
        debug!("Requesting jisilu table from {}", url);

        let client = reqwest::Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        let response = client
            .get(&url)
            .header("Accept", "application/json, text/javascript, */*; q=0.01")
            .header("Accept-Language", "zh-CN,zh;q=0.9,en;q=0.8")
            .header("X-Requested-With", "XMLHttpRequest")
            .header("Referer", format!("{}{}", self.base_url, table.referer()))
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for table: {:?}", e, table))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for table: {:?}",
                response.status(),
                table
            ));
        }

        let text = response.text().await?;
        let data: JisiluResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {:?}: {}", table, e))?;

        let funds: Vec<FundRecord> = data
            .rows
            .iter()
            .map(|row| parse_row(&row.cell, table))
            .filter(|fund| !fund.fund_id.is_empty())
            .collect();
        debug!(count = funds.len(), "Parsed jisilu rows");
        Ok(funds)
    }

    /// Fetches every table concurrently. A table that fails is logged and
    /// skipped; the call fails only when no table could be fetched.
    async fn fetch_all_tables(&self) -> Result<Vec<FundRecord>> {
        let results = join_all(Table::ALL.iter().map(|table| self.fetch_table(*table))).await;

        let mut funds = Vec::new();
        let mut last_error = None;
        let mut fetched = 0;
        for (table, result) in Table::ALL.iter().zip(results) {
            match result {
                Ok(rows) => {
                    fetched += 1;
                    funds.extend(rows);
                }
                Err(e) => {
                    warn!(?table, error = %e, "Skipping jisilu table");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if fetched == 0 => Err(e.context("Failed to fetch any jisilu table")),
            _ => Ok(funds),
        }
    }

    async fn screened(&self, criteria: &ScreenCriteria) -> Result<FundList> {
        let funds = screen(self.fetch_all_tables().await?, criteria);
        Ok(FundList {
            funds,
            update_time: Some(format_timestamp(&Local::now().naive_local())),
        })
    }
}

#[async_trait]
impl FundSource for JisiluProvider {
    async fn high_premium(&self) -> Result<FundList> {
        self.screened(&ScreenCriteria::high_premium()).await
    }

    async fn all(&self) -> Result<FundList> {
        self.screened(&ScreenCriteria::all_limited()).await
    }

    async fn history(&self, fund_id: &str, _days: u32) -> Result<Vec<HistoryPoint>> {
        bail!(
            "Premium history for {} is not available from jisilu, use the happy-lof source",
            fund_id
        )
    }
}
