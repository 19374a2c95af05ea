use super::ui;
use crate::core::filter::filter;
use crate::core::format::{
    format_change, format_net_value, format_premium, format_price, format_timestamp,
    format_volume,
};
use crate::core::fund::FundRecord;
use crate::core::rating::{RatingResult, rate};
use crate::core::source::FundSource;
use anyhow::Result;
use chrono::Local;
use comfy_table::{Cell, Color};
use tracing::debug;

/// Presentation-ready strings for one fund.
#[derive(Debug, Clone, PartialEq)]
pub struct FundRow {
    pub fund_id: String,
    pub fund_name: String,
    pub exchange: String,
    pub hold_days: String,
    pub price: String,
    pub change: String,
    pub net_value: String,
    pub premium: String,
    pub volume: String,
    pub rating: RatingResult,
    pub trading_halted: bool,
}

impl From<&FundRecord> for FundRow {
    fn from(fund: &FundRecord) -> Self {
        FundRow {
            fund_id: fund.fund_id.clone(),
            fund_name: fund.fund_name.clone(),
            exchange: fund.exchange().to_string(),
            hold_days: fund.hold_period().to_string(),
            price: format_price(fund.price),
            change: format_change(fund.change_pct),
            net_value: format_net_value(fund.net_value),
            premium: format_premium(fund.premium_rate),
            volume: format_volume(fund.volume),
            rating: rate(fund),
            trading_halted: fund.is_trading_halted(),
        }
    }
}

pub fn render_table(funds: &[&FundRecord]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("代码"),
        ui::header_cell("名称"),
        ui::header_cell("交易所"),
        ui::header_cell("持有"),
        ui::header_cell("价格"),
        ui::header_cell("涨跌"),
        ui::header_cell("净值"),
        ui::header_cell("溢价率"),
        ui::header_cell("成交额"),
        ui::header_cell("难度"),
    ]);

    for fund in funds {
        let row = FundRow::from(*fund);
        let name = if row.trading_halted {
            Cell::new(format!("{} (停牌)", row.fund_name)).fg(Color::DarkGrey)
        } else {
            Cell::new(&row.fund_name)
        };
        table.add_row(vec![
            Cell::new(&row.fund_id),
            name,
            Cell::new(&row.exchange),
            Cell::new(&row.hold_days),
            ui::number_cell(row.price),
            ui::signed_cell(row.change, fund.change_pct),
            ui::number_cell(row.net_value),
            ui::signed_cell(row.premium, fund.premium_rate),
            ui::number_cell(row.volume),
            Cell::new(&row.rating.stars),
        ]);
    }

    table.to_string()
}

pub async fn run(source: &dyn FundSource, all: bool, show_paused: bool) -> Result<()> {
    let pb = ui::new_spinner("Fetching LOF quotes...");
    let result = if all {
        source.all().await
    } else {
        source.high_premium().await
    };
    pb.finish_and_clear();
    let list = result?;

    let update_time = list
        .update_time
        .clone()
        .unwrap_or_else(|| format_timestamp(&Local::now().naive_local()));
    let visible = filter(&list.funds, show_paused);
    debug!(
        total = list.funds.len(),
        visible = visible.len(),
        "Filtered fund list"
    );

    println!(
        "{}  {}\n",
        ui::style_text("LOF 溢价表", ui::StyleType::Title),
        ui::style_text(&format!("更新于 {update_time}"), ui::StyleType::Subtle)
    );

    if visible.is_empty() {
        println!("No funds to display.");
        return Ok(());
    }

    println!("{}", render_table(&visible));
    println!(
        "\n{}",
        ui::style_text(
            &format!("共 {} 只基金，显示 {} 只", list.funds.len(), visible.len()),
            ui::StyleType::Subtle
        )
    );
    Ok(())
}
