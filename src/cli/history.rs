use super::ui;
use crate::core::format::{format_net_value, format_premium, format_price, format_volume};
use crate::core::source::{FundSource, HistoryPoint};
use anyhow::Result;
use comfy_table::Cell;

/// Number of most recent snapshots shown.
const RECENT_POINTS: usize = 10;

/// Takes the last `count` points of an oldest-first series, newest first.
pub fn most_recent(points: &[HistoryPoint], count: usize) -> Vec<&HistoryPoint> {
    points.iter().rev().take(count).collect()
}

pub fn render_table(points: &[&HistoryPoint]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("日期"),
        ui::header_cell("溢价率"),
        ui::header_cell("价格"),
        ui::header_cell("净值"),
        ui::header_cell("成交额"),
    ]);

    for point in points {
        table.add_row(vec![
            Cell::new(&point.date),
            ui::signed_cell(format_premium(point.premium_rate), point.premium_rate),
            ui::number_cell(format_price(point.price)),
            ui::number_cell(format_net_value(point.net_value)),
            ui::number_cell(format_volume(point.volume)),
        ]);
    }

    table.to_string()
}

pub async fn run(source: &dyn FundSource, fund_id: &str, days: u32) -> Result<()> {
    let pb = ui::new_spinner(&format!("Fetching premium history for {fund_id}..."));
    let result = source.history(fund_id, days).await;
    pb.finish_and_clear();
    let history = result?;

    println!(
        "{}\n",
        ui::style_text(&format!("{fund_id} 溢价历史"), ui::StyleType::Title)
    );

    if history.is_empty() {
        println!(
            "{}",
            ui::style_text("No history recorded for this fund.", ui::StyleType::Error)
        );
        return Ok(());
    }

    println!("{}", render_table(&most_recent(&history, RECENT_POINTS)));
    println!(
        "\n{}",
        ui::style_text(
            &format!("http://fund.eastmoney.com/{fund_id}.html"),
            ui::StyleType::Subtle
        )
    );
    Ok(())
}
