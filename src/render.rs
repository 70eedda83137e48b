//! Text and JSON presentation of a `DashboardReport`.

use analytics::{DashboardReport, ScatterSeries, SummaryTable, Totals};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Table};
use core_types::Dataset;
use rust_decimal::Decimal;
use std::fmt::{self, Write};

const NO_DATA: &str = "No data for current filters.";

/// Lists the values a user can filter on.
pub fn options(dataset: &Dataset) -> String {
    let mut table = new_table(vec!["Filter", "Options"]);
    table.add_row(vec!["Stores".to_string(), dataset.distinct_stores().join(", ")]);
    table.add_row(vec!["Categories".to_string(), dataset.distinct_categories().join(", ")]);
    table.add_row(vec!["Shelf levels".to_string(), dataset.distinct_shelf_levels().join(", ")]);
    let span = match dataset.date_bounds() {
        Some((start, end)) => format!("{} to {}", start, end),
        None => "n/a".to_string(),
    };
    table.add_row(vec!["Dates".to_string(), span]);
    table.to_string()
}

/// The whole report as a single JSON document.
pub fn json(report: &DashboardReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

/// The whole report as terminal tables, one section per dashboard tab.
pub fn report(report: &DashboardReport) -> Result<String, fmt::Error> {
    let mut out = String::new();
    let selection = &report.selection;

    writeln!(out, "Retail Sales & Shelf Analytics")?;
    writeln!(
        out,
        "Stores: {} | Categories: {} | Shelf levels: {} | Dates: {} to {}",
        join_or_none(&selection.stores),
        join_or_none(&selection.categories),
        join_or_none(&selection.shelf_levels),
        selection.start,
        selection.end,
    )?;

    section(&mut out, "Overall KPIs")?;
    let kpis = &report.kpis;
    let mut table = new_table(vec!["Total Units Sold", "Total Revenue", "Average Price"]);
    table.add_row(vec![
        kpis.total_units_sold.to_string(),
        money(kpis.total_revenue),
        kpis.average_price.map(money).unwrap_or_else(|| "n/a".to_string()),
    ]);
    writeln!(out, "{table}")?;

    if !report.has_data() {
        writeln!(out, "\n{NO_DATA}")?;
        return Ok(out);
    }

    section(&mut out, "Units Sold by Shelf Level")?;
    writeln!(out, "{}", totals_table("Shelf Level", &report.units_by_shelf))?;

    section(&mut out, "Revenue by Store")?;
    writeln!(out, "{}", totals_table("Store", &report.revenue_by_store))?;

    section(&mut out, "Distribution of Units Sold by Shelf")?;
    let mut table = new_table(vec!["Shelf Level", "Count", "Min", "Q1", "Median", "Q3", "Max"]);
    for (shelf, distribution) in &report.units_distribution_by_shelf {
        let s = &distribution.stats;
        table.add_row(vec![
            Cell::new(shelf),
            numeric(distribution.values.len()),
            numeric(number(s.min)),
            numeric(number(s.q1)),
            numeric(number(s.median)),
            numeric(number(s.q3)),
            numeric(number(s.max)),
        ]);
    }
    writeln!(out, "{table}")?;

    section(&mut out, "Price vs Units Sold by Shelf")?;
    writeln!(out, "{}", trend_table("Shelf Level", &report.price_vs_units_by_shelf))?;

    section(&mut out, "Units Sold per Category")?;
    writeln!(out, "{}", totals_table("Category", &report.units_by_category))?;

    section(&mut out, "Revenue Share by Category")?;
    let mut table = new_table(vec!["Category", "Revenue", "Share"]);
    for (category, share) in &report.revenue_share_by_category {
        table.add_row(vec![
            Cell::new(category),
            numeric(money(share.revenue)),
            numeric(share.percent.map(|p| format!("{}%", p.round_dp(1))).unwrap_or_else(|| "n/a".to_string())),
        ]);
    }
    writeln!(out, "{table}")?;

    section(&mut out, "Daily Units Sold & Revenue")?;
    let mut table = new_table(vec!["Date", "Units Sold", "Revenue"]);
    for (date, totals) in &report.daily_series {
        table.add_row(vec![
            Cell::new(date),
            numeric(totals.units_sold),
            numeric(money(totals.revenue)),
        ]);
    }
    writeln!(out, "{table}")?;

    section(&mut out, "Average Units Sold by Promotion")?;
    let mut table = new_table(vec!["Promotion", "Average Units Sold"]);
    for (flag, mean) in &report.promotion_impact {
        table.add_row(vec![Cell::new(flag), numeric(number(*mean))]);
    }
    writeln!(out, "{table}")?;

    section(&mut out, "Foot Traffic vs Units Sold")?;
    writeln!(out, "{}", trend_table("Store", &report.foot_traffic_vs_units_by_store))?;

    Ok(out)
}

fn section(out: &mut String, title: &str) -> fmt::Result {
    writeln!(out, "\n## {title}")
}

fn new_table<T: Into<Cell>>(header: Vec<T>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(header);
    table
}

fn numeric<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).set_alignment(CellAlignment::Right)
}

fn totals_table(key: &str, rows: &SummaryTable<String, Totals>) -> Table {
    let mut table = new_table(vec![key, "Units Sold", "Revenue"]);
    for (group, totals) in rows {
        table.add_row(vec![
            Cell::new(group),
            numeric(totals.units_sold),
            numeric(money(totals.revenue)),
        ]);
    }
    table
}

fn trend_table(key: &str, rows: &SummaryTable<String, ScatterSeries>) -> Table {
    let mut table = new_table(vec![key, "Points", "Slope", "Intercept", "R²"]);
    for (group, series) in rows {
        let (slope, intercept, r_squared) = match &series.trendline {
            Some(fit) => (
                number(fit.slope),
                number(fit.intercept),
                fit.r_squared.map(number).unwrap_or_else(|| "n/a".to_string()),
            ),
            None => ("n/a".to_string(), "n/a".to_string(), "n/a".to_string()),
        };
        table.add_row(vec![
            Cell::new(group),
            numeric(series.points.len()),
            numeric(slope),
            numeric(intercept),
            numeric(r_squared),
        ]);
    }
    table
}

fn join_or_none<'a, I: IntoIterator<Item = &'a String>>(values: I) -> String {
    let joined: Vec<&str> = values.into_iter().map(String::as_str).collect();
    if joined.is_empty() {
        "(none)".to_string()
    } else {
        joined.join(", ")
    }
}

/// Two decimal places, trailing zeros kept.
fn number(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

/// `$1,234.50` style currency.
fn money(value: Decimal) -> String {
    let fixed = number(value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::new();
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if value.is_sign_negative() && !value.is_zero() { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::{AnalyticsEngine, FilterSelection};
    use chrono::NaiveDate;
    use core_types::{PromotionFlag, SalesRecord};
    use rust_decimal_macros::dec;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            SalesRecord {
                store_id: "A".to_string(),
                category: "Snacks".to_string(),
                shelf_level: "Eye Level".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                units_sold: 10,
                revenue: dec!(20.0),
                price: dec!(2.0),
                promotion: PromotionFlag::NoPromotion,
                foot_traffic: 100,
            },
            SalesRecord {
                store_id: "A".to_string(),
                category: "Snacks".to_string(),
                shelf_level: "Eye Level".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                units_sold: 15,
                revenue: dec!(33.0),
                price: dec!(2.2),
                promotion: PromotionFlag::Promotion,
                foot_traffic: 140,
            },
        ])
    }

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(dec!(0)), "$0.00");
        assert_eq!(money(dec!(53)), "$53.00");
        assert_eq!(money(dec!(1234.5)), "$1,234.50");
        assert_eq!(money(dec!(1234567.891)), "$1,234,567.89");
        assert_eq!(money(dec!(-12.346)), "-$12.35");
    }

    #[test]
    fn report_renders_every_section() {
        let data = dataset();
        let report = AnalyticsEngine::new().calculate(&data, &FilterSelection::all(&data));
        let text = super::report(&report).unwrap();

        assert!(text.contains("Overall KPIs"));
        assert!(text.contains("$53.00"));
        assert!(text.contains("Units Sold by Shelf Level"));
        assert!(text.contains("Daily Units Sold & Revenue"));
        assert!(text.contains("No Promotion"));
        assert!(text.contains("Foot Traffic vs Units Sold"));
        assert!(!text.contains(NO_DATA));
    }

    #[test]
    fn empty_selection_renders_no_data_state() {
        let data = dataset();
        let selection = FilterSelection::all(&data).with_categories(Vec::<String>::new());
        let report = AnalyticsEngine::new().calculate(&data, &selection);
        let text = super::report(&report).unwrap();

        assert!(text.contains(NO_DATA));
        assert!(text.contains("n/a"));
        assert!(text.contains("(none)"));
        assert!(!text.contains("Revenue by Store"));
    }

    #[test]
    fn json_uses_labels_and_pairs() {
        let data = dataset();
        let report = AnalyticsEngine::new().calculate(&data, &FilterSelection::all(&data));
        let value: serde_json::Value = serde_json::from_str(&json(&report).unwrap()).unwrap();

        assert_eq!(value["kpis"]["total_units_sold"], 25);
        assert_eq!(value["promotion_impact"][0][0], "No Promotion");
        assert_eq!(value["promotion_impact"][1][0], "Promotion");
        assert_eq!(value["revenue_by_store"][0][0], "A");
        assert!(value.get("filtered").is_none());
    }

    #[test]
    fn options_lists_filter_values() {
        let text = options(&dataset());
        assert!(text.contains("Eye Level"));
        assert!(text.contains("2024-01-01 to 2024-01-02"));
    }
}
