use crate::model::GenerationReport;

/// Render the console summary for a generation run.
pub fn render_summary(report: &GenerationReport) -> String {
    let rows = |name: &str| {
        report
            .table(name)
            .map(|table| table.rows_generated)
            .unwrap_or(0)
    };

    let mut lines = Vec::new();
    lines.push("DATA GENERATION SUMMARY".to_string());
    lines.push(format!("Customers:     {}", rows("customers")));
    lines.push(format!("Products:      {}", rows("products")));
    lines.push(format!(
        "Orders:        {} ({} weekend orders skipped)",
        rows("sales"),
        report.weekend_orders_skipped
    ));
    lines.push(format!("Deliveries:    {}", rows("deliveries")));
    lines.push(format!("Total Revenue: {:.2}", report.total_revenue));
    lines.push(format!("Avg Order:     {:.2}", report.average_order_value));
    lines.push(format!(
        "On-time Rate:  {:.1}% (avg {:.1} min)",
        report.on_time_rate * 100.0,
        report.average_delivery_minutes
    ));
    if let (Some(first), Some(last)) = (report.first_order_date, report.last_order_date) {
        lines.push(format!("Date Range:    {first} to {last}"));
    }
    lines.push(String::new());
    for table in &report.tables {
        lines.push(format!("- {} ({} rows)", table.path.display(), table.rows_generated));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::model::TableReport;

    #[test]
    fn summary_lists_tables_and_totals() {
        let mut report = GenerationReport::new("run".to_string(), 42);
        report.record_table(TableReport {
            table: "sales".to_string(),
            path: PathBuf::from("data/raw/sales_data.csv"),
            rows_generated: 3,
            bytes_written: 120,
            fingerprint: "abc".to_string(),
        });
        report.total_revenue = 512.5;

        let summary = render_summary(&report);
        assert!(summary.contains("Orders:        3"));
        assert!(summary.contains("Total Revenue: 512.50"));
        assert!(summary.contains("data/raw/sales_data.csv (3 rows)"));
        assert!(!summary.contains("Date Range"));
    }
}
