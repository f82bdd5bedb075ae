use crate::model::CleaningReport;

/// Render the data quality report printed after a cleaning run.
pub fn render_summary(report: &CleaningReport) -> String {
    let summary = &report.summary;
    let mut lines = Vec::new();

    lines.push("DATA QUALITY REPORT".to_string());
    lines.push(String::new());
    lines.push("Customers:".to_string());
    lines.push(format!("  - Total records: {}", summary.customers.total));
    lines.push(format!("  - Active customers: {}", summary.customers.active));
    lines.push(format!("  - Unique cities: {}", summary.customers.unique_cities));
    lines.push(String::new());

    lines.push("Products:".to_string());
    lines.push(format!("  - Total products: {}", summary.products.total));
    lines.push(format!("  - Active products: {}", summary.products.active));
    lines.push(format!("  - Categories: {}", summary.products.categories));
    lines.push(format!("  - Out of stock: {}", summary.products.out_of_stock));
    lines.push(String::new());

    lines.push("Sales:".to_string());
    lines.push(format!("  - Total orders: {}", summary.sales.total));
    lines.push(format!("  - Completed orders: {}", summary.sales.completed));
    lines.push(format!("  - Total revenue: {:.2}", summary.sales.revenue));
    lines.push(format!(
        "  - Average order value: {:.2}",
        summary.sales.average_order_value
    ));
    if let (Some(first), Some(last)) = (summary.sales.first_order_date, summary.sales.last_order_date)
    {
        lines.push(format!("  - Date range: {first} to {last}"));
    }
    lines.push(String::new());

    lines.push("Deliveries:".to_string());
    lines.push(format!("  - Total deliveries: {}", summary.deliveries.total));
    lines.push(format!(
        "  - On-time deliveries: {} ({:.1}%)",
        summary.deliveries.on_time,
        summary.deliveries.on_time_rate * 100.0
    ));
    lines.push(format!(
        "  - Average delivery time: {:.1} minutes",
        summary.deliveries.average_minutes
    ));
    lines.push(format!(
        "  - Average rating: {:.2}/5",
        summary.deliveries.average_rating
    ));
    lines.push(String::new());

    lines.push("| table | rows_in | duplicates | invalid | malformed | rows_out |".to_string());
    lines.push("| --- | --- | --- | --- | --- | --- |".to_string());
    for table in &report.tables {
        let stats = &table.stats;
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            table.table,
            stats.rows_in,
            stats.duplicates,
            stats.invalid,
            stats.malformed,
            stats.rows_out
        ));
    }
    lines.push(String::new());

    lines.push("Cleaned files:".to_string());
    for table in &report.tables {
        lines.push(format!("  - {}", table.path.display()));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::NaiveDate;

    use super::*;
    use crate::model::{StepStats, TableReport};

    #[test]
    fn summary_includes_step_counts() {
        let mut report = CleaningReport::new(
            "run".to_string(),
            PathBuf::from("data/raw"),
            PathBuf::from("data/processed"),
        );
        report.record_table(TableReport {
            table: "sales".to_string(),
            path: PathBuf::from("data/processed/sales_clean.csv"),
            stats: StepStats {
                rows_in: 10,
                duplicates: 2,
                invalid: 1,
                malformed: 3,
                rows_out: 7,
            },
            bytes_written: 512,
        });
        report.summary.deliveries.on_time_rate = 0.925;
        report.summary.sales.first_order_date = NaiveDate::from_ymd_opt(2023, 1, 1);
        report.summary.sales.last_order_date = NaiveDate::from_ymd_opt(2024, 12, 31);

        let rendered = render_summary(&report);
        assert!(rendered.contains("| sales | 10 | 2 | 1 | 3 | 7 |"));
        assert!(rendered.contains("On-time deliveries: 0 (92.5%)"));
        assert!(rendered.contains("Date range: 2023-01-01 to 2024-12-31"));
        assert!(rendered.contains("data/processed/sales_clean.csv"));
    }
}
