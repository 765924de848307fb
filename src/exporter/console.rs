// file: src/exporter/console.rs
// description: human-readable console rendering of a run report

use crate::analysis::{Report, percentage};

const BANNER_WIDTH: usize = 60;

pub fn banner(title: &str) {
    println!("\n{}", "=".repeat(BANNER_WIDTH));
    println!("{}", title.to_uppercase());
    println!("{}\n", "=".repeat(BANNER_WIDTH));
}

/// Prints the full run summary: counters, top-N of every table with
/// percentages, and the processed/failed totals.
pub fn print_report(report: &Report, top_n: usize) {
    banner(&format!("{} analysis results", report.run.analysis));

    for counter in &report.counters {
        println!("{:<40}: {}", counter.name, counter.value);
    }
    if !report.counters.is_empty() {
        println!();
    }

    for table in &report.tables {
        println!("TOP {} — {}", top_n.min(table.distinct), table.name);
        println!("{}", "-".repeat(BANNER_WIDTH));

        if table.counts.is_empty() {
            println!("  (no entries)\n");
            continue;
        }

        for (rank, (label, count)) in table.counts.top(top_n).into_iter().enumerate() {
            println!(
                "{:2}. {:<32} : {:>6}  ({})",
                rank + 1,
                label,
                count,
                format_percentage(count, table.total)
            );
        }
        println!(
            "    {} distinct labels, {} total\n",
            table.distinct, table.total
        );
    }

    println!("{}", "-".repeat(BANNER_WIDTH));
    println!(
        "Items processed: {}  |  failed: {}  |  duration: {}s",
        report.run.items_processed, report.run.items_failed, report.run.duration_secs
    );
}

/// Division-by-zero-safe rendering; an empty total reads "N/A".
pub fn format_percentage(count: u64, total: u64) -> String {
    match percentage(count, total) {
        Some(pct) => format!("{:.1}%", pct),
        None => "N/A".to_string(),
    }
}
