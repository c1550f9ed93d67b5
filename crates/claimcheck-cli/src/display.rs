//! Console report for a finished audit run.

use arrow::util::pretty::pretty_format_batches;
use claimcheck_core::{InstitutionSummaryRow, format_rate};
use claimcheck_store::summary_batch;

use crate::audit::AuditStats;

pub fn print_stats(stats: &AuditStats) {
    let output_dir = stats
        .case_table
        .parent()
        .unwrap_or(stats.case_table.as_path());

    println!("=== 查勘质量审核完成 ===");
    println!("  {:<10} {}", "总案件数", stats.total_cases);
    println!("  {:<10} {}", "合格案件", stats.qualified_cases);
    println!(
        "  {:<10} {}",
        "合格率",
        format_rate(stats.qualified_cases as u64, stats.total_cases as u64)
    );
    if stats.unattributed_cases > 0 {
        println!("  {:<10} {}", "无机构案件", stats.unattributed_cases);
    }
    println!("  {:<10} {}", "输出目录", output_dir.display());
    println!("  {:<10} {:.2}s", "耗时", stats.elapsed_secs);
    println!();
}

pub fn print_summary(rows: &[InstitutionSummaryRow]) -> anyhow::Result<()> {
    println!("{}", summary_table(rows)?);
    Ok(())
}

/// The institution summary as a bordered text table.
fn summary_table(rows: &[InstitutionSummaryRow]) -> anyhow::Result<String> {
    let batch = summary_batch(rows)?;
    Ok(pretty_format_batches(&[batch])?.to_string())
}
