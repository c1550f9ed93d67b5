//! Audit pipeline: read the case table, evaluate every case, write the
//! case-level and institution summary tables.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use claimcheck_core::InstitutionSummaryRow;
use claimcheck_core::schema::{CASE_TABLE, SUMMARY_TABLE};
use claimcheck_rules::{CaseEvaluator, Rulebook, summarize};
use claimcheck_store::{CaseTable, TableFormat, summary_batch, write_table};
use tracing::{info, warn};

const OUTPUT_DIR_PREFIX: &str = "判定结果_";

#[derive(Debug)]
pub struct AuditStats {
    pub total_cases: usize,
    pub qualified_cases: usize,
    /// Cases with no institution, left out of the summary.
    pub unattributed_cases: usize,
    pub case_table: PathBuf,
    pub summary_table: PathBuf,
    pub summary: Vec<InstitutionSummaryRow>,
    pub elapsed_secs: f64,
}

/// `判定结果_<stem>` next to the input file.
pub fn default_output_dir(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = input.parent().unwrap_or_else(|| Path::new(""));
    parent.join(format!("{OUTPUT_DIR_PREFIX}{stem}"))
}

/// Run the full audit: read → evaluate → summarize → write.
///
/// Nothing is written unless the input reads cleanly.
pub fn run_audit_pipeline(
    rulebook: &Rulebook,
    input: &Path,
    output_dir: &Path,
    format: TableFormat,
) -> anyhow::Result<AuditStats> {
    let start = Instant::now();

    // 1. Read source table.
    let table = CaseTable::read(input).context("reading case table")?;
    let records = table.records().context("reading case table")?;

    // 2. Evaluate every case.
    let verdicts = CaseEvaluator::new(rulebook).evaluate_batch(&records);
    let qualified_cases = verdicts.iter().filter(|v| v.qualified).count();
    info!(rows = records.len(), qualified = qualified_cases, "evaluated cases");

    // 3. Roll up by institution.
    let unattributed_cases = records.iter().filter(|r| r.institution.is_none()).count();
    if unattributed_cases > 0 {
        warn!(
            cases = unattributed_cases,
            "cases without 机构 are left out of the institution summary"
        );
    }
    let attributed = records
        .iter()
        .zip(&verdicts)
        .filter_map(|(record, verdict)| record.institution.as_deref().map(|i| (i, verdict)));
    let summary = summarize(&rulebook.institutions, attributed);

    // 4. Write both tables.
    let audited = table.with_verdicts(&verdicts).context("writing results")?;
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("writing results: creating {}", output_dir.display()))?;

    let case_table = output_dir.join(format!("{CASE_TABLE}.{}", format.extension()));
    write_table(&case_table, format, audited.schema(), audited.batches())
        .context("writing results")?;

    let summary_table = output_dir.join(format!("{SUMMARY_TABLE}.{}", format.extension()));
    let batch = summary_batch(&summary).context("writing results")?;
    write_table(
        &summary_table,
        format,
        batch.schema(),
        std::slice::from_ref(&batch),
    )
    .context("writing results")?;

    Ok(AuditStats {
        total_cases: records.len(),
        qualified_cases,
        unattributed_cases,
        case_table,
        summary_table,
        summary,
        elapsed_secs: start.elapsed().as_secs_f64(),
    })
}
