//! Per-case verdicts and the institution rollup row.

use serde::{Deserialize, Serialize};

use crate::CategoryLabel;

pub const QUALIFIED: &str = "合格";
pub const UNQUALIFIED: &str = "不合格";

/// Delimiter between rule reasons in the output reason column.
pub const REASON_DELIMITER: &str = "；";

/// Label of the synthetic grand-total row.
pub const TOTAL_ROW_LABEL: &str = "合计";

/// Outcome of auditing one case.
///
/// `reasons` holds one entry per failing rule in fixed rule order:
/// mandatory fields, report delay, core elements, overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseVerdict {
    pub category: CategoryLabel,
    pub qualified: bool,
    pub reasons: Vec<String>,
}

impl CaseVerdict {
    pub fn from_reasons(category: CategoryLabel, reasons: Vec<String>) -> Self {
        Self {
            category,
            qualified: reasons.is_empty(),
            reasons,
        }
    }

    /// 合格 / 不合格.
    pub fn label(&self) -> &'static str {
        if self.qualified { QUALIFIED } else { UNQUALIFIED }
    }

    /// All reasons joined for the output table; empty when qualified.
    pub fn reason_text(&self) -> String {
        self.reasons.join(REASON_DELIMITER)
    }
}

/// One row of the institution summary table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionSummaryRow {
    pub institution: String,
    pub total_cases: u64,
    pub qualified_cases: u64,
    pub qualified_rate: String,
}

impl InstitutionSummaryRow {
    pub fn new(institution: impl Into<String>, total_cases: u64, qualified_cases: u64) -> Self {
        Self {
            institution: institution.into(),
            total_cases,
            qualified_cases,
            qualified_rate: format_rate(qualified_cases, total_cases),
        }
    }
}

/// Qualified share as a percentage with one decimal: `2 / 3` → `"66.7%"`.
///
/// An empty group has no rate and renders as `"0%"`.
pub fn format_rate(qualified: u64, total: u64) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", qualified as f64 / total as f64 * 100.0)
}
