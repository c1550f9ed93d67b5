//! Report-delay risk.
//!
//! A case reported more than `max_delay_days` after the accident must carry a
//! justification in the survey narrative. Missing or unparsable timestamps
//! give no delay signal and the rule passes.

use chrono::{NaiveDateTime, TimeDelta};
use claimcheck_core::TimestampField;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelayOutcome {
    pub triggered: bool,
    pub passed: bool,
    /// Whole days between accident and report, when both are known.
    pub delay_days: Option<i64>,
    pub reason: Option<String>,
}

impl DelayOutcome {
    fn quiet(delay_days: Option<i64>) -> Self {
        Self {
            triggered: false,
            passed: true,
            delay_days,
            reason: None,
        }
    }

    /// The rule only counts against a case when it fired and found no justification.
    pub fn is_failure(&self) -> bool {
        self.triggered && !self.passed
    }
}

#[derive(Debug, Clone)]
pub struct DelayRiskDetector {
    max_delay_days: i64,
    keywords: Vec<String>,
}

impl DelayRiskDetector {
    pub fn new(max_delay_days: i64, keywords: &[&str]) -> Self {
        Self {
            max_delay_days,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    pub fn max_delay_days(&self) -> i64 {
        self.max_delay_days
    }

    pub fn check(
        &self,
        accident_time: &TimestampField,
        report_time: &TimestampField,
        survey_summary: Option<&str>,
    ) -> DelayOutcome {
        let (accident, report) = match (accident_time, report_time) {
            (TimestampField::Parsed(a), TimestampField::Parsed(r)) => (*a, *r),
            _ => {
                for field in [accident_time, report_time] {
                    if let TimestampField::Unparsable(raw) = field {
                        debug!(raw = %raw, "unparsable timestamp, delay rule skipped");
                    }
                }
                return DelayOutcome::quiet(None);
            }
        };

        let days = delay_days(accident, report);
        if days <= self.max_delay_days {
            return DelayOutcome::quiet(Some(days));
        }

        let reason = match survey_summary {
            None => Some(format!("报案延迟{days}天，查勘摘要未填写延迟原因")),
            Some(text) if self.keywords.iter().any(|k| text.contains(k.as_str())) => None,
            Some(_) => Some(format!("报案延迟{days}天，查勘摘要未包含延迟原因说明")),
        };

        DelayOutcome {
            triggered: true,
            passed: reason.is_none(),
            delay_days: Some(days),
            reason,
        }
    }
}

/// Elapsed whole days from accident to report, floored.
///
/// 7 days 23 hours → 7; a report 12 hours before the accident → -1.
pub fn delay_days(accident: NaiveDateTime, report: NaiveDateTime) -> i64 {
    let elapsed = report - accident;
    let days = elapsed.num_days();
    if elapsed < TimeDelta::days(days) {
        days - 1
    } else {
        days
    }
}
