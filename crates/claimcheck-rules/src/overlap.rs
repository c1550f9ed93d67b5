//! Character-set overlap between the report and survey narratives.
//!
//! A survey narrative that reuses nearly every character of the initial
//! report adds no independent findings.

use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlapOutcome {
    pub passed: bool,
    /// Fraction in [0, 1].
    pub rate: f64,
}

impl OverlapOutcome {
    pub fn reason(&self) -> Option<String> {
        (!self.passed).then(|| {
            format!(
                "查勘摘要与报案摘要重合率过高（{:.1}%），缺乏独立调查信息",
                self.rate * 100.0
            )
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OverlapRateCalculator {
    max_rate: f64,
}

impl OverlapRateCalculator {
    /// Rates at or above `max_rate` fail.
    pub fn new(max_rate: f64) -> Self {
        Self { max_rate }
    }

    pub fn check(&self, report_summary: Option<&str>, survey_summary: Option<&str>) -> OverlapOutcome {
        let report = report_summary.map(str::trim).unwrap_or_default();
        let survey = survey_summary.map(str::trim).unwrap_or_default();
        if report.is_empty() || survey.is_empty() {
            return OverlapOutcome {
                passed: true,
                rate: 0.0,
            };
        }

        let rate = overlap_rate(report, survey);
        OverlapOutcome {
            passed: rate < self.max_rate,
            rate,
        }
    }
}

/// Shared distinct characters over the larger of the two character sets.
pub fn overlap_rate(a: &str, b: &str) -> f64 {
    let a_chars: HashSet<char> = a.chars().collect();
    let b_chars: HashSet<char> = b.chars().collect();
    let larger = a_chars.len().max(b_chars.len());
    if larger == 0 {
        return 0.0;
    }
    a_chars.intersection(&b_chars).count() as f64 / larger as f64
}
