//! Per-case evaluation: classify, run all four rules, merge into a verdict.

use claimcheck_core::{CaseRecord, CaseVerdict, CategoryLabel};

use crate::Rulebook;
use crate::core_elements::CoreElementOutcome;
use crate::delay::DelayOutcome;
use crate::mandatory::MandatoryOutcome;
use crate::overlap::OverlapOutcome;

/// Every rule outcome for one case, plus the merged verdict.
#[derive(Debug, Clone)]
pub struct CaseEvaluation {
    pub category: CategoryLabel,
    pub mandatory: MandatoryOutcome,
    pub delay: DelayOutcome,
    pub core_elements: CoreElementOutcome,
    pub overlap: OverlapOutcome,
}

impl CaseEvaluation {
    /// Failure reasons in rule order: mandatory, delay, core elements, overlap.
    pub fn reasons(&self) -> Vec<String> {
        let delay = self
            .delay
            .is_failure()
            .then(|| self.delay.reason.clone())
            .flatten();

        [
            self.mandatory.reason(),
            delay,
            self.core_elements.reason(),
            self.overlap.reason(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    pub fn verdict(&self) -> CaseVerdict {
        CaseVerdict::from_reasons(self.category, self.reasons())
    }
}

/// Applies a [`Rulebook`] to case records.
#[derive(Debug, Clone, Copy)]
pub struct CaseEvaluator<'a> {
    rulebook: &'a Rulebook,
}

impl<'a> CaseEvaluator<'a> {
    pub fn new(rulebook: &'a Rulebook) -> Self {
        Self { rulebook }
    }

    /// Run every rule against one case. No rule short-circuits another.
    pub fn evaluate(&self, record: &CaseRecord) -> CaseEvaluation {
        let rb = self.rulebook;
        let survey = record.survey_summary.as_deref();

        let category = rb.classifier.classify(record.insurance_type.as_deref());
        let mandatory = rb.mandatory.check(survey);
        let delay = rb
            .delay
            .check(&record.accident_time, &record.report_time, survey);
        let core_elements = rb.core_elements.check(category, survey);
        let overlap = rb
            .overlap
            .check(record.report_summary.as_deref(), survey);

        CaseEvaluation {
            category,
            mandatory,
            delay,
            core_elements,
            overlap,
        }
    }

    pub fn verdict(&self, record: &CaseRecord) -> CaseVerdict {
        self.evaluate(record).verdict()
    }

    /// Verdicts for a whole batch, in input order.
    #[cfg(not(feature = "parallel"))]
    pub fn evaluate_batch(&self, records: &[CaseRecord]) -> Vec<CaseVerdict> {
        records.iter().map(|r| self.verdict(r)).collect()
    }

    /// Verdicts for a whole batch, in input order. Cases are spread over the
    /// rayon pool; collection preserves order.
    #[cfg(feature = "parallel")]
    pub fn evaluate_batch(&self, records: &[CaseRecord]) -> Vec<CaseVerdict> {
        use rayon::prelude::*;
        records.par_iter().map(|r| self.verdict(r)).collect()
    }
}
