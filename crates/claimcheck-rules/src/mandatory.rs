//! Mandatory information in the survey narrative.
//!
//! Five facts must be stated: when and where the survey happened, how it was
//! carried out, and when and where the incident happened. Each is detected by
//! its own pattern, evaluated independently.

use regex::Regex;

use crate::RulebookError;

/// A required item and the pattern that evidences it.
#[derive(Debug, Clone)]
pub struct MandatoryItem {
    name: String,
    pattern: Regex,
}

impl MandatoryItem {
    pub fn new(name: &str, pattern: &str) -> Result<Self, RulebookError> {
        let pattern = Regex::new(pattern).map_err(|source| RulebookError::Pattern {
            name: name.to_string(),
            source,
        })?;
        Ok(Self {
            name: name.to_string(),
            pattern,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_present(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MandatoryOutcome {
    pub passed: bool,
    /// Missing item names in declared order.
    pub missing: Vec<String>,
}

impl MandatoryOutcome {
    pub fn reason(&self) -> Option<String> {
        (!self.passed).then(|| format!("必填项缺失：{}", self.missing.join(", ")))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MandatoryFieldValidator {
    items: Vec<MandatoryItem>,
}

impl MandatoryFieldValidator {
    pub fn new(items: Vec<MandatoryItem>) -> Self {
        Self { items }
    }

    pub fn check(&self, survey_summary: Option<&str>) -> MandatoryOutcome {
        let missing: Vec<String> = match survey_summary {
            None => self.items.iter().map(|i| i.name.clone()).collect(),
            Some(text) => self
                .items
                .iter()
                .filter(|i| !i.is_present(text))
                .map(|i| i.name.clone())
                .collect(),
        };
        MandatoryOutcome {
            passed: missing.is_empty(),
            missing,
        }
    }

    pub fn items(&self) -> &[MandatoryItem] {
        &self.items
    }
}
