//! Category-specific core elements of a thorough survey.
//!
//! Each category declares an ordered list of topics the narrative should
//! cover. Most match as plain substrings. Compound nouns ending in a class
//! suffix (类型, 方式) are declared `Relaxed`: the stem must appear, followed
//! within two characters by the suffix's first character, with the rest of
//! the suffix optional. "标的物类别" thus covers 标的类型.

use claimcheck_core::CategoryLabel;
use regex::Regex;

use crate::RulebookError;

/// Maximum characters allowed between a relaxed element's stem and suffix.
const RELAXED_GAP: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchMode {
    Exact,
    Relaxed { stem: String, suffix: String },
}

#[derive(Debug, Clone)]
pub struct CoreElement {
    name: String,
    mode: MatchMode,
    pattern: Option<Regex>,
}

impl CoreElement {
    pub fn exact(name: &str) -> Self {
        Self {
            name: name.to_string(),
            mode: MatchMode::Exact,
            pattern: None,
        }
    }

    pub fn relaxed(stem: &str, suffix: &str) -> Result<Self, RulebookError> {
        let name = format!("{stem}{suffix}");
        let mut chars = suffix.chars();
        let head = chars.next().ok_or_else(|| RulebookError::EmptySuffix(name.clone()))?;
        let tail: String = chars.collect();

        let mut pattern = format!(
            "{}.{{0,{RELAXED_GAP}}}{}",
            regex::escape(stem),
            regex::escape(&head.to_string())
        );
        if !tail.is_empty() {
            pattern.push_str(&format!("(?:{})?", regex::escape(&tail)));
        }
        let pattern = Regex::new(&pattern).map_err(|source| RulebookError::Pattern {
            name: name.clone(),
            source,
        })?;

        Ok(Self {
            name,
            mode: MatchMode::Relaxed {
                stem: stem.to_string(),
                suffix: suffix.to_string(),
            },
            pattern: Some(pattern),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> &MatchMode {
        &self.mode
    }

    pub fn matches(&self, text: &str) -> bool {
        text.contains(self.name.as_str())
            || self.pattern.as_ref().is_some_and(|p| p.is_match(text))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreElementOutcome {
    pub passed: bool,
    pub matched: usize,
    pub required: usize,
    /// Unmatched element names in declared order.
    pub missing: Vec<String>,
}

impl CoreElementOutcome {
    /// Failure reason suggesting the first three missing elements.
    pub fn reason(&self) -> Option<String> {
        if self.passed {
            return None;
        }
        let suggested: Vec<&str> = self.missing.iter().take(3).map(String::as_str).collect();
        Some(format!(
            "核心要素不足（需{}个，仅{}个），建议补充：{}",
            self.required,
            self.matched,
            suggested.join(", ")
        ))
    }
}

#[derive(Debug, Clone)]
pub struct CoreElementMatcher {
    lists: Vec<(CategoryLabel, Vec<CoreElement>)>,
    fallback: CategoryLabel,
    min_required: usize,
}

impl CoreElementMatcher {
    /// `fallback` names the list used by categories without their own.
    pub fn new(
        lists: Vec<(CategoryLabel, Vec<CoreElement>)>,
        fallback: CategoryLabel,
        min_required: usize,
    ) -> Result<Self, RulebookError> {
        if !lists.iter().any(|(c, _)| *c == fallback) {
            return Err(RulebookError::MissingFallback(fallback));
        }
        Ok(Self {
            lists,
            fallback,
            min_required,
        })
    }

    /// The element list that applies to a category.
    pub fn elements_for(&self, category: CategoryLabel) -> &[CoreElement] {
        self.list(category)
            .or_else(|| self.list(self.fallback))
            .unwrap_or(&[])
    }

    fn list(&self, category: CategoryLabel) -> Option<&[CoreElement]> {
        self.lists
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, elements)| elements.as_slice())
    }

    /// Matches needed to pass: the configured minimum, capped by list length.
    pub fn required_for(&self, category: CategoryLabel) -> usize {
        self.min_required.min(self.elements_for(category).len())
    }

    pub fn check(&self, category: CategoryLabel, survey_summary: Option<&str>) -> CoreElementOutcome {
        let elements = self.elements_for(category);
        let required = self.required_for(category);

        let Some(text) = survey_summary else {
            return CoreElementOutcome {
                passed: false,
                matched: 0,
                required,
                missing: elements.iter().map(|e| e.name.clone()).collect(),
            };
        };

        let (hit, miss): (Vec<&CoreElement>, Vec<&CoreElement>) =
            elements.iter().partition(|e| e.matches(text));

        CoreElementOutcome {
            passed: hit.len() >= required,
            matched: hit.len(),
            required,
            missing: miss.into_iter().map(|e| e.name.clone()).collect(),
        }
    }
}
