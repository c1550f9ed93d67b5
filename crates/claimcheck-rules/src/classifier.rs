//! Keyword classification of insurance product labels.
//!
//! Product labels are free text ("建筑施工行业安全生产责任保险（2023版）").
//! The classifier scans an ordered table of (category, keywords) and returns
//! the first category with a keyword contained in the label. Table order is
//! part of the contract: earlier categories win ties.

use claimcheck_core::CategoryLabel;

/// One row of the category table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub category: CategoryLabel,
    /// Substrings checked in declared order.
    pub keywords: Vec<String>,
}

impl CategoryRule {
    pub fn new(category: CategoryLabel, keywords: &[&str]) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn first_match(&self, label: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| label.contains(k.as_str()))
            .map(String::as_str)
    }
}

/// First-match-wins classifier over an ordered category table.
#[derive(Debug, Clone, Default)]
pub struct CategoryClassifier {
    rules: Vec<CategoryRule>,
}

impl CategoryClassifier {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    /// Classify a product label. Absent labels and labels matching no
    /// keyword are [`CategoryLabel::Other`].
    pub fn classify(&self, insurance_type: Option<&str>) -> CategoryLabel {
        let Some(label) = insurance_type else {
            return CategoryLabel::Other;
        };
        self.rules
            .iter()
            .find(|rule| rule.first_match(label).is_some())
            .map(|rule| rule.category)
            .unwrap_or(CategoryLabel::Other)
    }

    pub fn rules(&self) -> &[CategoryRule] {
        &self.rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rulebook;

    fn standard() -> CategoryClassifier {
        Rulebook::standard().unwrap().classifier
    }

    #[test]
    fn absent_label_is_other() {
        assert_eq!(standard().classify(None), CategoryLabel::Other);
    }

    #[test]
    fn unmatched_label_is_other() {
        let clf = standard();
        assert_eq!(clf.classify(Some("家庭财产保险")), CategoryLabel::Other);
        assert_eq!(clf.classify(Some("")), CategoryLabel::Other);
    }

    #[test]
    fn keyword_matches_as_substring() {
        let clf = standard();
        assert_eq!(
            clf.classify(Some("雇主责任保险（2015版）")),
            CategoryLabel::EmployerLiability
        );
        assert_eq!(clf.classify(Some("团体意外险")), CategoryLabel::Accident);
        assert_eq!(
            clf.classify(Some("个人重大疾病保险")),
            CategoryLabel::CriticalIllness
        );
        assert_eq!(clf.classify(Some("机器损坏保险")), CategoryLabel::Property);
        assert_eq!(clf.classify(Some("路桥工程一切险")), CategoryLabel::Engineering);
        assert_eq!(
            clf.classify(Some("公众责任保险")),
            CategoryLabel::PublicLiability
        );
    }

    #[test]
    fn earlier_category_wins() {
        let clf = standard();
        // Contains both 雇主责任 and 公众责任; 雇主类 is declared first.
        assert_eq!(
            clf.classify(Some("雇主责任及公众责任组合保险")),
            CategoryLabel::EmployerLiability
        );
        // 建工团意 (安责类) is declared before 意外险 (意外类).
        assert_eq!(
            clf.classify(Some("建工团意意外险")),
            CategoryLabel::SafetyProductionLiability
        );
    }

    #[test]
    fn table_order_is_the_contract() {
        let clf = CategoryClassifier::new(vec![
            CategoryRule::new(CategoryLabel::PublicLiability, &["责任"]),
            CategoryRule::new(CategoryLabel::EmployerLiability, &["雇主责任"]),
        ]);
        assert_eq!(
            clf.classify(Some("雇主责任保险")),
            CategoryLabel::PublicLiability
        );
    }

    #[test]
    fn classification_is_deterministic() {
        let clf = standard();
        let label = Some("建筑施工行业安全生产责任保险");
        let first = clf.classify(label);
        for _ in 0..10 {
            assert_eq!(clf.classify(label), first);
        }
        assert_eq!(first, CategoryLabel::SafetyProductionLiability);
    }
}
