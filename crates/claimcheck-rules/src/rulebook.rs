//! The audit rulebook: every fixed table and threshold, built once per run.

use claimcheck_core::{CategoryLabel, InstitutionOrder};
use thiserror::Error;

use crate::classifier::{CategoryClassifier, CategoryRule};
use crate::core_elements::{CoreElement, CoreElementMatcher};
use crate::delay::DelayRiskDetector;
use crate::mandatory::{MandatoryFieldValidator, MandatoryItem};
use crate::overlap::OverlapRateCalculator;

#[derive(Debug, Error)]
pub enum RulebookError {
    #[error("invalid pattern for '{name}': {source}")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("relaxed element '{0}' has an empty suffix")]
    EmptySuffix(String),

    #[error("no core-element list for fallback category {0}")]
    MissingFallback(CategoryLabel),
}

// ── Standard tables ──

/// Category keyword table. Order is significant: first match wins.
const CATEGORY_KEYWORDS: &[(CategoryLabel, &[&str])] = &[
    (CategoryLabel::EmployerLiability, &["雇主责任"]),
    (
        CategoryLabel::SafetyProductionLiability,
        &["安全生产责任", "建筑施工行业安全生产责任", "建工团意"],
    ),
    (CategoryLabel::Accident, &["意外险"]),
    (CategoryLabel::CriticalIllness, &["重大疾病"]),
    (
        CategoryLabel::Property,
        &["财产一切", "财产综合", "财产基本", "机器损坏"],
    ),
    (CategoryLabel::Engineering, &["建工一切", "路桥工程", "安工一切"]),
    (CategoryLabel::PublicLiability, &["公众责任"]),
];

const MANDATORY_PATTERNS: &[(&str, &str)] = &[
    ("查勘时间", r"查勘.{0,3}时间|于.{0,10}(查勘|勘查)|查勘.{0,5}日期"),
    ("查勘地点", r"查勘.{0,3}地点|在.{0,10}(查勘|勘查)|现场位于"),
    ("查勘方式", r"现场|视频|核实|走访|电话|远程|到场"),
    (
        "出险时间",
        r"出险.{0,3}时间|事故.{0,3}时间|发生.{0,5}时间|于.{0,10}(出险|发生)",
    ),
    (
        "出险地点",
        r"出险.{0,3}地点|事故.{0,3}地点|发生.{0,5}地点|位于.{0,10}发生",
    ),
];

const MAX_REPORT_DELAY_DAYS: i64 = 7;
const DELAY_KEYWORDS: &[&str] = &["延迟原因", "原因", "核实", "属实"];

/// How a core element is matched against the survey narrative.
#[derive(Debug, Clone, Copy)]
enum ElementSpec {
    Exact(&'static str),
    Relaxed(&'static str, &'static str),
}

use ElementSpec::{Exact, Relaxed};

const INJURY_ELEMENTS: &[ElementSpec] = &[
    Exact("伤情"),
    Exact("部位"),
    Exact("医院"),
    Exact("岗位"),
    Exact("工种"),
    Exact("工伤"),
    Exact("劳动关系"),
    Exact("分包"),
    Exact("考勤"),
];

const CORE_ELEMENTS: &[(CategoryLabel, &[ElementSpec])] = &[
    (CategoryLabel::EmployerLiability, INJURY_ELEMENTS),
    (CategoryLabel::SafetyProductionLiability, INJURY_ELEMENTS),
    (
        CategoryLabel::Accident,
        &[Exact("伤情"), Exact("部位"), Exact("医院"), Exact("职业")],
    ),
    (
        CategoryLabel::CriticalIllness,
        &[
            Exact("诊断时间"),
            Exact("疾病名称"),
            Exact("疾病编码"),
            Exact("既往病史"),
        ],
    ),
    (
        CategoryLabel::Property,
        &[
            Relaxed("标的", "类型"),
            Relaxed("原因", "类型"),
            Relaxed("维修", "方式"),
            Exact("财务账册"),
            Exact("残值"),
        ],
    ),
    (
        CategoryLabel::Engineering,
        &[
            Exact("工程名称"),
            Relaxed("标的", "类型"),
            Relaxed("原因", "类型"),
            Exact("进度"),
            Exact("维修"),
            Exact("三者"),
        ],
    ),
    (
        CategoryLabel::PublicLiability,
        &[
            Exact("归属"),
            Exact("标识"),
            Exact("监控"),
            Exact("三者"),
            Exact("医疗"),
            Exact("和解"),
            Exact("赔偿"),
        ],
    ),
    (
        CategoryLabel::Other,
        &[Relaxed("损失", "类型"), Exact("后续处理")],
    ),
];

const MIN_CORE_ELEMENTS: usize = 3;
const MAX_OVERLAP_RATE: f64 = 0.8;

const INSTITUTION_ORDER: &[&str] = &[
    "合肥", "芜湖", "蚌埠", "淮南", "马鞍山", "淮北", "铜陵", "安庆", "黄山", "滁州", "阜阳",
    "宿州", "六安", "亳州", "池州", "宣城",
];

/// Immutable rule tables shared by every case in a batch.
///
/// Built once and passed by reference; fields are public so tests and
/// callers can swap in alternative tables.
#[derive(Debug, Clone)]
pub struct Rulebook {
    pub classifier: CategoryClassifier,
    pub mandatory: MandatoryFieldValidator,
    pub delay: DelayRiskDetector,
    pub core_elements: CoreElementMatcher,
    pub overlap: OverlapRateCalculator,
    pub institutions: InstitutionOrder,
}

impl Rulebook {
    /// The rulebook auditors work from (《查勘质量考核基础表》).
    pub fn standard() -> Result<Self, RulebookError> {
        let classifier = CategoryClassifier::new(
            CATEGORY_KEYWORDS
                .iter()
                .map(|(category, keywords)| CategoryRule::new(*category, keywords))
                .collect(),
        );

        let mandatory = MandatoryFieldValidator::new(
            MANDATORY_PATTERNS
                .iter()
                .map(|(name, pattern)| MandatoryItem::new(name, pattern))
                .collect::<Result<_, _>>()?,
        );

        let delay = DelayRiskDetector::new(MAX_REPORT_DELAY_DAYS, DELAY_KEYWORDS);

        let lists = CORE_ELEMENTS
            .iter()
            .map(|(category, decls)| {
                let elements = decls
                    .iter()
                    .map(|decl| match *decl {
                        Exact(name) => Ok(CoreElement::exact(name)),
                        Relaxed(stem, suffix) => CoreElement::relaxed(stem, suffix),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((*category, elements))
            })
            .collect::<Result<Vec<_>, RulebookError>>()?;
        let core_elements = CoreElementMatcher::new(lists, CategoryLabel::Other, MIN_CORE_ELEMENTS)?;

        Ok(Self {
            classifier,
            mandatory,
            delay,
            core_elements,
            overlap: OverlapRateCalculator::new(MAX_OVERLAP_RATE),
            institutions: InstitutionOrder::new(INSTITUTION_ORDER.iter().copied()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_rulebook_builds() {
        let rb = Rulebook::standard().unwrap();
        assert_eq!(rb.classifier.rules().len(), 7);
        assert_eq!(rb.mandatory.items().len(), 5);
        assert_eq!(rb.delay.max_delay_days(), 7);
        assert_eq!(rb.institutions.len(), 16);
    }

    #[test]
    fn every_category_has_a_core_list() {
        let rb = Rulebook::standard().unwrap();
        for category in CategoryLabel::ALL {
            let elements = rb.core_elements.elements_for(category);
            assert!(
                (2..=9).contains(&elements.len()),
                "{category}: {} elements",
                elements.len()
            );
        }
    }

    #[test]
    fn relaxed_elements_keep_full_names() {
        let rb = Rulebook::standard().unwrap();
        let names: Vec<&str> = rb
            .core_elements
            .elements_for(CategoryLabel::Property)
            .iter()
            .map(|e| e.name())
            .collect();
        assert_eq!(names, vec!["标的类型", "原因类型", "维修方式", "财务账册", "残值"]);
    }

    #[test]
    fn institution_order_starts_with_hefei() {
        let rb = Rulebook::standard().unwrap();
        assert_eq!(rb.institutions.rank("合肥"), 0);
        assert_eq!(rb.institutions.rank("宣城"), 15);
        assert_eq!(rb.institutions.rank("上海"), 16);
    }
}
