use std::fmt;

use serde::{Deserialize, Serialize};

/// Insurance product grouping used to select the core-element list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryLabel {
    #[serde(rename = "雇主类")]
    EmployerLiability,
    #[serde(rename = "安责类")]
    SafetyProductionLiability,
    #[serde(rename = "意外类")]
    Accident,
    #[serde(rename = "重疾类")]
    CriticalIllness,
    #[serde(rename = "财产类")]
    Property,
    #[serde(rename = "工程类")]
    Engineering,
    #[serde(rename = "公众类")]
    PublicLiability,
    #[serde(rename = "其他类")]
    Other,
}

impl CategoryLabel {
    pub const ALL: [CategoryLabel; 8] = [
        Self::EmployerLiability,
        Self::SafetyProductionLiability,
        Self::Accident,
        Self::CriticalIllness,
        Self::Property,
        Self::Engineering,
        Self::PublicLiability,
        Self::Other,
    ];

    /// Label as written in the rulebook and the output table.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmployerLiability => "雇主类",
            Self::SafetyProductionLiability => "安责类",
            Self::Accident => "意外类",
            Self::CriticalIllness => "重疾类",
            Self::Property => "财产类",
            Self::Engineering => "工程类",
            Self::PublicLiability => "公众类",
            Self::Other => "其他类",
        }
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
