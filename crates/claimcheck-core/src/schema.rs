/// Column names of the input and output tables.
pub mod columns {
    pub const INSURANCE_TYPE: &str = "险种";
    pub const ACCIDENT_TIME: &str = "出险时间";
    pub const REPORT_TIME: &str = "报案时间";
    pub const REPORT_SUMMARY: &str = "报案摘要";
    pub const SURVEY_SUMMARY: &str = "查勘摘要";
    pub const INSTITUTION: &str = "机构";

    // Appended to the case-level table.
    pub const CATEGORY: &str = "险种分类";
    pub const VERDICT: &str = "判定结果";
    pub const REASON: &str = "不合格原因";

    // Institution summary table.
    pub const TOTAL_CASES: &str = "总案件数";
    pub const QUALIFIED_CASES: &str = "合格案件数";
    pub const QUALIFIED_RATE: &str = "合格率";
}

/// Output table names (file stems).
pub const CASE_TABLE: &str = "案件清单表";
pub const SUMMARY_TABLE: &str = "机构汇总表";

/// Arrow schema definitions for audit output.
pub mod audit {
    use arrow::datatypes::{DataType, Field, Schema};

    use super::columns;

    /// The three columns appended to every case row, in output order.
    pub fn verdict_fields() -> Vec<Field> {
        vec![
            Field::new(columns::CATEGORY, DataType::Utf8, false),
            Field::new(columns::VERDICT, DataType::Utf8, false),
            Field::new(columns::REASON, DataType::Utf8, false),
        ]
    }

    /// Schema for the institution summary table.
    pub fn institution_summary_schema() -> Schema {
        Schema::new(vec![
            Field::new(columns::INSTITUTION, DataType::Utf8, false),
            Field::new(columns::TOTAL_CASES, DataType::UInt64, false),
            Field::new(columns::QUALIFIED_CASES, DataType::UInt64, false),
            Field::new(columns::QUALIFIED_RATE, DataType::Utf8, false),
        ])
    }
}
