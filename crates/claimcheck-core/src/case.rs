//! Case records as read from the input table.
//!
//! Every field is optional: a blank cell is a valid "not provided" state and
//! each rule decides for itself what absence means.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Date-time layouts accepted for accident and report timestamps.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%Y年%m月%d日 %H:%M:%S",
    "%Y年%m月%d日 %H:%M",
    "%Y年%m月%d日%H时%M分",
    "%Y年%m月%d日 %H时%M分",
];

/// Date-only layouts; these resolve to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y年%m月%d日"];

/// One claim case. Immutable for the duration of a batch run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseRecord {
    pub insurance_type: Option<String>,
    pub accident_time: TimestampField,
    pub report_time: TimestampField,
    pub report_summary: Option<String>,
    pub survey_summary: Option<String>,
    pub institution: Option<String>,
}

/// Result of reading a timestamp cell.
///
/// `Unparsable` keeps the raw text so callers can log what they skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TimestampField {
    Parsed(NaiveDateTime),
    #[default]
    Absent,
    Unparsable(String),
}

impl TimestampField {
    /// Interpret a raw cell. Blank cells are `Absent`.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::Absent;
        };
        match parse_timestamp(raw) {
            Some(ts) => Self::Parsed(ts),
            None => Self::Unparsable(raw.to_string()),
        }
    }

    pub fn parsed(&self) -> Option<NaiveDateTime> {
        match self {
            Self::Parsed(ts) => Some(*ts),
            _ => None,
        }
    }
}

impl From<NaiveDateTime> for TimestampField {
    fn from(ts: NaiveDateTime) -> Self {
        Self::Parsed(ts)
    }
}

/// Parse a timestamp in any of the accepted layouts.
///
/// Offsets in RFC 3339 input are dropped in favour of the local wall-clock
/// time, which is what the survey forms record.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd_hms(y: i32, m: u32, d: u32, h: u32, min: u32, sec: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, sec)
            .unwrap()
    }

    #[test]
    fn parses_dash_separated_datetime() {
        assert_eq!(
            parse_timestamp("2024-03-05 14:30:00"),
            Some(ymd_hms(2024, 3, 5, 14, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2024-03-05T14:30:00"),
            Some(ymd_hms(2024, 3, 5, 14, 30, 0))
        );
        assert_eq!(
            parse_timestamp("2024-03-05 14:30"),
            Some(ymd_hms(2024, 3, 5, 14, 30, 0))
        );
    }

    #[test]
    fn parses_fractional_seconds() {
        let ts = parse_timestamp("2024-03-05 14:30:00.250").unwrap();
        assert_eq!(ts.and_utc().timestamp_subsec_millis(), 250);
    }

    #[test]
    fn parses_slash_and_chinese_dates() {
        assert_eq!(
            parse_timestamp("2024/3/5 08:00:00"),
            Some(ymd_hms(2024, 3, 5, 8, 0, 0))
        );
        assert_eq!(parse_timestamp("2024/03/05"), Some(ymd_hms(2024, 3, 5, 0, 0, 0)));
        assert_eq!(
            parse_timestamp("2024年3月5日"),
            Some(ymd_hms(2024, 3, 5, 0, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024年3月5日9时15分"),
            Some(ymd_hms(2024, 3, 5, 9, 15, 0))
        );
    }

    #[test]
    fn parses_rfc3339_as_wall_clock() {
        assert_eq!(
            parse_timestamp("2024-03-05T14:30:00+08:00"),
            Some(ymd_hms(2024, 3, 5, 14, 30, 0))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_timestamp("昨天下午"), None);
        assert_eq!(parse_timestamp("2024-13-40"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn field_distinguishes_absent_and_unparsable() {
        assert_eq!(TimestampField::parse(None), TimestampField::Absent);
        assert_eq!(TimestampField::parse(Some("   ")), TimestampField::Absent);
        assert_eq!(
            TimestampField::parse(Some(" 不详 ")),
            TimestampField::Unparsable("不详".into())
        );
        assert_eq!(
            TimestampField::parse(Some("2024-01-01")).parsed(),
            Some(ymd_hms(2024, 1, 1, 0, 0, 0))
        );
    }

    #[test]
    fn default_record_has_nothing() {
        let record = CaseRecord::default();
        assert!(record.survey_summary.is_none());
        assert_eq!(record.accident_time, TimestampField::Absent);
    }
}
