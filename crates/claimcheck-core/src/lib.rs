pub mod case;
pub mod category;
pub mod institution;
pub mod schema;
pub mod verdict;

pub use case::{CaseRecord, TimestampField, parse_timestamp};
pub use category::CategoryLabel;
pub use institution::InstitutionOrder;
pub use schema::columns;
pub use verdict::{CaseVerdict, InstitutionSummaryRow, format_rate};
