//! Case table source: read CSV or Parquet into Arrow and extract case records.

use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, StringArray};
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use claimcheck_core::{CaseRecord, TimestampField, columns};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use tracing::{debug, info};

use crate::StoreError;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// On-disk encoding of a case table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Parquet,
}

impl TableFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, StoreError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet") => Ok(Self::Parquet),
            _ => Err(StoreError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }
}

/// A case table held in memory as Arrow record batches.
///
/// Every source column is kept so the audited table can be written back
/// with the original columns intact.
#[derive(Debug, Clone)]
pub struct CaseTable {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

impl CaseTable {
    pub fn new(schema: SchemaRef, batches: Vec<RecordBatch>) -> Self {
        Self { schema, batches }
    }

    /// Load a case table, picking the reader by file extension.
    pub fn read(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::NotFound(path.to_path_buf()));
        }
        let table = match TableFormat::from_path(path)? {
            TableFormat::Csv => read_csv(path)?,
            TableFormat::Parquet => read_parquet(path)?,
        };
        info!(
            path = %path.display(),
            rows = table.num_rows(),
            columns = table.schema.fields().len(),
            "loaded case table"
        );
        Ok(table)
    }

    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    pub fn batches(&self) -> &[RecordBatch] {
        &self.batches
    }

    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(|b| b.num_rows()).sum()
    }

    /// Extract one [`CaseRecord`] per row, in table order.
    ///
    /// 机构 is required; the other audited columns are optional and read as
    /// absent when missing. Cells that are null or blank after trimming are
    /// absent. Non-text columns are cast to text first.
    pub fn records(&self) -> Result<Vec<CaseRecord>, StoreError> {
        if self.schema.index_of(columns::INSTITUTION).is_err() {
            return Err(StoreError::MissingColumn(columns::INSTITUTION));
        }
        for name in [
            columns::INSURANCE_TYPE,
            columns::ACCIDENT_TIME,
            columns::REPORT_TIME,
            columns::REPORT_SUMMARY,
            columns::SURVEY_SUMMARY,
        ] {
            if self.schema.index_of(name).is_err() {
                debug!(column = name, "optional column absent, treating values as empty");
            }
        }

        let mut records = Vec::with_capacity(self.num_rows());
        for batch in &self.batches {
            let insurance = text_column(batch, columns::INSURANCE_TYPE)?;
            let accident = text_column(batch, columns::ACCIDENT_TIME)?;
            let report_time = text_column(batch, columns::REPORT_TIME)?;
            let report = text_column(batch, columns::REPORT_SUMMARY)?;
            let survey = text_column(batch, columns::SURVEY_SUMMARY)?;
            let institution = text_column(batch, columns::INSTITUTION)?;

            for row in 0..batch.num_rows() {
                records.push(CaseRecord {
                    insurance_type: cell(insurance.as_ref(), row).map(String::from),
                    accident_time: TimestampField::parse(cell(accident.as_ref(), row)),
                    report_time: TimestampField::parse(cell(report_time.as_ref(), row)),
                    report_summary: cell(report.as_ref(), row).map(String::from),
                    survey_summary: cell(survey.as_ref(), row).map(String::from),
                    institution: cell(institution.as_ref(), row).map(|s| s.trim().to_string()),
                });
            }
        }
        Ok(records)
    }
}

/// Read a CSV file with a header row. Every column is read as nullable text
/// and a leading byte-order mark on the header is dropped.
fn read_csv(path: &Path) -> Result<CaseTable, StoreError> {
    let mut file = File::open(path)?;
    let (inferred, _) = Format::default()
        .with_header(true)
        .infer_schema(&mut file, Some(1))?;
    file.rewind()?;

    let schema = Arc::new(text_schema(&inferred));
    let reader = ReaderBuilder::new(schema.clone())
        .with_header(true)
        .build(file)?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    Ok(CaseTable::new(schema, batches))
}

fn read_parquet(path: &Path) -> Result<CaseTable, StoreError> {
    let file = File::open(path)?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;
    let batches = reader.collect::<Result<Vec<_>, _>>()?;
    Ok(CaseTable::new(schema, batches))
}

fn text_schema(inferred: &Schema) -> Schema {
    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .map(|f| {
            let name = f.name().trim_start_matches(BYTE_ORDER_MARK).trim();
            Field::new(name, DataType::Utf8, true)
        })
        .collect();
    Schema::new(fields)
}

/// Fetch a column as text, or `None` when the batch lacks it.
fn text_column(batch: &RecordBatch, name: &str) -> Result<Option<StringArray>, StoreError> {
    let Some(column) = batch.column_by_name(name) else {
        return Ok(None);
    };
    let cast = arrow::compute::cast(column, &DataType::Utf8)?;
    Ok(cast.as_any().downcast_ref::<StringArray>().cloned())
}

fn cell(column: Option<&StringArray>, row: usize) -> Option<&str> {
    let column = column?;
    if column.is_null(row) {
        return None;
    }
    let value = column.value(row);
    (!value.trim().is_empty()).then_some(value)
}
