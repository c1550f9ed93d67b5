//! Result sink: attach verdict columns and write tables as CSV or Parquet.

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray, UInt64Array};
use arrow::csv::WriterBuilder;
use arrow::datatypes::{Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use claimcheck_core::schema::audit;
use claimcheck_core::{CaseVerdict, InstitutionSummaryRow, columns};
use parquet::arrow::ArrowWriter;
use tracing::info;

use crate::{CaseTable, StoreError, TableFormat};

impl CaseTable {
    /// The table with 险种分类, 判定结果 and 不合格原因 filled from `verdicts`.
    ///
    /// Columns already carrying those names are replaced in place; otherwise
    /// they are appended after the source columns. `verdicts` must hold one
    /// entry per row, in row order.
    pub fn with_verdicts(&self, verdicts: &[CaseVerdict]) -> Result<CaseTable, StoreError> {
        let rows = self.num_rows();
        if verdicts.len() != rows {
            return Err(StoreError::RowCountMismatch {
                rows,
                verdicts: verdicts.len(),
            });
        }

        let source = self.schema();
        let schema = verdict_schema(&source);
        let mut batches = Vec::with_capacity(self.batches().len());
        let mut offset = 0;
        for batch in self.batches() {
            let end = offset + batch.num_rows();
            batches.push(attach_verdicts(
                batch,
                &source,
                &schema,
                &verdicts[offset..end],
            )?);
            offset = end;
        }
        Ok(CaseTable::new(schema, batches))
    }
}

fn verdict_schema(source: &Schema) -> SchemaRef {
    let mut fields: Vec<Field> = source.fields().iter().map(|f| f.as_ref().clone()).collect();
    for field in audit::verdict_fields() {
        match source.index_of(field.name()) {
            Ok(idx) => fields[idx] = field,
            Err(_) => fields.push(field),
        }
    }
    Arc::new(Schema::new(fields))
}

fn attach_verdicts(
    batch: &RecordBatch,
    source: &Schema,
    schema: &SchemaRef,
    verdicts: &[CaseVerdict],
) -> Result<RecordBatch, StoreError> {
    let category = StringArray::from_iter_values(verdicts.iter().map(|v| v.category.as_str()));
    let label = StringArray::from_iter_values(verdicts.iter().map(|v| v.label()));
    let reason = StringArray::from_iter_values(verdicts.iter().map(|v| v.reason_text()));

    let mut arrays: Vec<ArrayRef> = batch.columns().to_vec();
    for (name, array) in [
        (columns::CATEGORY, Arc::new(category) as ArrayRef),
        (columns::VERDICT, Arc::new(label)),
        (columns::REASON, Arc::new(reason)),
    ] {
        match source.index_of(name) {
            Ok(idx) => arrays[idx] = array,
            Err(_) => arrays.push(array),
        }
    }
    Ok(RecordBatch::try_new(schema.clone(), arrays)?)
}

/// Institution summary rows as a single record batch.
pub fn summary_batch(rows: &[InstitutionSummaryRow]) -> Result<RecordBatch, StoreError> {
    let schema = Arc::new(audit::institution_summary_schema());
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.institution.as_str()),
            )) as ArrayRef,
            Arc::new(UInt64Array::from_iter_values(rows.iter().map(|r| r.total_cases))),
            Arc::new(UInt64Array::from_iter_values(
                rows.iter().map(|r| r.qualified_cases),
            )),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.qualified_rate.as_str()),
            )),
        ],
    )?;
    Ok(batch)
}

/// Write batches to `path`, replacing any existing file.
///
/// A table with no batches still gets its header (CSV) or schema (Parquet).
pub fn write_table(
    path: &Path,
    format: TableFormat,
    schema: SchemaRef,
    batches: &[RecordBatch],
) -> Result<(), StoreError> {
    let file = File::create(path)?;
    match format {
        TableFormat::Csv => {
            let mut writer = WriterBuilder::new().with_header(true).build(file);
            if batches.is_empty() {
                writer.write(&RecordBatch::new_empty(schema))?;
            }
            for batch in batches {
                writer.write(batch)?;
            }
        }
        TableFormat::Parquet => {
            let mut writer = ArrowWriter::try_new(file, schema, None)?;
            for batch in batches {
                writer.write(batch)?;
            }
            writer.close()?;
        }
    }

    let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    info!(path = %path.display(), rows, "wrote table");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;
    use claimcheck_core::CategoryLabel;
    use tempfile::TempDir;

    fn text_table(columns: Vec<(&str, Vec<&str>)>) -> CaseTable {
        let fields: Vec<Field> = columns
            .iter()
            .map(|(name, _)| Field::new(*name, arrow::datatypes::DataType::Utf8, true))
            .collect();
        let schema = Arc::new(Schema::new(fields));
        let arrays: Vec<ArrayRef> = columns
            .into_iter()
            .map(|(_, values)| Arc::new(StringArray::from(values)) as ArrayRef)
            .collect();
        let batch = RecordBatch::try_new(schema.clone(), arrays).unwrap();
        CaseTable::new(schema, vec![batch])
    }

    fn verdicts() -> Vec<CaseVerdict> {
        vec![
            CaseVerdict::from_reasons(CategoryLabel::EmployerLiability, vec![]),
            CaseVerdict::from_reasons(CategoryLabel::Other, vec!["甲".into(), "乙".into()]),
        ]
    }

    fn column<'a>(batch: &'a RecordBatch, name: &str) -> &'a StringArray {
        batch
            .column_by_name(name)
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap()
    }

    #[test]
    fn verdict_columns_are_appended() {
        let table = text_table(vec![("机构", vec!["合肥", "芜湖"]), ("备注", vec!["x", "y"])]);
        let audited = table.with_verdicts(&verdicts()).unwrap();

        let names: Vec<String> = audited
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(names, vec!["机构", "备注", "险种分类", "判定结果", "不合格原因"]);

        let batch = &audited.batches()[0];
        assert_eq!(column(batch, "险种分类").value(0), "雇主类");
        assert_eq!(column(batch, "判定结果").value(0), "合格");
        assert_eq!(column(batch, "不合格原因").value(0), "");
        assert_eq!(column(batch, "判定结果").value(1), "不合格");
        assert_eq!(column(batch, "不合格原因").value(1), "甲；乙");
        assert_eq!(column(batch, "备注").value(1), "y");
    }

    #[test]
    fn existing_verdict_columns_are_replaced_in_place() {
        let table = text_table(vec![
            ("判定结果", vec!["旧", "旧"]),
            ("机构", vec!["合肥", "芜湖"]),
        ]);
        let audited = table.with_verdicts(&verdicts()).unwrap();

        let schema = audited.schema();
        assert_eq!(schema.fields().len(), 4);
        assert_eq!(schema.field(0).name(), "判定结果");
        assert_eq!(column(&audited.batches()[0], "判定结果").value(0), "合格");
    }

    #[test]
    fn verdicts_span_multiple_batches() {
        let first = text_table(vec![("机构", vec!["合肥"])]);
        let second = text_table(vec![("机构", vec!["芜湖"])]);
        let table = CaseTable::new(
            first.schema(),
            vec![first.batches()[0].clone(), second.batches()[0].clone()],
        );

        let audited = table.with_verdicts(&verdicts()).unwrap();
        assert_eq!(column(&audited.batches()[0], "判定结果").value(0), "合格");
        assert_eq!(column(&audited.batches()[1], "判定结果").value(0), "不合格");
    }

    #[test]
    fn verdict_count_must_match_rows() {
        let table = text_table(vec![("机构", vec!["合肥"])]);
        let err = table.with_verdicts(&verdicts()).unwrap_err();
        assert!(matches!(
            err,
            StoreError::RowCountMismatch {
                rows: 1,
                verdicts: 2
            }
        ));
    }

    #[test]
    fn summary_batch_matches_rows() {
        let rows = vec![
            InstitutionSummaryRow::new("合肥", 3, 2),
            InstitutionSummaryRow::new("合计", 3, 2),
        ];
        let batch = summary_batch(&rows).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), 4);
        assert_eq!(column(&batch, "合格率").value(0), "66.7%");
        let totals = batch
            .column_by_name("总案件数")
            .unwrap()
            .as_any()
            .downcast_ref::<UInt64Array>()
            .unwrap();
        assert_eq!(totals.value(1), 3);
    }

    #[test]
    fn csv_round_trip_keeps_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        let batch = summary_batch(&[InstitutionSummaryRow::new("合肥", 2, 1)]).unwrap();

        write_table(&path, TableFormat::Csv, batch.schema(), &[batch]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "机构,总案件数,合格案件数,合格率\n合肥,2,1,50.0%\n");
    }

    #[test]
    fn empty_csv_still_has_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("empty.csv");
        let schema = Arc::new(audit::institution_summary_schema());

        write_table(&path, TableFormat::Csv, schema, &[]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.trim_end(), "机构,总案件数,合格案件数,合格率");
    }

    #[test]
    fn parquet_output_reads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cases.parquet");
        let table = text_table(vec![("机构", vec!["合肥", "芜湖"])]);
        let audited = table.with_verdicts(&verdicts()).unwrap();

        write_table(&path, TableFormat::Parquet, audited.schema(), audited.batches()).unwrap();

        let back = CaseTable::read(&path).unwrap();
        assert_eq!(back.num_rows(), 2);
        let batch = &back.batches()[0];
        assert_eq!(column(batch, "不合格原因").value(1), "甲；乙");
        assert!(!column(batch, "判定结果").is_null(0));
    }
}
