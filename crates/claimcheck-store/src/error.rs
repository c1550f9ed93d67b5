use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("input table not found: {}", .0.display())]
    NotFound(std::path::PathBuf),

    #[error("unsupported table format: {}", .0.display())]
    UnsupportedFormat(std::path::PathBuf),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("{verdicts} verdicts for {rows} case rows")]
    RowCountMismatch { rows: usize, verdicts: usize },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),
}
