use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashError {
    #[error("dataset file unreadable: {0}")]
    DatasetUnreadable(String),
    #[error("dataset has no header row")]
    EmptyDataset,
    #[error("dataset missing required column: {0}")]
    MissingColumn(String),
    #[error("dataset has no usable year values")]
    NoUsableYears,
}
