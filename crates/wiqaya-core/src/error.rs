use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown priority level: {0}")]
    UnknownPriority(String),

    #[error("unknown data source: {0}")]
    UnknownDataSource(String),
}
