use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unparseable date '{value}' on line {line}")]
    DateParse { value: String, line: usize },

    #[error("Duplicate transaction id '{id}' on line {line}")]
    DuplicateTransaction { id: String, line: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type ReportResult<T> = Result<T, ReportError>;
