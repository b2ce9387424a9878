use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{loader} CSV error: {source}")]
    Csv {
        loader: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("{loader} row {line} invalid: {message}")]
    DataRow {
        loader: &'static str,
        line: u64,
        message: String,
    },

    #[error("{loader} table did not contain any data rows")]
    EmptyData { loader: &'static str },
}
