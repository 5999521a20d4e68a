use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not read or write the console")]
    Io(#[from] std::io::Error),
    #[error("could not write statement as CSV")]
    Csv(#[from] csv::Error),
    #[error("invalid date, expected dd-mm-yyyy")]
    InvalidDate(#[from] chrono::ParseError),
    #[error("invalid amount")]
    InvalidAmount(#[from] rust_decimal::Error),
    #[error(transparent)]
    UnknownKind(#[from] crate::domain::transaction::UnknownKind),
    #[error(transparent)]
    Domain(#[from] crate::domain::error::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
