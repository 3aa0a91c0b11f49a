use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("invalid month label: {label:?}, expected YYYY-MM")]
    InvalidMonthLabel {
        label: String,
    },

    #[error("invalid amount: {amount} must not be negative")]
    NegativeAmount {
        amount: Money,
    },

    #[error("invalid rent period: end date {end} precedes start date {start}")]
    InvalidPeriodRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, LedgerError>;
