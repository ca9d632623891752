//! Error types for the tablebook library.
//!
//! This module provides the error hierarchy for all operations in the
//! tablebook library, using `thiserror` for ergonomic error handling.
//!
//! Allocation failures are ordinary outcomes: a request that cannot be
//! satisfied is reported as [`Error::NoTableAvailable`] and leaves the
//! restaurant state untouched, so it is always safe to retry.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::table::TableNumber;

/// Result type alias for operations that may fail with a tablebook error.
///
/// # Examples
///
/// ```
/// use tablebook::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(4)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the tablebook library.
#[derive(Debug, Error)]
pub enum Error {
    /// No table has enough capacity and a free service slot at the requested time.
    #[error("no table available for a party of {party_size} at {requested}")]
    NoTableAvailable {
        /// The party size that could not be seated.
        party_size: u32,
        /// The requested reservation time.
        requested: NaiveDateTime,
    },

    /// A reservation request was rejected before any table was considered.
    #[error("invalid request for '{field}': {message}")]
    InvalidRequest {
        /// The request field that was rejected.
        field: String,
        /// A description of the problem.
        message: String,
    },

    /// The requested resource was not found.
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found.
        resource: String,
    },

    /// A configuration value failed validation.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// A table definition is invalid.
    #[error("invalid table {number}: {reason}")]
    InvalidTable {
        /// The raw table number.
        number: u32,
        /// The reason the table is invalid.
        reason: String,
    },

    /// Two tables in the registry share the same number.
    #[error("duplicate table number {number}")]
    DuplicateTable {
        /// The repeated table number.
        number: TableNumber,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<crate::table::InvalidTableError> for Error {
    fn from(err: crate::table::InvalidTableError) -> Self {
        Self::InvalidTable {
            number: err.value,
            reason: err.reason,
        }
    }
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::InvalidRequest {
            field: err.field,
            message: err.message,
        }
    }
}

impl From<crate::hours::InvalidSessionError> for Error {
    fn from(err: crate::hours::InvalidSessionError) -> Self {
        Self::Validation {
            field: format!("hours.{}", err.period),
            message: err.reason,
        }
    }
}

impl Error {
    /// Check if the error means no table could be found for the request.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use tablebook::Error;
    ///
    /// let requested = NaiveDate::from_ymd_opt(2026, 1, 1)
    ///     .unwrap()
    ///     .and_hms_opt(12, 0, 0)
    ///     .unwrap();
    /// let err = Error::NoTableAvailable { party_size: 4, requested };
    /// assert!(err.is_no_table_available());
    /// ```
    #[must_use]
    pub fn is_no_table_available(&self) -> bool {
        matches!(self, Self::NoTableAvailable { .. })
    }

    /// Check if the error is a rejected request.
    ///
    /// # Examples
    ///
    /// ```
    /// use tablebook::Error;
    ///
    /// let err = Error::InvalidRequest {
    ///     field: "party_size".into(),
    ///     message: "must be at least 1".into(),
    /// };
    /// assert!(err.is_invalid_request());
    /// ```
    #[must_use]
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. })
    }
}
