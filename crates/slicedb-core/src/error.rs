use crate::db::row::RowDecodeError;
use derive_more::Display;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured execution failure with a stable classification.
/// Raised by executors and stores; the slice builder passes it through
/// to callers without rewriting it.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl InternalError {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a store-origin communication failure.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unavailable, ErrorOrigin::Store, message)
    }

    /// Construct a store-origin timeout.
    pub fn store_timeout(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Timeout, ErrorOrigin::Store, message)
    }

    /// Construct a store-origin internal error.
    pub fn store_internal(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Internal, ErrorOrigin::Store, message)
    }

    /// Construct an executor-origin unsupported error.
    pub fn executor_unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Executor, message)
    }

    /// Construct a serialize-origin corruption error.
    pub(crate) fn serialize_corruption(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Corruption, ErrorOrigin::Serialize, message)
    }
}

impl From<RowDecodeError> for InternalError {
    fn from(err: RowDecodeError) -> Self {
        Self::serialize_corruption(err.to_string())
    }
}

///
/// ErrorClass
/// Internal error taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ErrorClass {
    #[display("corruption")]
    Corruption,
    #[display("internal")]
    Internal,
    #[display("timeout")]
    Timeout,
    #[display("unavailable")]
    Unavailable,
    #[display("unsupported")]
    Unsupported,
}

///
/// ErrorOrigin
/// Internal origin taxonomy for runtime classification.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ErrorOrigin {
    #[display("executor")]
    Executor,
    #[display("serialize")]
    Serialize,
    #[display("store")]
    Store,
}
