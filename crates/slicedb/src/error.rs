use derive_more::Display;
use slicedb_core::{
    config::ConfigError,
    db::{ResponseError, query::QueryError},
    error::{ErrorClass, ErrorOrigin as CoreErrorOrigin, InternalError},
};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind + origin taxonomy.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            kind,
            origin,
            message: message.into(),
        }
    }
}

impl From<InternalError> for Error {
    fn from(err: InternalError) -> Self {
        Self::new(
            ErrorKind::Runtime(err.class.into()),
            err.origin.into(),
            err.message,
        )
    }
}

impl From<QueryError> for Error {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::Validate(_) => Self::new(
                ErrorKind::Query(QueryErrorKind::Invalid),
                ErrorOrigin::Query,
                err.to_string(),
            ),
            QueryError::Response(err) => err.into(),
            QueryError::Execute(err) => err.into(),
        }
    }
}

impl From<ResponseError> for Error {
    fn from(err: ResponseError) -> Self {
        let kind = match err {
            ResponseError::NotFound { .. } => QueryErrorKind::NotFound,
            ResponseError::NotUnique { .. } => QueryErrorKind::NotUnique,
        };

        Self::new(ErrorKind::Query(kind), ErrorOrigin::Response, err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, ErrorOrigin::Config, err.to_string())
    }
}

///
/// ErrorKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ErrorKind {
    #[display("config")]
    Config,
    #[display("query: {_0}")]
    Query(QueryErrorKind),
    #[display("runtime: {_0}")]
    Runtime(RuntimeErrorKind),
}

///
/// QueryErrorKind
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum QueryErrorKind {
    #[display("invalid")]
    Invalid,
    #[display("not found")]
    NotFound,
    #[display("not unique")]
    NotUnique,
}

///
/// RuntimeErrorKind
/// Mirrors the core error class without exposing core types.
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum RuntimeErrorKind {
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

impl From<ErrorClass> for RuntimeErrorKind {
    fn from(class: ErrorClass) -> Self {
        match class {
            ErrorClass::Corruption => Self::Corruption,
            ErrorClass::Internal => Self::Internal,
            ErrorClass::Timeout => Self::Timeout,
            ErrorClass::Unavailable => Self::Unavailable,
            ErrorClass::Unsupported => Self::Unsupported,
        }
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum ErrorOrigin {
    #[display("config")]
    Config,
    #[display("executor")]
    Executor,
    #[display("query")]
    Query,
    #[display("response")]
    Response,
    #[display("serialize")]
    Serialize,
    #[display("store")]
    Store,
}

impl From<CoreErrorOrigin> for ErrorOrigin {
    fn from(origin: CoreErrorOrigin) -> Self {
        match origin {
            CoreErrorOrigin::Executor => Self::Executor,
            CoreErrorOrigin::Serialize => Self::Serialize,
            CoreErrorOrigin::Store => Self::Store,
        }
    }
}
