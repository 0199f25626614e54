//! Error conversion from engine error types.
//!
//! Every [`DocketError`] variant maps to exactly one executor [`Error`]
//! variant with all fields carried over.

use crate::Error;
use docket_core::DocketError;

impl From<DocketError> for Error {
    fn from(err: DocketError) -> Self {
        match err {
            DocketError::NotFound { id } => Error::DocumentNotFound { id },
            DocketError::InvalidCursor { reason } => Error::InvalidCursor { reason },
            DocketError::InvalidTransition { id, from, to } => {
                Error::InvalidTransition { id, from, to }
            }
            DocketError::Configuration { reason } => Error::Configuration { reason },
            DocketError::InvalidInput { reason } => Error::InvalidInput { reason },
            DocketError::AlreadyExists { id } => Error::AlreadyExists { id },
            DocketError::Storage { reason } => Error::Storage { reason },
            DocketError::Serialization { reason } => Error::Serialization { reason },
        }
    }
}

/// Convert an engine result into an executor result.
pub(crate) fn convert_result<T>(r: docket_core::DocketResult<T>) -> crate::Result<T> {
    r.map_err(Error::from)
}
