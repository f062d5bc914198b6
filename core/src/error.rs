//! Error taxonomy for payment queries.
//!
//! # Design
//! Every failed fetch is normalized into one `ApiError` carrying a message
//! that is safe to show to the end user. The `kind` is kept for logging and
//! tests; the view only ever renders `message`. Network failures and
//! unparseable bodies share the generic fallback so transport detail never
//! reaches the screen.

use thiserror::Error;

use crate::http::{HttpResponse, TransportError};
use crate::messages;
use crate::types::{ErrorBody, PaymentsPage};

/// Outcome of one fetch cycle: exactly one of page or error.
pub type QueryResult = Result<PaymentsPage, ApiError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// HTTP 404. The filtered result set is empty server-side.
    NotFound,
    /// HTTP 5xx and any other non-2xx status without a dedicated class.
    ServerError,
    /// The body could not be parsed or the round-trip itself failed.
    MalformedResponse,
}

/// A fetch failure reduced to a user-displayable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn not_found() -> Self {
        Self {
            kind: ApiErrorKind::NotFound,
            message: messages::PAYMENT_NOT_FOUND.to_string(),
        }
    }

    pub fn malformed() -> Self {
        Self {
            kind: ApiErrorKind::MalformedResponse,
            message: messages::SOMETHING_WENT_WRONG.to_string(),
        }
    }

    /// Classify a non-2xx response.
    ///
    /// 404 always maps to the fixed not-found message, whatever the body
    /// says. Other statuses surface the body's `message` when there is one.
    pub fn from_response(response: &HttpResponse) -> Self {
        if response.status == 404 {
            return Self::not_found();
        }
        match serde_json::from_str::<ErrorBody>(&response.body) {
            Ok(ErrorBody {
                message: Some(message),
            }) if !message.is_empty() => Self {
                kind: ApiErrorKind::ServerError,
                message,
            },
            Ok(_) => Self {
                kind: ApiErrorKind::ServerError,
                message: messages::SOMETHING_WENT_WRONG.to_string(),
            },
            Err(_) => Self::malformed(),
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(_: TransportError) -> Self {
        Self::malformed()
    }
}
