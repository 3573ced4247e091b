//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain failures into the landing page's
//! `{"success": false, "error": ...}` envelope with a matching status code.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};
use crate::inbound::http::schemas::ErrorCodeSchema;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Customer-facing message returned for every internal failure.
pub const INTERNAL_ERROR_MESSAGE: &str =
    "Произошла ошибка при отправке заявки. Попробуйте позже.";

/// JSON body of every failed API response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Always `false`.
    #[schema(example = false)]
    pub success: bool,
    /// Human-readable message shown by the landing page.
    #[schema(example = "Поле name обязательно для заполнения")]
    pub error: String,
    /// Stable machine-readable failure category.
    #[schema(value_type = ErrorCodeSchema, example = "invalid_request")]
    pub code: ErrorCode,
    /// Request correlation identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Structured context, e.g. the offending field.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<Value>,
}

impl ErrorBody {
    fn from_error(error: &Error) -> Self {
        if matches!(error.code(), ErrorCode::InternalError) {
            return Self {
                success: false,
                error: INTERNAL_ERROR_MESSAGE.to_owned(),
                code: ErrorCode::InternalError,
                trace_id: error.trace_id().map(str::to_owned),
                details: None,
            };
        }
        Self {
            success: false,
            error: error.message().to_owned(),
            code: error.code(),
            trace_id: error.trace_id().map(str::to_owned),
            details: error.details().cloned(),
        }
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if matches!(self.code(), ErrorCode::InternalError) {
            error!(
                error = %self.message(),
                details = ?self.details(),
                trace_id = self.trace_id(),
                "internal error returned to client as generic message"
            );
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(ErrorBody::from_error(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("actix error")
    }
}

#[cfg(test)]
mod tests;
