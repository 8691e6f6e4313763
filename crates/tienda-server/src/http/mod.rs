//! JSON HTTP surface: home view, product/category search, catalog management.
//!
//! Handlers return `Result<_, ApiError>`; every `TiendaError` maps to one
//! status code and a `{ "code", "msg" }` body here.

pub mod catalog;
pub mod home;
pub mod views;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use tienda_core::error::{ClientCode, TiendaError};

/// Error wrapper that renders as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub TiendaError);

impl From<TiendaError> for ApiError {
    fn from(e: TiendaError) -> Self {
        Self(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rej: JsonRejection) -> Self {
        Self(TiendaError::BadRequest(rej.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rej: QueryRejection) -> Self {
        Self(TiendaError::BadRequest(rej.body_text()))
    }
}

/// `Json` body whose rejections render as `ApiError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// `Query` whose rejections render as `ApiError`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::BadRequest | ClientCode::UnsupportedVersion => StatusCode::BAD_REQUEST,
        ClientCode::AuthFailed => StatusCode::UNAUTHORIZED,
        ClientCode::NotAllowed => StatusCode::FORBIDDEN,
        ClientCode::NotFound => StatusCode::NOT_FOUND,
        ClientCode::Conflict => StatusCode::CONFLICT,
        ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.0.client_code();
        let status = status_for(code);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(error = %self.0, "request rejected");
        }
        // Internal details stay in the log.
        let msg = match &self.0 {
            TiendaError::Internal(_) => "internal error".to_string(),
            other => other.to_string(),
        };
        (status, Json(json!({ "code": code.as_str(), "msg": msg }))).into_response()
    }
}
