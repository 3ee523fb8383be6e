//! Mapping function responses onto HTTP.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::function::{FunctionError, FunctionResponse};

impl IntoResponse for FunctionResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, "application/json")], self.body).into_response()
    }
}

impl IntoResponse for FunctionError {
    fn into_response(self) -> Response {
        FunctionResponse::from(self).into_response()
    }
}
