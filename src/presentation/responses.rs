// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::application::dto::envelope::ResponseEnvelope;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// 把响应信封写成带状态码的JSON响应
pub fn envelope_response(status: StatusCode, envelope: &ResponseEnvelope) -> Response {
    match envelope.to_pretty_json() {
        Ok(body) => (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], body).into_response(),
        Err(e) => {
            error!("Failed to serialize response envelope: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
                r#"{"success":false,"error":"server error","timestamp":""}"#,
            )
                .into_response()
        }
    }
}

/// CORS预检响应：200，空响应体
pub fn preflight_response() -> Response {
    (StatusCode::OK, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)]).into_response()
}
