// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::any::Any;
use tracing::{error, warn};

use crate::application::dto::crawl_request::RequestError;
use crate::application::dto::envelope::ResponseEnvelope;
use crate::application::use_cases::dispatch_crawl::DispatchError;
use crate::engines::traits::ScraperError;
use crate::presentation::responses::envelope_response;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，统一转换为带状态码的失败信封
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl AppError {
    /// 根据错误类型决定HTTP状态码和对外的错误信息
    pub fn status_and_message(&self) -> (StatusCode, String) {
        let status = match self.0.downcast_ref::<DispatchError>() {
            Some(DispatchError::Request(e)) => request_status(e),
            Some(DispatchError::Launch { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            Some(DispatchError::Scraper(e)) => scraper_status(e),
            None => match self.0.downcast_ref::<RequestError>() {
                Some(e) => request_status(e),
                None => {
                    return (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("server error: {}", self.0),
                    )
                }
            },
        };
        (status, self.0.to_string())
    }
}

fn request_status(error: &RequestError) -> StatusCode {
    match error {
        RequestError::MalformedBody(_) | RequestError::MalformedUrls(_) => StatusCode::BAD_REQUEST,
        RequestError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
    }
}

fn scraper_status(error: &ScraperError) -> StatusCode {
    match error {
        ScraperError::EmptyOutput => StatusCode::NOT_FOUND,
        ScraperError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!(status = status.as_u16(), "Request failed: {}", message);
        } else {
            warn!(status = status.as_u16(), "Request rejected: {}", message);
        }
        envelope_response(status, &ResponseEnvelope::failure(message))
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// 把处理器中的panic转换为500失败信封
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Handler panicked: {}", detail);
    envelope_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        &ResponseEnvelope::failure(format!("server error: {}", detail)),
    )
}
