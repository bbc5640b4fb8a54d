// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    body::{Body, Bytes},
    extract::{RawQuery, State},
    http::{Method, StatusCode},
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

use crate::{
    application::{
        dto::{
            crawl_request::{CrawlRequestDto, RequestError},
            envelope::ResponseEnvelope,
        },
        use_cases::dispatch_crawl::CrawlDispatcher,
    },
    presentation::{
        errors::AppError,
        responses::{envelope_response, preflight_response},
    },
};

/// POST请求体大小上限
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// 爬取调度处理器
///
/// 挂在所有路径上：OPTIONS直接返回预检响应，GET/HEAD/POST解析参数后交给调度器，
/// 其他方法返回405。HEAD按GET处理，响应体由axum丢弃。
pub async fn dispatch_crawl(
    State(dispatcher): State<Arc<CrawlDispatcher>>,
    method: Method,
    RawQuery(query): RawQuery,
    body: Body,
) -> Result<Response, AppError> {
    if method == Method::OPTIONS {
        return Ok(preflight_response());
    }
    if ![Method::GET, Method::HEAD, Method::POST].contains(&method) {
        return Err(RequestError::MethodNotAllowed(method.to_string()).into());
    }

    let mut body_issue = None;
    let body = if method == Method::POST {
        match read_body(body).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                body_issue = Some(e);
                None
            }
        }
    } else {
        None
    };

    let mut request = CrawlRequestDto::parse(query.as_deref(), body.as_deref());
    request.issues.extend(body_issue);
    debug!(
        method = %method,
        crawl_type = %request.crawl_type,
        "Crawl request received"
    );

    let data = dispatcher.dispatch(request).await?;
    Ok(envelope_response(
        StatusCode::OK,
        &ResponseEnvelope::success(data),
    ))
}

async fn read_body(body: Body) -> Result<Bytes, RequestError> {
    axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(|e| RequestError::MalformedBody(format!("failed to read body: {}", e)))
}
