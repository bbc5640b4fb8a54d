// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use crate::application::use_cases::dispatch_crawl::CrawlDispatcher;
use crate::presentation::errors::panic_response;
use crate::presentation::handlers::crawl_handler;
use crate::presentation::middleware::cors_middleware::cors_middleware;

/// 创建应用路由
///
/// 调度处理器作为fallback挂载，因此任意路径都会触发一次爬取调度。
/// CORS中间件位于panic捕获层之外，保证panic转换出的响应也带有CORS头。
///
/// # 参数
///
/// * `dispatcher` - 爬取调度器
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes(dispatcher: Arc<CrawlDispatcher>) -> Router {
    Router::new()
        .fallback(crawl_handler::dispatch_crawl)
        .with_state(dispatcher)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(cors_middleware))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
#[path = "routes_test.rs"]
mod tests;
