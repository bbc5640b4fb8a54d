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

use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::application::dto::crawl_request::{CrawlRequestDto, RequestError};
use crate::config::settings::DispatcherSettings;
use crate::domain::models::crawl::{CrawlDefaults, CrawlPayload, CrawlType};
use crate::engines::traits::{Scraper, ScraperError};

/// 调度错误类型
#[derive(Error, Debug)]
pub enum DispatchError {
    /// 请求输入无效（仅严格模式）
    #[error(transparent)]
    Request(#[from] RequestError),
    /// 爬虫未能启动
    #[error("failed to run {} crawl: {source}", .crawl_type.label())]
    Launch {
        crawl_type: CrawlType,
        #[source]
        source: ScraperError,
    },
    /// 爬虫运行后失败
    #[error(transparent)]
    Scraper(ScraperError),
}

// === Section: Use Case Definition ===

/// 爬取调度器
///
/// 解析爬取载荷（请求覆盖或注入的默认配置），交给爬虫执行并返回其JSON结果。
/// 调度器本身不持有跨请求的可变状态。
pub struct CrawlDispatcher {
    scraper: Arc<dyn Scraper>,
    defaults: CrawlDefaults,
    strict_body: bool,
}

// === Section: Implementation ===

impl CrawlDispatcher {
    pub fn new(scraper: Arc<dyn Scraper>, defaults: CrawlDefaults) -> Self {
        Self {
            scraper,
            defaults,
            strict_body: false,
        }
    }

    pub fn from_settings(scraper: Arc<dyn Scraper>, settings: &DispatcherSettings) -> Self {
        Self::new(scraper, settings.defaults()).with_strict_body(settings.strict_body)
    }

    /// 格式错误的输入是否返回错误而不是回落到默认配置
    pub fn with_strict_body(mut self, strict_body: bool) -> Self {
        self.strict_body = strict_body;
        self
    }

    /// 解析本次请求的爬取载荷
    ///
    /// 空字符串 `url` 和空映射 `urls` 视为未提供。
    pub fn resolve(&self, request: CrawlRequestDto) -> Result<CrawlPayload, DispatchError> {
        if let Some(issue) = request.issues.first() {
            if self.strict_body {
                return Err(issue.clone().into());
            }
            for issue in &request.issues {
                warn!(issue = %issue, "Ignoring malformed crawl input");
            }
        }

        let crawl_type = request.crawl_type;
        let requested = match crawl_type {
            CrawlType::Single => request
                .url
                .filter(|url| !url.is_empty())
                .map(|url| CrawlPayload::Single { url }),
            CrawlType::Multi => request
                .urls
                .filter(|urls| !urls.is_empty())
                .map(CrawlPayload::Multi),
        };

        Ok(requested.unwrap_or_else(|| {
            debug!(%crawl_type, "No override supplied, using default crawl configuration");
            self.defaults.payload_for(crawl_type)
        }))
    }

    /// 执行一次调度
    ///
    /// # 参数
    ///
    /// * `request` - 合并后的请求输入
    ///
    /// # 返回值
    ///
    /// * `Ok(Value)` - 爬虫返回的JSON结果
    /// * `Err(DispatchError)` - 输入无效、爬虫未能启动或爬虫失败
    pub async fn dispatch(&self, request: CrawlRequestDto) -> Result<Value, DispatchError> {
        let dispatch_id = Uuid::new_v4();
        let crawl_type = request.crawl_type;
        let span = info_span!("dispatch", %dispatch_id, %crawl_type);

        async move {
            let payload = self.resolve(request)?;
            info!(
                targets = payload.target_count(),
                scraper = self.scraper.name(),
                "Dispatching crawl"
            );

            match self.scraper.scrape(&payload).await {
                Ok(result) => {
                    info!("Crawl completed");
                    Ok(result)
                }
                Err(e) if e.is_launch_failure() => {
                    error!(error = %e, "Scraper could not be started");
                    Err(DispatchError::Launch {
                        crawl_type,
                        source: e,
                    })
                }
                Err(e) => {
                    warn!(error = %e, "Crawl failed");
                    Err(DispatchError::Scraper(e))
                }
            }
        }
        .instrument(span)
        .await
    }
}
