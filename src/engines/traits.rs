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

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::domain::models::crawl::CrawlPayload;

/// 爬虫错误类型
#[derive(Error, Debug)]
pub enum ScraperError {
    /// 载荷序列化失败
    #[error("failed to encode crawl payload: {0}")]
    Encode(#[source] serde_json::Error),
    /// 无法启动外部进程
    #[error("failed to start scraper: {0}")]
    Spawn(#[source] std::io::Error),
    /// 等待或读取外部进程时出错
    #[error("failed to read scraper output: {0}")]
    Io(#[source] std::io::Error),
    /// 外部进程以非零状态退出
    #[error("scraper exited with non-zero code: {}", exit_code_label(.code))]
    NonZeroExit { code: Option<i32> },
    /// 外部进程没有任何输出
    #[error("no result")]
    EmptyOutput,
    /// 第一行输出不是合法JSON
    #[error("failed to decode scraper output: {0}")]
    InvalidJson(#[source] serde_json::Error),
    /// 超时
    #[error("scraper timed out after {}s", .0.as_secs())]
    Timeout(Duration),
}

impl ScraperError {
    /// 判断错误是否发生在进程启动阶段
    ///
    /// 启动失败说明脚本根本没有运行，调度器会在错误信息中标注爬取类型
    pub fn is_launch_failure(&self) -> bool {
        matches!(
            self,
            ScraperError::Encode(_) | ScraperError::Spawn(_) | ScraperError::Io(_)
        )
    }
}

fn exit_code_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none (terminated by signal)".to_string(),
    }
}

/// 爬虫能力特质
///
/// 给定结构化的爬取载荷，返回不透明的JSON爬取结果或类型化的失败。
/// 具体机制（子进程、进程内调用、远程服务）可以替换而不影响调度器。
#[async_trait]
pub trait Scraper: Send + Sync {
    /// 执行爬取
    async fn scrape(&self, payload: &CrawlPayload) -> Result<Value, ScraperError>;

    /// 爬虫名称
    fn name(&self) -> &'static str;
}
