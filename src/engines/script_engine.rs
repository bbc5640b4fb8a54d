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
use std::process::{Output, Stdio};
use std::time::Instant;
use tracing::{debug, warn};

use crate::config::settings::ScraperSettings;
use crate::domain::models::crawl::CrawlPayload;
use crate::engines::invocation::ScriptInvocation;
use crate::engines::traits::{Scraper, ScraperError};

/// 脚本爬虫引擎
///
/// 每次爬取启动一个外部解释器进程，把载荷作为唯一参数传入，
/// 并把标准输出的第一行解析为JSON结果。
pub struct ScriptEngine {
    settings: ScraperSettings,
}

impl ScriptEngine {
    pub fn new(settings: ScraperSettings) -> Self {
        Self { settings }
    }

    /// 为载荷构造脚本调用
    ///
    /// # 参数
    ///
    /// * `payload` - 爬取载荷，决定脚本和参数
    ///
    /// # 返回值
    ///
    /// * `Ok(ScriptInvocation)` - 待执行的调用
    /// * `Err(ScraperError)` - 载荷无法序列化
    pub fn invocation(&self, payload: &CrawlPayload) -> Result<ScriptInvocation, ScraperError> {
        let argument = payload.to_argument().map_err(ScraperError::Encode)?;
        Ok(ScriptInvocation::new(
            self.settings.interpreter.clone(),
            self.settings.script_path(payload.crawl_type()),
            argument,
        ))
    }

    async fn run(&self, invocation: &ScriptInvocation) -> Result<Output, ScraperError> {
        let mut command = invocation.command();
        // Script logs go to stderr and stay in the server log
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        let child = command.spawn().map_err(ScraperError::Spawn)?;

        match self.settings.timeout() {
            // Dropping the wait future drops the child, which kills it
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| ScraperError::Timeout(limit))?
                .map_err(ScraperError::Io),
            None => child.wait_with_output().await.map_err(ScraperError::Io),
        }
    }
}

#[async_trait]
impl Scraper for ScriptEngine {
    /// 执行脚本爬取
    ///
    /// # 参数
    ///
    /// * `payload` - 爬取载荷
    ///
    /// # 返回值
    ///
    /// * `Ok(Value)` - 脚本输出第一行解析得到的JSON
    /// * `Err(ScraperError)` - 启动失败、非零退出、无输出、JSON无效或超时
    async fn scrape(&self, payload: &CrawlPayload) -> Result<Value, ScraperError> {
        let invocation = self.invocation(payload)?;
        debug!(command = %invocation, "Launching scraper script");

        let start = Instant::now();
        let output = self.run(&invocation).await.inspect_err(|e| {
            warn!(error = %e, "Scraper script did not complete");
        })?;
        debug!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            status = %output.status,
            stdout_bytes = output.stdout.len(),
            "Scraper script finished"
        );

        if !output.status.success() {
            return Err(ScraperError::NonZeroExit {
                code: output.status.code(),
            });
        }

        parse_first_line(&output.stdout)
    }

    fn name(&self) -> &'static str {
        "script"
    }
}

/// 取标准输出的第一行并按JSON解析
///
/// 没有任何输出行时返回 `EmptyOutput`。第一行去掉行尾空白后直接按字节解析，
/// 空行或非UTF-8内容都按JSON解析失败处理。
pub fn parse_first_line(stdout: &[u8]) -> Result<Value, ScraperError> {
    let first = stdout
        .split(|byte| *byte == b'\n')
        .next()
        .filter(|_| !stdout.is_empty())
        .ok_or(ScraperError::EmptyOutput)?;

    serde_json::from_slice(first.trim_ascii_end()).map_err(ScraperError::InvalidJson)
}

#[cfg(test)]
#[path = "script_engine_test.rs"]
mod tests;
