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

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::models::crawl::{
    default_multi_urls, CrawlDefaults, CrawlType, DEFAULT_SINGLE_URL,
};

/// 应用程序配置设置
///
/// 包含服务器、外部爬虫脚本、调度器和日志相关的全部配置项
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 外部爬虫脚本配置
    pub scraper: ScraperSettings,
    /// 调度器配置
    pub dispatcher: DispatcherSettings,
    /// 日志配置
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

/// 外部爬虫脚本配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperSettings {
    /// 解释器命令 (python3, python, ...)
    pub interpreter: String,
    /// 脚本所在目录
    pub script_dir: PathBuf,
    /// 单URL脚本文件名
    pub single_script: String,
    /// 多URL脚本文件名
    pub multi_script: String,
    /// 脚本执行超时时间（秒），0 表示不限制
    pub timeout_secs: u64,
}

impl ScraperSettings {
    /// 返回指定爬取类型对应的脚本路径
    pub fn script_path(&self, crawl_type: CrawlType) -> PathBuf {
        let script = match crawl_type {
            CrawlType::Single => &self.single_script,
            CrawlType::Multi => &self.multi_script,
        };
        self.script_dir.join(script)
    }

    /// 脚本执行超时时间，未设置时返回 `None`
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            interpreter: "python3".to_string(),
            script_dir: PathBuf::from("."),
            single_script: "one_by_one.py".to_string(),
            multi_script: "multi.py".to_string(),
            timeout_secs: 300,
        }
    }
}

/// 调度器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct DispatcherSettings {
    /// 是否拒绝格式错误的请求体（返回400而不是回落到默认配置）
    pub strict_body: bool,
    /// 单URL模式的默认地址
    pub single_url: String,
    /// 多URL模式的默认映射
    ///
    /// 不通过 `set_default` 注入，避免与配置文件中的映射合并
    #[serde(default = "default_multi_urls")]
    pub multi_urls: BTreeMap<String, String>,
}

impl DispatcherSettings {
    /// 构造注入调度器的默认爬取配置
    pub fn defaults(&self) -> CrawlDefaults {
        CrawlDefaults::new(self.single_url.clone(), self.multi_urls.clone())
    }
}

impl Default for DispatcherSettings {
    fn default() -> Self {
        Self {
            strict_body: false,
            single_url: DEFAULT_SINGLE_URL.to_string(),
            multi_urls: default_multi_urls(),
        }
    }
}

/// 日志配置设置
#[derive(Debug, Clone, Deserialize, Default)]
pub struct TelemetrySettings {
    /// 是否输出JSON格式日志
    #[serde(default)]
    pub json: bool,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加内置默认值、`config/default`、`config/{APP_ENVIRONMENT}`
    /// 和 `CRAWLGATE__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("CRAWLGATE").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 从TOML文本加载配置，未出现的键使用内置默认值
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let scraper = ScraperSettings::default();
        Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default scraper settings
            .set_default("scraper.interpreter", scraper.interpreter)?
            .set_default("scraper.script_dir", ".")?
            .set_default("scraper.single_script", scraper.single_script)?
            .set_default("scraper.multi_script", scraper.multi_script)?
            .set_default("scraper.timeout_secs", scraper.timeout_secs)?
            // Default dispatcher settings
            .set_default("dispatcher.strict_body", false)?
            .set_default("dispatcher.single_url", DEFAULT_SINGLE_URL)?
            .set_default("telemetry.json", false)
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
