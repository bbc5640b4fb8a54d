// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// 内置的单URL默认地址（生活/健康类目，日榜）
pub const DEFAULT_SINGLE_URL: &str = "https://search.shopping.naver.com/best/category/click?categoryCategoryId=50000003&categoryDemo=A00&categoryRootCategoryId=50000003&period=P1D&tr=nwbhi";

/// 内置的多URL默认映射（类目ID → 榜单地址）
pub const DEFAULT_MULTI_URLS: [(&str, &str); 2] = [
    (
        "50000003",
        "https://search.shopping.naver.com/best/category/click?categoryCategoryId=50000003&categoryDemo=A00&categoryRootCategoryId=50000003&period=P1D&tr=nwbhi",
    ),
    (
        "50000000",
        "https://search.shopping.naver.com/best/category/click?categoryCategoryId=50000000&categoryDemo=A00&categoryRootCategoryId=50000000&period=P1D&tr=nwbhi",
    ),
];

/// 爬取类型
///
/// 决定使用哪一份默认配置以及调用哪一个外部脚本。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CrawlType {
    /// 单URL爬取
    Single,
    /// 多URL（类目映射）爬取
    #[default]
    Multi,
}

impl CrawlType {
    /// 从查询参数 `type` 解析爬取类型
    ///
    /// 只有 `single` 会选择单URL模式，缺失或其他任何值都回落到多URL模式。
    pub fn from_query(value: Option<&str>) -> Self {
        value
            .and_then(|v| v.parse().ok())
            .unwrap_or_default()
    }

    /// 日志与错误信息中使用的可读标签
    pub fn label(&self) -> &'static str {
        match self {
            CrawlType::Single => "single URL",
            CrawlType::Multi => "multi URL",
        }
    }
}

impl fmt::Display for CrawlType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CrawlType::Single => write!(f, "single"),
            CrawlType::Multi => write!(f, "multi"),
        }
    }
}

impl FromStr for CrawlType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single" => Ok(CrawlType::Single),
            "multi" => Ok(CrawlType::Multi),
            _ => Err(()),
        }
    }
}

/// 爬取载荷
///
/// 以单个JSON参数的形式交给外部爬虫脚本：
/// 单URL模式序列化为 `{"url": "..."}`，多URL模式序列化为 `{"<类目ID>": "<url>", ...}`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CrawlPayload {
    /// 单URL载荷
    Single { url: String },
    /// 类目ID到URL的映射
    Multi(BTreeMap<String, String>),
}

impl CrawlPayload {
    /// 载荷对应的爬取类型
    pub fn crawl_type(&self) -> CrawlType {
        match self {
            CrawlPayload::Single { .. } => CrawlType::Single,
            CrawlPayload::Multi(_) => CrawlType::Multi,
        }
    }

    /// 载荷包含的目标URL数量
    pub fn target_count(&self) -> usize {
        match self {
            CrawlPayload::Single { .. } => 1,
            CrawlPayload::Multi(urls) => urls.len(),
        }
    }

    /// 序列化为传给脚本的JSON参数
    ///
    /// 非ASCII字符保持原样，不做 `\uXXXX` 转义。
    pub fn to_argument(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// 默认爬取配置
///
/// 请求未提供 `url`/`urls` 时使用，由配置注入到调度器中。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlDefaults {
    /// 单URL模式的默认地址
    pub single_url: String,
    /// 多URL模式的默认映射
    pub multi_urls: BTreeMap<String, String>,
}

impl CrawlDefaults {
    pub fn new(single_url: impl Into<String>, multi_urls: BTreeMap<String, String>) -> Self {
        Self {
            single_url: single_url.into(),
            multi_urls,
        }
    }

    /// 返回指定爬取类型的默认载荷
    pub fn payload_for(&self, crawl_type: CrawlType) -> CrawlPayload {
        match crawl_type {
            CrawlType::Single => CrawlPayload::Single {
                url: self.single_url.clone(),
            },
            CrawlType::Multi => CrawlPayload::Multi(self.multi_urls.clone()),
        }
    }
}

impl Default for CrawlDefaults {
    fn default() -> Self {
        Self::new(DEFAULT_SINGLE_URL, default_multi_urls())
    }
}

/// 内置多URL映射的拥有型副本
pub fn default_multi_urls() -> BTreeMap<String, String> {
    DEFAULT_MULTI_URLS
        .iter()
        .map(|(id, url)| (id.to_string(), url.to_string()))
        .collect()
}
