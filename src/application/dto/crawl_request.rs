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
use std::collections::BTreeMap;
use thiserror::Error;

use crate::domain::models::crawl::CrawlType;

/// 请求输入错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// 请求体不是合法JSON，或字段类型不符
    #[error("malformed request body: {0}")]
    MalformedBody(String),
    /// 查询参数 `urls` 无法解析为映射
    #[error("malformed urls parameter: {0}")]
    MalformedUrls(String),
    /// 不支持的HTTP方法
    #[error("method {0} is not allowed")]
    MethodNotAllowed(String),
}

/// 爬取请求数据传输对象
///
/// 合并查询参数和POST请求体后的调度输入。查询参数优先：
/// 只要查询中出现了 `url`/`urls`（即使为空），请求体中的同名字段就不再使用。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlRequestDto {
    /// 爬取类型
    pub crawl_type: CrawlType,
    /// 单URL覆盖
    pub url: Option<String>,
    /// 多URL覆盖
    pub urls: Option<BTreeMap<String, String>>,
    /// 解析过程中被忽略的格式错误
    pub issues: Vec<RequestError>,
}

impl CrawlRequestDto {
    /// 从原始查询字符串和请求体构造
    ///
    /// # 参数
    ///
    /// * `query` - 原始查询字符串（不含 `?`）
    /// * `body` - POST请求体，其他方法传 `None`
    ///
    /// 只保留与本次爬取类型相关的格式错误：单URL模式不关心 `urls`，多URL模式不关心 `url`。
    pub fn parse(query: Option<&str>, body: Option<&[u8]>) -> Self {
        let mut issues = Vec::new();
        let query = QueryParams::parse(query.unwrap_or_default(), &mut issues);
        let body = body
            .map(|bytes| BodyParams::parse(bytes, &mut issues))
            .unwrap_or_default();

        let crawl_type = CrawlType::from_query(query.crawl_type.as_deref());
        let issues = issues
            .into_iter()
            .filter(|(field, _)| field.applies_to(crawl_type))
            .map(|(_, issue)| issue)
            .collect();

        Self {
            crawl_type,
            url: query.url.or(body.url),
            urls: query.urls.or(body.urls),
            issues,
        }
    }
}

/// 格式错误所属的输入字段
#[derive(Debug, Clone, Copy)]
enum Field {
    /// 整个请求体
    Body,
    Url,
    Urls,
}

impl Field {
    fn applies_to(self, crawl_type: CrawlType) -> bool {
        match self {
            Field::Body => true,
            Field::Url => crawl_type == CrawlType::Single,
            Field::Urls => crawl_type == CrawlType::Multi,
        }
    }
}

type Issues = Vec<(Field, RequestError)>;

#[derive(Debug, Default)]
struct QueryParams {
    crawl_type: Option<String>,
    url: Option<String>,
    urls: Option<BTreeMap<String, String>>,
}

impl QueryParams {
    fn parse(raw: &str, issues: &mut Issues) -> Self {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw).unwrap_or_default();

        let mut params = QueryParams::default();
        let mut raw_urls = None;
        let mut bracket_urls: Option<BTreeMap<String, String>> = None;

        // Later occurrences of a key win
        for (key, value) in pairs {
            match key.as_str() {
                "type" => params.crawl_type = Some(value),
                "url" => params.url = Some(value),
                "urls" => raw_urls = Some(value),
                _ => {
                    let Some(id) = key.strip_prefix("urls[").and_then(|k| k.strip_suffix(']'))
                    else {
                        continue;
                    };
                    let entries = bracket_urls.get_or_insert_with(BTreeMap::new);
                    if id.is_empty() {
                        issues.push((
                            Field::Urls,
                            RequestError::MalformedUrls(
                                "category id in `urls[...]` must not be empty".to_string(),
                            ),
                        ));
                    } else {
                        entries.insert(id.to_string(), value);
                    }
                }
            }
        }

        params.urls = match (bracket_urls, raw_urls) {
            (Some(entries), _) => Some(entries),
            (None, Some(raw)) if raw.trim().is_empty() => Some(BTreeMap::new()),
            (None, Some(raw)) => match serde_json::from_str(&raw) {
                Ok(entries) => Some(entries),
                Err(e) => {
                    issues.push((Field::Urls, RequestError::MalformedUrls(e.to_string())));
                    None
                }
            },
            (None, None) => None,
        };

        params
    }
}

#[derive(Debug, Default)]
struct BodyParams {
    url: Option<String>,
    urls: Option<BTreeMap<String, String>>,
}

impl BodyParams {
    fn parse(bytes: &[u8], issues: &mut Issues) -> Self {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Self::default();
        }

        let object = match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(object)) => object,
            // Valid JSON that is not an object carries no fields
            Ok(_) => return Self::default(),
            Err(e) => {
                issues.push((Field::Body, RequestError::MalformedBody(e.to_string())));
                return Self::default();
            }
        };

        let url = match object.get("url") {
            None | Some(Value::Null) => None,
            Some(Value::String(url)) => Some(url.clone()),
            Some(_) => {
                issues.push((
                    Field::Url,
                    RequestError::MalformedBody("`url` must be a string".to_string()),
                ));
                None
            }
        };

        let urls = match object.get("urls") {
            None | Some(Value::Null) => None,
            Some(value) => match serde_json::from_value(value.clone()) {
                Ok(entries) => Some(entries),
                Err(_) => {
                    issues.push((
                        Field::Urls,
                        RequestError::MalformedBody(
                            "`urls` must be an object of category id to url strings".to_string(),
                        ),
                    ));
                    None
                }
            },
        };

        Self { url, urls }
    }
}
