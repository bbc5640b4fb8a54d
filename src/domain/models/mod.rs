// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// - 爬取（crawl）：爬取类型、交给外部脚本的载荷以及内置默认配置
pub mod crawl;
