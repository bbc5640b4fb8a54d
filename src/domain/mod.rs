// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 定义爬取类型、爬取载荷和默认配置等核心概念，
/// 不依赖任何HTTP或进程相关的实现。
pub mod models;
