// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含请求数据传输对象和爬取调度用例，
/// 将HTTP表示层与爬虫实现分离
pub mod dto;
pub mod use_cases;
