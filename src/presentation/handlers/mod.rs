// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 调度器只有一个处理器，负责所有路径上的请求
pub mod crawl_handler;
