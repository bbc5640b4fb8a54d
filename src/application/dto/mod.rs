// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义调度输入（查询参数与请求体）和统一响应信封
pub mod crawl_request;
pub mod envelope;
