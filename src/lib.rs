// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含请求数据传输对象和爬取调度用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含爬取类型、爬取载荷和默认配置
pub mod domain;

/// 引擎模块
///
/// 定义爬虫能力接口并实现基于外部脚本的爬虫
pub mod engines;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和中间件
pub mod presentation;

/// 工具模块
///
/// 提供日志初始化等通用功能
pub mod utils;
