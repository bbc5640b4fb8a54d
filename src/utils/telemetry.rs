// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::settings::TelemetrySettings;

const DEFAULT_FILTER: &str = "info,crawlgate=debug";

pub fn init_telemetry(settings: &TelemetrySettings) {
    if let Err(e) = try_init_telemetry(settings) {
        eprintln!("Failed to initialize telemetry: {}", e);
    }
}

/// 安装全局日志订阅者，已安装时返回错误
pub fn try_init_telemetry(settings: &TelemetrySettings) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let (plain, json) = if settings.json {
        (None, Some(fmt::layer().json()))
    } else {
        (Some(fmt::layer()), None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .try_init()
}
