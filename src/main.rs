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

use crawlgate::application::use_cases::dispatch_crawl::CrawlDispatcher;
use crawlgate::config::settings::Settings;
use crawlgate::engines::script_engine::ScriptEngine;
use crawlgate::engines::traits::Scraper;
use crawlgate::presentation::routes;
use crawlgate::utils::telemetry;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责加载配置、组装调度器并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load configuration
    let settings = Settings::new()?;

    // 2. Initialize logging
    telemetry::init_telemetry(&settings.telemetry);
    info!("Starting crawlgate...");
    info!(
        interpreter = %settings.scraper.interpreter,
        script_dir = %settings.scraper.script_dir.display(),
        timeout_secs = settings.scraper.timeout_secs,
        strict_body = settings.dispatcher.strict_body,
        "Configuration loaded"
    );

    // 3. Initialize scraper and dispatcher
    let scraper: Arc<dyn Scraper> = Arc::new(ScriptEngine::new(settings.scraper.clone()));
    let dispatcher = Arc::new(CrawlDispatcher::from_settings(
        scraper,
        &settings.dispatcher,
    ));

    // 4. Start HTTP server
    let app = routes::routes(dispatcher);
    let addr = settings.server.address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
