// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use crawlgate::application::use_cases::dispatch_crawl::CrawlDispatcher;
use crawlgate::config::settings::{ScraperSettings, Settings};
use crawlgate::engines::script_engine::ScriptEngine;
use crawlgate::presentation::routes;
use std::sync::Arc;
use tempfile::TempDir;

/// 原样输出第一个参数的桩脚本
pub const ECHO_ARGUMENT: &str = "printf '%s\\n' \"$1\"\n";

/// 端到端场景中的桩爬虫：只接受固定参数
pub const EXAMPLE_ITEM: &str = r#"if [ "$1" = '{"url":"https://example.test"}' ]; then
  echo '{"title":"Example Item","price":1000}'
else
  echo "unexpected argument: $1" >&2
  exit 1
fi
"#;

#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    // Keep the stub scripts alive
    pub script_dir: TempDir,
}

pub fn create_test_app(single_script: &str, multi_script: &str) -> TestApp {
    create_test_app_with(single_script, multi_script, |_| {})
}

/// 用 `sh` 运行桩脚本构造测试服务，`configure` 可以在组装前调整配置
pub fn create_test_app_with(
    single_script: &str,
    multi_script: &str,
    configure: impl FnOnce(&mut Settings),
) -> TestApp {
    let script_dir = tempfile::tempdir().expect("Failed to create script dir");
    std::fs::write(script_dir.path().join("one_by_one.sh"), single_script).unwrap();
    std::fs::write(script_dir.path().join("multi.sh"), multi_script).unwrap();

    let mut settings = Settings::default();
    settings.scraper = ScraperSettings {
        interpreter: "sh".to_string(),
        script_dir: script_dir.path().to_path_buf(),
        single_script: "one_by_one.sh".to_string(),
        multi_script: "multi.sh".to_string(),
        timeout_secs: 10,
    };
    configure(&mut settings);

    let scraper = Arc::new(ScriptEngine::new(settings.scraper.clone()));
    let dispatcher = Arc::new(CrawlDispatcher::from_settings(
        scraper,
        &settings.dispatcher,
    ));
    let server = TestServer::new(routes::routes(dispatcher)).unwrap();

    TestApp { server, script_dir }
}
