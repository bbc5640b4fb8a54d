// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置设置测试模块
///
/// 确认随仓库发布的 `config/default.toml` 与内置默认值一致

#[cfg(test)]
mod tests {
    use crawlgate::config::settings::Settings;
    use crawlgate::domain::models::crawl::{default_multi_urls, DEFAULT_SINGLE_URL};

    #[test]
    fn test_config_loading_from_default_toml() {
        let shipped = std::fs::read_to_string(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/config/default.toml"
        ))
        .expect("config/default.toml should exist");

        let settings = Settings::from_toml(&shipped).expect("shipped config should load");

        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.scraper.interpreter, "python3");
        assert_eq!(settings.scraper.single_script, "one_by_one.py");
        assert_eq!(settings.scraper.multi_script, "multi.py");
        assert_eq!(settings.dispatcher.single_url, DEFAULT_SINGLE_URL);
        assert_eq!(settings.dispatcher.multi_urls, default_multi_urls());
    }

    #[test]
    fn test_settings_default_matches_empty_config() {
        let loaded = Settings::from_toml("").unwrap();
        let built_in = Settings::default();

        assert_eq!(loaded.server.address(), built_in.server.address());
        assert_eq!(loaded.scraper.timeout(), built_in.scraper.timeout());
        assert_eq!(loaded.dispatcher.defaults(), built_in.dispatcher.defaults());
    }
}
