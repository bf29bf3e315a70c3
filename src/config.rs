use std::time::Duration;
use travella_shared::{STORAGE_ADMIN_TOKEN, STORAGE_USER_TOKEN};

// =========================================================
// 动态运行时配置 (Runtime Configuration)
// =========================================================

/// 编译期注入的 API 地址，未设置时使用本地开发地址
pub const DEFAULT_API_BASE_URL: &str = match option_env!("TRAVELLA_API_URL") {
    Some(url) => url,
    None => "http://localhost:8002",
};

pub const DEFAULT_DASHBOARD_REFRESH: Duration = Duration::from_secs(30);

const VAR_API_URL: &str = "TRAVELLA_API_URL";
const VAR_LANG: &str = "TRAVELLA_LANG";
const VAR_DASHBOARD_REFRESH: &str = "TRAVELLA_DASHBOARD_REFRESH_SECS";

/// 客户端配置
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub user_token_key: String,
    pub admin_token_key: String,
    /// 管理仪表盘刷新间隔
    pub dashboard_refresh: Duration,
    /// 作为 `X-Lang` 发送的语言代码
    pub language: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.trim_end_matches('/').to_string(),
            user_token_key: STORAGE_USER_TOKEN.to_string(),
            admin_token_key: STORAGE_ADMIN_TOKEN.to_string(),
            dashboard_refresh: DEFAULT_DASHBOARD_REFRESH,
            language: None,
        }
    }
}

impl ClientConfig {
    /// 通过查找函数读取覆盖项，读不到或无法解析时保留默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(VAR_API_URL).filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(&url);
        }

        config.language = lookup(VAR_LANG).filter(|v| !v.trim().is_empty());

        match lookup(VAR_DASHBOARD_REFRESH).map(|v| v.trim().parse::<u64>()) {
            Some(Ok(secs)) if secs > 0 => config.dashboard_refresh = Duration::from_secs(secs),
            Some(_) => log::warn!(
                "ignoring invalid {}, keeping {:?}",
                VAR_DASHBOARD_REFRESH,
                config.dashboard_refresh
            ),
            None => {}
        }

        config
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.api_base_url = url.trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language;
        self
    }

    pub fn with_dashboard_refresh(mut self, every: Duration) -> Self {
        self.dashboard_refresh = every;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.user_token_key, "user_token");
        assert_eq!(config.admin_token_key, "admin_token");
        assert_eq!(config.dashboard_refresh, Duration::from_secs(30));
        assert_ne!(config.user_token_key, config.admin_token_key);
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("TRAVELLA_API_URL", "https://api.travella.example/"),
            ("TRAVELLA_LANG", "ne"),
            ("TRAVELLA_DASHBOARD_REFRESH_SECS", "10"),
        ]);
        let config = ClientConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_base_url, "https://api.travella.example");
        assert_eq!(config.language.as_deref(), Some("ne"));
        assert_eq!(config.dashboard_refresh, Duration::from_secs(10));
    }

    #[test]
    fn test_invalid_refresh_keeps_default() {
        let config = ClientConfig::from_lookup(|k| {
            (k == "TRAVELLA_DASHBOARD_REFRESH_SECS").then(|| "soon".to_string())
        });
        assert_eq!(config.dashboard_refresh, DEFAULT_DASHBOARD_REFRESH);
        assert_eq!(config.api_base_url, ClientConfig::default().api_base_url);
    }
}
