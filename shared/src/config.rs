//! 客户端配置
//!
//! 默认值 + 构建期环境变量覆盖。

/// 未配置时使用的 GraphQL 端点
pub const DEFAULT_API_URL: &str = "http://localhost:4000/graphql";

/// 构建期读取的环境变量名
pub const API_URL_ENV: &str = "CLASSROOM_API_URL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
}

impl ClientConfig {
    /// 空白或缺失的值回退到默认端点
    pub fn from_env_value(value: Option<&str>) -> Self {
        let api_url = value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_URL)
            .to_string();
        Self { api_url }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env_value(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_localhost() {
        assert_eq!(ClientConfig::default().api_url, DEFAULT_API_URL);
        assert_eq!(ClientConfig::from_env_value(Some("  ")).api_url, DEFAULT_API_URL);
    }

    #[test]
    fn override_is_trimmed() {
        let cfg = ClientConfig::from_env_value(Some(" https://api.school.edu/graphql\n"));
        assert_eq!(cfg.api_url, "https://api.school.edu/graphql");
    }
}
