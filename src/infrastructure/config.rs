// 上流API接続設定
//
// 転送先となる上流サービスのベースURLを環境変数から読み込む。

use thiserror::Error;
use url::Url;

/// ベースURLの環境変数名
pub const UPSTREAM_BASE_URL_ENV: &str = "UPSTREAM_BASE_URL";

/// ベースURLのデフォルト値
pub const DEFAULT_UPSTREAM_BASE_URL: &str = "http://localhost:8080";

/// 上流設定エラー
#[derive(Debug, Error)]
pub enum UpstreamConfigError {
    /// ベースURLが解析できない
    #[error("上流ベースURLが不正です: {url} ({reason})")]
    InvalidBaseUrl { url: String, reason: String },

    /// http/https以外のスキーム
    #[error("上流ベースURLのスキームがサポートされていません: {0}")]
    UnsupportedScheme(String),
}

/// 上流APIの接続設定
///
/// # フィールド
/// - `base_url`: 上流サービスのベースURL（末尾の`/`は除去済み）
/// - `url`: 解析済みのベースURL（転送先オリジンの照合に使用）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    base_url: String,
    url: Url,
}

impl UpstreamConfig {
    /// 新しい設定を作成
    ///
    /// # 引数
    /// - `base_url`: 上流サービスのベースURL（例: "http://localhost:8080"）
    ///
    /// # 戻り値
    /// - `Err(UpstreamConfigError)`: URLが解析できない、またはhttp/https以外
    pub fn new(base_url: impl Into<String>) -> Result<Self, UpstreamConfigError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim().trim_end_matches('/').to_string();

        let parsed = Url::parse(&trimmed).map_err(|e| UpstreamConfigError::InvalidBaseUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => Ok(Self {
                base_url: trimmed,
                url: parsed,
            }),
            other => Err(UpstreamConfigError::UnsupportedScheme(other.to_string())),
        }
    }

    /// 環境変数から設定を読み込み
    ///
    /// # 環境変数
    /// - `UPSTREAM_BASE_URL`: 上流サービスのベースURL
    ///   （未設定・空文字の場合は`http://localhost:8080`）
    pub fn from_env() -> Result<Self, UpstreamConfigError> {
        let base_url = std::env::var(UPSTREAM_BASE_URL_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_UPSTREAM_BASE_URL.to_string());

        Self::new(base_url)
    }

    /// ベースURLを取得
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 解析済みのベースURLを取得
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // ==================== UpstreamConfig テスト ====================

    #[test]
    fn test_new_creates_config() {
        let config = UpstreamConfig::new("https://api.example.com").unwrap();
        assert_eq!(config.base_url(), "https://api.example.com");
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let config = UpstreamConfig::new("http://localhost:8080/").unwrap();
        assert_eq!(config.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let result = UpstreamConfig::new("not a url");
        assert!(matches!(
            result,
            Err(UpstreamConfigError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_new_rejects_unsupported_scheme() {
        match UpstreamConfig::new("ftp://example.com") {
            Err(UpstreamConfigError::UnsupportedScheme(scheme)) => assert_eq!(scheme, "ftp"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parsed_url_keeps_origin() {
        let config = UpstreamConfig::new("http://backend:8080/").unwrap();
        assert_eq!(config.url().host_str(), Some("backend"));
        assert_eq!(config.url().port_or_known_default(), Some(8080));
    }

    #[test]
    #[serial]
    fn test_from_env_success() {
        // 環境変数を設定 (Rust 2024ではunsafe)
        unsafe {
            std::env::set_var(UPSTREAM_BASE_URL_ENV, "https://backend.example.com/");
        }

        let config = UpstreamConfig::from_env().expect("設定の読み込みに失敗");
        assert_eq!(config.base_url(), "https://backend.example.com");

        unsafe {
            std::env::remove_var(UPSTREAM_BASE_URL_ENV);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_missing_uses_default() {
        unsafe {
            std::env::remove_var(UPSTREAM_BASE_URL_ENV);
        }

        let config = UpstreamConfig::from_env().unwrap();
        assert_eq!(config.base_url(), DEFAULT_UPSTREAM_BASE_URL);
    }

    #[test]
    #[serial]
    fn test_from_env_blank_uses_default() {
        unsafe {
            std::env::set_var(UPSTREAM_BASE_URL_ENV, "   ");
        }

        let config = UpstreamConfig::from_env().unwrap();
        assert_eq!(config.base_url(), DEFAULT_UPSTREAM_BASE_URL);

        unsafe {
            std::env::remove_var(UPSTREAM_BASE_URL_ENV);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_invalid() {
        unsafe {
            std::env::set_var(UPSTREAM_BASE_URL_ENV, "::bad::");
        }

        assert!(UpstreamConfig::from_env().is_err());

        unsafe {
            std::env::remove_var(UPSTREAM_BASE_URL_ENV);
        }
    }

    // ==================== UpstreamConfigError テスト ====================

    #[test]
    fn test_error_display() {
        let error = UpstreamConfigError::UnsupportedScheme("ftp".to_string());
        assert!(error.to_string().contains("ftp"));
        assert!(error.to_string().contains("スキーム"));
    }
}
