// 受信イベントモデル
//
// API Gatewayプロキシ統合から渡されるHTTPイベントを型安全に表現する。
// 欠落またはnullのフィールドはデシリアライズ時に一度だけデフォルト値へ解決する。

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// メソッド未指定時のデフォルト
pub const DEFAULT_METHOD: &str = "GET";

/// CORSプリフライトのメソッド
pub const PREFLIGHT_METHOD: &str = "OPTIONS";

/// 上流パスを指定するクエリパラメータ名
pub const PATH_PARAM: &str = "path";

/// 転送対象となる共有者IDヘッダー（小文字）
pub const SHARER_USER_ID_HEADER: &str = "x-sharer-user-id";

/// 受信HTTPイベント
///
/// `httpMethod`、`headers`、`queryStringParameters`、`body`以外のフィールド
/// （requestContext等）は無視する。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundEvent {
    /// HTTPメソッド（未指定・nullの場合は`GET`）
    #[serde(default = "default_method", deserialize_with = "method_or_default")]
    pub http_method: String,
    /// リクエストヘッダー（名前は大文字小文字を区別せずに検索する）
    #[serde(default, deserialize_with = "null_as_default")]
    pub headers: BTreeMap<String, String>,
    /// クエリパラメータ
    #[serde(default, deserialize_with = "null_as_default")]
    pub query_string_parameters: BTreeMap<String, String>,
    /// リクエストボディ
    #[serde(default)]
    pub body: Option<String>,
}

impl InboundEvent {
    /// テストや組み込み用に明示的な値で作成
    pub fn new(http_method: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            headers: BTreeMap::new(),
            query_string_parameters: BTreeMap::new(),
            body: None,
        }
    }

    /// ヘッダーを追加
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// クエリパラメータを追加
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters.insert(key.into(), value.into());
        self
    }

    /// ボディを設定
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// プリフライトリクエストかどうか
    pub fn is_preflight(&self) -> bool {
        self.http_method == PREFLIGHT_METHOD
    }

    /// ヘッダー値を大文字小文字を区別せずに取得
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// 上流パスの指定を取得
    pub fn path_override(&self) -> Option<&str> {
        self.query_string_parameters
            .get(PATH_PARAM)
            .map(String::as_str)
    }
}

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

fn method_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let method = Option::<String>::deserialize(deserializer)?;
    Ok(method.unwrap_or_else(default_method))
}

// API Gatewayは値が無いとき`null`を送るため、nullも空マップとして扱う
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    let value = Option::<T>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}
