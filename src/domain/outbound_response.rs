// 呼び出し元へ返すレスポンスモデル
//
// API Gatewayプロキシ統合のレスポンス形式
// （statusCode / headers / body / isBase64Encoded）に対応する。

use std::collections::BTreeMap;

use serde::Serialize;

/// 全レスポンスに付与するCORSヘッダー名
pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
/// プリフライトで許可するメソッドのヘッダー名
pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
/// プリフライトで許可するヘッダーのヘッダー名
pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
/// プリフライトキャッシュ期間のヘッダー名
pub const ACCESS_CONTROL_MAX_AGE: &str = "Access-Control-Max-Age";
/// Content-Typeヘッダー名
pub const CONTENT_TYPE: &str = "Content-Type";

/// 許可するオリジン
pub const ALLOWED_ORIGIN: &str = "*";
/// プリフライトで許可するメソッド
pub const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, PATCH, OPTIONS";
/// プリフライトで許可するヘッダー
pub const ALLOWED_HEADERS: &str = "Content-Type, X-Sharer-User-Id";
/// プリフライトキャッシュ期間（24時間、秒）
pub const PREFLIGHT_MAX_AGE_SECS: u32 = 86_400;
/// レスポンスのContent-Type
pub const RESPONSE_CONTENT_TYPE: &str = "application/json";

/// 呼び出し元へ返すレスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundResponse {
    /// HTTPステータスコード
    pub status_code: u16,
    /// レスポンスヘッダー
    pub headers: BTreeMap<String, String>,
    /// レスポンスボディ
    pub body: String,
    /// ボディがBase64エンコードされているか（常に`false`）
    pub is_base64_encoded: bool,
}

impl OutboundResponse {
    /// JSONレスポンスを作成
    ///
    /// `Content-Type: application/json`と`Access-Control-Allow-Origin: *`を付与する。
    pub fn json(status_code: u16, body: impl Into<String>) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(CONTENT_TYPE.to_string(), RESPONSE_CONTENT_TYPE.to_string());
        headers.insert(
            ACCESS_CONTROL_ALLOW_ORIGIN.to_string(),
            ALLOWED_ORIGIN.to_string(),
        );

        Self {
            status_code,
            headers,
            body: body.into(),
            is_base64_encoded: false,
        }
    }

    /// CORSプリフライトへの固定レスポンスを作成
    ///
    /// ステータス200、空ボディ。
    pub fn preflight() -> Self {
        let headers = [
            (ACCESS_CONTROL_ALLOW_ORIGIN, ALLOWED_ORIGIN.to_string()),
            (ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS.to_string()),
            (ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS.to_string()),
            (ACCESS_CONTROL_MAX_AGE, PREFLIGHT_MAX_AGE_SECS.to_string()),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

        Self {
            status_code: 200,
            headers,
            body: String::new(),
            is_base64_encoded: false,
        }
    }

    /// ヘッダー値を取得
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_response_has_cors_and_content_type() {
        let response = OutboundResponse::json(201, "{\"id\":7}");

        assert_eq!(response.status_code, 201);
        assert_eq!(response.body, "{\"id\":7}");
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
        assert!(!response.is_base64_encoded);
    }

    #[test]
    fn test_preflight_response() {
        let response = OutboundResponse::preflight();

        assert_eq!(response.status_code, 200);
        assert!(response.body.is_empty());
        assert_eq!(response.header("Access-Control-Allow-Origin"), Some("*"));
        assert_eq!(
            response.header("Access-Control-Allow-Methods"),
            Some("GET, POST, PUT, DELETE, PATCH, OPTIONS")
        );
        assert_eq!(
            response.header("Access-Control-Allow-Headers"),
            Some("Content-Type, X-Sharer-User-Id")
        );
        assert_eq!(response.header("Access-Control-Max-Age"), Some("86400"));
    }

    #[test]
    fn test_serialize_lambda_proxy_shape() {
        let value = serde_json::to_value(OutboundResponse::json(404, "{}")).unwrap();

        assert_eq!(
            value,
            json!({
                "statusCode": 404,
                "headers": {
                    "Access-Control-Allow-Origin": "*",
                    "Content-Type": "application/json"
                },
                "body": "{}",
                "isBase64Encoded": false
            })
        );
    }
}
