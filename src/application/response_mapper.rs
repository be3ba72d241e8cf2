// レスポンス変換
//
// 上流への送信結果を呼び出し元へのレスポンスへ変換する。
// どの分岐でもContent-TypeとAccess-Control-Allow-Originを付与する。

use crate::application::TranslateError;
use crate::domain::{OutboundOutcome, OutboundResponse};
use crate::infrastructure::UpstreamConfig;
use serde_json::json;

/// 送信結果をレスポンスへ変換する
#[derive(Debug, Clone)]
pub struct ResponseMapper {
    config: UpstreamConfig,
}

impl ResponseMapper {
    /// 新しいResponseMapperを作成
    pub fn new(config: UpstreamConfig) -> Self {
        Self { config }
    }

    /// 送信結果をレスポンスへ変換
    ///
    /// | 結果 | ステータス | ボディ |
    /// |---|---|---|
    /// | Success | 上流のまま | 上流のまま |
    /// | UpstreamError | 上流のまま | 上流のまま |
    /// | ConnectionFailure | 503 | `{"error":"Service Unavailable",...}` |
    /// | UnexpectedFailure | 500 | `{"error":"Internal Server Error",...}` |
    pub fn map(&self, outcome: OutboundOutcome) -> OutboundResponse {
        match outcome {
            OutboundOutcome::Success { status, body } => OutboundResponse::json(status, body),
            OutboundOutcome::UpstreamError { status, body } => OutboundResponse::json(status, body),
            OutboundOutcome::ConnectionFailure { .. } => self.service_unavailable(),
            OutboundOutcome::UnexpectedFailure { message } => Self::internal_error(&message),
        }
    }

    /// 変換エラーを500レスポンスへ変換
    pub fn map_translate_error(&self, error: &TranslateError) -> OutboundResponse {
        Self::internal_error(&error.to_string())
    }

    /// 解析できない受信イベントを500レスポンスへ変換
    pub fn map_invalid_event(&self, error: &serde_json::Error) -> OutboundResponse {
        Self::internal_error(&format!("invalid inbound event: {error}"))
    }

    fn service_unavailable(&self) -> OutboundResponse {
        let body = json!({
            "error": "Service Unavailable",
            "message": format!(
                "Cannot connect to upstream at {}. Make sure it is running.",
                self.config.base_url()
            ),
        });
        OutboundResponse::json(503, body.to_string())
    }

    fn internal_error(message: &str) -> OutboundResponse {
        let body = json!({
            "error": "Internal Server Error",
            "message": message,
        });
        OutboundResponse::json(500, body.to_string())
    }
}
