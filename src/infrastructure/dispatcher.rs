// Dispatcher - 上流APIへのHTTP送信
//
// 組み立て済みのOutboundRequestを上流へ1回だけ送信し、
// 結果をOutboundOutcomeの4種別のいずれかに分類する。
// 再試行は行わない。

use crate::domain::{OutboundOutcome, OutboundRequest};
use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use std::error::Error as _;
use std::time::Duration;
use tracing::{debug, instrument};

/// リクエストタイムアウト（秒）
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// 上流送信用トレイト
///
/// 実際のHTTPクライアントとテスト用モックを差し替えられるように抽象化する。
/// 失敗もすべて`OutboundOutcome`として返し、エラーを外へ送出しない。
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// リクエストを送信して結果を分類する
    async fn dispatch(&self, request: &OutboundRequest) -> OutboundOutcome;
}

/// reqwestによるDispatcher実装
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: Client,
}

impl HttpDispatcher {
    /// 30秒タイムアウトのクライアントを作成
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
    }

    /// タイムアウトを指定してクライアントを作成
    pub fn with_timeout(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }

    async fn read_success(status: u16, response: Response) -> OutboundOutcome {
        match response.bytes().await {
            Ok(bytes) => match String::from_utf8(bytes.to_vec()) {
                Ok(body) => OutboundOutcome::Success { status, body },
                Err(e) => OutboundOutcome::UnexpectedFailure {
                    message: format!("upstream response is not valid UTF-8: {e}"),
                },
            },
            Err(e) => classify_error(&e),
        }
    }

    async fn read_upstream_error(status: reqwest::StatusCode, response: Response) -> OutboundOutcome {
        // 本文が読めない場合はステータスの文字列表現で代替する
        let body = match response.bytes().await {
            Ok(bytes) => String::from_utf8(bytes.to_vec()).ok(),
            Err(e) => {
                debug!(error = %e, "エラーレスポンス本文の読み込みに失敗");
                None
            }
        }
        .unwrap_or_else(|| {
            format!(
                "HTTP Error {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )
        });

        OutboundOutcome::UpstreamError {
            status: status.as_u16(),
            body,
        }
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn dispatch(&self, request: &OutboundRequest) -> OutboundOutcome {
        let method = match Method::from_bytes(request.method.as_bytes()) {
            Ok(method) => method,
            Err(e) => {
                return OutboundOutcome::UnexpectedFailure {
                    message: format!("invalid HTTP method {:?}: {e}", request.method),
                };
            }
        };

        let mut builder = self.client.request(method, request.url.as_str());
        for (name, value) in request.headers() {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        debug!(has_body = request.body.is_some(), "上流へ送信");

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return classify_error(&e),
        };

        let status = response.status();
        if status.is_success() {
            Self::read_success(status.as_u16(), response).await
        } else {
            Self::read_upstream_error(status, response).await
        }
    }
}

/// reqwestのエラーを分類する
///
/// 接続失敗とタイムアウトは`ConnectionFailure`、それ以外は`UnexpectedFailure`。
fn classify_error(error: &reqwest::Error) -> OutboundOutcome {
    if error.is_connect() || error.is_timeout() {
        OutboundOutcome::ConnectionFailure {
            reason: describe(error),
        }
    } else {
        OutboundOutcome::UnexpectedFailure {
            message: describe(error),
        }
    }
}

// reqwestのDisplayは原因を含まないため、sourceを連結する
fn describe(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
