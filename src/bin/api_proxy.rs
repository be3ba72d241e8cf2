/// APIプロキシLambdaエントリポイント
///
/// API Gatewayプロキシ統合のイベントを受け取り、上流APIへ転送して
/// 結果をプロキシ統合のレスポンス形式で返却する。
use api_proxy::application::ProxyHandler;
use api_proxy::domain::OutboundResponse;
use api_proxy::infrastructure::{init_logging, Dispatcher, HttpDispatcher, UpstreamConfig};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::{info, info_span, Instrument};

#[tokio::main]
async fn main() -> Result<(), Error> {
    // 構造化ログを初期化
    init_logging();

    // 設定とHTTPクライアントはコールドスタート時に一度だけ構築する
    let config = UpstreamConfig::from_env()?;
    info!(upstream = config.base_url(), "APIプロキシLambda関数を初期化");

    let proxy_handler = ProxyHandler::new(config, HttpDispatcher::new()?);
    let proxy_handler = &proxy_handler;

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        handler(proxy_handler, event).await
    }))
    .await
}

/// Lambda関数のメインハンドラー
///
/// ペイロードはJSONのまま受け取り、解析失敗もレスポンスへ変換する。
/// そのため常に`Ok`を返す。
async fn handler<D: Dispatcher>(
    proxy_handler: &ProxyHandler<D>,
    event: LambdaEvent<Value>,
) -> Result<OutboundResponse, Error> {
    let LambdaEvent { payload, context, .. } = event;
    let method = payload
        .get("httpMethod")
        .and_then(Value::as_str)
        .unwrap_or("GET")
        .to_string();
    let span = info_span!(
        "proxy_request",
        request_id = %context.request_id,
        method = %method
    );

    let response = proxy_handler
        .handle_payload(payload)
        .instrument(span.clone())
        .await;
    span.in_scope(|| info!(status = response.status_code, "レスポンス送信"));

    Ok(response)
}
