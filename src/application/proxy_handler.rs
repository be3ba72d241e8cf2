/// プロキシハンドラー
///
/// 受信イベント1件につき、プリフライト応答、または
/// 変換→送信→レスポンス変換を行い、必ず1つのレスポンスを返す。
use tracing::{error, info, warn};

use crate::application::{RequestTranslator, ResponseMapper};
use crate::domain::{InboundEvent, OutboundOutcome, OutboundResponse};
use crate::infrastructure::{Dispatcher, UpstreamConfig};

/// 受信イベントを上流へ転送するハンドラー
pub struct ProxyHandler<D>
where
    D: Dispatcher,
{
    translator: RequestTranslator,
    dispatcher: D,
    mapper: ResponseMapper,
}

impl<D> ProxyHandler<D>
where
    D: Dispatcher,
{
    /// 新しいProxyHandlerを作成
    pub fn new(config: UpstreamConfig, dispatcher: D) -> Self {
        Self {
            translator: RequestTranslator::new(config.clone()),
            dispatcher,
            mapper: ResponseMapper::new(config),
        }
    }

    /// Lambdaから受け取ったJSONペイロードを処理
    ///
    /// 型の合わないフィールドを含むイベントも500レスポンスとして返す。
    pub async fn handle_payload(&self, payload: serde_json::Value) -> OutboundResponse {
        match serde_json::from_value::<InboundEvent>(payload) {
            Ok(event) => self.handle(&event).await,
            Err(e) => {
                error!(error = %e, "受信イベントの解析に失敗");
                self.mapper.map_invalid_event(&e)
            }
        }
    }

    /// イベントを処理
    ///
    /// `OPTIONS`は上流へ送信せずにCORSプリフライト応答を返す。
    /// それ以外の失敗もすべてレスポンスへ変換し、エラーを返さない。
    pub async fn handle(&self, event: &InboundEvent) -> OutboundResponse {
        if event.is_preflight() {
            info!("CORSプリフライトに応答");
            return OutboundResponse::preflight();
        }

        let request = match self.translator.translate(event) {
            Ok(request) => request,
            Err(e) => {
                error!(error = %e, "上流リクエストの組み立てに失敗");
                return self.mapper.map_translate_error(&e);
            }
        };

        info!(
            method = %request.method,
            url = %request.url,
            has_sharer_user_id = request.sharer_user_id.is_some(),
            body_len = request.body.as_ref().map_or(0, Vec::len),
            "上流へ転送"
        );

        let outcome = self.dispatcher.dispatch(&request).await;
        log_outcome(&outcome);

        self.mapper.map(outcome)
    }
}

fn log_outcome(outcome: &OutboundOutcome) {
    let kind = outcome.kind();
    match outcome {
        OutboundOutcome::Success { status, body } => {
            info!(outcome = kind, status, body_len = body.len(), "上流が成功を返却");
        }
        OutboundOutcome::UpstreamError { status, body } => {
            warn!(outcome = kind, status, body_len = body.len(), "上流がエラーを返却");
        }
        OutboundOutcome::ConnectionFailure { reason } => {
            error!(outcome = kind, reason = %reason, "上流に接続できません");
        }
        OutboundOutcome::UnexpectedFailure { message } => {
            error!(outcome = kind, message = %message, "転送中に予期しないエラー");
        }
    }
}
