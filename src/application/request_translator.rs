// リクエスト変換
//
// 受信イベントを上流向けのOutboundRequestへ変換する。
// 状態を持たず、同じイベントからは常に同じリクエストを生成する。

use crate::domain::inbound_event::{PATH_PARAM, SHARER_USER_ID_HEADER};
use crate::domain::{InboundEvent, OutboundRequest};
use crate::infrastructure::UpstreamConfig;
use thiserror::Error;
use url::Url;

/// `path`パラメータが無い場合の上流パス
pub const DEFAULT_UPSTREAM_PATH: &str = "/users";

/// リクエスト変換エラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TranslateError {
    /// 上流URLを組み立てられない
    #[error("invalid upstream URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

/// 受信イベントを上流リクエストへ変換する
#[derive(Debug, Clone)]
pub struct RequestTranslator {
    config: UpstreamConfig,
}

impl RequestTranslator {
    /// 新しいRequestTranslatorを作成
    pub fn new(config: UpstreamConfig) -> Self {
        Self { config }
    }

    /// 受信イベントを変換
    ///
    /// # 処理
    /// 1. `path`クエリパラメータで上流パスを決定（無ければ`/users`）
    /// 2. 残りのクエリパラメータを`key=value`を`&`で連結（エンコードしない）
    /// 3. `x-sharer-user-id`ヘッダーを`X-Sharer-User-Id`として転送
    /// 4. 空でないボディのみUTF-8バイト列として転送
    ///
    /// # 戻り値
    /// * `Err(TranslateError::InvalidUrl)` - 組み立てたURLが解析できない
    pub fn translate(&self, event: &InboundEvent) -> Result<OutboundRequest, TranslateError> {
        let url = self.build_url(event);

        let parsed = Url::parse(&url).map_err(|e| TranslateError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        // パス指定でホストや認証情報を書き換えられないようにする
        if !self.is_configured_origin(&parsed) {
            return Err(TranslateError::InvalidUrl {
                url,
                reason: "path must not change the upstream origin".to_string(),
            });
        }

        let sharer_user_id = event
            .header(SHARER_USER_ID_HEADER)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let body = event
            .body
            .as_deref()
            .filter(|body| !body.is_empty())
            .map(|body| body.as_bytes().to_vec());

        Ok(OutboundRequest {
            url,
            method: event.http_method.clone(),
            sharer_user_id,
            body,
        })
    }

    fn is_configured_origin(&self, url: &Url) -> bool {
        let base = self.config.url();
        url.scheme() == base.scheme()
            && url.host_str() == base.host_str()
            && url.port_or_known_default() == base.port_or_known_default()
            && url.username().is_empty()
            && url.password().is_none()
    }

    fn build_url(&self, event: &InboundEvent) -> String {
        let path = event.path_override().unwrap_or(DEFAULT_UPSTREAM_PATH);
        let mut url = format!("{}{}", self.config.base_url(), path);

        let query = event
            .query_string_parameters
            .iter()
            .filter(|(key, _)| key.as_str() != PATH_PARAM)
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");

        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        url
    }
}
