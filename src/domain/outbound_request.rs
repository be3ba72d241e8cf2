// 上流へ送信するリクエストモデル

/// 上流へ転送する共有者IDヘッダーの正規名
pub const FORWARDED_SHARER_HEADER: &str = "X-Sharer-User-Id";

/// 上流リクエストのContent-Type
pub const OUTBOUND_CONTENT_TYPE: &str = "application/json";

/// 上流へ送信するリクエスト
///
/// 受信イベントから`RequestTranslator`が組み立てる。
/// URLは組み立てたままの文字列で保持し、再エンコードしない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// 上流ベースURL + パス + クエリ文字列
    pub url: String,
    /// HTTPメソッド（受信イベントからそのままコピー）
    pub method: String,
    /// 転送する共有者ID（`X-Sharer-User-Id`）
    pub sharer_user_id: Option<String>,
    /// ボディ（空の場合は送信しない）
    pub body: Option<Vec<u8>>,
}

impl OutboundRequest {
    /// 送信するヘッダーを名前と値のペアで返す
    ///
    /// `Content-Type: application/json`は常に含まれる。
    pub fn headers(&self) -> Vec<(&'static str, &str)> {
        let mut headers = vec![("Content-Type", OUTBOUND_CONTENT_TYPE)];
        if let Some(user_id) = &self.sharer_user_id {
            headers.push((FORWARDED_SHARER_HEADER, user_id.as_str()));
        }
        headers
    }
}
