// 上流への送信結果モデル

/// 上流への送信結果
///
/// 1回の呼び出しにつき必ず1つのバリアントが生成される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundOutcome {
    /// 上流が2xxを返した
    Success { status: u16, body: String },
    /// 上流が2xx以外のステータスを返した
    UpstreamError { status: u16, body: String },
    /// 上流に接続できなかった（DNS失敗、接続拒否、タイムアウト）
    ConnectionFailure { reason: String },
    /// その他の予期しない失敗
    UnexpectedFailure { message: String },
}

impl OutboundOutcome {
    /// ログ出力用の種別名
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundOutcome::Success { .. } => "success",
            OutboundOutcome::UpstreamError { .. } => "upstream_error",
            OutboundOutcome::ConnectionFailure { .. } => "connection_failure",
            OutboundOutcome::UnexpectedFailure { .. } => "unexpected_failure",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind() {
        let cases = [
            (
                OutboundOutcome::Success { status: 200, body: String::new() },
                "success",
            ),
            (
                OutboundOutcome::UpstreamError { status: 404, body: String::new() },
                "upstream_error",
            ),
            (
                OutboundOutcome::ConnectionFailure { reason: "refused".to_string() },
                "connection_failure",
            ),
            (
                OutboundOutcome::UnexpectedFailure { message: "boom".to_string() },
                "unexpected_failure",
            ),
        ];

        for (outcome, expected) in cases {
            assert_eq!(outcome.kind(), expected);
        }
    }
}
