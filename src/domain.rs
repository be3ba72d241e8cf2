// ドメイン層モジュール
pub mod inbound_event;
pub mod outbound_outcome;
pub mod outbound_request;
pub mod outbound_response;

// 再エクスポート
pub use inbound_event::InboundEvent;
pub use outbound_outcome::OutboundOutcome;
pub use outbound_request::OutboundRequest;
pub use outbound_response::OutboundResponse;
