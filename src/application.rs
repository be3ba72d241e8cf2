// アプリケーション層モジュール
pub mod proxy_handler;
pub mod request_translator;
pub mod response_mapper;

// 再エクスポート
pub use proxy_handler::ProxyHandler;
pub use request_translator::{RequestTranslator, TranslateError};
pub use response_mapper::ResponseMapper;
