// インフラストラクチャ層モジュール
pub mod config;
pub mod dispatcher;
pub mod logging;

// 再エクスポート
pub use config::{UpstreamConfig, UpstreamConfigError};
pub use dispatcher::{Dispatcher, HttpDispatcher};
pub use logging::init_logging;
