//! UI layer: axum のルーター、ハンドラー、接続ごとのディスパッチャー

mod dispatcher;
mod handler;
mod server;
mod signal;
pub mod state;

pub use dispatcher::ConnectionDispatcher;
pub use server::{Server, ServerConfig};
