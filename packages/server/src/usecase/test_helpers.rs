//! UseCase テスト用のヘルパー

use std::sync::Arc;

use sanmoku_shared::time::FixedClock;
use tokio::sync::mpsc;

use crate::infrastructure::{
    message_pusher::{Outbound, WebSocketConnection},
    repository::InMemoryRoomRepository,
};

pub fn create_test_repository() -> Arc<InMemoryRoomRepository> {
    Arc::new(InMemoryRoomRepository::new(Arc::new(FixedClock::new(
        1672498800000,
    ))))
}

pub fn create_test_connection() -> (Arc<WebSocketConnection>, mpsc::UnboundedReceiver<Outbound>) {
    let (connection, rx) = WebSocketConnection::channel();
    (Arc::new(connection), rx)
}

/// キューから次のテキストフレームを取り出して JSON として返す
pub async fn next_json(rx: &mut mpsc::UnboundedReceiver<Outbound>) -> serde_json::Value {
    match rx.recv().await {
        Some(Outbound::Text(text)) => serde_json::from_str(&text).unwrap(),
        other => panic!("expected a text frame, got {other:?}"),
    }
}
