//! WebSocket を使った PlayerConnection 実装
//!
//! ## 責務
//!
//! - イベントを JSON に変換し、接続ごとの送信キュー（`UnboundedSender`）に積む
//! - 接続のクローズ要求を送信キューに積む
//!
//! ## 設計ノート
//!
//! WebSocket の生成と実際の書き込みは UI 層（`ui::handler::websocket`）の送信ループが行います。
//! 送信ループが終了する（書き込み失敗・タイムアウト・クローズ）と受信側が drop され、
//! 以後の `push` は `MessagePushError::ConnectionClosed` になります。
//! RoomSession はこれを「死んだ接続」として扱い、座席から外します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, MessagePushError, PlayerConnection, RoomEvent},
    infrastructure::dto::conversion::encode_room_event,
};

/// 送信ループへの指示
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    /// テキストフレームを送る
    Text(String),
    /// close frame を送って送信ループを終える
    Close,
}

/// WebSocket を使った PlayerConnection 実装
pub struct WebSocketConnection {
    id: ConnectionId,
    /// 送信ループへのキュー
    sender: mpsc::UnboundedSender<Outbound>,
}

impl WebSocketConnection {
    /// 新しい WebSocketConnection を作成
    ///
    /// # 引数
    ///
    /// - `id`: 接続の識別子
    /// - `sender`: 送信ループが受信するキューの送信側
    pub fn new(id: ConnectionId, sender: mpsc::UnboundedSender<Outbound>) -> Self {
        Self { id, sender }
    }

    /// 新しい ConnectionId と送信キューを作成し、接続とキューの受信側を返す
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Outbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(ConnectionId::generate(), tx), rx)
    }
}

#[async_trait]
impl PlayerConnection for WebSocketConnection {
    fn id(&self) -> ConnectionId {
        self.id
    }

    async fn push(&self, event: &RoomEvent) -> Result<(), MessagePushError> {
        let text =
            encode_room_event(event).map_err(|e| MessagePushError::EncodeFailed(e.to_string()))?;
        self.sender
            .send(Outbound::Text(text))
            .map_err(|_| MessagePushError::ConnectionClosed(self.id))?;
        tracing::debug!("Queued {} for connection '{}'", event.kind(), self.id);
        Ok(())
    }

    async fn close(&self) {
        if self.sender.send(Outbound::Close).is_err() {
            tracing::debug!("Connection '{}' is already closed", self.id);
        }
    }
}
