//! ドメイン層のエラー型

use thiserror::Error;

use super::ConnectionId;

/// Room エンティティの操作エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// 2 つの座席が埋まっている
    #[error("room is full")]
    Full,

    /// 同じ接続が既に着席している
    #[error("connection '{0}' is already seated")]
    AlreadySeated(ConnectionId),
}

/// メッセージ送信（プッシュ）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 送信キューが閉じている（送信ループが終了済み）
    #[error("connection '{0}' is closed")]
    ConnectionClosed(ConnectionId),

    /// メッセージの直列化に失敗
    #[error("failed to encode message: {0}")]
    EncodeFailed(String),
}
