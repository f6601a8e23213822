//! PlayerConnection trait 定義
//!
//! 1 つのクライアント接続への送信口を抽象化します。
//! ドメイン層（`RoomSession`）はこの trait にだけ依存し、WebSocket の実装は
//! Infrastructure 層（`infrastructure::message_pusher`）が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{ConnectionId, MessagePushError, RoomEvent};

/// クライアント接続への送信口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PlayerConnection: Send + Sync {
    /// 接続の識別子
    fn id(&self) -> ConnectionId;

    /// イベントを送信
    ///
    /// 失敗した場合、呼び出し側はこの接続を死んだものとして扱う。
    async fn push(&self, event: &RoomEvent) -> Result<(), MessagePushError>;

    /// 接続を閉じる（キュー済みのメッセージを送り切った後に close frame を送る）
    async fn close(&self);
}
