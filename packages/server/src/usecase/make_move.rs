//! UseCase: 盤面の更新（move）

use std::sync::Arc;

use crate::domain::{Board, ConnectionId, RoomRepository, RoomSession, SessionStatus, Turn, Winner};

/// move のユースケース
pub struct MakeMoveUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl MakeMoveUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 盤面・手番・勝者を上書きし、Room の全参加者に `update` を送る
    ///
    /// 送信失敗で全員が外れた場合は Room を Registry から削除する。
    ///
    /// # Arguments
    ///
    /// * `session` - 送信元が着席している RoomSession
    /// * `from` - 送信元の接続
    /// * `board` / `turn` / `winner` - クライアントから届いた値（検証しない）
    pub async fn execute(
        &self,
        session: &Arc<RoomSession>,
        from: ConnectionId,
        board: Board,
        turn: Turn,
        winner: Winner,
    ) -> SessionStatus {
        let status = session.apply_move(from, board, turn, winner).await;
        if status == SessionStatus::Empty {
            self.repository.remove(session.id(), session).await;
            tracing::info!("Room '{}' is empty and has been removed", session.id());
        }
        status
    }
}
