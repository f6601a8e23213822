//! UseCase: ゲームの初期化（reset）

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomRepository, RoomSession, SessionStatus};

/// reset のユースケース
pub struct ResetGameUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl ResetGameUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 盤面を空に、手番を x に、勝者をなしに戻して全参加者に `update` を送る
    pub async fn execute(&self, session: &Arc<RoomSession>, from: ConnectionId) -> SessionStatus {
        let status = session.reset(from).await;
        if status == SessionStatus::Empty {
            self.repository.remove(session.id(), session).await;
            tracing::info!("Room '{}' is empty and has been removed", session.id());
        }
        status
    }
}
