//! UseCase: Room 一覧の取得

use std::sync::Arc;

use crate::domain::{PlayerName, RoomId, RoomRepository};

/// Room 一覧の 1 件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub id: RoomId,
    /// 着席中の表示名（座席順）
    pub players: Vec<PlayerName>,
}

/// Room 一覧取得のユースケース
pub struct GetRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 現在存在する Room の一覧（Room ID 順）
    ///
    /// 各 Room の表示名は Room ごとにロックを取って読むため、Room 同士の一貫性は保証しない。
    pub async fn execute(&self) -> Vec<RoomSummary> {
        let sessions = self.repository.list().await;
        let mut summaries = Vec::with_capacity(sessions.len());
        for session in sessions {
            summaries.push(RoomSummary {
                id: session.id().clone(),
                players: session.names_snapshot().await,
            });
        }
        summaries
    }
}
