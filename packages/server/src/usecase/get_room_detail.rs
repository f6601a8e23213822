//! UseCase: Room 詳細の取得

use std::sync::Arc;

use crate::domain::{Room, RoomId, RoomRepository};

use super::error::GetRoomDetailError;

/// Room 詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Room の現在の状態を取得
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - Room の状態のコピー
    /// * `Err(GetRoomDetailError::RoomNotFound)` - Room が存在しない
    pub async fn execute(&self, room_id: &RoomId) -> Result<Room, GetRoomDetailError> {
        let session = self
            .repository
            .find(room_id)
            .await
            .ok_or_else(|| GetRoomDetailError::RoomNotFound(room_id.to_string()))?;
        Ok(session.room_snapshot().await)
    }
}
