//! UseCase: Room からの退出
//!
//! 接続が切れた（またはデコードできないメッセージで閉じた）参加者を座席から外します。
//! 残りの参加者には `disconnect` を送り、誰もいなくなった Room は Registry から削除します。

use std::sync::Arc;

use crate::domain::{ConnectionId, RoomRepository, RoomSession, SessionStatus};

/// 退出のユースケース
pub struct LeaveRoomUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl LeaveRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 退出を実行
    ///
    /// # Arguments
    ///
    /// * `session` - 接続が着席していた RoomSession
    /// * `connection_id` - 退出する接続
    ///
    /// # Returns
    ///
    /// 退出後の RoomSession の状態（`Empty` の場合は削除済み）
    pub async fn execute(
        &self,
        session: &Arc<RoomSession>,
        connection_id: ConnectionId,
    ) -> SessionStatus {
        let status = session.leave(connection_id).await;
        if status == SessionStatus::Empty {
            self.repository.remove(session.id(), session).await;
            tracing::info!("Room '{}' is empty and has been removed", session.id());
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PlayerConnection, PlayerName, RoomId, Seat};
    use crate::usecase::test_helpers::{
        create_test_connection, create_test_repository, next_json,
    };
    use crate::usecase::{JoinRoomResult, JoinRoomUseCase};

    #[tokio::test]
    async fn test_leave_notifies_remaining_player() {
        // テスト項目: 1 人が退出すると残りの参加者に disconnect が届き、Room は残る
        // given (前提条件):
        let repository = create_test_repository();
        let join = JoinRoomUseCase::new(repository.clone());
        let usecase = LeaveRoomUseCase::new(repository.clone());
        let (ann, _ann_rx) = create_test_connection();
        let (bo, mut bo_rx) = create_test_connection();
        let ann_id = ann.id();
        let JoinRoomResult::Joined { session, .. } = join
            .execute(RoomId::new("r1"), PlayerName::new("Ann"), ann)
            .await
        else {
            panic!("Ann should be seated");
        };
        join.execute(RoomId::new("r1"), PlayerName::new("Bo"), bo)
            .await;
        next_json(&mut bo_rx).await;

        // when (操作):
        let status = usecase.execute(&session, ann_id).await;

        // then (期待する結果):
        assert_eq!(status, SessionStatus::Occupied);
        assert_eq!(
            next_json(&mut bo_rx).await,
            serde_json::json!({"type": "disconnect"})
        );
        assert_eq!(
            session.names_snapshot().await,
            vec![PlayerName::new("Bo")]
        );
        assert!(repository.find(&RoomId::new("r1")).await.is_some());
    }

    #[tokio::test]
    async fn test_last_leave_removes_room() {
        // テスト項目: 最後の参加者が退出すると Room が Registry から削除される
        // given (前提条件):
        let repository = create_test_repository();
        let join = JoinRoomUseCase::new(repository.clone());
        let usecase = LeaveRoomUseCase::new(repository.clone());
        let (ann, _ann_rx) = create_test_connection();
        let ann_id = ann.id();
        let JoinRoomResult::Joined { session, .. } = join
            .execute(RoomId::new("r1"), PlayerName::new("Ann"), ann)
            .await
        else {
            panic!("Ann should be seated");
        };

        // when (操作):
        let status = usecase.execute(&session, ann_id).await;

        // then (期待する結果):
        assert_eq!(status, SessionStatus::Empty);
        assert_eq!(repository.count_rooms().await, 0);
    }

    #[tokio::test]
    async fn test_seat_is_reused_after_leave() {
        // テスト項目: x が退出した後に参加した人は空いた x の座席に着く
        // given (前提条件):
        let repository = create_test_repository();
        let join = JoinRoomUseCase::new(repository.clone());
        let usecase = LeaveRoomUseCase::new(repository.clone());
        let (ann, _ann_rx) = create_test_connection();
        let (bo, _bo_rx) = create_test_connection();
        let ann_id = ann.id();
        let JoinRoomResult::Joined { session, .. } = join
            .execute(RoomId::new("r1"), PlayerName::new("Ann"), ann)
            .await
        else {
            panic!("Ann should be seated");
        };
        join.execute(RoomId::new("r1"), PlayerName::new("Bo"), bo)
            .await;
        usecase.execute(&session, ann_id).await;

        // when (操作):
        let (cy, _cy_rx) = create_test_connection();
        let result = join
            .execute(RoomId::new("r1"), PlayerName::new("Cy"), cy)
            .await;

        // then (期待する結果):
        assert!(matches!(result, JoinRoomResult::Joined { seat: Seat::X, .. }));
        assert_eq!(
            session.names_snapshot().await,
            vec![PlayerName::new("Cy"), PlayerName::new("Bo")]
        );
    }
}
