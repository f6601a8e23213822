//! UseCase: Room への参加
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - Room の作成、着席、満室時の拒否
//!
//! ### なぜこのテストが必要か
//! - 1 人目が x、2 人目が o になることを保証
//! - 3 人目には `full` だけが届き、Room の状態が変わらないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：空の Room への参加、2 人目の参加
//! - 異常系：満室の Room への参加
//! - エッジケース：最後の参加者が抜けて閉じた直後の RoomSession への参加
//! - 並行処理：未作成の Room への同時参加（RoomSession は 1 つ、着席は 2 人まで）

use std::sync::Arc;

use crate::domain::{
    JoinOutcome, PlayerConnection, PlayerName, RoomEvent, RoomId, RoomRepository, RoomSession,
    Seat,
};

/// Room 参加の結果
pub enum JoinRoomResult {
    /// 着席した
    Joined {
        session: Arc<RoomSession>,
        seat: Seat,
    },
    /// 満室のため参加できなかった（本人には `full` を送信済み）
    Full,
}

/// Room 参加のユースケース
pub struct JoinRoomUseCase {
    /// Repository（RoomSession の Registry）
    repository: Arc<dyn RoomRepository>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Room への参加を実行
    ///
    /// Room が存在しなければ作成する。着席できた場合、`assign_player` は RoomSession が送る。
    ///
    /// # Arguments
    ///
    /// * `room_id` - 参加する Room の ID
    /// * `name` - 表示名
    /// * `connection` - 参加者の接続
    ///
    /// # Returns
    ///
    /// * `JoinRoomResult::Joined` - 着席した RoomSession と座席
    /// * `JoinRoomResult::Full` - 満室
    pub async fn execute(
        &self,
        room_id: RoomId,
        name: PlayerName,
        connection: Arc<dyn PlayerConnection>,
    ) -> JoinRoomResult {
        loop {
            let session = self.repository.get_or_create(&room_id).await;
            match session.try_join(connection.clone(), name.clone()).await {
                JoinOutcome::Admitted(seat) => return JoinRoomResult::Joined { session, seat },
                JoinOutcome::Full => {
                    if let Err(e) = connection.push(&RoomEvent::Full).await {
                        tracing::warn!(
                            "Failed to send full to connection '{}': {}",
                            connection.id(),
                            e
                        );
                    }
                    return JoinRoomResult::Full;
                }
                // 取得した直後に最後の参加者が抜けた。Registry から取り直す
                JoinOutcome::Closed => {
                    self.repository.remove(&room_id, &session).await;
                    tracing::debug!("Room '{}' closed during join, retrying", room_id);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConnectionId;
    use crate::usecase::test_helpers::{
        create_test_connection, create_test_repository, next_json,
    };

    #[tokio::test]
    async fn test_first_player_gets_x() {
        // テスト項目: 空の Room に参加した 1 人目は x として着席し assign_player を受け取る
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = JoinRoomUseCase::new(repository.clone());
        let (ann, mut ann_rx) = create_test_connection();

        // when (操作):
        let result = usecase
            .execute(RoomId::new("r1"), PlayerName::new("Ann"), ann)
            .await;

        // then (期待する結果):
        assert!(matches!(result, JoinRoomResult::Joined { seat: Seat::X, .. }));
        assert_eq!(
            next_json(&mut ann_rx).await,
            serde_json::json!({"type": "assign_player", "player": "x", "name": "Ann"})
        );
        assert_eq!(repository.count_rooms().await, 1);
    }

    #[tokio::test]
    async fn test_second_player_gets_o_in_same_session() {
        // テスト項目: 2 人目は同じ RoomSession に o として着席する
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = JoinRoomUseCase::new(repository.clone());
        let (ann, _ann_rx) = create_test_connection();
        let (bo, mut bo_rx) = create_test_connection();
        let JoinRoomResult::Joined { session: first, .. } = usecase
            .execute(RoomId::new("r1"), PlayerName::new("Ann"), ann)
            .await
        else {
            panic!("Ann should be seated");
        };

        // when (操作):
        let result = usecase
            .execute(RoomId::new("r1"), PlayerName::new("Bo"), bo)
            .await;

        // then (期待する結果):
        let JoinRoomResult::Joined { session, seat } = result else {
            panic!("Bo should be seated");
        };
        assert_eq!(seat, Seat::O);
        assert!(Arc::ptr_eq(&first, &session));
        assert_eq!(
            next_json(&mut bo_rx).await,
            serde_json::json!({"type": "assign_player", "player": "o", "name": "Bo"})
        );
    }

    #[tokio::test]
    async fn test_third_player_receives_full() {
        // テスト項目: 満室の Room に参加しようとすると full だけが届き、Room は変わらない
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = JoinRoomUseCase::new(repository.clone());
        let (ann, _ann_rx) = create_test_connection();
        let (bo, _bo_rx) = create_test_connection();
        let (cy, mut cy_rx) = create_test_connection();
        usecase
            .execute(RoomId::new("r1"), PlayerName::new("Ann"), ann)
            .await;
        usecase
            .execute(RoomId::new("r1"), PlayerName::new("Bo"), bo)
            .await;

        // when (操作):
        let result = usecase
            .execute(RoomId::new("r1"), PlayerName::new("Cy"), cy)
            .await;

        // then (期待する結果):
        assert!(matches!(result, JoinRoomResult::Full));
        assert_eq!(next_json(&mut cy_rx).await, serde_json::json!({"type": "full"}));
        assert!(cy_rx.try_recv().is_err());
        let session = repository.find(&RoomId::new("r1")).await.unwrap();
        assert_eq!(
            session.names_snapshot().await,
            vec![PlayerName::new("Ann"), PlayerName::new("Bo")]
        );
    }

    #[tokio::test]
    async fn test_join_after_room_closed_creates_new_session() {
        // テスト項目: 閉じた RoomSession が Registry に残っていても、新しい RoomSession に着席する
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = JoinRoomUseCase::new(repository.clone());
        let (ann, _ann_rx) = create_test_connection();
        let ann_id: ConnectionId = ann.id();
        let JoinRoomResult::Joined { session: old, .. } = usecase
            .execute(RoomId::new("r1"), PlayerName::new("Ann"), ann)
            .await
        else {
            panic!("Ann should be seated");
        };
        // leave で閉じるが、Registry からは削除しない
        old.leave(ann_id).await;
        assert!(old.is_closed());

        // when (操作):
        let (bo, _bo_rx) = create_test_connection();
        let result = usecase
            .execute(RoomId::new("r1"), PlayerName::new("Bo"), bo)
            .await;

        // then (期待する結果):
        let JoinRoomResult::Joined { session, seat } = result else {
            panic!("Bo should be seated");
        };
        assert_eq!(seat, Seat::X);
        assert!(!Arc::ptr_eq(&old, &session));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_joins_share_one_session() {
        // テスト項目: 未作成の Room に同時に参加しても RoomSession は 1 つで、着席は x と o の 2 人だけ
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = Arc::new(JoinRoomUseCase::new(repository.clone()));
        let players: Vec<_> = (0..10).map(|_| create_test_connection()).collect();

        // when (操作):
        let mut handles = Vec::new();
        let mut receivers = Vec::new();
        for (i, (connection, rx)) in players.into_iter().enumerate() {
            let usecase = usecase.clone();
            handles.push(tokio::spawn(async move {
                usecase
                    .execute(
                        RoomId::new("r1"),
                        PlayerName::new(format!("p{i}")),
                        connection,
                    )
                    .await
            }));
            receivers.push(rx);
        }
        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }

        // then (期待する結果):
        assert_eq!(repository.count_rooms().await, 1);
        let mut sessions = Vec::new();
        let mut seats = Vec::new();
        let mut full = Vec::new();
        for (i, result) in results.into_iter().enumerate() {
            match result {
                JoinRoomResult::Joined { session, seat } => {
                    sessions.push(session);
                    seats.push(seat);
                }
                JoinRoomResult::Full => full.push(i),
            }
        }
        seats.sort();
        assert_eq!(seats, vec![Seat::X, Seat::O]);
        assert_eq!(full.len(), 8);
        assert!(Arc::ptr_eq(&sessions[0], &sessions[1]));
        let registered = repository.find(&RoomId::new("r1")).await.unwrap();
        assert!(Arc::ptr_eq(&sessions[0], &registered));
        for i in full {
            assert_eq!(
                next_json(&mut receivers[i]).await,
                serde_json::json!({"type": "full"})
            );
        }
    }
}
