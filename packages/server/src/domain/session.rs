//! RoomSession: 排他制御付きの Room
//!
//! `Room` エンティティと、着席中の参加者の接続（`PlayerConnection`）をまとめて 1 つのロックで守ります。
//! 全ての操作はロックを保持したまま送信（ブロードキャスト）まで行うため、
//! 同じ Room に対する状態変更と送信は直列化されます。
//!
//! ## ロックの順序
//!
//! Registry（`RoomRepository`）のロックと RoomSession のロックを同時に保持することはありません。
//! Room が空になった場合、RoomSession は自分を Registry から削除せず、
//! `SessionStatus::Empty` を返して呼び出し側に削除を任せます。
//! 空になった RoomSession は `closed` になり、以後の join を `JoinOutcome::Closed` で拒否します。
//! `closed` は atomic なので、Registry は RoomSession のロックを取らずに参照できます。

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use tokio::sync::Mutex;

use super::{
    Board, ConnectionId, PlayerConnection, PlayerName, Room, RoomError, RoomEvent, RoomId, Seat,
    Timestamp, Turn, Winner,
};

/// join の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    /// 着席した座席
    Admitted(Seat),
    /// 満室
    Full,
    /// 既に空になって閉じた RoomSession（Registry から取り直す必要がある）
    Closed,
}

/// 操作後の RoomSession の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// 1 人以上着席している
    Occupied,
    /// 誰もいない（呼び出し側が Registry から削除する）
    Empty,
}

struct SessionState {
    room: Room,
    connections: HashMap<ConnectionId, Arc<dyn PlayerConnection>>,
}

/// 1 つのゲームのセッション
pub struct RoomSession {
    id: RoomId,
    closed: AtomicBool,
    state: Mutex<SessionState>,
}

impl RoomSession {
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id: id.clone(),
            closed: AtomicBool::new(false),
            state: Mutex::new(SessionState {
                room: Room::new(id, created_at),
                connections: HashMap::with_capacity(Room::CAPACITY),
            }),
        }
    }

    pub fn id(&self) -> &RoomId {
        &self.id
    }

    /// 最後の参加者が抜けて閉じているか
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// 参加者として着席を試みる
    ///
    /// 着席できた場合、ロックを保持したまま本人に `assign_player` を送る。
    /// これにより、着席直後の `update` が `assign_player` より先に届くことはない。
    pub async fn try_join(
        &self,
        connection: Arc<dyn PlayerConnection>,
        name: PlayerName,
    ) -> JoinOutcome {
        let mut state = self.state.lock().await;
        if self.is_closed() {
            return JoinOutcome::Closed;
        }

        let connection_id = connection.id();
        let seat = match state.room.admit(connection_id, name.clone()) {
            Ok(seat) => seat,
            Err(RoomError::Full) => {
                tracing::info!(
                    "Room '{}' is full, rejecting connection '{}'",
                    self.id,
                    connection_id
                );
                return JoinOutcome::Full;
            }
            Err(RoomError::AlreadySeated(_)) => {
                let seat = state.room.seat_of(&connection_id).unwrap_or(Seat::X);
                tracing::warn!(
                    "Connection '{}' is already seated as '{}' in room '{}'",
                    connection_id,
                    seat,
                    self.id
                );
                return JoinOutcome::Admitted(seat);
            }
        };
        state.connections.insert(connection_id, connection.clone());
        tracing::info!(
            "Connection '{}' joined room '{}' as '{}' ({})",
            connection_id,
            self.id,
            seat,
            name
        );

        // 送信に失敗しても着席は維持する（接続側の受信ループが終了し、leave で片付く）
        if let Err(e) = connection
            .push(&RoomEvent::AssignPlayer { seat, name })
            .await
        {
            tracing::warn!(
                "Failed to send assign_player to connection '{}': {}",
                connection_id,
                e
            );
        }

        JoinOutcome::Admitted(seat)
    }

    /// 盤面・手番・勝者を上書きし、全参加者に `update` を送る
    ///
    /// 着席していない接続（送信失敗で既に退出させられた接続など）からの操作は無視する。
    pub async fn apply_move(
        &self,
        from: ConnectionId,
        board: Board,
        turn: Turn,
        winner: Winner,
    ) -> SessionStatus {
        let mut state = self.state.lock().await;
        if state.room.seat_of(&from).is_none() {
            tracing::warn!(
                "Ignoring move from connection '{}' which is not seated in room '{}'",
                from,
                self.id
            );
            return self.status_of(&state);
        }

        state.room.apply_move(board, turn, winner);
        let event = RoomEvent::update_from(&state.room);
        self.broadcast(&mut state, &event).await;
        self.status_of(&state)
    }

    /// ゲーム状態を初期化し、全参加者に `update` を送る
    pub async fn reset(&self, from: ConnectionId) -> SessionStatus {
        let mut state = self.state.lock().await;
        if state.room.seat_of(&from).is_none() {
            tracing::warn!(
                "Ignoring reset from connection '{}' which is not seated in room '{}'",
                from,
                self.id
            );
            return self.status_of(&state);
        }

        state.room.reset();
        let event = RoomEvent::update_from(&state.room);
        self.broadcast(&mut state, &event).await;
        self.status_of(&state)
    }

    /// 接続を座席から外す
    ///
    /// 誰もいなくなった場合は `Empty` を返す（呼び出し側が Registry から削除する）。
    /// 残りの参加者がいる場合は `disconnect` を送る。
    /// 送信失敗で既に外されていた接続の場合も、残りの参加者への通知はここで 1 回だけ行われる。
    pub async fn leave(&self, connection_id: ConnectionId) -> SessionStatus {
        let mut state = self.state.lock().await;
        state.connections.remove(&connection_id);
        match state.room.vacate(&connection_id) {
            Some(occupant) => tracing::info!(
                "Connection '{}' ({}) left room '{}'",
                connection_id,
                occupant.name,
                self.id
            ),
            None => tracing::debug!(
                "Connection '{}' was already removed from room '{}'",
                connection_id,
                self.id
            ),
        }

        if state.room.is_empty() {
            return self.status_of(&state);
        }

        self.broadcast(&mut state, &RoomEvent::Disconnect).await;
        self.status_of(&state)
    }

    /// 着席中の表示名（座席順）
    pub async fn names_snapshot(&self) -> Vec<PlayerName> {
        let state = self.state.lock().await;
        state.room.names()
    }

    /// Room の現在の状態のコピー
    pub async fn room_snapshot(&self) -> Room {
        let state = self.state.lock().await;
        state.room.clone()
    }

    /// 着席中の全参加者にイベントを送る
    ///
    /// 送信に失敗した参加者は接続を閉じて座席から外す。他の参加者への送信は続ける。
    async fn broadcast(&self, state: &mut SessionState, event: &RoomEvent) {
        let targets: Vec<Arc<dyn PlayerConnection>> = state
            .room
            .occupants()
            .iter()
            .filter_map(|occupant| state.connections.get(&occupant.connection_id).cloned())
            .collect();

        for connection in targets {
            let connection_id = connection.id();
            match connection.push(event).await {
                Ok(()) => tracing::debug!(
                    "Sent {} to connection '{}' in room '{}'",
                    event.kind(),
                    connection_id,
                    self.id
                ),
                Err(e) => {
                    tracing::warn!(
                        "Failed to send {} to connection '{}', evicting it from room '{}': {}",
                        event.kind(),
                        connection_id,
                        self.id,
                        e
                    );
                    connection.close().await;
                    state.connections.remove(&connection_id);
                    state.room.vacate(&connection_id);
                }
            }
        }
    }

    fn status_of(&self, state: &SessionState) -> SessionStatus {
        if state.room.is_empty() {
            self.closed.store(true, Ordering::Release);
            SessionStatus::Empty
        } else {
            SessionStatus::Occupied
        }
    }
}
