//! Entity 定義
//!
//! `Room` は 1 つのゲームの状態（座席・表示名・盤面・手番・勝者）を保持する純粋なモデルです。
//! 排他制御や接続への送信は持たず、`RoomSession` がこれをロックの内側で操作します。

use super::{Board, ConnectionId, PlayerName, RoomError, RoomId, Seat, Timestamp, Turn, Winner};

/// 座席についている参加者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    pub connection_id: ConnectionId,
    pub seat: Seat,
    pub name: PlayerName,
}

/// Room エンティティ
#[derive(Debug, Clone)]
pub struct Room {
    pub id: RoomId,
    pub created_at: Timestamp,
    /// 座席順（x → o）に並んだ参加者
    occupants: Vec<Occupant>,
    pub board: Board,
    pub turn: Turn,
    pub winner: Winner,
}

impl Room {
    /// 1 つの Room に着席できる人数
    pub const CAPACITY: usize = 2;

    /// 空の Room を作成（盤面は空、手番は x、勝者なし）
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self {
            id,
            created_at,
            occupants: Vec::with_capacity(Self::CAPACITY),
            board: Board::empty(),
            turn: Seat::X.into(),
            winner: Winner::absent(),
        }
    }

    /// 空いている座席に参加者を着席させる
    ///
    /// 空いている座席のうち x を優先する。通常の流れでは 1 人目が x、2 人目が o になる。
    pub fn admit(
        &mut self,
        connection_id: ConnectionId,
        name: PlayerName,
    ) -> Result<Seat, RoomError> {
        if self.seat_of(&connection_id).is_some() {
            return Err(RoomError::AlreadySeated(connection_id));
        }

        let seat = Seat::ALL
            .into_iter()
            .find(|seat| self.name_of(*seat).is_none())
            .ok_or(RoomError::Full)?;

        self.occupants.push(Occupant {
            connection_id,
            seat,
            name,
        });
        self.occupants.sort_by_key(|occupant| occupant.seat);

        Ok(seat)
    }

    /// 参加者を座席から外す（座席と表示名の対応も消える）
    pub fn vacate(&mut self, connection_id: &ConnectionId) -> Option<Occupant> {
        let index = self
            .occupants
            .iter()
            .position(|occupant| &occupant.connection_id == connection_id)?;
        Some(self.occupants.remove(index))
    }

    /// 盤面・手番・勝者を受け取った値で上書きする（合法手かどうかは検証しない）
    pub fn apply_move(&mut self, board: Board, turn: Turn, winner: Winner) {
        self.board = board;
        self.turn = turn;
        self.winner = winner;
    }

    /// ゲーム状態を初期化する
    pub fn reset(&mut self) {
        self.board = Board::empty();
        self.turn = Seat::X.into();
        self.winner = Winner::absent();
    }

    pub fn occupants(&self) -> &[Occupant] {
        &self.occupants
    }

    pub fn is_empty(&self) -> bool {
        self.occupants.is_empty()
    }

    pub fn seat_of(&self, connection_id: &ConnectionId) -> Option<Seat> {
        self.occupants
            .iter()
            .find(|occupant| &occupant.connection_id == connection_id)
            .map(|occupant| occupant.seat)
    }

    pub fn name_of(&self, seat: Seat) -> Option<&PlayerName> {
        self.occupants
            .iter()
            .find(|occupant| occupant.seat == seat)
            .map(|occupant| &occupant.name)
    }

    /// 現在の手番のプレイヤーの表示名（座席が空、または手番が座席ラベルでなければ None）
    pub fn current_turn_name(&self) -> Option<&PlayerName> {
        self.turn.seat().and_then(|seat| self.name_of(seat))
    }

    /// 着席中の表示名（座席順）
    pub fn names(&self) -> Vec<PlayerName> {
        self.occupants
            .iter()
            .map(|occupant| occupant.name.clone())
            .collect()
    }
}
