//! Room から接続へ通知されるイベント
//!
//! 送信時のワイヤ形式（JSON）への変換は Infrastructure 層（`dto::conversion`）が行います。

use super::{Board, PlayerName, Room, Seat, Turn, Winner};

#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    /// join 成功時に本人にだけ送る
    AssignPlayer { seat: Seat, name: PlayerName },
    /// 満室で join が拒否された本人にだけ送る
    Full,
    /// move / reset の結果を全参加者に送る
    Update {
        board: Board,
        turn: Turn,
        winner: Winner,
        /// 手番のプレイヤーの表示名（その座席が空なら None）
        name: Option<PlayerName>,
    },
    /// 相手が退出したことを残りの参加者に送る
    Disconnect,
}

impl RoomEvent {
    /// Room の現在のゲーム状態から Update イベントを作成
    pub fn update_from(room: &Room) -> Self {
        RoomEvent::Update {
            board: room.board.clone(),
            turn: room.turn.clone(),
            winner: room.winner.clone(),
            name: room.current_turn_name().cloned(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RoomEvent::AssignPlayer { .. } => "assign_player",
            RoomEvent::Full => "full",
            RoomEvent::Update { .. } => "update",
            RoomEvent::Disconnect => "disconnect",
        }
    }
}
