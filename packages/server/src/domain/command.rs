//! クライアントから届く操作

use super::{Board, PlayerName, RoomId, Turn, Winner};

#[derive(Debug, Clone, PartialEq)]
pub enum ClientCommand {
    /// Room に参加する
    Join { room_id: RoomId, name: PlayerName },
    /// 盤面・手番・勝者を上書きする（値は検証せずにそのまま中継する）
    Move {
        board: Board,
        turn: Turn,
        winner: Winner,
    },
    /// ゲーム状態を初期化する
    Reset,
    /// 未知の種類（無視する）
    Unknown,
}
