//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::BOARD_CELLS;

/// Room summary for the room directory (`GET /rooms`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    /// Display names of seated players, in seat order
    pub players: Vec<String>,
}

/// Seated player in a room detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeatedPlayerDto {
    pub player: String,
    pub name: String,
}

/// Room detail (`GET /rooms/{room_id}`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomDetailDto {
    pub id: String,
    /// RFC 3339 (JST)
    pub created_at: String,
    pub players: Vec<SeatedPlayerDto>,
    pub board: [Option<String>; BOARD_CELLS],
    pub turn: String,
    pub winner: serde_json::Value,
}
