//! WebSocket message DTOs.
//!
//! Every frame is a JSON object discriminated by its `type` field.

use serde::{Deserialize, Serialize};

use crate::domain::BOARD_CELLS;

/// Message type discriminator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    // client → server
    Join,
    Move,
    Reset,
    // server → client
    AssignPlayer,
    Full,
    Update,
    Disconnect,
    /// Any other `type` value; ignored by the server
    #[serde(other)]
    Unknown,
}

/// Inbound message envelope (client → server)
///
/// Fields beyond `type` are kind-specific; fields a kind does not use are ignored.
/// `board` and `turn` are kept raw here and validated when converted into a
/// `ClientCommand` so that other kinds never fail on them.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientMessage {
    pub r#type: MessageType,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub board: Option<Vec<Option<String>>>,
    #[serde(default)]
    pub turn: Option<String>,
    #[serde(default)]
    pub winner: serde_json::Value,
}

/// Seat assignment sent to the joining connection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignPlayerMessage {
    pub r#type: MessageType,
    pub player: String,
    pub name: String,
}

/// Rejection sent to a connection that tried to join a full room
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullMessage {
    pub r#type: MessageType,
}

/// Game state broadcast after a move or reset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateMessage {
    pub r#type: MessageType,
    pub board: [Option<String>; BOARD_CELLS],
    pub turn: String,
    pub winner: serde_json::Value,
    /// Display name of the player whose turn it now is
    pub name: Option<String>,
}

/// Notification that the other participant left
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisconnectMessage {
    pub r#type: MessageType,
}
