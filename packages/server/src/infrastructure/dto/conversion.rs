//! Conversion logic between DTOs and domain types.

use thiserror::Error;

use crate::domain::{
    BOARD_CELLS, Board, ClientCommand, Marker, PlayerName, RoomEvent, RoomId, Turn, Winner,
};
use crate::infrastructure::dto::websocket as dto;

/// Failure to turn an inbound frame into a `ClientCommand`
///
/// Only frames that are not a JSON object of the expected shape fail.
/// Field values are relayed as they are.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Parse an inbound text frame into a command
pub fn decode_client_message(text: &str) -> Result<ClientCommand, DecodeError> {
    let message: dto::ClientMessage = serde_json::from_str(text)?;
    Ok(ClientCommand::from(message))
}

/// Render an outbound event as a JSON text frame
pub fn encode_room_event(event: &RoomEvent) -> Result<String, serde_json::Error> {
    match event.clone() {
        RoomEvent::AssignPlayer { seat, name } => {
            serde_json::to_string(&dto::AssignPlayerMessage {
                r#type: dto::MessageType::AssignPlayer,
                player: seat.as_str().to_string(),
                name: name.into_string(),
            })
        }
        RoomEvent::Full => serde_json::to_string(&dto::FullMessage {
            r#type: dto::MessageType::Full,
        }),
        RoomEvent::Update {
            board,
            turn,
            winner,
            name,
        } => serde_json::to_string(&dto::UpdateMessage {
            r#type: dto::MessageType::Update,
            board: board_to_dto(board),
            turn: turn.into_string(),
            winner: winner.into_value(),
            name: name.map(PlayerName::into_string),
        }),
        RoomEvent::Disconnect => serde_json::to_string(&dto::DisconnectMessage {
            r#type: dto::MessageType::Disconnect,
        }),
    }
}

/// Domain board → wire cells
pub fn board_to_dto(board: Board) -> [Option<String>; BOARD_CELLS] {
    board.into_cells().map(|cell| cell.map(Marker::into_string))
}

/// Wire cells → domain board (padded with empty cells or truncated to 9)
fn board_from_dto(cells: Vec<Option<String>>) -> Board {
    Board::from_partial(cells.into_iter().map(|cell| cell.map(Marker::new)))
}

// ========================================
// DTO → Domain
// ========================================

impl From<dto::ClientMessage> for ClientCommand {
    fn from(message: dto::ClientMessage) -> Self {
        match message.r#type {
            dto::MessageType::Join => ClientCommand::Join {
                room_id: RoomId::new(message.room.unwrap_or_default()),
                name: PlayerName::new(message.name.unwrap_or_default()),
            },
            // 欠けたフィールドは空の盤面・空文字列の手番・勝者なしとして扱う
            dto::MessageType::Move => ClientCommand::Move {
                board: board_from_dto(message.board.unwrap_or_default()),
                turn: Turn::new(message.turn.unwrap_or_default()),
                winner: Winner::new(message.winner),
            },
            dto::MessageType::Reset => ClientCommand::Reset,
            _ => ClientCommand::Unknown,
        }
    }
}
