//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{PlayerName, RoomId},
    infrastructure::dto::{
        conversion::board_to_dto,
        http::{RoomDetailDto, RoomSummaryDto, SeatedPlayerDto},
    },
    ui::state::AppState,
    usecase::GetRoomDetailError,
};
use sanmoku_shared::time::timestamp_to_jst_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    let room_summaries: Vec<RoomSummaryDto> = rooms
        .into_iter()
        .map(|room| RoomSummaryDto {
            id: room.id.into_string(),
            players: room
                .players
                .into_iter()
                .map(PlayerName::into_string)
                .collect(),
        })
        .collect();

    Json(room_summaries)
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    match state
        .get_room_detail_usecase
        .execute(&RoomId::new(room_id))
        .await
    {
        Ok(room) => {
            // Domain Model から DTO への変換
            let room_detail = RoomDetailDto {
                id: room.id.as_str().to_string(),
                created_at: timestamp_to_jst_rfc3339(room.created_at.value()),
                players: room
                    .occupants()
                    .iter()
                    .map(|occupant| SeatedPlayerDto {
                        player: occupant.seat.as_str().to_string(),
                        name: occupant.name.as_str().to_string(),
                    })
                    .collect(),
                board: board_to_dto(room.board),
                turn: room.turn.as_str().to_string(),
                winner: room.winner.as_value().clone(),
            };
            Ok(Json(room_detail))
        }
        Err(GetRoomDetailError::RoomNotFound(id)) => {
            tracing::debug!("Room '{}' not found", id);
            Err(StatusCode::NOT_FOUND)
        }
    }
}
