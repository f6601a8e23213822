//! UseCase layer: Room の操作をまとめたユースケース

mod error;
mod get_room_detail;
mod get_rooms;
mod join_room;
mod leave_room;
mod make_move;
mod reset_game;

#[cfg(test)]
mod test_helpers;

pub use error::GetRoomDetailError;
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::{GetRoomsUseCase, RoomSummary};
pub use join_room::{JoinRoomResult, JoinRoomUseCase};
pub use leave_room::LeaveRoomUseCase;
pub use make_move::MakeMoveUseCase;
pub use reset_game::ResetGameUseCase;
