//! Shared application state.

use std::{sync::Arc, time::Duration};

use crate::usecase::{
    GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase, MakeMoveUseCase,
    ResetGameUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinRoomUseCase（Room 参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// MakeMoveUseCase（盤面更新のユースケース）
    pub make_move_usecase: Arc<MakeMoveUseCase>,
    /// ResetGameUseCase（ゲーム初期化のユースケース）
    pub reset_game_usecase: Arc<ResetGameUseCase>,
    /// LeaveRoomUseCase（退出のユースケース）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// GetRoomsUseCase（Room 一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（Room 詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    /// WebSocket への 1 フレームの書き込みに許す時間
    pub send_timeout: Duration,
}
