//! UseCase 層のエラー型

use thiserror::Error;

/// Room 詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    /// 指定された Room が存在しない
    #[error("room '{0}' not found")]
    RoomNotFound(String),
}
