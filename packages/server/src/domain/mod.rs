//! Domain layer: Room の状態モデルと、外部とのインターフェース（trait）

pub mod command;
pub mod connection;
pub mod entity;
pub mod error;
pub mod event;
pub mod repository;
pub mod session;
pub mod value_object;

pub use command::ClientCommand;
pub use connection::PlayerConnection;
#[cfg(test)]
pub use connection::MockPlayerConnection;
pub use entity::{Occupant, Room};
pub use error::{MessagePushError, RoomError};
pub use event::RoomEvent;
pub use repository::RoomRepository;
pub use session::{JoinOutcome, RoomSession, SessionStatus};
pub use value_object::{
    BOARD_CELLS, Board, ConnectionId, InvalidSeat, Marker, PlayerName, RoomId, Seat, Timestamp,
    Turn, Winner,
};
