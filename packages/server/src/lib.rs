//! Realtime two-player tic-tac-toe room server.
//!
//! Players connect over WebSocket, join a room by name and relay board state
//! to each other. Rooms are created on first join and removed when empty.

pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
