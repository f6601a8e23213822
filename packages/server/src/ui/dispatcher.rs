//! ConnectionDispatcher: 1 つの接続に届いたメッセージを Room の操作に振り分ける
//!
//! WebSocket の読み書きは持たず、デコード済みのテキストを受け取って UseCase を呼び出します。
//! 受信ループ（`handler::websocket`）は `handle_text` が `ControlFlow::Break` を返したとき、
//! または接続が切れたときにループを抜け、`cleanup` を 1 回だけ呼びます。

use std::{ops::ControlFlow, sync::Arc};

use crate::{
    domain::{ClientCommand, ConnectionId, PlayerConnection, PlayerName, RoomSession, Seat},
    infrastructure::dto::conversion::decode_client_message,
    ui::state::AppState,
    usecase::JoinRoomResult,
};

/// 着席中の Room
struct Binding {
    session: Arc<RoomSession>,
    seat: Seat,
    name: PlayerName,
}

/// 接続ごとのディスパッチャー
pub struct ConnectionDispatcher {
    state: Arc<AppState>,
    connection: Arc<dyn PlayerConnection>,
    binding: Option<Binding>,
}

impl ConnectionDispatcher {
    pub fn new(state: Arc<AppState>, connection: Arc<dyn PlayerConnection>) -> Self {
        Self {
            state,
            connection,
            binding: None,
        }
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection.id()
    }

    /// 受信したテキストを処理する
    ///
    /// # Returns
    ///
    /// * `ControlFlow::Continue(())` - 受信を続ける
    /// * `ControlFlow::Break(())` - 接続を閉じる（デコード失敗、満室）
    pub async fn handle_text(&mut self, text: &str) -> ControlFlow<()> {
        let connection_id = self.connection_id();
        let command = match decode_client_message(text) {
            Ok(command) => command,
            Err(e) => {
                tracing::warn!(
                    "Failed to decode message from connection '{}', closing: {}",
                    connection_id,
                    e
                );
                return ControlFlow::Break(());
            }
        };

        match command {
            ClientCommand::Join { room_id, name } => {
                if let Some(binding) = &self.binding {
                    tracing::warn!(
                        "Connection '{}' is already in room '{}' as '{}' ({}), ignoring join",
                        connection_id,
                        binding.session.id(),
                        binding.seat,
                        binding.name
                    );
                    return ControlFlow::Continue(());
                }

                match self
                    .state
                    .join_room_usecase
                    .execute(room_id, name.clone(), self.connection.clone())
                    .await
                {
                    JoinRoomResult::Joined { session, seat } => {
                        self.binding = Some(Binding {
                            session,
                            seat,
                            name,
                        });
                        ControlFlow::Continue(())
                    }
                    JoinRoomResult::Full => ControlFlow::Break(()),
                }
            }
            ClientCommand::Move {
                board,
                turn,
                winner,
            } => {
                let Some(binding) = &self.binding else {
                    tracing::warn!(
                        "Ignoring move from connection '{}' before join",
                        connection_id
                    );
                    return ControlFlow::Continue(());
                };
                self.state
                    .make_move_usecase
                    .execute(&binding.session, connection_id, board, turn, winner)
                    .await;
                ControlFlow::Continue(())
            }
            ClientCommand::Reset => {
                let Some(binding) = &self.binding else {
                    tracing::warn!(
                        "Ignoring reset from connection '{}' before join",
                        connection_id
                    );
                    return ControlFlow::Continue(());
                };
                self.state
                    .reset_game_usecase
                    .execute(&binding.session, connection_id)
                    .await;
                ControlFlow::Continue(())
            }
            ClientCommand::Unknown => {
                tracing::debug!(
                    "Ignoring message of unknown type from connection '{}'",
                    connection_id
                );
                ControlFlow::Continue(())
            }
        }
    }

    /// 接続終了時の後片付け
    ///
    /// 着席していれば Room から退出し、最後に接続を閉じる（送信キューに残ったメッセージは送られる）。
    pub async fn cleanup(self) {
        let connection_id = self.connection_id();
        if let Some(binding) = self.binding {
            self.state
                .leave_room_usecase
                .execute(&binding.session, connection_id)
                .await;
        }
        self.connection.close().await;
    }
}
