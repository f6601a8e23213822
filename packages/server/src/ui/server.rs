//! Server execution logic.

use std::{sync::Arc, time::Duration};

use axum::{Router, http::Method, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::usecase::{
    GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase, MakeMoveUseCase,
    ResetGameUseCase,
};

use super::{
    handler::{get_room_detail, get_rooms, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// Runtime settings of the server
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    /// Time allowed for writing a single frame to a WebSocket
    pub send_timeout: Duration,
}

impl ServerConfig {
    pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            send_timeout: Self::DEFAULT_SEND_TIMEOUT,
        }
    }
}

/// CORS policy: any origin, the common HTTP methods
fn cors_layer() -> CorsLayer {
    CorsLayer::new().allow_origin(Any).allow_methods([
        Method::GET,
        Method::POST,
        Method::HEAD,
        Method::PUT,
        Method::DELETE,
        Method::PATCH,
    ])
}

/// Tic-tac-toe room server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     join_room_usecase,
///     make_move_usecase,
///     reset_game_usecase,
///     leave_room_usecase,
///     get_rooms_usecase,
///     get_room_detail_usecase,
///     ServerConfig::default(),
/// );
/// server.run("127.0.0.1".to_string(), 3000).await?;
/// ```
pub struct Server {
    /// JoinRoomUseCase（Room 参加のユースケース）
    join_room_usecase: Arc<JoinRoomUseCase>,
    /// MakeMoveUseCase（盤面更新のユースケース）
    make_move_usecase: Arc<MakeMoveUseCase>,
    /// ResetGameUseCase（ゲーム初期化のユースケース）
    reset_game_usecase: Arc<ResetGameUseCase>,
    /// LeaveRoomUseCase（退出のユースケース）
    leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// GetRoomsUseCase（Room 一覧取得のユースケース）
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（Room 詳細取得のユースケース）
    get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
    config: ServerConfig,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `join_room_usecase` - UseCase for joining a room
    /// * `make_move_usecase` - UseCase for relaying a move
    /// * `reset_game_usecase` - UseCase for resetting a game
    /// * `leave_room_usecase` - UseCase for leaving a room
    /// * `get_rooms_usecase` - UseCase for getting rooms list
    /// * `get_room_detail_usecase` - UseCase for getting room detail
    /// * `config` - Runtime settings
    pub fn new(
        join_room_usecase: Arc<JoinRoomUseCase>,
        make_move_usecase: Arc<MakeMoveUseCase>,
        reset_game_usecase: Arc<ResetGameUseCase>,
        leave_room_usecase: Arc<LeaveRoomUseCase>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
        config: ServerConfig,
    ) -> Self {
        Self {
            join_room_usecase,
            make_move_usecase,
            reset_game_usecase,
            leave_room_usecase,
            get_rooms_usecase,
            get_room_detail_usecase,
            config,
        }
    }

    /// Build the router with all endpoints
    pub fn into_router(self) -> Router {
        let app_state = Arc::new(AppState {
            join_room_usecase: self.join_room_usecase,
            make_move_usecase: self.make_move_usecase,
            reset_game_usecase: self.reset_game_usecase,
            leave_room_usecase: self.leave_room_usecase,
            get_rooms_usecase: self.get_rooms_usecase,
            get_room_detail_usecase: self.get_room_detail_usecase,
            send_timeout: self.config.send_timeout,
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/rooms", get(get_rooms))
            .route("/rooms/{room_id}", get(get_room_detail))
            .route("/api/health", get(health_check))
            .with_state(app_state)
            .layer(cors_layer())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 3000)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.into_router();

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!("Sanmoku server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
