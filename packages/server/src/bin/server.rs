//! Sanmoku room server: two-player tic-tac-toe over WebSocket.
//!
//! Players join a room by name, get a seat ("x" or "o") and relay board state
//! to each other through the server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin sanmoku-server
//! cargo run --bin sanmoku-server -- --host 0.0.0.0 --port 3000
//! ```

use std::{sync::Arc, time::Duration};

use clap::Parser;
use sanmoku_server::{
    infrastructure::repository::InMemoryRoomRepository,
    ui::{Server, ServerConfig},
    usecase::{
        GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase, MakeMoveUseCase,
        ResetGameUseCase,
    },
};
use sanmoku_shared::{logger::setup_logger, time::SystemClock};

#[derive(Parser, Debug)]
#[command(name = "sanmoku-server")]
#[command(about = "Two-player tic-tac-toe room server over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "3000")]
    port: u16,

    /// Time allowed for writing a single frame to a client, in milliseconds
    #[arg(long, default_value = "5000")]
    send_timeout_ms: u64,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Initialize dependencies in order:
    // 1. Repository
    // 2. UseCases
    // 3. Server

    // 1. Create Repository (in-memory room registry)
    let repository = Arc::new(InMemoryRoomRepository::new(Arc::new(SystemClock)));

    // 2. Create UseCases
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(repository.clone()));
    let make_move_usecase = Arc::new(MakeMoveUseCase::new(repository.clone()));
    let reset_game_usecase = Arc::new(ResetGameUseCase::new(repository.clone()));
    let leave_room_usecase = Arc::new(LeaveRoomUseCase::new(repository.clone()));
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(repository.clone()));
    let get_room_detail_usecase = Arc::new(GetRoomDetailUseCase::new(repository.clone()));

    // 3. Create and run the server
    let config = ServerConfig {
        send_timeout: Duration::from_millis(args.send_timeout_ms),
    };
    let server = Server::new(
        join_room_usecase,
        make_move_usecase,
        reset_game_usecase,
        leave_room_usecase,
        get_rooms_usecase,
        get_room_detail_usecase,
        config,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
