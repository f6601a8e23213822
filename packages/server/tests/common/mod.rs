//! In-process test server and WebSocket helpers.

#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};

use sanmoku_server::{
    infrastructure::repository::InMemoryRoomRepository,
    ui::{Server, ServerConfig},
    usecase::{
        GetRoomDetailUseCase, GetRoomsUseCase, JoinRoomUseCase, LeaveRoomUseCase, MakeMoveUseCase,
        ResetGameUseCase,
    },
};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct TestServer {
    pub addr: SocketAddr,
    _handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Start a server on an ephemeral port
    pub async fn start() -> Self {
        let repository = Arc::new(InMemoryRoomRepository::default());
        let server = Server::new(
            Arc::new(JoinRoomUseCase::new(repository.clone())),
            Arc::new(MakeMoveUseCase::new(repository.clone())),
            Arc::new(ResetGameUseCase::new(repository.clone())),
            Arc::new(LeaveRoomUseCase::new(repository.clone())),
            Arc::new(GetRoomsUseCase::new(repository.clone())),
            Arc::new(GetRoomDetailUseCase::new(repository.clone())),
            ServerConfig::default(),
        );
        let app = server.into_router();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            _handle: handle,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    pub async fn connect(&self) -> WsStream {
        let (stream, _) = tokio_tungstenite::connect_async(self.ws_url()).await.unwrap();
        stream
    }

    pub async fn get_json(&self, path: &str) -> (reqwest::StatusCode, serde_json::Value) {
        let response = reqwest::get(format!("{}{}", self.base_url(), path))
            .await
            .unwrap();
        let status = response.status();
        let body = if status.is_success() {
            response.json().await.unwrap()
        } else {
            serde_json::Value::Null
        };
        (status, body)
    }

    /// Poll `/rooms` until `predicate` holds (room cleanup runs after the socket closes)
    pub async fn wait_for_rooms(&self, predicate: impl Fn(&serde_json::Value) -> bool) {
        for _ in 0..100 {
            let (_, rooms) = self.get_json("/rooms").await;
            if predicate(&rooms) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        panic!("Timed out waiting for /rooms to reach the expected state");
    }
}

pub async fn ws_send_json(stream: &mut WsStream, value: serde_json::Value) {
    ws_send_text(stream, &value.to_string()).await;
}

pub async fn ws_send_text(stream: &mut WsStream, text: &str) {
    stream.send(Message::text(text)).await.unwrap();
}

pub async fn ws_join(stream: &mut WsStream, room: &str, name: &str) -> serde_json::Value {
    ws_send_json(
        stream,
        serde_json::json!({"type": "join", "room": room, "name": name}),
    )
    .await;
    ws_read_json(stream).await
}

/// Read the next text frame as JSON (5s timeout).
pub async fn ws_read_json(stream: &mut WsStream) -> serde_json::Value {
    let deadline = Duration::from_secs(5);
    tokio::time::timeout(deadline, async {
        loop {
            match stream.next().await {
                Some(Ok(Message::Text(text))) => return serde_json::from_str(&text).unwrap(),
                Some(Ok(Message::Close(_))) => panic!("WebSocket closed unexpectedly"),
                Some(Err(e)) => panic!("WebSocket error: {e}"),
                None => panic!("WebSocket stream ended"),
                _ => continue,
            }
        }
    })
    .await
    .expect("Timed out waiting for WebSocket message")
}

/// Try to read a text frame, returning None on timeout.
pub async fn ws_try_read_json(stream: &mut WsStream, timeout_ms: u64) -> Option<serde_json::Value> {
    let deadline = Duration::from_millis(timeout_ms);
    tokio::time::timeout(deadline, async {
        loop {
            match stream.next().await {
                Some(Ok(Message::Text(text))) => return serde_json::from_str(&text).ok(),
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => return None,
                _ => continue,
            }
        }
    })
    .await
    .ok()
    .flatten()
}

/// Wait until the server closes the connection (5s timeout).
pub async fn ws_expect_closed(stream: &mut WsStream) {
    let deadline = Duration::from_secs(5);
    tokio::time::timeout(deadline, async {
        loop {
            match stream.next().await {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => return,
                Some(Ok(Message::Text(text))) => {
                    panic!("Expected close, got text: {}", text.as_str())
                }
                _ => continue,
            }
        }
    })
    .await
    .expect("Timed out waiting for the server to close the connection")
}
