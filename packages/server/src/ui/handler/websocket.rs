//! WebSocket connection handlers.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, PlayerConnection},
    infrastructure::message_pusher::{Outbound, WebSocketConnection},
    ui::{dispatcher::ConnectionDispatcher, state::AppState},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives outbound frames from the rx channel and writes them to the WebSocket sender.
///
/// Each write is bounded by `send_timeout`. A failed or timed-out write stops the loop, which drops
/// `rx` so that later pushes to this connection fail and the room evicts it.
///
/// # Arguments
///
/// * `rx` - Channel receiver fed by `WebSocketConnection`
/// * `sender` - WebSocket sink of this connection
/// * `connection_id` - Connection ID for logging
/// * `send_timeout` - Time allowed for a single write
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<Outbound>,
    mut sender: SplitSink<WebSocket, Message>,
    connection_id: ConnectionId,
    send_timeout: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(outbound) = rx.recv().await {
            match outbound {
                Outbound::Text(text) => {
                    match tokio::time::timeout(send_timeout, sender.send(Message::Text(text.into())))
                        .await
                    {
                        Ok(Ok(())) => {}
                        Ok(Err(e)) => {
                            tracing::error!(
                                "Failed to write to connection '{}': {}",
                                connection_id,
                                e
                            );
                            break;
                        }
                        Err(_) => {
                            tracing::warn!(
                                "Write to connection '{}' timed out after {:?}",
                                connection_id,
                                send_timeout
                            );
                            break;
                        }
                    }
                }
                Outbound::Close => {
                    match tokio::time::timeout(send_timeout, sender.send(Message::Close(None)))
                        .await
                    {
                        Ok(Ok(())) => {
                            tracing::debug!("Sent close frame to connection '{}'", connection_id)
                        }
                        Ok(Err(e)) => tracing::debug!(
                            "Failed to send close frame to connection '{}': {}",
                            connection_id,
                            e
                        ),
                        Err(_) => tracing::warn!(
                            "Close frame to connection '{}' timed out",
                            connection_id
                        ),
                    }
                    break;
                }
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, mut receiver) = socket.split();

    let (connection, rx) = WebSocketConnection::channel();
    let connection_id = connection.id();
    tracing::info!("Connection '{}' opened", connection_id);

    // Spawn a task to write queued frames to this connection
    let mut send_task = pusher_loop(rx, sender, connection_id, state.send_timeout);
    let mut send_finished = false;

    let mut dispatcher = ConnectionDispatcher::new(state.clone(), Arc::new(connection));

    loop {
        let message = tokio::select! {
            message = receiver.next() => message,
            _ = &mut send_task => {
                send_finished = true;
                tracing::info!("Outbound loop of connection '{}' stopped", connection_id);
                break;
            }
        };

        let text = match message {
            Some(Ok(Message::Text(text))) => text.as_str().to_owned(),
            Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes.to_vec()) {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(
                        "Binary frame from connection '{}' is not UTF-8, closing: {}",
                        connection_id,
                        e
                    );
                    break;
                }
            },
            // Ping/pong is handled automatically by the WebSocket protocol
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
            Some(Ok(Message::Close(_))) => {
                tracing::info!("Connection '{}' requested close", connection_id);
                break;
            }
            Some(Err(e)) => {
                tracing::warn!("Failed to read from connection '{}': {}", connection_id, e);
                break;
            }
            None => break,
        };

        tracing::debug!("Received from connection '{}': {}", connection_id, text);
        if dispatcher.handle_text(&text).await.is_break() {
            break;
        }
    }

    dispatcher.cleanup().await;

    // Let the outbound loop flush queued frames and the close frame
    if !send_finished
        && tokio::time::timeout(state.send_timeout, &mut send_task)
            .await
            .is_err()
    {
        tracing::warn!(
            "Outbound loop of connection '{}' did not finish in time",
            connection_id
        );
        send_task.abort();
    }

    tracing::info!("Connection '{}' closed", connection_id);
}
