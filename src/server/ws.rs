use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

use super::state::AppState;

/// Upgrade `/ws` connections and hand them to the relay loop.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Connection lifecycle: subscribe on open, relay inbound text frames
/// verbatim to the topic, unsubscribe (receiver drop) on close.
async fn handle_socket(socket: WebSocket, state: AppState) {
    tracing::info!(topic = state.channel.topic(), "client connected");

    let mut rx = state.channel.subscribe();
    let (mut sink, mut stream) = socket.split();

    // Pump topic messages out to this connection.
    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(msg) => {
                    if sink.send(Message::Text(msg)).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "slow subscriber dropped messages");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    // Publish inbound frames to every current subscriber, sender included.
    let channel = state.channel.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = stream.next().await {
            if let Message::Text(text) = msg {
                tracing::debug!("received message: {text}");
                channel.publish(text);
            }
        }
    });

    // Either half ending tears down the whole connection.
    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }

    tracing::info!("client disconnected");
}
