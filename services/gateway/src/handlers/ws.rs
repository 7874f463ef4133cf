use crate::models::StreamFrame;
use crate::state::AppState;
use axum::{
    extract::{
        State,
        ws::{Message, Utf8Bytes, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast::error::RecvError;

/// `GET /ws` — subscribe to the "quotes" channel.
///
/// Each subscriber gets a broadcast receiver; events after the upgrade are
/// forwarded as JSON frames in publish order. Delivery is at-most-once:
/// a subscriber that lags past the channel capacity skips events.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let mut events = state.publisher.subscribe();
    let (mut sink, mut stream) = socket.split();
    tracing::debug!(
        subscribers = state.publisher.subscriber_count(),
        "websocket subscriber connected"
    );

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let frame = StreamFrame {
                        channel: "quotes",
                        event: event.label(),
                        data: event.payload(),
                    };
                    let Ok(text) = serde_json::to_string(&frame) else {
                        continue;
                    };
                    if sink.send(Message::Text(Utf8Bytes::from(text))).await.is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "websocket subscriber lagged, events dropped");
                }
                Err(RecvError::Closed) => break,
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::debug!("websocket subscriber disconnected");
}
