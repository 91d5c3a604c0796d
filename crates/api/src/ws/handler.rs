//! WebSocket handler streaming calibration session row updates.
//!
//! Each socket owns one event-bus receiver filtered to a single session
//! id; matching updates are forwarded as JSON text frames in publish
//! order. Closing the socket tears the subscription down; it does not
//! cancel an in-flight calibration or touch the session row.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use vigia_core::types::DbId;
use vigia_events::SessionUpdate;

use crate::state::AppState;

/// GET /api/v1/calibration/sessions/{id}/ws
///
/// Upgrade the connection and stream updates for one session. The bus is
/// subscribed before the upgrade completes so no update published after
/// the handshake can be missed.
pub async fn session_feed(
    ws: WebSocketUpgrade,
    Path(session_id): Path<DbId>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let receiver = state.event_bus.subscribe();
    ws.on_upgrade(move |socket| stream_updates(socket, session_id, receiver))
}

/// Forward matching bus events to the socket until either side closes.
async fn stream_updates(
    socket: WebSocket,
    session_id: DbId,
    mut receiver: broadcast::Receiver<SessionUpdate>,
) {
    tracing::info!(session_id = %session_id, "Session feed opened");

    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            event = receiver.recv() => match event {
                Ok(update) if update.session_id == session_id => {
                    let frame = match serde_json::to_string(&update.session) {
                        Ok(json) => json,
                        Err(e) => {
                            tracing::error!(session_id = %session_id, error = %e, "Failed to serialize session update");
                            continue;
                        }
                    };
                    if sink.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                // Update for a different session.
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(session_id = %session_id, skipped = n, "Session feed lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    let _ = sink.send(Message::Close(None)).await;
                    break;
                }
            },
            inbound = stream.next() => match inbound {
                Some(Ok(Message::Close(_))) | None => break,
                // The feed is one-way; other inbound frames are ignored.
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    tracing::debug!(session_id = %session_id, error = %e, "Session feed receive error");
                    break;
                }
            },
        }
    }

    tracing::info!(session_id = %session_id, "Session feed closed");
}
