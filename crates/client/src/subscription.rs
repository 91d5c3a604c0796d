//! Change-feed subscription for a single calibration session.
//!
//! [`ApiClient::subscribe_to_session`] opens the per-session WebSocket
//! feed and pumps each new row image into a callback from a background
//! task. The returned [`SessionSubscription`] deregisters the channel on
//! [`stop`](SessionSubscription::stop), and on drop, so an owner torn
//! down mid-flight cannot leak the feed. Stopping only ends notification
//! delivery; it does not cancel an in-flight calibration or touch the
//! session row.

use futures::{SinkExt, StreamExt};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use vigia_core::types::DbId;
use vigia_db::models::calibration_session::CalibrationSession;

use crate::api::{ApiClient, ClientError};

/// Handle for an active session subscription.
pub struct SessionSubscription {
    cancel: CancellationToken,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl SessionSubscription {
    /// Stop delivery and close the underlying channel, waiting for the
    /// pump task to finish so no callback fires after this returns.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        // Covers owners torn down without calling stop(); the pump task
        // notices the cancellation and closes the socket.
        self.cancel.cancel();
    }
}

impl ApiClient {
    /// Open the change feed for one session.
    ///
    /// `callback` is invoked with the new row image for every update, in
    /// the order the store applied them.
    pub async fn subscribe_to_session<F>(
        &self,
        session_id: DbId,
        callback: F,
    ) -> Result<SessionSubscription, ClientError>
    where
        F: Fn(CalibrationSession) + Send + 'static,
    {
        let url = self.feed_url(session_id);
        let (stream, _response) = connect_async(&url)
            .await
            .map_err(|e| ClientError::Subscription(format!("Failed to connect to {url}: {e}")))?;

        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        let task = tokio::spawn(async move {
            let (mut sink, mut source) = stream.split();

            loop {
                tokio::select! {
                    () = task_cancel.cancelled() => {
                        let _ = sink.send(Message::Close(None)).await;
                        break;
                    }
                    frame = source.next() => match frame {
                        Some(Ok(Message::Text(text))) => {
                            match serde_json::from_str::<CalibrationSession>(&text) {
                                Ok(session) => callback(session),
                                Err(e) => tracing::warn!(
                                    session_id = %session_id,
                                    error = %e,
                                    "Ignoring malformed feed frame",
                                ),
                            }
                        }
                        Some(Ok(Message::Close(_))) | None => break,
                        // Ping/pong handled by the library; nothing else
                        // arrives on this feed.
                        Some(Ok(_)) => {}
                        Some(Err(e)) => {
                            tracing::debug!(session_id = %session_id, error = %e, "Feed receive error");
                            break;
                        }
                    },
                }
            }
        });

        Ok(SessionSubscription {
            cancel,
            task: Some(task),
        })
    }
}
