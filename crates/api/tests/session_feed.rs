//! Integration tests for the per-session change feed, driven end-to-end
//! through the client crate against a server on a real listener.

mod common;

use std::time::Duration;

use sqlx::PgPool;
use vigia_client::ApiClient;
use vigia_db::models::calibration_session::CalibrationSession;
use vigia_db::repositories::{CalibrationSessionRepo, ModelRepo};

async fn pending_session(pool: &PgPool) -> CalibrationSession {
    let model = ModelRepo::list(pool)
        .await
        .unwrap()
        .into_iter()
        .next()
        .expect("seeded model");
    CalibrationSessionRepo::insert_pending(pool, model.id, "http://host/calibrate")
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn subscribing_then_updating_delivers_exactly_one_callback(pool: PgPool) {
    let base = common::spawn_app(pool.clone()).await;
    let session = pending_session(&pool).await;

    let client = ApiClient::new(&base);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let subscription = client
        .subscribe_to_session(session.id, move |row| {
            let _ = tx.send(row);
        })
        .await
        .unwrap();

    client
        .update_calibration_status(session.id, "running", None, None)
        .await
        .unwrap();

    let delivered = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("notification should arrive")
        .expect("channel open");
    assert_eq!(delivered.id, session.id);
    assert_eq!(delivered.status, "running");
    assert!(delivered.started_at.is_none(), "feed carries the row image as written");

    // One update, one callback.
    let extra = tokio::time::timeout(Duration::from_millis(300), rx.recv()).await;
    assert!(extra.is_err(), "no second callback for a single update");

    subscription.stop().await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unsubscribing_before_the_update_delivers_zero(pool: PgPool) {
    let base = common::spawn_app(pool.clone()).await;
    let session = pending_session(&pool).await;

    let client = ApiClient::new(&base);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let subscription = client
        .subscribe_to_session(session.id, move |row| {
            let _ = tx.send(row);
        })
        .await
        .unwrap();

    // stop() waits for the pump task, so no callback can fire afterwards
    // and the channel sender is already dropped.
    subscription.stop().await;

    client
        .update_calibration_status(session.id, "completed", None, None)
        .await
        .unwrap();

    assert!(
        rx.recv().await.is_none(),
        "no callback may fire after unsubscribing"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn feed_is_scoped_to_the_subscribed_session(pool: PgPool) {
    let base = common::spawn_app(pool.clone()).await;
    let watched = pending_session(&pool).await;
    let other = pending_session(&pool).await;

    let client = ApiClient::new(&base);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let subscription = client
        .subscribe_to_session(watched.id, move |row| {
            let _ = tx.send(row);
        })
        .await
        .unwrap();

    // An update to an unrelated session must not be delivered; the next
    // frame observed is the watched session's own update.
    client
        .update_calibration_status(other.id, "running", None, None)
        .await
        .unwrap();
    client
        .update_calibration_status(watched.id, "failed", None, Some("kernel died".into()))
        .await
        .unwrap();

    let delivered = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("notification should arrive")
        .expect("channel open");
    assert_eq!(delivered.id, watched.id);
    assert_eq!(delivered.status, "failed");
    assert_eq!(delivered.error_message.as_deref(), Some("kernel died"));

    subscription.stop().await;
}

#[sqlx::test(migrations = "../db/migrations")]
async fn updates_arrive_in_apply_order(pool: PgPool) {
    let base = common::spawn_app(pool.clone()).await;
    let session = pending_session(&pool).await;

    let client = ApiClient::new(&base);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let subscription = client
        .subscribe_to_session(session.id, move |row| {
            let _ = tx.send(row.status);
        })
        .await
        .unwrap();

    client
        .update_calibration_status(session.id, "running", None, None)
        .await
        .unwrap();
    client
        .update_calibration_status(session.id, "completed", None, None)
        .await
        .unwrap();

    let first = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    let second = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!((first.as_str(), second.as_str()), ("running", "completed"));

    subscription.stop().await;
}
