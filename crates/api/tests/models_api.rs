//! Integration tests for the model catalog endpoint.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn catalog_is_served_inside_the_data_envelope(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/models").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let models = json["data"].as_array().expect("data must be an array");
    assert!(!models.is_empty(), "seeded catalog should not be empty");
    assert!(models[0]["name"].is_string());
    assert!(models[0]["accuracy"].is_number());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn recommended_models_precede_the_rest(pool: PgPool) {
    // Extra rows on both sides of the flag so ordering is not an artifact
    // of the seed data.
    sqlx::query(
        "INSERT INTO models (name, display_name, accuracy, is_recommended) \
         VALUES ('zz_recommended', 'ZZ Recommended', 80.0, TRUE), \
                ('aa_plain', 'AA Plain', 99.0, FALSE)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let json = body_json(get(app, "/api/v1/models").await).await;
    let models = json["data"].as_array().unwrap();

    let flags: Vec<bool> = models
        .iter()
        .map(|m| m["is_recommended"].as_bool().unwrap())
        .collect();
    let first_plain = flags.iter().position(|f| !f).expect("has plain entries");
    assert!(
        flags[first_plain..].iter().all(|f| !f),
        "every recommended row must precede every non-recommended row: {flags:?}"
    );
}
