use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod auth;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod store;

use config::Config;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<Config>,
}

fn api_router(state: AppState) -> Router {
    // Administrator routes split: register/login are public, the rest
    // require a bearer token; role checks happen inside the handlers.
    let admin_public = Router::new()
        .route("/api/admins/register", post(handlers::admins::register))
        .route("/api/admins/login", post(handlers::admins::login));

    let admin_protected = Router::new()
        .route("/api/admins", get(handlers::admins::list_admins))
        .route("/api/admins/:id", get(handlers::admins::get_admin))
        .route("/api/admins/:id", put(handlers::admins::update_admin))
        .route("/api/admins/:id", delete(handlers::admins::delete_admin))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_admin,
        ));

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz))
        // Users
        .route("/api/users", get(handlers::users::list_users))
        .route("/api/users", post(handlers::users::create_user))
        .route("/api/users/:id", get(handlers::users::get_user))
        .route(
            "/api/users/:id/last-login",
            put(handlers::users::update_last_login),
        )
        .route("/api/users/:id/section", put(handlers::users::update_section))
        // Emotions
        .route("/api/emotions", get(handlers::emotions::list_emotions))
        .route("/api/emotions", post(handlers::emotions::create_emotion))
        .route("/api/emotions/:id", get(handlers::emotions::get_emotion))
        .route("/api/emotions/:id", put(handlers::emotions::update_emotion))
        .route("/api/emotions/:id", delete(handlers::emotions::delete_emotion))
        .route(
            "/api/emotions/:id/phrases",
            get(handlers::emotions::list_emotion_phrases),
        )
        // Phrases
        .route("/api/phrases", get(handlers::phrases::list_phrases))
        .route("/api/phrases", post(handlers::phrases::create_phrase))
        .route("/api/phrases/search", get(handlers::phrases::search_phrases))
        .route(
            "/api/phrases/emotion/:id",
            get(handlers::phrases::list_phrases_by_emotion),
        )
        .route(
            "/api/phrases/emotion/:id/random",
            get(handlers::phrases::random_phrase_by_emotion),
        )
        .route("/api/phrases/:id", put(handlers::phrases::update_phrase))
        .route("/api/phrases/:id", delete(handlers::phrases::delete_phrase))
        // Emotion records
        .route(
            "/api/emotion-records",
            get(handlers::emotion_records::list_records),
        )
        .route(
            "/api/emotion-records",
            post(handlers::emotion_records::create_record),
        )
        .route(
            "/api/emotion-records/user/:id",
            get(handlers::emotion_records::list_records_by_user),
        )
        .route(
            "/api/emotion-records/user/:id/stats",
            get(handlers::emotion_records::user_record_stats),
        )
        .route(
            "/api/emotion-records/:id",
            delete(handlers::emotion_records::delete_record),
        )
        // Journal
        .route("/api/journal", post(handlers::journal::create_entry))
        .route(
            "/api/journal/user/:id",
            get(handlers::journal::list_entries_by_user),
        )
        .route(
            "/api/journal/user/:id/summary",
            get(handlers::journal::emotional_summary),
        )
        .route("/api/journal/:id", get(handlers::journal::get_entry))
        .route("/api/journal/:id/note", put(handlers::journal::update_note))
        .route("/api/journal/:id", delete(handlers::journal::delete_entry))
        // Activities
        .route("/api/activities", get(handlers::activities::list_activities))
        .route("/api/activities", post(handlers::activities::create_activity))
        .route(
            "/api/activities/search",
            get(handlers::activities::search_activities),
        )
        .route("/api/activities/:id", get(handlers::activities::get_activity))
        .route("/api/activities/:id", put(handlers::activities::update_activity))
        .route(
            "/api/activities/:id",
            delete(handlers::activities::delete_activity),
        )
        // Exercises
        .route("/api/exercises", post(handlers::exercises::create_exercise))
        .route(
            "/api/exercises/activity/:id",
            get(handlers::exercises::list_exercises_by_activity),
        )
        .route(
            "/api/exercises/shift/:shift",
            get(handlers::exercises::list_exercises_by_shift),
        )
        .route(
            "/api/exercises/stats/by-shift",
            get(handlers::exercises::exercise_shift_stats),
        )
        .route("/api/exercises/:id", put(handlers::exercises::update_exercise))
        .route(
            "/api/exercises/:id/complete",
            put(handlers::exercises::complete_exercise),
        )
        .route(
            "/api/exercises/:id",
            delete(handlers::exercises::delete_exercise),
        )
        // Meditations
        .route(
            "/api/meditations",
            post(handlers::meditations::create_meditation),
        )
        .route(
            "/api/meditations/completed",
            get(handlers::meditations::list_completed_meditations),
        )
        .route(
            "/api/meditations/activity/:id",
            get(handlers::meditations::get_meditation_by_activity),
        )
        .route(
            "/api/meditations/:id",
            get(handlers::meditations::get_meditation),
        )
        .route(
            "/api/meditations/:id",
            put(handlers::meditations::update_meditation),
        )
        .route(
            "/api/meditations/:id/complete",
            put(handlers::meditations::complete_meditation),
        )
        .route(
            "/api/meditations/:id",
            delete(handlers::meditations::delete_meditation),
        )
        // Reports
        .route("/api/reports", post(handlers::reports::create_report))
        .route("/api/reports", get(handlers::reports::list_reports))
        .route("/api/reports/stats", get(handlers::reports::report_stats))
        .route("/api/reports/:id", get(handlers::reports::get_report))
        .route("/api/reports/:id/answer", put(handlers::reports::update_answer))
        .route("/api/reports/:id", delete(handlers::reports::delete_report))
        .merge(admin_public)
        .merge(admin_protected)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wellbloom_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Arc::new(Config::from_env());

    let db = db::create_pool(&config).await;

    sqlx::migrate!("./migrations")
        .run(&db)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations applied");

    let state = AppState {
        db,
        config: config.clone(),
    };

    let app = api_router(state);

    let addr = config.listen_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::auth::jwt::issue_token;
    use crate::models::admin::AdminRole;

    /// Router wired to a lazily-connected pool: routing, auth and validation
    /// are exercised for real, and no test below ever reaches the database.
    fn test_state() -> AppState {
        let config = Arc::new(Config {
            database_url: "postgres://localhost:1/unreachable".into(),
            host: "127.0.0.1".into(),
            port: 0,
            db_max_connections: 1,
            db_acquire_timeout_secs: 1,
            jwt_secret: "router-test-secret".into(),
            jwt_ttl_secs: 28800,
        });
        let db = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("lazy pool");
        AppState { db, config }
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn health_check_reports_ok() {
        let app = api_router(test_state());
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "wellbloom-api");
    }

    #[tokio::test]
    async fn admin_list_requires_token() {
        let app = api_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/admins")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_bearer_token_is_rejected() {
        let app = api_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/admins")
                    .header(header::AUTHORIZATION, "Bearer not-a-real-token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn non_superadmin_cannot_list_admins() {
        let state = test_state();
        let token = issue_token(7, AdminRole::Editor, &state.config).unwrap();

        let app = api_router(state);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/admins")
                    .header(header::AUTHORIZATION, format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn invalid_user_body_lists_every_violated_field() {
        let app = api_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/users")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"name": "", "email": "not-an-email", "password": "short"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let json = body_json(response).await;
        let details = json["error"]["details"].as_object().unwrap();
        assert!(details.contains_key("name"));
        assert!(details.contains_key("email"));
        assert!(details.contains_key("password"));
    }

    #[tokio::test]
    async fn unknown_shift_segment_is_client_error() {
        let app = api_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/exercises/shift/midnight")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let app = api_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
