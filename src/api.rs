//! HTTP surface: the apply endpoint, the health probe, and router assembly.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::application::ApplicationRecord;
use crate::config::{AppEnv, Config};
use crate::error::{Error, Result};
use crate::mail::{Email, Mailer};

/// Prebuilt form bundle served on non-API paths in production.
const STATIC_DIR: &str = "static";

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Absent until mail credentials are configured; requests that need to
    /// send mail fail with a configuration error, everything else works.
    pub mailer: Option<Arc<dyn Mailer>>,
}

pub fn router(state: AppState) -> Router {
    let config = state.config.clone();

    let mut app = Router::new()
        .route("/api/apply", post(apply))
        .route("/api/health", get(health))
        .with_state(state)
        .layer(cors_layer(&config));

    // In production the same process serves the form bundle, with the
    // index as fallback for client-side routes.
    if config.app_env == AppEnv::Production {
        let assets = ServeDir::new(STATIC_DIR)
            .not_found_service(ServeFile::new(format!("{STATIC_DIR}/index.html")));
        app = app.fallback_service(assets);
    }

    app
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let allow_origin = match config.app_env {
        AppEnv::Development => AllowOrigin::any(),
        AppEnv::Production => AllowOrigin::list(origins),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}

/// Accept an application: validate, render, and mail it to the recipient.
///
/// Each submission stands alone. Nothing is persisted, duplicates are not
/// detected, and a failed send is terminal for the request; the applicant
/// simply resubmits.
pub async fn apply(
    State(state): State<AppState>,
    Json(record): Json<ApplicationRecord>,
) -> Result<Json<Value>> {
    tracing::info!(name = %record.name, "received application");

    let missing = record.missing_required_fields();
    if !missing.is_empty() {
        tracing::warn!(?missing, "rejecting incomplete application");
        return Err(Error::MissingRequiredFields);
    }

    let mailer = state.mailer.as_ref().ok_or(Error::MailNotConfigured)?;
    let recipient = state
        .config
        .recipient_email
        .clone()
        .ok_or(Error::MailNotConfigured)?;

    let text = record.render(OffsetDateTime::now_utc());
    let email = Email::builder()
        .to(&recipient)
        .subject(format!("💕 New Girlfriend Application from {}", record.name))
        .html(text.replace('\n', "<br>"))
        .text(text)
        .build()?;

    mailer.send(&email).await?;
    tracing::info!(%recipient, "application email sent");

    Ok(Json(json!({
        "success": true,
        "message": "Application submitted and email sent!",
    })))
}

/// Liveness probe. No side effects, works with or without mail configured.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    Json(json!({
        "status": "Server is running!",
        "environment": state.config.app_env.to_string(),
        "timestamp": timestamp,
    }))
}
