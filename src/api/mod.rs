//! HTTP boundary: router construction and server bootstrap.
//!
//! The request boundary is a collaborator of the account core, not part of
//! it: handlers deserialize JSON, call the injected [`AccountService`], and
//! translate outcomes back to the wire shapes. The service and its stores
//! are constructed here once and shared through extensions.

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{Extension, MatchedPath},
    http::{header::CONTENT_TYPE, HeaderName, HeaderValue, Method, Request},
    routing::{get, post},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::PropagateRequestIdLayer,
    set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;

use crate::account::crypto::TokenIssuer;
use crate::account::repo::{PgAccountStore, PgVerificationStore};
use crate::account::service::AccountConfig;
use crate::account::AccountService;
use crate::email::LogEmailSender;

pub mod handlers;
mod openapi;

pub use openapi::openapi;

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(
    port: u16,
    dsn: String,
    otp_ttl: Duration,
    tokens: TokenIssuer,
    config: AccountConfig,
) -> Result<()> {
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
        .connect(&dsn)
        .await
        .context("Failed to connect to database")?;

    let service = Arc::new(AccountService::new(
        Arc::new(PgAccountStore::new(pool.clone())),
        Arc::new(PgVerificationStore::new(pool.clone(), otp_ttl)),
        Arc::new(LogEmailSender),
        tokens,
        config,
    ));

    // The source system served a public API with open CORS.
    let cors = CorsLayer::new()
        .allow_headers([CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST])
        .allow_origin(Any);

    let app = router(service).layer(
        ServiceBuilder::new()
            .layer(SetRequestHeaderLayer::if_not_present(
                HeaderName::from_static("x-request-id"),
                |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
            ))
            .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                "x-request-id",
            )))
            .layer(TraceLayer::new_for_http().make_span_with(make_span))
            .layer(cors)
            .layer(Extension(pool)),
    );

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

/// Build the application router with the account service injected.
#[must_use]
pub fn router(service: Arc<AccountService>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/sign-up", post(handlers::auth::sign_up))
        .route("/api/verify-otp", post(handlers::auth::verify_otp))
        .route("/api/sign-in", post(handlers::auth::sign_in))
        .layer(Extension(service))
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
