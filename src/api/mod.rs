//! HTTP handlers and routing

pub mod auth;
pub mod books;
pub mod checkouts;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
    routing::{get, post},
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{error::AppError, models::session::SessionClaims, AppState};

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "hartland_session";

/// Extractor for a logged-in session. Rejection redirects to `/login`.
pub struct AuthenticatedSession(pub SessionClaims);

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .ok_or(AppError::Unauthenticated)?;

        let claims = state.services.auth.validate_session(&token)?;
        Ok(AuthenticatedSession(claims))
    }
}

/// Transient notice shown to the user after an action
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Session
        .route("/", get(auth::home))
        .route("/login", get(auth::login_status).post(auth::login))
        .route("/logout", get(auth::logout))
        // Catalog
        .route("/add", get(books::add_book_form).post(books::add_book))
        .route("/list", get(books::list_books))
        .route(
            "/change_book_status/:book_id/:status",
            post(books::change_book_status),
        )
        .route("/search", get(books::search_form).post(books::search))
        // Circulation
        .route(
            "/checkout_book",
            get(checkouts::checkout_form).post(checkouts::checkout_book),
        )
        .route("/checkin_book/:checkout_id", post(checkouts::checkin_book))
        .route("/checked_out", get(checkouts::checked_out))
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .with_state(state);

    app.merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
