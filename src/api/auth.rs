//! Login, logout and home page

use axum::{extract::State, Form, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, services::catalog::LibrarySummary, AppState};

use super::{AuthenticatedSession, MessageResponse, SESSION_COOKIE};

/// Login form
#[derive(Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Whether the caller already holds a session
#[derive(Serialize, ToSchema)]
pub struct LoginStatus {
    pub authenticated: bool,
    pub username: Option<String>,
}

/// Home page content
#[derive(Serialize, ToSchema)]
pub struct HomeResponse {
    pub username: String,
    pub summary: LibrarySummary,
}

/// Login page
#[utoipa::path(
    get,
    path = "/login",
    tag = "auth",
    responses(
        (status = 200, description = "Current session state", body = LoginStatus)
    )
)]
pub async fn login_status(State(state): State<AppState>, jar: CookieJar) -> Json<LoginStatus> {
    let username = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| state.services.auth.validate_session(cookie.value()).ok())
        .map(|claims| claims.sub);

    Json(LoginStatus {
        authenticated: username.is_some(),
        username,
    })
}

/// Open a session
#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body(content = LoginRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login successful, session cookie set", body = MessageResponse),
        (status = 401, description = "Invalid username or password", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(request): Form<LoginRequest>,
) -> AppResult<(CookieJar, Json<MessageResponse>)> {
    let token = state
        .services
        .auth
        .login(&request.username, &request.password)
        .await?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    Ok((jar.add(cookie), Json(MessageResponse::new("Login successful!"))))
}

/// Close the session
#[utoipa::path(
    get,
    path = "/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cookie cleared", body = MessageResponse),
        (status = 303, description = "Not logged in, redirect to /login")
    )
)]
pub async fn logout(
    AuthenticatedSession(claims): AuthenticatedSession,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    tracing::info!(username = %claims.sub, "Logged out");
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    (jar, Json(MessageResponse::new("You have been logged out.")))
}

/// Home page
#[utoipa::path(
    get,
    path = "/",
    tag = "auth",
    responses(
        (status = 200, description = "Catalog overview", body = HomeResponse),
        (status = 303, description = "Not logged in, redirect to /login")
    )
)]
pub async fn home(
    State(state): State<AppState>,
    AuthenticatedSession(claims): AuthenticatedSession,
) -> AppResult<Json<HomeResponse>> {
    Ok(Json(HomeResponse {
        username: claims.sub,
        summary: state.services.catalog.summary().await,
    }))
}
