//! Checkout and check-in endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Form, Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        book::Book,
        checkout::{CheckoutDetails, CheckoutRecord, CreateCheckout},
    },
    AppState,
};

use super::AuthenticatedSession;

/// Checkout result
#[derive(Serialize, ToSchema)]
pub struct CheckoutResponse {
    pub message: String,
    pub checkout: CheckoutRecord,
}

/// Check-in result. `checkout` is absent when no open record matched.
#[derive(Serialize, ToSchema)]
pub struct CheckinResponse {
    pub message: String,
    pub checkout: Option<CheckoutRecord>,
}

/// Checkout page: the books that can be lent right now
#[utoipa::path(
    get,
    path = "/checkout_book",
    tag = "checkouts",
    responses(
        (status = 200, description = "Available books", body = Vec<Book>),
        (status = 303, description = "Not logged in, redirect to /login")
    )
)]
pub async fn checkout_form(
    State(state): State<AppState>,
    _session: AuthenticatedSession,
) -> Json<Vec<Book>> {
    Json(state.services.catalog.available_books().await)
}

/// Lend a book
#[utoipa::path(
    post,
    path = "/checkout_book",
    tag = "checkouts",
    request_body(content = CreateCheckout, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Book checked out", body = CheckoutResponse),
        (status = 400, description = "Invalid form", body = crate::error::ErrorResponse),
        (status = 409, description = "Book unknown or already checked out", body = crate::error::ErrorResponse)
    )
)]
pub async fn checkout_book(
    State(state): State<AppState>,
    _session: AuthenticatedSession,
    Form(form): Form<CreateCheckout>,
) -> AppResult<(StatusCode, Json<CheckoutResponse>)> {
    let checkout = state.services.checkouts.checkout(form).await?;

    Ok((
        StatusCode::CREATED,
        Json(CheckoutResponse {
            message: "Book checked out successfully!".to_string(),
            checkout,
        }),
    ))
}

/// Take a book back
#[utoipa::path(
    post,
    path = "/checkin_book/{checkout_id}",
    tag = "checkouts",
    params(
        ("checkout_id" = i32, Path, description = "Checkout record ID")
    ),
    responses(
        (status = 200, description = "Record closed, or nothing to close", body = CheckinResponse)
    )
)]
pub async fn checkin_book(
    State(state): State<AppState>,
    _session: AuthenticatedSession,
    Path(checkout_id): Path<i32>,
) -> Json<CheckinResponse> {
    let checkout = state.services.checkouts.checkin(checkout_id).await;
    let message = match checkout {
        Some(_) => "Book checked in successfully!",
        None => "No open checkout record found.",
    };

    Json(CheckinResponse {
        message: message.to_string(),
        checkout,
    })
}

/// Every checkout record with its book title
#[utoipa::path(
    get,
    path = "/checked_out",
    tag = "checkouts",
    responses(
        (status = 200, description = "Checkout history", body = Vec<CheckoutDetails>),
        (status = 303, description = "Not logged in, redirect to /login")
    )
)]
pub async fn checked_out(
    State(state): State<AppState>,
    _session: AuthenticatedSession,
) -> Json<Vec<CheckoutDetails>> {
    Json(state.services.checkouts.checked_out().await)
}
