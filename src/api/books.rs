//! Catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Form, Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::book::{Book, BookStatus, CreateBook},
    AppState,
};

use super::AuthenticatedSession;

/// Fields expected by a form
#[derive(Serialize, ToSchema)]
pub struct FormFields {
    pub fields: Vec<String>,
}

/// Book creation result
#[derive(Serialize, ToSchema)]
pub struct BookResponse {
    pub message: String,
    pub book: Book,
}

/// Status change result. `book` is absent when the id was unknown.
#[derive(Serialize, ToSchema)]
pub struct StatusChangeResponse {
    pub message: Option<String>,
    pub book: Option<Book>,
}

/// Search input, from the query string or a form
#[derive(Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct SearchRequest {
    /// Matched against title and author, case-insensitively
    pub query: Option<String>,
}

/// Search page content. `books` is absent until a query is run.
#[derive(Serialize, ToSchema)]
pub struct SearchResponse {
    pub query: Option<String>,
    pub books: Option<Vec<Book>>,
}

/// Add-book page
#[utoipa::path(
    get,
    path = "/add",
    tag = "books",
    responses(
        (status = 200, description = "Add-book form fields", body = FormFields),
        (status = 303, description = "Not logged in, redirect to /login")
    )
)]
pub async fn add_book_form(_session: AuthenticatedSession) -> Json<FormFields> {
    Json(FormFields {
        fields: ["title", "author", "year", "isbn"]
            .iter()
            .map(|f| f.to_string())
            .collect(),
    })
}

/// Add a book to the catalog
#[utoipa::path(
    post,
    path = "/add",
    tag = "books",
    request_body(content = CreateBook, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Book added", body = BookResponse),
        (status = 400, description = "Missing field or non-numeric year", body = crate::error::ErrorResponse),
        (status = 409, description = "ISBN already in the catalog", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    _session: AuthenticatedSession,
    Form(form): Form<CreateBook>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    let book = state.services.catalog.add_book(form).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookResponse {
            message: "Book added successfully!".to_string(),
            book,
        }),
    ))
}

/// List every book in insertion order
#[utoipa::path(
    get,
    path = "/list",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>),
        (status = 303, description = "Not logged in, redirect to /login")
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    _session: AuthenticatedSession,
) -> Json<Vec<Book>> {
    Json(state.services.catalog.list_all().await)
}

/// Overwrite a book's status
#[utoipa::path(
    post,
    path = "/change_book_status/{book_id}/{status}",
    tag = "books",
    params(
        ("book_id" = i32, Path, description = "Book ID"),
        ("status" = String, Path, description = "available or checked_out")
    ),
    responses(
        (status = 200, description = "Status updated, or unknown id ignored", body = StatusChangeResponse),
        (status = 400, description = "Unknown status", body = crate::error::ErrorResponse)
    )
)]
pub async fn change_book_status(
    State(state): State<AppState>,
    _session: AuthenticatedSession,
    Path((book_id, status)): Path<(i32, String)>,
) -> AppResult<Json<StatusChangeResponse>> {
    let status: BookStatus = status.parse()?;
    let book = state.services.catalog.set_status(book_id, status).await;

    Ok(Json(StatusChangeResponse {
        message: book
            .as_ref()
            .map(|_| format!("Book status updated to {}.", status)),
        book,
    }))
}

/// Search page, optionally running `?query=`
#[utoipa::path(
    get,
    path = "/search",
    tag = "books",
    params(SearchRequest),
    responses(
        (status = 200, description = "Search results", body = SearchResponse),
        (status = 400, description = "Empty query", body = crate::error::ErrorResponse)
    )
)]
pub async fn search_form(
    State(state): State<AppState>,
    _session: AuthenticatedSession,
    Query(request): Query<SearchRequest>,
) -> AppResult<Json<SearchResponse>> {
    match request.query {
        Some(query) => run_search(&state, query).await,
        None => Ok(Json(SearchResponse {
            query: None,
            books: None,
        })),
    }
}

/// Search by title or author
#[utoipa::path(
    post,
    path = "/search",
    tag = "books",
    request_body(content = SearchRequest, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Search results", body = SearchResponse),
        (status = 400, description = "Empty query", body = crate::error::ErrorResponse)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    _session: AuthenticatedSession,
    Form(request): Form<SearchRequest>,
) -> AppResult<Json<SearchResponse>> {
    run_search(&state, request.query.unwrap_or_default()).await
}

async fn run_search(state: &AppState, query: String) -> AppResult<Json<SearchResponse>> {
    let books = state.services.catalog.search(&query).await?;
    Ok(Json(SearchResponse {
        query: Some(query),
        books: Some(books),
    }))
}
