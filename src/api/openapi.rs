//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, checkouts, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Hartland Library API",
        version = "0.1.0",
        description = "Catalog and circulation for the Hartland Community Library",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Session
        auth::login_status,
        auth::login,
        auth::logout,
        auth::home,
        // Books
        books::add_book_form,
        books::add_book,
        books::list_books,
        books::change_book_status,
        books::search_form,
        books::search,
        // Checkouts
        checkouts::checkout_form,
        checkouts::checkout_book,
        checkouts::checkin_book,
        checkouts::checked_out,
    ),
    components(
        schemas(
            // Session
            auth::LoginRequest,
            auth::LoginStatus,
            auth::HomeResponse,
            crate::services::catalog::LibrarySummary,
            crate::api::MessageResponse,
            // Books
            crate::models::book::Book,
            crate::models::book::BookStatus,
            crate::models::book::CreateBook,
            books::FormFields,
            books::BookResponse,
            books::StatusChangeResponse,
            books::SearchRequest,
            books::SearchResponse,
            // Checkouts
            crate::models::checkout::CheckoutRecord,
            crate::models::checkout::CreateCheckout,
            crate::models::checkout::CheckoutDetails,
            checkouts::CheckoutResponse,
            checkouts::CheckinResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Login gate and home page"),
        (name = "books", description = "Catalog management and search"),
        (name = "checkouts", description = "Checkout and check-in")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
