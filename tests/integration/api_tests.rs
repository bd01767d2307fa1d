//! API integration tests, run in-process against the full router

use axum::{
    body::{to_bytes, Body},
    http::{
        header::{CONTENT_TYPE, COOKIE, LOCATION, SET_COOKIE},
        Request, Response, StatusCode,
    },
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use hartland_library::{api, AppConfig, AppState};

fn app() -> Router {
    let state = AppState::new(AppConfig::default()).expect("Failed to build state");
    api::create_router(state)
}

async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone()
        .oneshot(request)
        .await
        .expect("Failed to send request")
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Failed to parse response")
}

fn get(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn post_form(uri: &str, cookie: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(COOKIE, cookie)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

/// Helper to log in as admin, returning the cookie pair to send back
async fn login(app: &Router) -> String {
    let response = send(
        app,
        post_form("/login", "", "username=admin&password=admin123"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("No session cookie")
        .to_string();
    set_cookie
        .split(';')
        .next()
        .expect("Empty cookie")
        .to_string()
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let response = send(&app, get("/health", "")).await;

    assert!(response.status().is_success());
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_unauthenticated_access_redirects_to_login() {
    let app = app();

    for uri in ["/", "/list", "/checked_out", "/checkout_book", "/add", "/logout"] {
        let response = send(&app, get(uri, "")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(response.headers().get(LOCATION).unwrap(), "/login");
    }

    let response = send(&app, get("/list", "hartland_session=garbage")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let app = app();
    let response = send(
        &app,
        post_form("/login", "", "username=admin&password=wrong"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(SET_COOKIE).is_none());
    let body = json_body(response).await;
    assert_eq!(body["message"], "Invalid username or password!");
}

#[tokio::test]
async fn test_login_then_home() {
    let app = app();
    let cookie = login(&app).await;

    let response = send(&app, get("/login", &cookie)).await;
    let body = json_body(response).await;
    assert_eq!(body["authenticated"], true);

    let response = send(&app, get("/", &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["username"], "admin");
    assert_eq!(body["summary"]["total_books"], 10);
    assert_eq!(body["summary"]["open_checkouts"], 0);
}

#[tokio::test]
async fn test_logout_clears_session_cookie() {
    let app = app();
    let cookie = login(&app).await;

    let response = send(&app, get("/logout", &cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let removal = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    assert!(removal.starts_with("hartland_session="));
    assert!(removal.contains("Max-Age=0"));

    let body = json_body(response).await;
    assert_eq!(body["message"], "You have been logged out.");
}

#[tokio::test]
async fn test_add_book_success() {
    let app = app();
    let cookie = login(&app).await;

    let response = send(
        &app,
        post_form(
            "/add",
            &cookie,
            "title=New+Book&author=John+Doe&year=2024&isbn=1234567890123",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Book added successfully!");
    assert_eq!(body["book"]["id"], 11);
    assert_eq!(body["book"]["status"], "available");

    let books = json_body(send(&app, get("/list", &cookie)).await).await;
    let books = books.as_array().unwrap();
    assert_eq!(books.len(), 11);
    assert_eq!(books[10]["title"], "New Book");
}

#[tokio::test]
async fn test_add_book_rejections() {
    let app = app();
    let cookie = login(&app).await;

    let response = send(
        &app,
        post_form(
            "/add",
            &cookie,
            "title=Incomplete+Book&author=&year=2024&isbn=1234567890123",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "All fields are required!");

    let response = send(
        &app,
        post_form(
            "/add",
            &cookie,
            "title=Invalid+Year+Book&author=Author+C&year=Year2024&isbn=1234567890124",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "Year must be a number!");

    let response = send(
        &app,
        post_form(
            "/add",
            &cookie,
            "title=Gatsby&author=Someone&year=1925&isbn=9780743273565",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        json_body(response).await["message"],
        "A book with this ISBN already exists!"
    );

    let books = json_body(send(&app, get("/list", &cookie)).await).await;
    assert_eq!(books.as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_search() {
    let app = app();
    let cookie = login(&app).await;

    let response = send(&app, post_form("/search", &cookie, "query=gatsby")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let books = body["books"].as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "The Great Gatsby");

    let body = json_body(send(&app, get("/search?query=tolkien", &cookie)).await).await;
    assert_eq!(body["books"][0]["title"], "The Hobbit");

    let body = json_body(send(&app, get("/search", &cookie)).await).await;
    assert!(body["books"].is_null());

    let response = send(&app, post_form("/search", &cookie, "query=")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await["message"],
        "Search query cannot be empty!"
    );
}

#[tokio::test]
async fn test_checkout_unavailable_book() {
    let app = app();
    let cookie = login(&app).await;

    let response = send(
        &app,
        post_form(
            "/checkout_book",
            &cookie,
            "book_id=1&user_name=Bob&checkout_date=2024-11-26&checkin_date=2024-12-03",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Book checked out successfully!");
    assert_eq!(body["checkout"]["id"], 1);
    assert!(body["checkout"]["returned_date"].is_null());

    let response = send(
        &app,
        post_form(
            "/checkout_book",
            &cookie,
            "book_id=1&user_name=Charlie&checkout_date=2024-11-27&checkin_date=2024-12-04",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        json_body(response).await["message"],
        "The book is not available for checkout."
    );

    let response = send(
        &app,
        post_form(
            "/checkout_book",
            &cookie,
            "book_id=77&user_name=Charlie&checkout_date=2024-11-27&checkin_date=2024-12-04",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_available_books_shrink_after_checkout() {
    let app = app();
    let cookie = login(&app).await;

    let available = json_body(send(&app, get("/checkout_book", &cookie)).await).await;
    assert_eq!(available.as_array().unwrap().len(), 10);

    send(
        &app,
        post_form(
            "/checkout_book",
            &cookie,
            "book_id=3&user_name=Emily+Johnson&checkout_date=2024-11-05&checkin_date=2024-11-19",
        ),
    )
    .await;

    let available = json_body(send(&app, get("/checkout_book", &cookie)).await).await;
    let available = available.as_array().unwrap();
    assert_eq!(available.len(), 9);
    assert!(available.iter().all(|b| b["id"] != 3));
}

#[tokio::test]
async fn test_checkin_flow() {
    let app = app();
    let cookie = login(&app).await;

    send(
        &app,
        post_form(
            "/checkout_book",
            &cookie,
            "book_id=6&user_name=David+Taylor&checkout_date=2024-11-01&checkin_date=2024-11-15",
        ),
    )
    .await;

    let report = json_body(send(&app, get("/checked_out", &cookie)).await).await;
    assert_eq!(report[0]["book_title"], "The Hobbit");
    assert_eq!(report[0]["actual_checkin_date"], "Not Returned Yet");

    let response = send(&app, post_form("/checkin_book/1", &cookie, "")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Book checked in successfully!");
    assert!(body["checkout"]["returned_date"].is_string());

    let report = json_body(send(&app, get("/checked_out", &cookie)).await).await;
    assert_ne!(report[0]["actual_checkin_date"], "Not Returned Yet");

    let books = json_body(send(&app, get("/list", &cookie)).await).await;
    assert_eq!(books[5]["status"], "available");

    // Nothing left to close
    let body = json_body(send(&app, post_form("/checkin_book/1", &cookie, "")).await).await;
    assert!(body["checkout"].is_null());
}

#[tokio::test]
async fn test_change_book_status() {
    let app = app();
    let cookie = login(&app).await;

    let response = send(
        &app,
        post_form("/change_book_status/2/checked_out", &cookie, ""),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["message"], "Book status updated to checked out.");
    assert_eq!(body["book"]["status"], "checked_out");

    let body = json_body(
        send(&app, post_form("/change_book_status/99/available", &cookie, "")).await,
    )
    .await;
    assert!(body["book"].is_null());

    let response = send(&app, post_form("/change_book_status/2/lost", &cookie, "")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

struct LibrarianOnly;

#[async_trait::async_trait]
impl hartland_library::services::auth::CredentialVerifier for LibrarianOnly {
    async fn verify(&self, username: &str, password: &str) -> hartland_library::AppResult<bool> {
        Ok(username == "librarian" && password == "shelves")
    }
}

#[tokio::test]
async fn test_custom_credential_verifier() {
    use hartland_library::{
        repository::{RecordStore, Repository},
        services::Services,
    };
    use std::sync::Arc;

    let config = AppConfig::default();
    let services = Services::with_verifier(
        Repository::new(RecordStore::seeded().unwrap()),
        config.auth.clone(),
        Arc::new(LibrarianOnly),
    );
    let app = api::create_router(AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    });

    let response = send(
        &app,
        post_form("/login", "", "username=admin&password=admin123"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(
        &app,
        post_form("/login", "", "username=librarian&password=shelves"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_missing_form_keys_are_validation_errors() {
    let app = app();
    let cookie = login(&app).await;

    let response = send(&app, post_form("/add", &cookie, "title=T&year=2024&isbn=555")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["message"], "All fields are required!");
    assert_eq!(body["error"], "BadValue");

    let response = send(
        &app,
        post_form(
            "/checkout_book",
            &cookie,
            "book_id=1&checkout_date=2024-11-26&checkin_date=2024-12-03",
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "User name is required!");

    let response = send(&app, post_form("/login", "", "username=admin")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        json_body(response).await["message"],
        "Invalid username or password!"
    );
}

#[tokio::test]
async fn test_add_book_year_is_not_trimmed() {
    let app = app();
    let cookie = login(&app).await;

    let response = send(
        &app,
        post_form("/add", &cookie, "title=T&author=A&year=+2024&isbn=556"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "Year must be a number!");

    let books = json_body(send(&app, get("/list", &cookie)).await).await;
    assert_eq!(books.as_array().unwrap().len(), 10);
}
