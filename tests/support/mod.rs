//! In-process double of the remote Shelf API, served with axum.
//!
//! Implements the same `/api/` contract the real service exposes: JSON auth
//! endpoints, bearer-guarded book listing, multipart book creation, and
//! deletion. Failure toggles let tests exercise the error paths.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Multipart, Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

pub const TOKEN: &str = "test-token";
pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "secret";

#[derive(Clone, Default)]
pub struct MockApi {
    books: Arc<Mutex<Vec<Value>>>,
    next_id: Arc<AtomicUsize>,
    /// When set, deletes answer 500.
    pub fail_deletes: Arc<AtomicBool>,
    /// When set, every bearer-guarded route answers 401.
    pub reject_tokens: Arc<AtomicBool>,
}

impl MockApi {
    /// A double pre-populated with `(title, author, status)` books.
    pub fn seeded(books: &[(&str, &str, &str)]) -> Self {
        let api = Self::default();
        {
            let mut stored = api.books.lock().unwrap();
            for (title, author, status) in books {
                let id = api.next_id.fetch_add(1, Ordering::SeqCst);
                stored.push(json!({
                    "_id": format!("mock-{id}"),
                    "title": title,
                    "author": author,
                    "genre": "",
                    "status": status,
                }));
            }
        }
        api
    }

    pub fn book_count(&self) -> usize {
        self.books.lock().unwrap().len()
    }

    /// Bind to an ephemeral port and serve in the background.
    pub async fn spawn(&self) -> SocketAddr {
        let router = Router::new()
            .route("/api/auth/login", post(login))
            .route("/api/auth/register", post(register))
            .route("/api/books", get(list_books).post(add_book))
            .route("/api/books/{id}", delete(remove_book))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }
}

fn session_for(name: &str, email: &str) -> Value {
    json!({
        "userId": "user-1",
        "name": name,
        "email": email,
        "token": TOKEN,
    })
}

fn authorized(api: &MockApi, headers: &HeaderMap) -> bool {
    if api.reject_tokens.load(Ordering::SeqCst) {
        return false;
    }
    let expected = format!("Bearer {TOKEN}");
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == expected)
}

fn unauthorized_body() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Not authorized" })),
    )
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == EMAIL && body["password"] == PASSWORD {
        (StatusCode::OK, Json(session_for("Ada Lovelace", EMAIL)))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
    }
}

async fn register(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let name = body["name"].as_str().unwrap_or_default();
    let email = body["email"].as_str().unwrap_or_default();
    if name.is_empty() || email.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Please add all fields" })),
        );
    }
    (StatusCode::OK, Json(session_for(name, email)))
}

async fn list_books(State(api): State<MockApi>, headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if !authorized(&api, &headers) {
        return unauthorized_body();
    }
    let books = api.books.lock().unwrap().clone();
    (StatusCode::OK, Json(Value::Array(books)))
}

async fn add_book(
    State(api): State<MockApi>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> (StatusCode, Json<Value>) {
    if !authorized(&api, &headers) {
        return unauthorized_body();
    }

    let mut fields: HashMap<String, String> = HashMap::new();
    let mut cover_name = None;
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if name == "cover" {
            cover_name = field.file_name().map(str::to_string);
            // Bytes are accepted and discarded; the double stores no files.
            let _ = field.bytes().await.unwrap();
        } else {
            fields.insert(name, field.text().await.unwrap());
        }
    }

    let title = fields.get("title").cloned().unwrap_or_default();
    let author = fields.get("author").cloned().unwrap_or_default();
    if title.is_empty() || author.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": "Please add all required fields" })),
        );
    }

    let id = api.next_id.fetch_add(1, Ordering::SeqCst);
    let mut book = json!({
        "_id": format!("mock-{id}"),
        "title": title,
        "author": author,
        "genre": fields.get("genre").cloned().unwrap_or_default(),
        "status": fields
            .get("status")
            .cloned()
            .unwrap_or_else(|| "To Read".to_string()),
    });
    if let Some(name) = cover_name {
        book["coverImageUrl"] = json!(format!("/uploads/{name}"));
    }
    api.books.lock().unwrap().push(book.clone());
    (StatusCode::CREATED, Json(book))
}

async fn remove_book(
    State(api): State<MockApi>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> (StatusCode, Json<Value>) {
    if !authorized(&api, &headers) {
        return unauthorized_body();
    }
    if api.fail_deletes.load(Ordering::SeqCst) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "boom" })),
        );
    }

    let mut books = api.books.lock().unwrap();
    let before = books.len();
    books.retain(|book| book["_id"] != id.as_str());
    if books.len() == before {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": "Book not found" })),
        );
    }
    (StatusCode::OK, Json(json!({ "id": id })))
}
