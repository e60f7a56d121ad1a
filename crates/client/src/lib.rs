//! HTTP client facade for the remote Shelf library API.
//!
//! One thin wrapper around `reqwest` covering the five operations the client
//! needs: login, register, list books, create a book (multipart, with an
//! optional cover attachment), and delete a book. Responses are parsed into
//! explicit typed schemas; anything malformed is reported as a network
//! failure rather than handed to the caller half-decoded.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::{Deserialize, Serialize};

use shelf_kernel::settings::ApiSettings;
use shelf_kernel::{Book, BookDraft, CoverUpload, Session};

pub mod error;

pub use error::ApiError;
use error::{DELETE_FAILED_MESSAGE, GENERIC_ADD_MESSAGE, GENERIC_AUTH_MESSAGE};

/// Error payload shape used by the remote API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Credentials for `auth/login`.
#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Payload for `auth/register`.
#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

/// Client for the remote library API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct LibraryApi {
    http: reqwest::Client,
    base_url: String,
}

impl LibraryApi {
    /// Build a client from API settings.
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .build()?;
        Ok(Self {
            http,
            base_url: normalize_base_url(&settings.base_url),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange credentials for a session. Server rejections surface as
    /// [`ApiError::Auth`] carrying the server's message when present.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        self.auth_request("auth/login", &LoginRequest { email, password })
            .await
    }

    /// Create an account and receive a session for it.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Session, ApiError> {
        self.auth_request(
            "auth/register",
            &RegisterRequest {
                name,
                email,
                password,
            },
        )
        .await
    }

    async fn auth_request<B>(&self, path: &str, body: &B) -> Result<Session, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        if !response.status().is_success() {
            let message = extract_message(response)
                .await
                .unwrap_or_else(|| GENERIC_AUTH_MESSAGE.to_string());
            return Err(ApiError::auth(message));
        }
        decode(response).await
    }

    /// Fetch the full collection for the authenticated user. A 401 surfaces
    /// as [`ApiError::Auth`] so the caller can tear the session down.
    pub async fn list_books(&self, token: &str) -> Result<Vec<Book>, ApiError> {
        let response = self
            .http
            .get(self.url("books"))
            .bearer_auth(token)
            .send()
            .await?;
        match response.status() {
            status if status.is_success() => decode(response).await,
            StatusCode::UNAUTHORIZED => Err(auth_error(response).await),
            status => {
                tracing::error!(status = %status, "could not fetch books");
                Err(ApiError::network(format!(
                    "Could not fetch books ({status})"
                )))
            }
        }
    }

    /// Create a book via multipart upload, with an optional `cover` file
    /// part. Required-field rejections surface as [`ApiError::Validation`].
    pub async fn add_book(
        &self,
        token: &str,
        draft: &BookDraft,
        cover: Option<CoverUpload>,
    ) -> Result<Book, ApiError> {
        let mut form = Form::new()
            .text("title", draft.title.clone())
            .text("author", draft.author.clone())
            .text("genre", draft.genre.clone())
            .text("status", draft.status.label());
        if let Some(cover) = cover {
            form = form.part("cover", Part::bytes(cover.bytes).file_name(cover.file_name));
        }

        let response = self
            .http
            .post(self.url("books"))
            .bearer_auth(token)
            .multipart(form)
            .send()
            .await?;
        match response.status() {
            status if status.is_success() => decode(response).await,
            StatusCode::UNAUTHORIZED => Err(auth_error(response).await),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                let message = extract_message(response)
                    .await
                    .unwrap_or_else(|| GENERIC_ADD_MESSAGE.to_string());
                Err(ApiError::validation(message))
            }
            status => {
                tracing::error!(status = %status, "could not add book");
                Err(ApiError::network(GENERIC_ADD_MESSAGE))
            }
        }
    }

    /// Delete a book by id. Callers keep the local record until this
    /// returns success.
    pub async fn delete_book(&self, token: &str, id: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .delete(self.url(&format!("books/{id}")))
            .bearer_auth(token)
            .send()
            .await?;
        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED => Err(auth_error(response).await),
            status => {
                tracing::error!(status = %status, book_id = id, "could not delete book");
                Err(ApiError::network(DELETE_FAILED_MESSAGE))
            }
        }
    }
}

/// Ensure the configured base URL ends with exactly one slash so joins stay
/// predictable.
fn normalize_base_url(raw: &str) -> String {
    let mut url = raw.trim_end_matches('/').to_string();
    url.push('/');
    url
}

/// Decode a success body into its typed schema; malformed bodies are network
/// failures, never partial values.
async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    match response.json::<T>().await {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::error!(error = %err, "malformed response body from API");
            Err(ApiError::network("Malformed response from server."))
        }
    }
}

/// Build the auth error for a 401, preferring the server's own message.
async fn auth_error(response: Response) -> ApiError {
    let message = extract_message(response)
        .await
        .unwrap_or_else(|| GENERIC_AUTH_MESSAGE.to_string());
    ApiError::auth(message)
}

/// Pull the API's `{ "message": ... }` payload out of a failure response.
async fn extract_message(response: Response) -> Option<String> {
    response.json::<ErrorBody>().await.ok()?.message
}
