//! Local form state and validation for the auth and add-book forms.
//!
//! Validation happens here, before any request is issued; server-side
//! rejections still surface through the client's validation errors.

use shelf_kernel::{BookDraft, BookStatus, CoverUpload};

/// Which auth form is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

/// Auth form state; the name field is only used when registering.
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub name: String,
    pub email: String,
    pub password: String,
}

impl AuthForm {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            mode: AuthMode::Login,
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn register(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            mode: AuthMode::Register,
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }

    /// Check required fields for the active mode.
    pub fn validate(&self) -> Result<(), String> {
        if self.mode == AuthMode::Register && self.name.trim().is_empty() {
            return Err("Name is required.".to_string());
        }
        if self.email.trim().is_empty() || self.password.trim().is_empty() {
            return Err("Email and password are required.".to_string());
        }
        Ok(())
    }
}

/// Add-book form state; status defaults to "To Read" like the original form.
#[derive(Debug, Clone)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub status: BookStatus,
    pub cover: Option<CoverUpload>,
}

impl Default for BookForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            genre: String::new(),
            status: BookStatus::ToRead,
            cover: None,
        }
    }
}

impl BookForm {
    /// Produce the submission payload. Title and author are required.
    pub fn into_draft(self) -> Result<(BookDraft, Option<CoverUpload>), String> {
        if self.title.trim().is_empty() || self.author.trim().is_empty() {
            return Err("Title and Author are required.".to_string());
        }
        Ok((
            BookDraft {
                title: self.title,
                author: self.author,
                genre: self.genre,
                status: self.status,
            },
            self.cover,
        ))
    }
}
