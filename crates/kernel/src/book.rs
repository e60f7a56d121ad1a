use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reading status tracked for every book on the shelf.
///
/// Serialized with the spaced labels the remote API uses ("To Read", not
/// `ToRead`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookStatus {
    #[serde(rename = "To Read")]
    ToRead,
    Reading,
    Read,
}

impl BookStatus {
    /// Wire/display label for the status.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ToRead => "To Read",
            Self::Reading => "Reading",
            Self::Read => "Read",
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when user input names no known reading status.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown status '{0}'; expected To Read, Reading, or Read")]
pub struct ParseStatusError(String);

impl std::str::FromStr for BookStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "to read" | "to-read" | "toread" => Ok(Self::ToRead),
            "reading" => Ok(Self::Reading),
            "read" => Ok(Self::Read),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// A book record as returned by the remote service.
///
/// Wire names follow the service's JSON: the identifier arrives as `_id` and
/// the cover path as `coverImageUrl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Server-assigned identifier; the stable key for rendering and deletion.
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub genre: String,
    pub status: BookStatus,
    /// Server-side cover path, present when a cover was uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image_url: Option<String>,
}

/// Client-side payload for creating a new book. The server assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub status: BookStatus,
}

/// Cover file selected in the add-book form, carried as opaque bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_labels() {
        let json = serde_json::to_string(&BookStatus::ToRead).unwrap();
        assert_eq!(json, "\"To Read\"");
        let status: BookStatus = serde_json::from_str("\"Reading\"").unwrap();
        assert_eq!(status, BookStatus::Reading);
    }

    #[test]
    fn status_parses_user_input_case_insensitively() {
        assert_eq!("to read".parse::<BookStatus>().unwrap(), BookStatus::ToRead);
        assert_eq!("READ".parse::<BookStatus>().unwrap(), BookStatus::Read);
        assert!("shelved".parse::<BookStatus>().is_err());
    }

    #[test]
    fn book_deserializes_service_json() {
        let raw = r#"{
            "_id": "64ab",
            "title": "Dune",
            "author": "Frank Herbert",
            "genre": "Sci-Fi",
            "status": "Read",
            "coverImageUrl": "/uploads/dune.jpg"
        }"#;
        let book: Book = serde_json::from_str(raw).unwrap();
        assert_eq!(book.id, "64ab");
        assert_eq!(book.status, BookStatus::Read);
        assert_eq!(book.cover_image_url.as_deref(), Some("/uploads/dune.jpg"));
    }

    #[test]
    fn book_tolerates_missing_optional_fields() {
        let raw = r#"{"_id":"1","title":"T","author":"A","status":"To Read"}"#;
        let book: Book = serde_json::from_str(raw).unwrap();
        assert_eq!(book.genre, "");
        assert!(book.cover_image_url.is_none());
    }
}
