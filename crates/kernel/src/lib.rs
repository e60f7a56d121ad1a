//! Core building blocks for the Shelf client: layered settings, domain
//! types, session persistence, and the in-memory library state.

pub mod book;
pub mod library;
pub mod session;
pub mod settings;

pub use book::{Book, BookDraft, BookStatus, CoverUpload};
pub use library::{FilterCriteria, LibraryState, ReadingStats, StatusFilter};
pub use session::{Session, SessionStore, SessionStoreError};
