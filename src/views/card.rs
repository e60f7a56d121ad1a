//! Book card rendering: badge styles, cover resolution, list rows.

use shelf_kernel::{Book, BookStatus};

/// Fixed badge style per reading status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    Green,
    Blue,
    Yellow,
}

/// `Read → green, Reading → blue, To Read → yellow`.
pub fn badge(status: BookStatus) -> BadgeStyle {
    match status {
        BookStatus::Read => BadgeStyle::Green,
        BookStatus::Reading => BadgeStyle::Blue,
        BookStatus::ToRead => BadgeStyle::Yellow,
    }
}

/// Fixed fallback shown when a cover image cannot be displayed at all.
pub const FALLBACK_COVER_URL: &str = "https://placehold.co/300x450/E2E8F0/4A5568?text=No+Image";

/// Placeholder cover generated from the title when no cover was uploaded.
pub fn placeholder_cover_url(title: &str) -> String {
    format!(
        "https://placehold.co/300x450/E2E8F0/4A5568?text={}",
        title.split_whitespace().collect::<Vec<_>>().join("+")
    )
}

/// Origin of the API host, for resolving server-relative cover paths.
/// `http://localhost:5000/api/` → `http://localhost:5000`.
pub fn api_origin(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    trimmed.strip_suffix("/api").unwrap_or(trimmed).to_string()
}

/// Resolve the cover URL for a book against the API origin.
///
/// Stored paths may carry Windows separators; they are normalized before the
/// join. Books without a cover get the title-text placeholder. Never fails.
pub fn cover_url(book: &Book, api_origin: &str) -> String {
    match &book.cover_image_url {
        Some(path) => format!("{}{}", api_origin, path.replace('\\', "/")),
        None => placeholder_cover_url(&book.title),
    }
}

/// One collection row for the shell's listing, 1-indexed like the screen.
pub fn render_row(index: usize, book: &Book) -> String {
    format!(
        "{:<4} {:<32} {:<24} {:<8} {}",
        index,
        truncate(&book.title, 32),
        truncate(&book.author, 24),
        book.status.label(),
        book.genre
    )
}

/// Header matching [`render_row`]'s columns.
pub fn render_header() -> String {
    format!(
        "{:<4} {:<32} {:<24} {:<8} {}",
        "#", "TITLE", "AUTHOR", "STATUS", "GENRE"
    )
}

/// Detail card for a single book, including the resolved cover URL.
pub fn render_card(book: &Book, api_origin: &str) -> String {
    format!(
        "{}\n  by {}\n  status: {} ({:?} badge)\n  genre: {}\n  cover: {}",
        book.title,
        book.author,
        book.status.label(),
        badge(book.status),
        book.genre,
        cover_url(book, api_origin)
    )
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}
