//! Profile dashboard view model.

use shelf_kernel::{ReadingStats, Session};

/// Initials shown in the avatar slot: first and last word initials,
/// uppercased. A single-word name uses its first letter; an empty name
/// falls back to "U".
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    match words.as_slice() {
        [] => "U".to_string(),
        [only] => initial(only),
        [first, .., last] => format!("{}{}", initial(first), initial(last)),
    }
}

fn initial(word: &str) -> String {
    word.chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default()
}

/// Render the dashboard: identity plus the three stat tiles, all derived
/// from one pass over the current library state.
pub fn render(session: &Session, stats: &ReadingStats) -> String {
    format!(
        "Profile Dashboard\n\n\
         ({initials}) {name} <{email}>\n\n\
         Your Library at a Glance\n\
         \x20 Books Read:        {read}\n\
         \x20 Currently Reading: {reading}\n\
         \x20 Want to Read:      {to_read}\n",
        initials = initials(&session.name),
        name = session.name,
        email = session.email,
        read = stats.read,
        reading = stats.reading,
        to_read = stats.to_read,
    )
}
