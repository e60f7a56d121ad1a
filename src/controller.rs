//! View controller: the single owner of session and library state.
//!
//! User actions arrive as [`Intent`] values and leave as [`Feedback`];
//! every remote failure is converted to a user-visible message at this
//! boundary and nothing propagates to the rendering layer.

use shelf_client::{ApiError, LibraryApi};
use shelf_kernel::settings::Settings;
use shelf_kernel::{
    Book, BookDraft, CoverUpload, FilterCriteria, LibraryState, Session, SessionStore, StatusFilter,
};

/// Pages reachable once authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Library,
    Profile,
}

/// Top-level view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Unauthenticated,
    Authenticated { page: Page },
}

/// User actions dispatched to the controller.
#[derive(Debug, Clone)]
pub enum Intent {
    Login { email: String, password: String },
    Register { name: String, email: String, password: String },
    Logout,
    Navigate(Page),
    SetStatusFilter(StatusFilter),
    SetQuery(String),
    AddBook { draft: BookDraft, cover: Option<CoverUpload> },
    /// Issued only after the user explicitly confirmed the deletion.
    DeleteBook { id: String },
    Refresh,
}

/// Outcome of one intent, for the rendering layer to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Silent,
    Info(String),
    Error(String),
}

const SIGN_IN_FIRST: &str = "Sign in first.";

/// Application state machine.
///
/// Long-lived; there is no terminal state. The session file is read once at
/// [`App::bootstrap`] and written or cleared only on login/logout.
pub struct App {
    api: LibraryApi,
    store: SessionStore,
    session: Option<Session>,
    library: LibraryState,
    filter: FilterCriteria,
    view: ViewState,
}

impl App {
    /// Build the controller. No I/O happens until [`App::bootstrap`].
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let api = LibraryApi::new(&settings.api)?;
        let store = SessionStore::new(settings.storage.session_file.clone());
        Ok(Self {
            api,
            store,
            session: None,
            library: LibraryState::new(),
            filter: FilterCriteria::default(),
            view: ViewState::Unauthenticated,
        })
    }

    /// Startup transition: restore any stored session and fetch the library.
    pub async fn bootstrap(&mut self) -> Feedback {
        match self.store.load() {
            Some(session) => {
                tracing::info!(user = %session.name, "restored stored session");
                self.enter_session(session, false).await
            }
            None => {
                self.view = ViewState::Unauthenticated;
                Feedback::Silent
            }
        }
    }

    /// Apply one user intent.
    pub async fn dispatch(&mut self, intent: Intent) -> Feedback {
        match intent {
            Intent::Login { email, password } => match self.api.login(&email, &password).await {
                Ok(session) => {
                    let name = session.name.clone();
                    match self.enter_session(session, true).await {
                        Feedback::Silent => Feedback::Info(format!("Welcome back, {name}!")),
                        other => other,
                    }
                }
                Err(err) => Feedback::Error(err.user_message().to_string()),
            },
            Intent::Register {
                name,
                email,
                password,
            } => match self.api.register(&name, &email, &password).await {
                Ok(session) => {
                    let name = session.name.clone();
                    match self.enter_session(session, true).await {
                        Feedback::Silent => Feedback::Info(format!("Account created for {name}.")),
                        other => other,
                    }
                }
                Err(err) => Feedback::Error(err.user_message().to_string()),
            },
            Intent::Logout => {
                self.force_logout();
                Feedback::Info("Logged out.".to_string())
            }
            Intent::Navigate(page) => match self.view {
                ViewState::Authenticated { .. } => {
                    self.view = ViewState::Authenticated { page };
                    Feedback::Silent
                }
                ViewState::Unauthenticated => Feedback::Error(SIGN_IN_FIRST.to_string()),
            },
            Intent::SetStatusFilter(status) => {
                self.filter.status = status;
                Feedback::Silent
            }
            Intent::SetQuery(query) => {
                self.filter.query = query;
                Feedback::Silent
            }
            Intent::AddBook { draft, cover } => self.add_book(draft, cover).await,
            Intent::DeleteBook { id } => self.delete_book(&id).await,
            Intent::Refresh => self.fetch_books().await,
        }
    }

    async fn add_book(&mut self, draft: BookDraft, cover: Option<CoverUpload>) -> Feedback {
        let Some(token) = self.token() else {
            return Feedback::Error(SIGN_IN_FIRST.to_string());
        };
        match self.api.add_book(&token, &draft, cover).await {
            Ok(book) => {
                tracing::info!(book_id = %book.id, title = %book.title, "book added");
                let title = book.title.clone();
                self.library.insert_front(book);
                Feedback::Info(format!("Added \"{title}\"."))
            }
            Err(err) => self.fail(err),
        }
    }

    async fn delete_book(&mut self, id: &str) -> Feedback {
        let Some(token) = self.token() else {
            return Feedback::Error(SIGN_IN_FIRST.to_string());
        };
        match self.api.delete_book(&token, id).await {
            Ok(()) => {
                // The local record goes away only after the server confirmed.
                self.library.remove(id);
                tracing::info!(book_id = %id, "book deleted");
                Feedback::Info("Book deleted.".to_string())
            }
            Err(err) => {
                tracing::error!(error = %err, book_id = %id, "could not delete book");
                self.fail(err)
            }
        }
    }

    /// Reload the collection from the server. A 401 tears the session down.
    async fn fetch_books(&mut self) -> Feedback {
        let Some(token) = self.token() else {
            return Feedback::Error(SIGN_IN_FIRST.to_string());
        };
        match self.api.list_books(&token).await {
            Ok(books) => {
                tracing::info!(count = books.len(), "library fetched");
                self.library.replace(books);
                Feedback::Silent
            }
            Err(err) => {
                tracing::error!(error = %err, "could not fetch books");
                self.fail(err)
            }
        }
    }

    /// Convert a remote failure into feedback, forcing logout when the
    /// server no longer accepts our token.
    fn fail(&mut self, err: ApiError) -> Feedback {
        if err.is_auth() && self.session.is_some() {
            self.force_logout();
        }
        Feedback::Error(err.user_message().to_string())
    }

    async fn enter_session(&mut self, session: Session, persist: bool) -> Feedback {
        if persist {
            if let Err(err) = self.store.save(&session) {
                tracing::warn!(error = %err, "could not persist session");
            }
        }
        self.session = Some(session);
        self.view = ViewState::Authenticated {
            page: Page::Library,
        };
        self.fetch_books().await
    }

    /// Explicit logout; also invoked when the server reports a 401.
    fn force_logout(&mut self) {
        if let Err(err) = self.store.clear() {
            tracing::warn!(error = %err, "could not clear session file");
        }
        self.session = None;
        self.library.clear();
        self.filter = FilterCriteria::default();
        self.view = ViewState::Unauthenticated;
    }

    fn token(&self) -> Option<String> {
        self.session.as_ref().map(|session| session.token.clone())
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn library(&self) -> &LibraryState {
        &self.library
    }

    pub fn filter(&self) -> &FilterCriteria {
        &self.filter
    }

    /// Books passing the current filter, in collection order.
    pub fn visible_books(&self) -> Vec<&Book> {
        self.library.filtered(&self.filter).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_kernel::BookStatus;

    fn offline_app() -> App {
        // Points at a default base URL; these tests never touch the network.
        let mut settings = Settings::default();
        settings.storage.session_file = std::env::temp_dir()
            .join("shelf-controller-tests")
            .join("session.json");
        App::new(&settings).unwrap()
    }

    #[tokio::test]
    async fn navigate_requires_a_session() {
        let mut app = offline_app();
        let feedback = app.dispatch(Intent::Navigate(Page::Profile)).await;
        assert_eq!(feedback, Feedback::Error(SIGN_IN_FIRST.to_string()));
        assert_eq!(app.view(), ViewState::Unauthenticated);
    }

    #[tokio::test]
    async fn filter_intents_update_criteria_without_io() {
        let mut app = offline_app();
        app.dispatch(Intent::SetQuery("dune".to_string())).await;
        app.dispatch(Intent::SetStatusFilter(StatusFilter::Only(BookStatus::Read)))
            .await;
        assert_eq!(app.filter().query, "dune");
        assert_eq!(app.filter().status, StatusFilter::Only(BookStatus::Read));
    }

    #[tokio::test]
    async fn add_and_delete_require_a_session() {
        let mut app = offline_app();
        let draft = BookDraft {
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            genre: String::new(),
            status: BookStatus::ToRead,
        };
        let feedback = app
            .dispatch(Intent::AddBook { draft, cover: None })
            .await;
        assert_eq!(feedback, Feedback::Error(SIGN_IN_FIRST.to_string()));

        let feedback = app
            .dispatch(Intent::DeleteBook {
                id: "64ab".to_string(),
            })
            .await;
        assert_eq!(feedback, Feedback::Error(SIGN_IN_FIRST.to_string()));
    }
}
