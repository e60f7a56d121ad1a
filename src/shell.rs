//! Interactive terminal shell.
//!
//! Line-oriented rendering surface for the controller: parses commands,
//! prompts for form fields, dispatches intents, prints the rendered views.
//! Holds no business state of its own. Because every dispatch is awaited to
//! completion before the next prompt, duplicate in-flight submissions of the
//! same action cannot happen.

use std::io::Write as _;
use std::path::Path;

use anyhow::Context as _;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use shelf_kernel::{BookStatus, CoverUpload, StatusFilter};

use crate::controller::{App, Feedback, Intent, Page, ViewState};
use crate::views::{card, forms, profile};

const HELP: &str = "\
Commands:
  login                 sign in to your library
  register              create an account
  logout                sign out
  library               show the bookshelf
  profile               show the profile dashboard
  search <text>         filter by title or author (empty clears)
  status <filter>       all | to read | reading | read
  add                   add a book (prompts for fields)
  show <n>              show one book card, cover URL included
  delete <n>            delete book n from the current listing
  refresh               reload the library from the server
  help                  this text
  quit                  exit";

pub struct Shell {
    app: App,
    api_origin: String,
    lines: Lines<BufReader<Stdin>>,
}

impl Shell {
    pub fn new(app: App, base_url: &str) -> Self {
        Self {
            app,
            api_origin: card::api_origin(base_url),
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Run the UI loop until the user quits or stdin closes.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let feedback = self.app.bootstrap().await;
        self.print_feedback(&feedback);
        self.render();

        loop {
            let Some(line) = self.prompt("\n> ").await? else {
                break;
            };
            let input = line.trim().to_string();
            if input.is_empty() {
                continue;
            }
            if !self.handle(&input).await? {
                break;
            }
        }
        Ok(())
    }

    /// Apply one command line. Returns false when the user quits.
    async fn handle(&mut self, input: &str) -> anyhow::Result<bool> {
        let (command, rest) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command.to_lowercase().as_str() {
            "quit" | "exit" => return Ok(false),
            "help" => println!("{HELP}"),
            "login" => self.login().await?,
            "register" => self.register().await?,
            "logout" => {
                let feedback = self.app.dispatch(Intent::Logout).await;
                self.print_feedback(&feedback);
                self.render();
            }
            "library" => self.navigate(Page::Library).await,
            "profile" => self.navigate(Page::Profile).await,
            "search" => {
                self.app.dispatch(Intent::SetQuery(rest.to_string())).await;
                self.render();
            }
            "status" => match parse_status_filter(rest) {
                Ok(status) => {
                    self.app.dispatch(Intent::SetStatusFilter(status)).await;
                    self.render();
                }
                Err(message) => println!("! {message}"),
            },
            "add" => self.add_book().await?,
            "show" => self.show_book(rest),
            "delete" => self.delete_book(rest).await?,
            "refresh" => {
                let feedback = self.app.dispatch(Intent::Refresh).await;
                self.print_feedback(&feedback);
                self.render();
            }
            _ => println!("Unknown command '{command}'; try 'help'."),
        }
        Ok(true)
    }

    async fn navigate(&mut self, page: Page) {
        let feedback = self.app.dispatch(Intent::Navigate(page)).await;
        self.print_feedback(&feedback);
        self.render();
    }

    async fn login(&mut self) -> anyhow::Result<()> {
        let Some(email) = self.prompt("Email: ").await? else {
            return Ok(());
        };
        let Some(password) = self.prompt("Password: ").await? else {
            return Ok(());
        };
        let form = forms::AuthForm::login(email.trim(), password.trim());
        if let Err(message) = form.validate() {
            println!("! {message}");
            return Ok(());
        }
        let feedback = self
            .app
            .dispatch(Intent::Login {
                email: form.email,
                password: form.password,
            })
            .await;
        self.print_feedback(&feedback);
        self.render();
        Ok(())
    }

    async fn register(&mut self) -> anyhow::Result<()> {
        let Some(name) = self.prompt("Name: ").await? else {
            return Ok(());
        };
        let Some(email) = self.prompt("Email: ").await? else {
            return Ok(());
        };
        let Some(password) = self.prompt("Password: ").await? else {
            return Ok(());
        };
        let form = forms::AuthForm::register(name.trim(), email.trim(), password.trim());
        if let Err(message) = form.validate() {
            println!("! {message}");
            return Ok(());
        }
        let feedback = self
            .app
            .dispatch(Intent::Register {
                name: form.name,
                email: form.email,
                password: form.password,
            })
            .await;
        self.print_feedback(&feedback);
        self.render();
        Ok(())
    }

    async fn add_book(&mut self) -> anyhow::Result<()> {
        let Some(title) = self.prompt("Title: ").await? else {
            return Ok(());
        };
        let Some(author) = self.prompt("Author: ").await? else {
            return Ok(());
        };
        let Some(genre) = self.prompt("Genre (optional): ").await? else {
            return Ok(());
        };
        let Some(status) = self.prompt("Status [To Read]: ").await? else {
            return Ok(());
        };
        let Some(cover_path) = self.prompt("Cover file (optional): ").await? else {
            return Ok(());
        };

        let status = if status.trim().is_empty() {
            BookStatus::ToRead
        } else {
            match status.parse::<BookStatus>() {
                Ok(status) => status,
                Err(err) => {
                    println!("! {err}");
                    return Ok(());
                }
            }
        };

        let cover = if cover_path.trim().is_empty() {
            None
        } else {
            match read_cover(cover_path.trim()) {
                Ok(cover) => Some(cover),
                Err(message) => {
                    println!("! {message}");
                    return Ok(());
                }
            }
        };

        let form = forms::BookForm {
            title: title.trim().to_string(),
            author: author.trim().to_string(),
            genre: genre.trim().to_string(),
            status,
            cover,
        };
        match form.into_draft() {
            Ok((draft, cover)) => {
                let feedback = self.app.dispatch(Intent::AddBook { draft, cover }).await;
                self.print_feedback(&feedback);
                self.render();
            }
            Err(message) => println!("! {message}"),
        }
        Ok(())
    }

    fn show_book(&self, rest: &str) {
        match self.lookup(rest) {
            Some((_, book)) => println!("\n{}", card::render_card(book, &self.api_origin)),
            None => println!("! No book at that position."),
        }
    }

    async fn delete_book(&mut self, rest: &str) -> anyhow::Result<()> {
        let Some((id, title)) = self
            .lookup(rest)
            .map(|(id, book)| (id, book.title.clone()))
        else {
            println!("! No book at that position.");
            return Ok(());
        };

        let answer = self
            .prompt(&format!(
                "Are you sure you want to delete \"{title}\"? [y/N] "
            ))
            .await?;
        let confirmed = matches!(
            answer.as_deref().map(str::trim),
            Some("y") | Some("Y") | Some("yes")
        );
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }

        let feedback = self.app.dispatch(Intent::DeleteBook { id }).await;
        self.print_feedback(&feedback);
        self.render();
        Ok(())
    }

    /// Resolve a 1-based listing position against the current filtered view.
    fn lookup(&self, rest: &str) -> Option<(String, &shelf_kernel::Book)> {
        let position: usize = rest.parse().ok()?;
        let book = *self.app.visible_books().get(position.checked_sub(1)?)?;
        Some((book.id.clone(), book))
    }

    fn render(&self) {
        match self.app.view() {
            ViewState::Unauthenticated => {
                println!(
                    "Welcome to Shelf. Sign in with 'login' or create an account with 'register'."
                );
            }
            ViewState::Authenticated {
                page: Page::Library,
            } => self.render_library(),
            ViewState::Authenticated {
                page: Page::Profile,
            } => self.render_profile(),
        }
    }

    fn render_library(&self) {
        let filter = self.app.filter();
        println!("Your Bookshelf");
        println!(
            "status: {} | search: {}",
            filter.status.label(),
            if filter.query.is_empty() {
                "(none)"
            } else {
                &filter.query
            }
        );
        let books = self.app.visible_books();
        if books.is_empty() {
            println!("No books found. Try adjusting your filters or add a new book!");
            return;
        }
        println!("{}", card::render_header());
        for (index, book) in books.iter().enumerate() {
            println!("{}", card::render_row(index + 1, book));
        }
    }

    fn render_profile(&self) {
        if let Some(session) = self.app.session() {
            println!("{}", profile::render(session, &self.app.library().stats()));
        }
    }

    fn print_feedback(&self, feedback: &Feedback) {
        match feedback {
            Feedback::Silent => {}
            Feedback::Info(message) => println!("{message}"),
            Feedback::Error(message) => println!("! {message}"),
        }
    }

    async fn prompt(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        print!("{label}");
        std::io::stdout().flush().ok();
        self.lines
            .next_line()
            .await
            .context("failed to read input")
    }
}

fn parse_status_filter(rest: &str) -> Result<StatusFilter, String> {
    if rest.is_empty() || rest.eq_ignore_ascii_case("all") {
        return Ok(StatusFilter::All);
    }
    rest.parse::<BookStatus>()
        .map(StatusFilter::Only)
        .map_err(|err| err.to_string())
}

fn read_cover(path: &str) -> Result<CoverUpload, String> {
    let bytes =
        std::fs::read(path).map_err(|err| format!("Could not read cover file: {err}"))?;
    let file_name = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "cover".to_string());
    Ok(CoverUpload { file_name, bytes })
}
