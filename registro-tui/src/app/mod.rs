//! Terminal application: screens, background fetches and the event loop

mod form;
mod links;
mod table;

use crate::clipboard::Osc52Clipboard;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{prelude::*, widgets::*};
use registro_client::{DataStore, InsertResult, ListResult, listing};
use shared::models::{EmpleadoInput, ListParams};
use std::collections::BTreeMap;
use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

pub use form::FormView;
pub use links::LinksView;

const TICK: Duration = Duration::from_millis(100);

/// Results coming back from background tasks
pub enum AppEvent {
    Listed(ListParams, ListResult),
    Inserted(InsertResult),
    Tags(Result<BTreeMap<Option<String>, u64>, String>),
}

/// What a screen asks the application to do after a key press
pub enum Action {
    None,
    Quit,
    Fetch(ListParams),
    Insert(EmpleadoInput),
    LoadTags,
    Open(ScreenKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenKind {
    Table,
    Form,
    Links,
}

pub struct App {
    store: Arc<dyn DataStore>,
    tx: mpsc::UnboundedSender<AppEvent>,
    shutdown: CancellationToken,
    screen: ScreenKind,
    table: table::TableView,
    form: Option<FormView>,
    links: LinksView,
    clipboard: Osc52Clipboard,
}

impl App {
    pub fn new(
        store: Arc<dyn DataStore>,
        tx: mpsc::UnboundedSender<AppEvent>,
        screen: ScreenKind,
        form: Option<FormView>,
        links: LinksView,
    ) -> Self {
        Self {
            store,
            tx,
            shutdown: CancellationToken::new(),
            screen,
            table: table::TableView::new(),
            form,
            links,
            clipboard: Osc52Clipboard,
        }
    }

    /// Kick off whatever the first screen needs
    fn start(&mut self) {
        let params = self.table.begin_fetch();
        self.spawn_list(params);
        self.spawn_tags();
    }

    fn spawn_list(&self, params: ListParams) {
        let store = self.store.clone();
        let tx = self.tx.clone();
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {}
                (params, result) = listing::fetch(store.as_ref(), params) => {
                    let _ = tx.send(AppEvent::Listed(params, result));
                }
            }
        });
    }

    fn spawn_insert(&self, input: EmpleadoInput) {
        let store = self.store.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            // not cancellable: an insert in flight is left to finish
            let result = store.insert(&input).await;
            let _ = tx.send(AppEvent::Inserted(result));
        });
    }

    fn spawn_tags(&self) {
        let store = self.store.clone();
        let tx = self.tx.clone();
        let shutdown = self.shutdown.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = shutdown.cancelled() => {}
                counts = store.tag_counts() => {
                    let _ = tx.send(AppEvent::Tags(counts));
                }
            }
        });
    }

    /// Returns false when the application should exit
    fn perform(&mut self, action: Action) -> bool {
        match action {
            Action::None => {}
            Action::Quit => return false,
            Action::Fetch(params) => self.spawn_list(params),
            Action::Insert(input) => self.spawn_insert(input),
            Action::LoadTags => self.spawn_tags(),
            Action::Open(ScreenKind::Form) if self.form.is_none() => {}
            Action::Open(screen) => {
                tracing::debug!(?screen, "Switching screen");
                if self.screen == ScreenKind::Form
                    && screen != ScreenKind::Form
                    && let Some(form) = self.form.as_mut()
                {
                    tracing::debug!(phase = ?form.wizard().phase(), "Discarding registration draft");
                    form.reset();
                }
                self.screen = screen;
                if screen == ScreenKind::Links {
                    self.spawn_tags();
                }
            }
        }
        true
    }

    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Listed(params, result) => self.table.on_listed(&params, result),
            AppEvent::Inserted(result) => {
                if let Some(form) = self.form.as_mut() {
                    form.on_inserted(result);
                }
                self.table.invalidate();
                let params = self.table.begin_fetch();
                self.spawn_list(params);
            }
            AppEvent::Tags(counts) => {
                self.table.on_tags(&counts);
                self.links.on_tags(counts);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        let action = match self.screen {
            ScreenKind::Table => self.table.handle_key(key),
            ScreenKind::Form => match self.form.as_mut() {
                Some(form) => form.handle_key(key),
                None => Action::Open(ScreenKind::Table),
            },
            ScreenKind::Links => self.links.handle_key(key, &mut self.clipboard),
        };
        self.perform(action)
    }

    /// Timers: search debounce, gate lockout and session expiry
    fn tick(&mut self) {
        if let Some(params) = self.table.tick() {
            self.spawn_list(params);
        }
        self.links.tick();
    }

    fn draw(&mut self, f: &mut Frame) {
        match self.screen {
            ScreenKind::Table => self.table.render(f),
            ScreenKind::Form => {
                if let Some(form) = self.form.as_ref() {
                    form.render(f);
                }
            }
            ScreenKind::Links => self.links.render(f),
        }
    }
}

/// Set up the terminal, run the loop, and always restore the terminal
pub async fn run(mut app: App, mut rx: mpsc::UnboundedReceiver<AppEvent>) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.start();
    let res = run_loop(&mut terminal, &mut app, &mut rx).await;
    app.shutdown.cancel();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
            && matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat)
            && !app.handle_key(key)
        {
            tracing::info!("Exiting");
            return Ok(());
        }

        while let Ok(event) = rx.try_recv() {
            app.handle_event(event);
        }
        app.tick();
    }
}

// ========== Shared widgets ==========

/// Red banner with a message and key hints
fn error_banner<'a>(message: &'a str, hints: &'a str) -> Paragraph<'a> {
    Paragraph::new(vec![
        Line::from(Span::styled(
            message,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(hints, Style::default().fg(Color::Gray))),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Error "),
    )
    .wrap(Wrap { trim: true })
}

fn hint_line(text: &str) -> Paragraph<'_> {
    Paragraph::new(text).style(Style::default().fg(Color::DarkGray))
}

/// Cursor position for a `tui_input::Input` rendered inside a bordered block
fn input_cursor(area: Rect, input: &tui_input::Input) -> (u16, u16) {
    let width = area.width.max(3) - 3;
    let scroll = input.visual_scroll(width as usize);
    (
        area.x + ((input.visual_cursor().max(scroll) - scroll) as u16) + 1,
        area.y + 1,
    )
}

/// Bordered single-line text input
fn input_widget<'a>(input: &'a tui_input::Input, title: &'a str, active: bool, area: Rect) -> Paragraph<'a> {
    let width = area.width.max(3) - 3;
    let scroll = input.visual_scroll(width as usize);
    let style = if active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Gray)
    };
    Paragraph::new(input.value())
        .style(style)
        .scroll((0, scroll as u16))
        .block(Block::default().borders(Borders::ALL).title(title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use registro_client::{FormWizard, MemoryStore, ProjectTag};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn form_app() -> App {
        let (tx, _rx) = mpsc::unbounded_channel();
        let form = FormView::new(FormWizard::with_tag(ProjectTag::parse("NV499").unwrap()));
        App::new(
            Arc::new(MemoryStore::new()),
            tx,
            ScreenKind::Form,
            Some(form),
            LinksView::new("secreto", "https://registro.example.cl"),
        )
    }

    fn nombre(app: &App) -> String {
        app.form.as_ref().unwrap().wizard().data().nombre.clone()
    }

    #[test]
    fn test_leaving_the_form_discards_the_draft() {
        let mut app = form_app();
        app.handle_key(press(KeyCode::Enter));
        for c in "ana".chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(nombre(&app), "Ana");

        assert!(app.handle_key(press(KeyCode::Esc)));
        assert_eq!(app.screen, ScreenKind::Table);
        assert!(app.handle_key(press(KeyCode::Char('a'))));
        assert_eq!(app.screen, ScreenKind::Form);
        assert_eq!(nombre(&app), "");
    }

    #[test]
    fn test_form_key_without_entry_stays_on_table() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(
            Arc::new(MemoryStore::new()),
            tx,
            ScreenKind::Table,
            None,
            LinksView::new("secreto", "https://registro.example.cl"),
        );
        assert!(app.handle_key(press(KeyCode::Char('a'))));
        assert_eq!(app.screen, ScreenKind::Table);
    }
}
