//! Organizer screen: shared-secret gate, then the link panel

use super::{Action, ScreenKind, hint_line, input_cursor, input_widget};
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::*};
use registro_client::gate::{AccessGate, CODE_LEN, Clipboard, LinkPanel};
use shared::error::AppError;
use std::collections::BTreeMap;
use std::time::Duration;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

enum Alert {
    Success(String),
    Error(String),
}

pub struct LinksView {
    gate: AccessGate,
    panel: LinkPanel,
    secret: Input,
    /// New-project input, open while `Some`
    code: Option<Input>,
    selected: usize,
    alert: Option<Alert>,
}

fn mm_ss(d: Duration) -> String {
    let secs = d.as_secs() + u64::from(d.subsec_nanos() > 0);
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

impl LinksView {
    pub fn new(secret: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            gate: AccessGate::new(secret),
            panel: LinkPanel::new(origin),
            secret: Input::default(),
            code: None,
            selected: 0,
            alert: None,
        }
    }

    pub fn on_tags(&mut self, counts: Result<BTreeMap<Option<String>, u64>, String>) {
        match counts {
            Ok(counts) => {
                self.panel.load(&counts);
                self.selected = self.selected.min(self.panel.rows().len().saturating_sub(1));
            }
            Err(message) => {
                tracing::warn!(error = %message, "Could not load project tags");
                self.alert = Some(Alert::Error(AppError::database(message).message));
            }
        }
    }

    pub fn tick(&mut self) {
        if let Some(expired) = self.gate.poll() {
            self.code = None;
            self.alert = Some(Alert::Error(expired.message));
        }
    }

    fn fail(&mut self, e: AppError) {
        self.alert = Some(Alert::Error(e.message));
    }

    // ========== Keys ==========

    pub fn handle_key(&mut self, key: KeyEvent, clipboard: &mut dyn Clipboard) -> Action {
        // the session may have run out since the last tick
        self.tick();
        if self.gate.require().is_err() {
            return self.secret_key(key);
        }
        if self.code.is_some() {
            self.code_key(key, clipboard);
            return Action::None;
        }
        self.panel_key(key, clipboard)
    }

    fn secret_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Esc => return Action::Open(ScreenKind::Table),
            KeyCode::Enter => {
                let typed = self.secret.value().to_string();
                self.secret = Input::default();
                match self.gate.submit(&typed) {
                    Ok(()) => {
                        self.alert = None;
                        return Action::LoadTags;
                    }
                    Err(e) => self.fail(e),
                }
            }
            _ => {
                self.secret.handle_event(&Event::Key(key));
            }
        }
        Action::None
    }

    fn code_key(&mut self, key: KeyEvent, clipboard: &mut dyn Clipboard) {
        let Some(input) = self.code.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.code = None,
            KeyCode::Enter => match self.panel.generate(clipboard) {
                Ok(row) => {
                    self.code = None;
                    self.selected = self.panel.rows().len().saturating_sub(1);
                    self.alert = Some(Alert::Success(format!(
                        "Enlace para {} generado y copiado: {}",
                        row.tag, row.url
                    )));
                }
                Err(e) => self.fail(e),
            },
            _ => {
                input.handle_event(&Event::Key(key));
                self.panel.type_code(input.value());
                // keep the box in step with what the panel accepted
                if input.value() != self.panel.code_input() {
                    *input = Input::new(self.panel.code_input().to_string());
                }
            }
        }
    }

    fn panel_key(&mut self, key: KeyEvent, clipboard: &mut dyn Clipboard) -> Action {
        let len = self.panel.rows().len();
        match key.code {
            KeyCode::Char('q') => return Action::Quit,
            KeyCode::Esc => return Action::Open(ScreenKind::Table),
            KeyCode::Down | KeyCode::Char('j') if len > 0 => {
                self.selected = (self.selected + 1).min(len - 1);
            }
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Enter | KeyCode::Char('c') => match self.panel.copy(self.selected, clipboard) {
                Ok(url) => self.alert = Some(Alert::Success(format!("Enlace copiado: {url}"))),
                Err(e) => self.fail(e),
            },
            KeyCode::Char('n') => {
                self.panel.type_code("");
                self.code = Some(Input::default());
            }
            KeyCode::Char('e') => match self.gate.extend() {
                Ok(()) => self.alert = Some(Alert::Success("Sesión extendida".into())),
                Err(e) => self.fail(e),
            },
            KeyCode::Char('r') => return Action::LoadTags,
            KeyCode::Char('o') => {
                self.gate.logout();
                self.alert = None;
                tracing::info!("Organizer logged out");
            }
            _ => {}
        }
        Action::None
    }

    // ========== Rendering ==========

    pub fn render(&self, f: &mut Frame) {
        if self.gate.is_authenticated() {
            self.render_panel(f);
        } else {
            self.render_gate(f);
        }
    }

    fn render_alert(&self, f: &mut Frame, area: Rect) {
        if let Some(alert) = &self.alert {
            let (text, color) = match alert {
                Alert::Success(t) => (t.as_str(), Color::Green),
                Alert::Error(t) => (t.as_str(), Color::Red),
            };
            f.render_widget(
                Paragraph::new(text)
                    .style(Style::default().fg(color))
                    .wrap(Wrap { trim: true }),
                area,
            );
        }
    }

    fn render_gate(&self, f: &mut Frame) {
        let area = super::table::centered(f.area(), 56, 10);
        f.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Acceso organizador ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .split(inner);

        if let Some(left) = self.gate.lock_remaining() {
            f.render_widget(
                Paragraph::new(format!("Acceso bloqueado. Intenta de nuevo en {}", mm_ss(left)))
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true }),
                chunks[0],
            );
        } else {
            let masked = Input::new("•".repeat(self.secret.value().chars().count()));
            f.render_widget(input_widget(&masked, " Clave ", true, chunks[0]), chunks[0]);
            f.set_cursor_position(input_cursor(chunks[0], &masked));
        }
        self.render_alert(f, chunks[1]);
        f.render_widget(hint_line("[Enter] entrar  [Esc] volver"), chunks[2]);
    }

    fn render_panel(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(3),
                Constraint::Length(2),
                Constraint::Length(1),
            ])
            .split(f.area());

        let stats = self.panel.stats();
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    "Enlaces de registro",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!(
                    "   {} enlaces · {} empleados · {} históricos",
                    stats.links, stats.employees, stats.historical
                )),
            ])),
            chunks[0],
        );

        let left = self.gate.session_remaining().unwrap_or_default();
        let session = if self.gate.session_warning() {
            Span::styled(
                format!("La sesión expira en {}. [e] extender", mm_ss(left)),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!("Sesión: {}", mm_ss(left)), Style::default().fg(Color::Gray))
        };
        f.render_widget(Paragraph::new(Line::from(session)), chunks[1]);

        let rows: Vec<Row> = self
            .panel
            .rows()
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let url = if r.is_historical() { "-" } else { r.url.as_str() };
                let mut style = Style::default();
                if r.is_historical() {
                    style = style.fg(Color::DarkGray);
                }
                if i == self.selected {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                Row::new(vec![r.label().to_string(), r.count.to_string(), url.to_string()]).style(style)
            })
            .collect();
        f.render_widget(
            Table::new(
                rows,
                [Constraint::Length(12), Constraint::Length(10), Constraint::Min(20)],
            )
            .header(
                Row::new(vec!["PROYECTO", "EMPLEADOS", "ENLACE"])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .block(Block::default().borders(Borders::ALL)),
            chunks[2],
        );

        if let Some(code) = &self.code {
            let title = format!(" Nuevo proyecto: NV + {CODE_LEN} dígitos ");
            f.render_widget(input_widget(code, &title, true, chunks[3]), chunks[3]);
            f.set_cursor_position(input_cursor(chunks[3], code));
        }
        self.render_alert(f, chunks[4]);
        f.render_widget(
            hint_line("[↑↓] elegir  [c] copiar  [n] nuevo  [e] extender  [r] recargar  [o] salir de sesión  [Esc] volver"),
            chunks[5],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use registro_client::gate::{MAX_ATTEMPTS, MemoryClipboard, SESSION_TTL};

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_line(view: &mut LinksView, text: &str, clipboard: &mut MemoryClipboard) -> Action {
        for c in text.chars() {
            view.handle_key(press(KeyCode::Char(c)), clipboard);
        }
        view.handle_key(press(KeyCode::Enter), clipboard)
    }

    fn logged_in(clipboard: &mut MemoryClipboard) -> LinksView {
        let mut view = LinksView::new("clave", "https://registro.example");
        assert!(matches!(type_line(&mut view, "clave", clipboard), Action::LoadTags));
        view.on_tags(Ok(BTreeMap::from([
            (Some("NV499".to_string()), 3),
            (None, 2),
        ])));
        view
    }

    #[tokio::test]
    async fn test_wrong_secret_locks_gate() {
        let mut clipboard = MemoryClipboard::new();
        let mut view = LinksView::new("clave", "https://registro.example");
        for _ in 0..MAX_ATTEMPTS {
            assert!(matches!(type_line(&mut view, "nope", &mut clipboard), Action::None));
        }
        assert!(view.gate.is_locked());
        type_line(&mut view, "clave", &mut clipboard);
        assert!(!view.gate.is_authenticated());
    }

    #[tokio::test]
    async fn test_copy_and_generate() {
        let mut clipboard = MemoryClipboard::new();
        let mut view = logged_in(&mut clipboard);
        view.handle_key(press(KeyCode::Char('c')), &mut clipboard);
        assert_eq!(
            clipboard.contents(),
            Some("https://registro.example/formulario?nv=NV499")
        );

        view.handle_key(press(KeyCode::Char('n')), &mut clipboard);
        type_line(&mut view, "7a3-05", &mut clipboard);
        assert_eq!(
            clipboard.contents(),
            Some("https://registro.example/formulario?nv=NV730")
        );
        assert!(view.code.is_none());
        assert_eq!(view.panel.stats().links, 3);
    }

    #[tokio::test]
    async fn test_historical_row_has_no_link() {
        let mut clipboard = MemoryClipboard::new();
        let mut view = logged_in(&mut clipboard);
        view.handle_key(press(KeyCode::Down), &mut clipboard);
        view.handle_key(press(KeyCode::Char('c')), &mut clipboard);
        assert!(matches!(view.alert, Some(Alert::Error(_))));
        assert_eq!(clipboard.contents(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_expiry_returns_to_gate() {
        let mut clipboard = MemoryClipboard::new();
        let mut view = logged_in(&mut clipboard);
        tokio::time::advance(SESSION_TTL).await;
        view.tick();
        assert!(!view.gate.is_authenticated());
        assert!(matches!(view.alert, Some(Alert::Error(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_session_blocks_panel_keys() {
        let mut clipboard = MemoryClipboard::new();
        let mut view = logged_in(&mut clipboard);
        view.handle_key(press(KeyCode::Char('n')), &mut clipboard);
        tokio::time::advance(SESSION_TTL).await;

        // no tick in between: the key itself finds the session gone
        view.handle_key(press(KeyCode::Char('c')), &mut clipboard);
        assert_eq!(clipboard.contents(), None);
        assert!(view.code.is_none());
        assert_eq!(view.secret.value(), "c");
        assert!(matches!(view.alert, Some(Alert::Error(_))));
    }

    #[test]
    fn test_mm_ss() {
        assert_eq!(mm_ss(Duration::from_secs(299)), "04:59");
        assert_eq!(mm_ss(Duration::from_millis(1500)), "00:02");
    }
}
