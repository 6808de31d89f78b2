//! Seven-step registration form screen

use super::{Action, ScreenKind, error_banner, hint_line, input_cursor, input_widget};
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::*};
use registro_client::InsertResult;
use registro_client::form::{Field, FormWizard, Phase, Step};
use shared::catalog::{PHONE_COUNTRIES, comunas_of, filter_names};
use shared::error::AppError;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

enum Status {
    Info(String),
    Error(String),
}

/// Field being typed into
struct Editor {
    input: Input,
    /// Committed value, restored on Esc
    original: String,
}

pub struct FormView {
    wizard: FormWizard,
    focus: usize,
    editing: Option<Editor>,
    status: Option<Status>,
}

impl FormView {
    pub fn new(wizard: FormWizard) -> Self {
        Self {
            wizard,
            focus: 0,
            editing: None,
            status: None,
        }
    }

    pub fn wizard(&self) -> &FormWizard {
        &self.wizard
    }

    /// Leave the form: the next visit starts from an empty draft
    pub fn reset(&mut self) {
        self.wizard.reset();
        self.focus = 0;
        self.editing = None;
        self.status = None;
    }

    pub fn on_inserted(&mut self, result: InsertResult) {
        self.status = None;
        match self.wizard.finish_submit(result) {
            Ok(()) => tracing::info!(phase = ?self.wizard.phase(), "Registration submitted"),
            Err(e) => tracing::warn!(error = %e, "Registration insert failed"),
        }
    }

    fn fields(&self) -> &'static [Field] {
        self.wizard.step().map(|s| s.fields()).unwrap_or(&[])
    }

    fn focused(&self) -> Option<Field> {
        self.fields().get(self.focus).copied()
    }

    fn report(&mut self, result: Result<(), AppError>) {
        if let Err(e) = result {
            self.status = Some(Status::Error(e.message));
        }
    }

    // ========== Keys ==========

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match self.wizard.phase() {
            Phase::NvError(_) => match key.code {
                KeyCode::Char('q') => Action::Quit,
                KeyCode::Esc => Action::Open(ScreenKind::Table),
                _ => Action::None,
            },
            Phase::Submitting => Action::None,
            Phase::Submitted { .. } => match key.code {
                KeyCode::Char('q') => Action::Quit,
                KeyCode::Enter | KeyCode::Esc => Action::Open(ScreenKind::Table),
                _ => Action::None,
            },
            Phase::Editing(step) => {
                let step = *step;
                if self.editing.is_some() {
                    self.edit_key(key);
                    Action::None
                } else {
                    self.step_key(step, key)
                }
            }
        }
    }

    fn edit_key(&mut self, key: KeyEvent) {
        let Some(field) = self.focused() else {
            self.editing = None;
            return;
        };
        let Some(editor) = self.editing.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => {
                let original = std::mem::take(&mut editor.original);
                self.editing = None;
                if formats_while_typing(field) {
                    let res = self.wizard.set(field, &original);
                    self.report(res);
                }
            }
            KeyCode::Enter => {
                let value = editor.input.value().to_string();
                self.editing = None;
                self.status = None;
                let res = match self.options_for(field) {
                    // typed text picks the first matching option
                    Some(options) if !value.trim().is_empty() => match filter_names(options, &value).first() {
                        Some(choice) => self.wizard.set(field, choice),
                        None => {
                            self.status = Some(Status::Error(format!("Sin coincidencias para \"{value}\"")));
                            return;
                        }
                    },
                    _ => self.wizard.set(field, &value),
                };
                self.report(res);
            }
            _ => {
                if editor.input.handle_event(&Event::Key(key)).is_none() || !formats_while_typing(field) {
                    return;
                }
                let typed = editor.input.value().to_string();
                match self.wizard.set(field, &typed) {
                    Ok(()) => {
                        let normalized = self.wizard.data().value(field);
                        if normalized != typed {
                            editor.input = Input::new(normalized);
                        }
                    }
                    Err(e) => self.status = Some(Status::Error(e.message)),
                }
            }
        }
    }

    fn step_key(&mut self, step: Step, key: KeyEvent) -> Action {
        let count = step.fields().len();
        match key.code {
            KeyCode::Esc => return Action::Open(ScreenKind::Table),
            KeyCode::Up | KeyCode::Char('k') => self.focus = (self.focus + count - 1) % count,
            KeyCode::Down | KeyCode::Char('j') => self.focus = (self.focus + 1) % count,
            KeyCode::Left => self.cycle_option(-1),
            KeyCode::Right => self.cycle_option(1),
            KeyCode::Enter => self.start_edit(),
            KeyCode::Char('c') => self.cycle_phone_country(),
            KeyCode::Char('d') => {
                self.wizard.dismiss_submit_error();
                self.status = None;
            }
            KeyCode::Tab | KeyCode::Char('n') => match self.wizard.next() {
                Ok(next) if next != step => {
                    self.focus = 0;
                    self.status = None;
                }
                Ok(_) => {}
                Err(e) => {
                    let reason = e
                        .detail("reason")
                        .and_then(|v| v.as_str())
                        .map(|r| format!("{}: {r}", e.message))
                        .unwrap_or(e.message);
                    self.status = Some(Status::Error(reason));
                }
            },
            KeyCode::BackTab | KeyCode::Char('p') => {
                if self.wizard.prev() {
                    self.focus = 0;
                    self.status = None;
                }
            }
            KeyCode::Char('S') if step == Step::Tallas => match self.wizard.begin_submit() {
                Ok(input) => {
                    self.status = Some(Status::Info("Enviando registro…".into()));
                    return Action::Insert(input);
                }
                Err(e) => {
                    self.focus = 0;
                    self.status = Some(Status::Error(e.message));
                }
            },
            _ => {}
        }
        Action::None
    }

    fn start_edit(&mut self) {
        let Some(field) = self.focused() else {
            return;
        };
        let original = self.wizard.data().value(field);
        if self.options_for(field).is_some() {
            self.status = Some(Status::Info("Escribe para buscar una opción".into()));
            self.editing = Some(Editor {
                input: Input::default(),
                original,
            });
            return;
        }
        self.editing = Some(Editor {
            input: Input::new(original.clone()),
            original,
        });
    }

    /// Options offered for a select field; communes follow the region
    fn options_for(&self, field: Field) -> Option<Vec<&'static str>> {
        if field == Field::Comuna {
            return Some(comunas_of(&self.wizard.data().ciudad).to_vec());
        }
        field.options()
    }

    fn cycle_option(&mut self, delta: isize) {
        let Some(field) = self.focused() else {
            return;
        };
        let Some(options) = self.options_for(field) else {
            return;
        };
        if options.is_empty() {
            self.status = Some(Status::Error("Selecciona primero una región".into()));
            return;
        }
        let current = self.wizard.data().value(field);
        let len = options.len() as isize;
        let next = match options.iter().position(|o| *o == current) {
            Some(i) => (i as isize + delta).rem_euclid(len),
            None if delta > 0 => 0,
            None => len - 1,
        };
        self.status = None;
        let res = self.wizard.set(field, options[next as usize]);
        self.report(res);
    }

    fn cycle_phone_country(&mut self) {
        let Some(field) = self.focused().filter(Field::is_phone) else {
            return;
        };
        let data = self.wizard.data();
        let current = match field {
            Field::TelefonoParticular => data.telefono_particular.country,
            _ => data.contacto_emergencia_telefono.country,
        };
        let idx = PHONE_COUNTRIES
            .iter()
            .position(|c| c.code == current.code)
            .unwrap_or(0);
        let next = &PHONE_COUNTRIES[(idx + 1) % PHONE_COUNTRIES.len()];
        let res = self.wizard.set_phone_country(field, next.code);
        self.report(res);
    }

    // ========== Rendering ==========

    pub fn render(&self, f: &mut Frame) {
        match self.wizard.phase() {
            Phase::NvError(e) => self.render_nv_error(f, e),
            Phase::Submitted { .. } => self.render_submitted(f),
            Phase::Editing(step) => self.render_step(f, *step, false),
            Phase::Submitting => self.render_step(f, Step::Tallas, true),
        }
    }

    fn render_nv_error(&self, f: &mut Frame, e: &AppError) {
        let area = super::table::centered(f.area(), 70, 7);
        let text = format!(
            "{}. Solicita un enlace válido al encargado del proyecto.",
            e.message
        );
        f.render_widget(error_banner(&text, "[Esc] volver  [q] salir"), area);
    }

    fn render_submitted(&self, f: &mut Frame) {
        let area = super::table::centered(f.area(), 60, 7);
        let tag = self.wizard.tag().map(|t| t.to_string()).unwrap_or_default();
        let text = vec![
            Line::from(Span::styled(
                "¡Registro enviado!",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Tus datos quedaron registrados en el proyecto {tag}.")),
            Line::from(""),
            Line::from(Span::styled("[Enter] volver  [q] salir", Style::default().fg(Color::Gray))),
        ];
        f.render_widget(
            Paragraph::new(text)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Green))),
            area,
        );
    }

    fn render_step(&self, f: &mut Frame, step: Step, submitting: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(6),
                Constraint::Length(3),
                Constraint::Length(4),
                Constraint::Length(1),
            ])
            .split(f.area());

        let tag = self.wizard.tag().map(|t| t.to_string()).unwrap_or_default();
        f.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    format!("Paso {} de {}: {}", step.number(), Step::ALL.len(), step.title()),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("   Proyecto {tag}")),
            ])),
            chunks[0],
        );
        f.render_widget(
            Gauge::default()
                .gauge_style(Style::default().fg(Color::Cyan))
                .percent(u16::from(step.progress_percent())),
            chunks[1],
        );

        self.render_fields(f, step, chunks[2]);

        if let Some(Editor { input, .. }) = &self.editing {
            let title = self.focused().map(|field| field.label()).unwrap_or_default();
            f.render_widget(input_widget(input, title, true, chunks[3]), chunks[3]);
            f.set_cursor_position(input_cursor(chunks[3], input));
        }

        if let Some(message) = self.wizard.submit_error() {
            f.render_widget(
                error_banner(message, "[S] reintentar  [d] descartar"),
                chunks[4],
            );
        } else if submitting {
            f.render_widget(
                Paragraph::new("Enviando registro…").style(Style::default().fg(Color::Yellow)),
                chunks[4],
            );
        } else if let Some(status) = &self.status {
            let (text, color) = match status {
                Status::Info(t) => (t.as_str(), Color::Gray),
                Status::Error(t) => (t.as_str(), Color::Red),
            };
            f.render_widget(
                Paragraph::new(text)
                    .style(Style::default().fg(color))
                    .wrap(Wrap { trim: true }),
                chunks[4],
            );
        }

        let hints = if step == Step::Tallas {
            "[↑↓] campo  [Enter] editar  [◀▶] opción  [c] país tel.  [p] anterior  [S] enviar  [Esc] salir"
        } else {
            "[↑↓] campo  [Enter] editar  [◀▶] opción  [c] país tel.  [p] anterior  [n] siguiente  [Esc] salir"
        };
        f.render_widget(hint_line(hints), chunks[5]);
    }

    fn render_fields(&self, f: &mut Frame, step: Step, area: Rect) {
        let data = self.wizard.data();
        let items: Vec<ListItem> = step
            .fields()
            .iter()
            .enumerate()
            .map(|(i, &field)| {
                let marker = if field.is_required() { "*" } else { " " };
                let mut value = data.value(field);
                if field.is_phone() {
                    let country = match field {
                        Field::TelefonoParticular => data.telefono_particular.country,
                        _ => data.contacto_emergencia_telefono.country,
                    };
                    value = format!("{} {} {value}", country.code, country.dial);
                }
                if self.options_for(field).is_some() && !value.is_empty() {
                    value = format!("◀ {value} ▶");
                }
                let mut spans = vec![
                    Span::styled(format!("{marker} {:<28}", field.label()), Style::default().fg(Color::Gray)),
                    Span::raw(value),
                ];
                // Inline error only once something was typed
                if data.is_filled(field)
                    && let Some(err) = data.field_error(field)
                {
                    spans.push(Span::styled(format!("  {}", err.message), Style::default().fg(Color::Red)));
                }
                let mut style = Style::default();
                if i == self.focus {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                ListItem::new(Line::from(spans)).style(style)
            })
            .collect();
        let title = if self.wizard.step_valid(step) {
            " Sección completa "
        } else {
            " * obligatorio "
        };
        f.render_widget(
            List::new(items).block(Block::default().borders(Borders::ALL).title(title)),
            area,
        );
    }
}

/// Names and digit-only fields show their stored form as they are typed;
/// the rest are committed on Enter
fn formats_while_typing(field: Field) -> bool {
    matches!(
        field,
        Field::Nombre
            | Field::Apellido
            | Field::SegundoApellido
            | Field::ContactoEmergenciaNombre
            | Field::NumeroDocumento
            | Field::TelefonoParticular
            | Field::ContactoEmergenciaTelefono
            | Field::NumeroCuenta
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use shared::models::ProjectTag;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(view: &mut FormView, text: &str) {
        view.handle_key(press(KeyCode::Enter));
        for c in text.chars() {
            view.handle_key(press(KeyCode::Char(c)));
        }
        view.handle_key(press(KeyCode::Enter));
    }

    fn view() -> FormView {
        FormView::new(FormWizard::with_tag(ProjectTag::parse("NV499").unwrap()))
    }

    #[test]
    fn test_typing_commits_normalized_value() {
        let mut view = view();
        type_text(&mut view, "maría elena");
        assert_eq!(view.wizard.data().nombre, "María Elena");
    }

    #[test]
    fn test_buffer_is_normalized_while_typing() {
        let mut view = view();
        view.handle_key(press(KeyCode::Enter));
        for c in "maría".chars() {
            view.handle_key(press(KeyCode::Char(c)));
        }
        assert_eq!(view.editing.as_ref().unwrap().input.value(), "María");
        assert_eq!(view.wizard.data().nombre, "María");

        view.handle_key(press(KeyCode::Esc));
        assert!(view.editing.is_none());
        assert_eq!(view.wizard.data().nombre, "");

        view.focus = Step::Personal
            .fields()
            .iter()
            .position(|f| *f == Field::NumeroDocumento)
            .unwrap();
        view.handle_key(press(KeyCode::Enter));
        for c in "12.345.678-k".chars() {
            view.handle_key(press(KeyCode::Char(c)));
        }
        assert_eq!(view.editing.as_ref().unwrap().input.value(), "12345678");
        view.handle_key(press(KeyCode::Enter));
        assert_eq!(view.wizard.data().numero_documento, "12345678");
    }

    #[test]
    fn test_partial_date_waits_for_enter() {
        let mut view = view();
        view.focus = Step::Personal
            .fields()
            .iter()
            .position(|f| *f == Field::FechaNacimiento)
            .unwrap();
        view.handle_key(press(KeyCode::Enter));
        for c in "1990-0".chars() {
            view.handle_key(press(KeyCode::Char(c)));
        }
        assert_eq!(view.editing.as_ref().unwrap().input.value(), "1990-0");
        assert!(view.status.is_none());
    }

    #[test]
    fn test_reset_starts_an_empty_draft() {
        let mut view = view();
        type_text(&mut view, "ana");
        view.handle_key(press(KeyCode::Enter));
        view.reset();
        assert!(view.editing.is_none());
        assert_eq!(view.focus, 0);
        assert_eq!(view.wizard.data().nombre, "");
        assert_eq!(view.wizard.tag().unwrap().as_str(), "NV499");
    }

    #[test]
    fn test_next_blocked_shows_reason() {
        let mut view = view();
        assert!(matches!(view.handle_key(press(KeyCode::Char('n'))), Action::None));
        assert_eq!(view.wizard.step(), Some(Step::Personal));
        assert!(matches!(view.status, Some(Status::Error(_))));
    }

    #[test]
    fn test_commune_options_follow_region() {
        let mut view = view();
        assert_eq!(view.options_for(Field::Comuna), Some(Vec::new()));
        view.wizard.set(Field::Ciudad, "Antofagasta").unwrap();
        assert_eq!(
            view.options_for(Field::Comuna),
            Some(comunas_of("Antofagasta").to_vec())
        );
    }

    #[test]
    fn test_typed_search_picks_option() {
        let mut view = view();
        view.wizard.set(Field::Ciudad, "Antofagasta").unwrap();
        view.wizard.set(Field::Comuna, "Calama").unwrap();
        assert_eq!(view.options_for(Field::Comuna).map(|o| o.len()), Some(comunas_of("Antofagasta").len()));

        view.focus = Step::Personal
            .fields()
            .iter()
            .position(|f| *f == Field::EstadoCivil)
            .unwrap();
        type_text(&mut view, "solt");
        assert_eq!(view.wizard.data().value(Field::EstadoCivil), "Soltero/a");

        type_text(&mut view, "zzz");
        assert!(matches!(view.status, Some(Status::Error(_))));
        assert_eq!(view.wizard.data().value(Field::EstadoCivil), "Soltero/a");
    }

    #[test]
    fn test_options_cycle_wraps() {
        let mut view = view();
        view.focus = Step::Personal
            .fields()
            .iter()
            .position(|f| *f == Field::Sexo)
            .unwrap();
        view.handle_key(press(KeyCode::Left));
        let last = Field::Sexo.options().unwrap().last().copied().unwrap();
        assert_eq!(view.wizard.data().value(Field::Sexo), last);
        view.handle_key(press(KeyCode::Right));
        let first = Field::Sexo.options().unwrap()[0];
        assert_eq!(view.wizard.data().value(Field::Sexo), first);
    }

    #[test]
    fn test_nv_error_ignores_editing_keys() {
        let mut view = FormView::new(FormWizard::from_entry("https://h/formulario"));
        assert!(matches!(view.handle_key(press(KeyCode::Enter)), Action::None));
        assert!(view.editing.is_none());
        assert!(matches!(view.handle_key(press(KeyCode::Char('q'))), Action::Quit));
    }
}
