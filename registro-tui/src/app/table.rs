//! Personnel table screen

use super::{Action, ScreenKind, error_banner, hint_line, input_cursor, input_widget};
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{prelude::*, widgets::*};
use registro_client::ListResult;
use registro_client::listing::{ListController, TABLE_PAGE_SIZE};
use registro_client::{VirtualItem, Virtualizer};
use shared::format::{edad_from, format_date_cl, format_phone_cl, format_rut, full_name};
use shared::models::{
    Empleado, EstadoCivil, FilterKey, FondoCotizacion, ListParams, ParamChange, ProjectTag, Salud,
    Sexo, SortPreset,
};
use std::collections::{BTreeMap, HashMap};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use uuid::Uuid;

/// Starting guess for a card before it is laid out
const CARD_ESTIMATE: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Search,
    Filter,
}

/// Filter popup state: which column, which of its values
struct FilterPicker {
    key: usize,
    value: usize,
}

pub struct TableView {
    ctl: ListController,
    mode: Mode,
    search: Input,
    picker: FilterPicker,
    /// Tags seen in the store, offered by the project filter
    tags: Vec<String>,
    selected: usize,
    offset: u32,
    rows: Virtualizer<Uuid>,
}

impl TableView {
    pub fn new() -> Self {
        Self {
            ctl: ListController::new(ListParams::with_page_size(TABLE_PAGE_SIZE)),
            mode: Mode::Normal,
            search: Input::default(),
            picker: FilterPicker { key: 0, value: 0 },
            tags: Vec::new(),
            selected: 0,
            offset: 0,
            rows: Virtualizer::new(CARD_ESTIMATE),
        }
    }

    pub fn begin_fetch(&mut self) -> ListParams {
        self.ctl.begin_fetch()
    }

    pub fn invalidate(&mut self) {
        self.ctl.invalidate();
    }

    pub fn tick(&mut self) -> Option<ListParams> {
        self.ctl.tick()
    }

    pub fn on_listed(&mut self, params: &ListParams, result: ListResult) {
        if self.ctl.complete(params, result) {
            self.selected = self.selected.min(self.ctl.rows().len().saturating_sub(1));
        }
    }

    pub fn on_tags(&mut self, counts: &Result<BTreeMap<Option<String>, u64>, String>) {
        if let Ok(counts) = counts {
            let mut tags: Vec<String> = counts
                .keys()
                .map(|raw| ProjectTag::from_stored(raw.as_deref()).to_string())
                .collect();
            tags.sort();
            tags.dedup();
            self.tags = tags;
        }
    }

    // ========== Keys ==========

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        match self.mode {
            Mode::Search => self.search_key(key),
            Mode::Filter => self.filter_key(key),
            Mode::Normal => self.normal_key(key),
        }
    }

    fn normal_key(&mut self, key: KeyEvent) -> Action {
        let change = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('/') => {
                self.mode = Mode::Search;
                return Action::None;
            }
            KeyCode::Char('f') => {
                self.mode = Mode::Filter;
                return Action::None;
            }
            KeyCode::Char('g') => return Action::Open(ScreenKind::Links),
            KeyCode::Char('a') => return Action::Open(ScreenKind::Form),
            KeyCode::Char('r') if self.ctl.error().is_some() => {
                return Action::Fetch(self.ctl.retry());
            }
            KeyCode::Char('d') => {
                self.ctl.dismiss_error();
                return Action::None;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(1);
                return Action::None;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(-1);
                return Action::None;
            }
            KeyCode::Home => {
                self.selected = 0;
                return Action::None;
            }
            KeyCode::End => {
                self.selected = self.ctl.rows().len().saturating_sub(1);
                return Action::None;
            }
            KeyCode::Char('s') => {
                let preset = SortPreset::of(self.ctl.params().sort).unwrap_or(SortPreset::Newest);
                ParamChange::Sort(preset.next().sort())
            }
            KeyCode::Char('x') => {
                self.search = Input::default();
                ParamChange::ClearAll
            }
            KeyCode::Char('c') => match self.ctl.params().chips().pop() {
                Some(chip) => match chip.key {
                    Some(key) => ParamChange::RemoveFilter(key),
                    None => {
                        self.search = Input::default();
                        ParamChange::Search(String::new())
                    }
                },
                None => return Action::None,
            },
            KeyCode::Char('n') | KeyCode::PageDown => {
                let page = self.ctl.params().page;
                match self.ctl.total_pages() {
                    Some(total) if page < total => ParamChange::Page(page + 1),
                    _ => return Action::None,
                }
            }
            KeyCode::Char('p') | KeyCode::PageUp => {
                let page = self.ctl.params().page;
                if page <= 1 {
                    return Action::None;
                }
                ParamChange::Page(page - 1)
            }
            _ => return Action::None,
        };
        self.apply(change)
    }

    fn apply(&mut self, change: ParamChange) -> Action {
        match self.ctl.change(change) {
            Some(params) => {
                self.selected = 0;
                self.offset = 0;
                Action::Fetch(params)
            }
            None => Action::None,
        }
    }

    fn search_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.mode = Mode::Normal,
            _ => {
                if self.search.handle_event(&Event::Key(key)).is_some() {
                    self.ctl.type_search(self.search.value());
                }
            }
        }
        Action::None
    }

    fn filter_key(&mut self, key: KeyEvent) -> Action {
        let filter = FilterKey::ALL[self.picker.key];
        let values = self.filter_values(filter);
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Left => {
                self.picker.key = (self.picker.key + FilterKey::ALL.len() - 1) % FilterKey::ALL.len();
                self.picker.value = 0;
            }
            KeyCode::Right | KeyCode::Tab => {
                self.picker.key = (self.picker.key + 1) % FilterKey::ALL.len();
                self.picker.value = 0;
            }
            KeyCode::Up if !values.is_empty() => {
                self.picker.value = (self.picker.value + values.len() - 1) % values.len();
            }
            KeyCode::Down if !values.is_empty() => {
                self.picker.value = (self.picker.value + 1) % values.len();
            }
            KeyCode::Delete | KeyCode::Backspace => {
                self.mode = Mode::Normal;
                return self.apply(ParamChange::RemoveFilter(filter));
            }
            KeyCode::Enter => {
                self.mode = Mode::Normal;
                if let Some(value) = values.get(self.picker.value) {
                    return self.apply(ParamChange::Filter(filter, value.clone()));
                }
            }
            _ => {}
        }
        Action::None
    }

    fn filter_values(&self, key: FilterKey) -> Vec<String> {
        fn stored<T: Copy>(all: &[T], f: fn(&T) -> &'static str) -> Vec<String> {
            all.iter().map(|v| f(v).to_string()).collect()
        }
        match key {
            FilterKey::Sexo => stored(Sexo::ALL, Sexo::as_str),
            FilterKey::Salud => stored(Salud::ALL, Salud::as_str),
            FilterKey::FondoCotizacion => stored(FondoCotizacion::ALL, FondoCotizacion::as_str),
            FilterKey::EstadoCivil => stored(EstadoCivil::ALL, EstadoCivil::as_str),
            FilterKey::Nv => self.tags.clone(),
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.ctl.rows().len();
        if len == 0 {
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(len - 1);
    }

    // ========== Rendering ==========

    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(5),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);

        let title = if self.ctl.searching() {
            " Buscar (buscando…) "
        } else {
            " Buscar "
        };
        let searching = self.mode == Mode::Search;
        f.render_widget(input_widget(&self.search, title, searching, chunks[1]), chunks[1]);
        if searching {
            f.set_cursor_position(input_cursor(chunks[1], &self.search));
        }

        self.render_chips(f, chunks[2]);

        if let Some(message) = self.ctl.error() {
            f.render_widget(
                error_banner(message, "[r] Reintentar  [d] Descartar"),
                chunks[3],
            );
        } else if self.ctl.rows().is_empty() {
            let text = if self.ctl.loading() {
                "Cargando empleados…"
            } else if self.ctl.params().has_active_filters() {
                "No se encontraron empleados con estos filtros. [x] Limpiar filtros"
            } else {
                "No hay empleados registrados"
            };
            f.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL)),
                chunks[3],
            );
        } else {
            self.render_cards(f, chunks[3]);
        }

        self.render_footer(f, chunks[4]);
        f.render_widget(
            hint_line(
                "[/] buscar  [f] filtros  [s] orden  [c] quitar filtro  [x] limpiar  [n/p] página  [a] formulario  [g] enlaces  [q] salir",
            ),
            chunks[5],
        );

        if self.mode == Mode::Filter {
            self.render_filter_popup(f);
        }
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let preset = SortPreset::of(self.ctl.params().sort)
            .map(|p| p.label())
            .unwrap_or("Personalizado");
        let mut spans = vec![
            Span::styled(
                "Registro de Personal",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  Orden: {preset}")),
        ];
        if self.ctl.loading() {
            spans.push(Span::styled("  actualizando…", Style::default().fg(Color::Yellow)));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_chips(&self, f: &mut Frame, area: Rect) {
        let params = self.ctl.params();
        let mut spans = Vec::new();
        if params.has_active_filters() {
            spans.push(Span::styled(
                format!("Filtros ({}): ", params.active_filter_count()),
                Style::default().fg(Color::Gray),
            ));
        }
        for chip in params.chips() {
            spans.push(Span::styled(
                format!(" {} ", chip.label),
                Style::default().fg(Color::Black).bg(Color::Cyan),
            ));
            spans.push(Span::raw(" "));
        }
        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let params = self.ctl.params();
        let shown = self.ctl.rows().len();
        let mut text = match self.ctl.count() {
            Some(total) => format!("Mostrando {shown} de {total} empleados"),
            None => format!("Mostrando {shown} empleados"),
        };
        if let Some(pages) = self.ctl.total_pages() {
            text.push_str(&format!("  ·  Página {} de {pages}", params.page));
        }
        f.render_widget(Paragraph::new(text).style(Style::default().fg(Color::Gray)), area);
    }

    fn render_cards(&mut self, f: &mut Frame, area: Rect) {
        let today = shared::util::today_cl();
        let keys: Vec<Uuid> = self.ctl.rows().iter().map(|e| e.id).collect();
        self.rows.set_keys(keys);
        let viewport = u32::from(area.height);

        // Card heights depend on the terminal width, so only the window is laid out.
        // A measurement can pull new rows into the window; the second pass covers them.
        let mut cards: HashMap<usize, Vec<Vec<Line<'static>>>> = HashMap::new();
        for _ in 0..2 {
            self.follow_selection(viewport);
            for item in self.rows.items(self.offset, viewport) {
                if cards.contains_key(&item.index) {
                    continue;
                }
                let columns = card_columns(&self.ctl.rows()[item.index], today);
                let lines = columns.iter().map(Vec::len).max().unwrap_or(1) as u32;
                self.rows.measure(&item.key, lines + 2);
                cards.insert(item.index, columns);
            }
        }
        self.follow_selection(viewport);

        let items: Vec<VirtualItem<Uuid>> = self.rows.items(self.offset, viewport);
        for item in items {
            let Some(columns) = cards.get(&item.index) else {
                continue;
            };
            // Only cards fully inside the viewport are drawn
            if item.start < self.offset || item.start + item.size > self.offset + viewport {
                continue;
            }
            let rect = Rect {
                x: area.x,
                y: area.y + (item.start - self.offset) as u16,
                width: area.width,
                height: item.size as u16,
            };
            self.render_card(f, rect, &self.ctl.rows()[item.index], columns, item.index == self.selected);
        }
    }

    /// Scroll just enough to keep the selected card in view
    fn follow_selection(&mut self, viewport: u32) {
        let top = self.rows.offset_for_index(self.selected);
        let bottom = top + self.rows.size_of(self.selected);
        if top < self.offset {
            self.offset = top;
        } else if bottom > self.offset + viewport {
            self.offset = bottom.saturating_sub(viewport);
        }
        self.offset = self.offset.min(self.rows.total_size().saturating_sub(viewport));
    }

    fn render_card(
        &self,
        f: &mut Frame,
        area: Rect,
        empleado: &Empleado,
        columns: &[Vec<Line<'static>>],
        selected: bool,
    ) {
        let border = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(format!(" {} ", tag_label(empleado)));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(22),
                Constraint::Percentage(26),
                Constraint::Percentage(16),
                Constraint::Percentage(14),
                Constraint::Percentage(12),
            ])
            .split(inner);
        for (column, cell) in columns.iter().zip(cells.iter()) {
            f.render_widget(Paragraph::new(column.clone()), *cell);
        }
    }

    fn render_filter_popup(&self, f: &mut Frame) {
        let area = centered(f.area(), 50, 14);
        f.render_widget(Clear, area);

        let filter = FilterKey::ALL[self.picker.key];
        let current = self.ctl.params().filters.get(&filter);
        let items: Vec<ListItem> = self
            .filter_values(filter)
            .into_iter()
            .enumerate()
            .map(|(i, v)| {
                let mut style = Style::default();
                if current == Some(&v) {
                    style = style.fg(Color::Cyan);
                }
                if i == self.picker.value {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                ListItem::new(v).style(style)
            })
            .collect();
        let title = format!(" Filtro: ◀ {} ▶ ", filter.label());
        f.render_widget(
            List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .title_bottom(" [Enter] aplicar  [Supr] quitar  [Esc] cerrar "),
            ),
            area,
        );
    }
}

/// Untagged legacy rows show the sentinel
fn tag_label(empleado: &Empleado) -> String {
    empleado.project_tag().to_string()
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

/// Card body, one list of lines per column
fn card_columns(e: &Empleado, today: chrono::NaiveDate) -> Vec<Vec<Line<'static>>> {
    let proyecto = vec![
        heading("PROYECTO"),
        Line::from(tag_label(e)),
        Line::from(e.created_at.map(|t| format_date_cl(t.date_naive())).unwrap_or_default()),
    ];

    let personal = vec![
        heading("PERSONAL"),
        Line::from(Span::styled(
            full_name(&e.nombre, &e.apellido, e.segundo_apellido.as_deref()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format_rut(&e.numero_documento)),
        Line::from(format!(
            "{} años · {}",
            edad_from(e.fecha_nacimiento, today),
            format_date_cl(e.fecha_nacimiento)
        )),
        Line::from(format!("{} · {}", e.sexo.label(), e.estado_civil.label())),
    ];

    let contacto = vec![
        heading("CONTACTO"),
        Line::from(format_phone_cl(&e.telefono_particular)),
        Line::from(e.email_personal.clone()),
        Line::from(e.direccion.clone()),
        Line::from(format!(
            "Emergencia: {} {}",
            e.contacto_emergencia_nombre,
            format_phone_cl(&e.contacto_emergencia_telefono)
        )),
    ];

    let bancaria = vec![
        heading("BANCARIA"),
        Line::from(e.banco.label()),
        Line::from(e.tipo_cuenta.label()),
        Line::from(e.numero_cuenta.clone()),
    ];

    let prevision = vec![
        heading("PREVISIÓN"),
        Line::from(format!("AFP: {}", e.fondo_cotizacion.label())),
        Line::from(format!("Salud: {}", e.salud.label())),
        Line::from(format!("AFC: {}", e.afc.label())),
    ];

    let na = || "N/A".to_string();
    let tallas = vec![
        heading("TALLAS"),
        Line::from(format!(
            "Sup: {}",
            e.talla_superior.map(|t| t.label().to_string()).unwrap_or_else(na)
        )),
        Line::from(format!(
            "Inf: {}",
            e.talla_inferior.map(|t| t.label().to_string()).unwrap_or_else(na)
        )),
        Line::from(format!(
            "Zap: {}",
            e.talla_zapato.map(|t| t.to_string()).unwrap_or_else(na)
        )),
    ];

    vec![proyecto, personal, contacto, bancaria, prevision, tallas]
}

/// Rect of at most `width` x `height` centered in `area`
pub(super) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
