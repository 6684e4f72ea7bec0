//! Bill list screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

use super::receipt_modal::ReceiptModal;
use crate::application::BillRow;
use crate::domain::entities::BillStatus;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillsState {
    Loading,
    Loaded,
    Failed(String),
}

/// Outcome of a key press on the bill list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillsAction {
    None,
    Quit,
    NewBill,
    Refresh,
    OpenExternal(String),
}

/// Bill list screen: fetched rows, receipt preview modal, new-bill entry.
pub struct BillsScreen {
    state: BillsState,
    rows: Vec<BillRow>,
    table_state: TableState,
    modal: Option<ReceiptModal>,
}

impl BillsScreen {
    /// Creates the screen in its loading state.
    #[must_use]
    pub fn loading() -> Self {
        Self {
            state: BillsState::Loading,
            rows: Vec::new(),
            table_state: TableState::default(),
            modal: None,
        }
    }

    /// Returns current state.
    #[must_use]
    pub const fn state(&self) -> &BillsState {
        &self.state
    }

    /// Returns the displayed rows.
    #[must_use]
    pub fn rows(&self) -> &[BillRow] {
        &self.rows
    }

    /// Returns the open receipt modal, if any.
    #[must_use]
    pub const fn modal(&self) -> Option<&ReceiptModal> {
        self.modal.as_ref()
    }

    /// Installs the fetched rows.
    pub fn set_loaded(&mut self, rows: Vec<BillRow>) {
        self.table_state
            .select(if rows.is_empty() { None } else { Some(0) });
        self.rows = rows;
        self.state = BillsState::Loaded;
    }

    /// Installs the fetch error; its text is rendered inline.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.state = BillsState::Failed(message.into());
        self.rows.clear();
        self.table_state.select(None);
    }

    fn selected_row(&self) -> Option<&BillRow> {
        self.table_state.selected().and_then(|i| self.rows.get(i))
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> BillsAction {
        if let Some(modal) = &self.modal {
            return match key.code {
                KeyCode::Esc => {
                    self.modal = None;
                    BillsAction::None
                }
                KeyCode::Char('o') => BillsAction::OpenExternal(modal.file_url().to_string()),
                _ => BillsAction::None,
            };
        }

        match key.code {
            KeyCode::Char('q') => BillsAction::Quit,
            KeyCode::Char('n') => BillsAction::NewBill,
            KeyCode::Char('r') => BillsAction::Refresh,
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                BillsAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                BillsAction::None
            }
            KeyCode::Enter | KeyCode::Char('v') => {
                if let Some(row) = self.selected_row() {
                    self.modal = Some(ReceiptModal::new(
                        row.receipt_url(),
                        row.receipt_file_name(),
                    ));
                }
                BillsAction::None
            }
            _ => BillsAction::None,
        }
    }

    fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i >= self.rows.len() - 1 => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    fn select_previous(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => self.rows.len() - 1,
            Some(i) => i - 1,
        };
        self.table_state.select(Some(i));
    }

    const fn status_style(status: BillStatus) -> Style {
        match status {
            BillStatus::Pending => Style::new().fg(Color::Yellow),
            BillStatus::Accepted => Style::new().fg(Color::Green),
            BillStatus::Refused => Style::new().fg(Color::Red),
        }
    }

    fn render_table(&mut self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(["Type", "Nom", "Date", "Montant", "Statut"])
            .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|row| {
                Row::new(vec![
                    Cell::from(row.bill.expense_type.clone()),
                    Cell::from(row.bill.name.clone()),
                    Cell::from(row.display_date.clone()),
                    Cell::from(format!("{} €", row.bill.amount)),
                    Cell::from(row.bill.status.label())
                        .style(Self::status_style(row.bill.status)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Fill(2),
                Constraint::Fill(3),
                Constraint::Length(12),
                Constraint::Length(10),
                Constraint::Length(12),
            ],
        )
        .header(header)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

        StatefulWidget::render(table, area, buf, &mut self.table_state);
    }

    fn render_inner(&mut self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ]);
        let [title_area, body_area, footer_area] = layout.areas(area);

        Paragraph::new(Line::from(Span::styled(
            "Mes notes de frais",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::BOTTOM))
        .render(title_area, buf);

        match self.state.clone() {
            BillsState::Loading => {
                Paragraph::new(Span::styled(
                    "Chargement...",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::ITALIC),
                ))
                .render(body_area, buf);
            }
            BillsState::Failed(message) => {
                Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)))
                    .render(body_area, buf);
            }
            BillsState::Loaded => self.render_table(body_area, buf),
        }

        Paragraph::new(Line::from(vec![
            Span::styled("n", Style::default().fg(Color::Yellow)),
            Span::raw(": nouvelle note de frais | "),
            Span::styled("Entrée", Style::default().fg(Color::Yellow)),
            Span::raw(": justificatif | "),
            Span::styled("r", Style::default().fg(Color::Yellow)),
            Span::raw(": actualiser | "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(": quitter"),
        ]))
        .style(Style::default().fg(Color::Gray))
        .render(footer_area, buf);

        if let Some(modal) = &self.modal {
            modal.render(area, buf);
        }
    }
}

impl Widget for &mut BillsScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}
