//! New bill form screen.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use tracing::debug;

use crate::domain::entities::{Bill, BillId, BillStatus, PendingReceipt};
use crate::domain::errors::StoreError;
use crate::presentation::widgets::{FilePicker, FilePickerAction, SelectInput, TextInput};

/// Expense categories offered by the form.
pub const EXPENSE_CATEGORIES: [&str; 7] = [
    "Transports",
    "Restaurants et bars",
    "Hôtel et logement",
    "Services en ligne",
    "IT et électronique",
    "Équipement et matériel",
    "Fournitures de bureau",
];

const FIELD_COUNT: usize = 7;
const DEFAULT_PCT: u32 = 20;

/// Receipt upload state for the current form session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiptState {
    /// No file picked yet, or the last pick was discarded.
    Idle,
    /// A valid-looking pick is on its way to the store.
    Uploading {
        /// Name of the file being uploaded.
        file_name: String,
    },
    /// The store accepted the file; these fields ride along on submit.
    Uploaded(PendingReceipt),
    /// The pick was refused or the upload failed; message shown inline.
    Failed(String),
}

/// Outcome of a key press on the form.
#[derive(Debug, Clone, PartialEq)]
pub enum NewBillAction {
    None,
    /// Leave the form without submitting.
    Cancel,
    /// Upload the picked file.
    UploadReceipt(PathBuf),
    /// Persist the assembled bill.
    Submit(Bill),
    /// Go (back) to the bill list.
    NavigateToBills,
}

/// New bill form: field focus ring, receipt upload, submission.
pub struct NewBillScreen {
    email: String,
    expense_type: SelectInput,
    name: TextInput,
    date: TextInput,
    amount: TextInput,
    vat: TextInput,
    pct: TextInput,
    commentary: TextInput,
    focus: usize,
    receipt: ReceiptState,
    picker: Option<FilePicker>,
    submitting: bool,
}

impl NewBillScreen {
    /// Creates the form for the connected user.
    #[must_use]
    pub fn new(email: impl Into<String>) -> Self {
        let categories = EXPENSE_CATEGORIES.iter().map(ToString::to_string).collect();
        let mut screen = Self {
            email: email.into(),
            expense_type: SelectInput::new("Type de dépense", categories),
            name: TextInput::new("Nom de la dépense").placeholder("Vol Paris Londres"),
            date: TextInput::new("Date").placeholder("aaaa-mm-jj"),
            amount: TextInput::new("Montant TTC").numeric().placeholder("348"),
            vat: TextInput::new("TVA").placeholder("70"),
            pct: TextInput::new("%").numeric().placeholder("20"),
            commentary: TextInput::new("Commentaire"),
            focus: 0,
            receipt: ReceiptState::Idle,
            picker: None,
            submitting: false,
        };
        screen.apply_focus();
        screen
    }

    /// Returns the receipt upload state.
    #[must_use]
    pub const fn receipt(&self) -> &ReceiptState {
        &self.receipt
    }

    /// Returns whether a submission is outstanding.
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Records a successful upload; its fields ride along on submit.
    pub fn on_receipt_uploaded(&mut self, receipt: PendingReceipt) {
        self.receipt = ReceiptState::Uploaded(receipt);
    }

    /// Records a refused pick or failed upload; the selection is dropped
    /// so the user can pick again.
    pub fn on_receipt_failed(&mut self, message: impl Into<String>) {
        self.receipt = ReceiptState::Failed(message.into());
    }

    /// Reacts to the submission outcome.
    ///
    /// The user is never left stuck on the form: a persistence failure has
    /// already been logged, and the list screen is shown either way. This
    /// is the product's documented policy, not an oversight.
    pub fn on_submit_result(&mut self, result: &Result<Bill, StoreError>) -> NewBillAction {
        self.submitting = false;
        if let Err(e) = result {
            debug!(error = %e, "Submission failed, navigating to the bill list anyway");
        }
        NewBillAction::NavigateToBills
    }

    /// Registers a file picked from the picker.
    pub fn receipt_picked(&mut self, path: PathBuf) -> NewBillAction {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        self.receipt = ReceiptState::Uploading { file_name };
        NewBillAction::UploadReceipt(path)
    }

    /// Handles key event, returns action.
    pub fn handle_key(&mut self, key: KeyEvent) -> NewBillAction {
        if let Some(picker) = &mut self.picker {
            return match picker.handle_key(key) {
                FilePickerAction::Pick(path) => {
                    self.picker = None;
                    self.receipt_picked(path)
                }
                FilePickerAction::Close => {
                    self.picker = None;
                    NewBillAction::None
                }
                FilePickerAction::None => NewBillAction::None,
            };
        }

        if self.submitting {
            return NewBillAction::None;
        }

        match key.code {
            KeyCode::Esc => NewBillAction::Cancel,
            KeyCode::Char('f') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.picker = Some(FilePicker::new());
                NewBillAction::None
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submitting = true;
                NewBillAction::Submit(self.assemble_bill())
            }
            KeyCode::Tab | KeyCode::Enter | KeyCode::Down => {
                self.focus = (self.focus + 1) % FIELD_COUNT;
                self.apply_focus();
                NewBillAction::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = self.focus.checked_sub(1).unwrap_or(FIELD_COUNT - 1);
                self.apply_focus();
                NewBillAction::None
            }
            KeyCode::Left if self.focus == 0 => {
                self.expense_type.previous();
                NewBillAction::None
            }
            KeyCode::Right if self.focus == 0 => {
                self.expense_type.next();
                NewBillAction::None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(input) = self.focused_input() {
                    input.input_char(c);
                }
                NewBillAction::None
            }
            KeyCode::Backspace => {
                if let Some(input) = self.focused_input() {
                    input.backspace();
                }
                NewBillAction::None
            }
            KeyCode::Delete => {
                if let Some(input) = self.focused_input() {
                    input.delete();
                }
                NewBillAction::None
            }
            KeyCode::Left => {
                if let Some(input) = self.focused_input() {
                    input.move_left();
                }
                NewBillAction::None
            }
            KeyCode::Right => {
                if let Some(input) = self.focused_input() {
                    input.move_right();
                }
                NewBillAction::None
            }
            KeyCode::Home => {
                if let Some(input) = self.focused_input() {
                    input.move_start();
                }
                NewBillAction::None
            }
            KeyCode::End => {
                if let Some(input) = self.focused_input() {
                    input.move_end();
                }
                NewBillAction::None
            }
            _ => NewBillAction::None,
        }
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            1 => Some(&mut self.name),
            2 => Some(&mut self.date),
            3 => Some(&mut self.amount),
            4 => Some(&mut self.vat),
            5 => Some(&mut self.pct),
            6 => Some(&mut self.commentary),
            _ => None,
        }
    }

    fn apply_focus(&mut self) {
        self.expense_type.set_focused(self.focus == 0);
        self.name.set_focused(self.focus == 1);
        self.date.set_focused(self.focus == 2);
        self.amount.set_focused(self.focus == 3);
        self.vat.set_focused(self.focus == 4);
        self.pct.set_focused(self.focus == 5);
        self.commentary.set_focused(self.focus == 6);
    }

    /// Assembles the submission payload from the form.
    ///
    /// `status` is always forced to pending, the session email is attached,
    /// and the receipt fields come from the captured upload state.
    fn assemble_bill(&self) -> Bill {
        let (id, file_url, file_name) = match &self.receipt {
            ReceiptState::Uploaded(receipt) => (
                BillId::from(receipt.bill_id.as_str()),
                Some(receipt.file_url.clone()),
                Some(receipt.file_name.clone()),
            ),
            _ => (BillId::default(), None, None),
        };

        Bill {
            id,
            email: self.email.clone(),
            expense_type: self.expense_type.value().to_string(),
            name: self.name.value().to_string(),
            amount: self.amount.value().parse().unwrap_or(0),
            date: self.date.value().to_string(),
            vat: self.vat.value().to_string(),
            pct: self.pct.value().parse().unwrap_or(DEFAULT_PCT),
            commentary: self.commentary.value().to_string(),
            file_url,
            file_name,
            status: BillStatus::Pending,
        }
    }

    fn render_receipt_box(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray))
            .title("Justificatif");
        let inner = block.inner(area);
        block.render(area, buf);

        let line = match &self.receipt {
            ReceiptState::Idle => Line::from(Span::styled(
                "Aucun fichier (Ctrl+F pour choisir)",
                Style::default().fg(Color::DarkGray),
            )),
            ReceiptState::Uploading { file_name } => Line::from(Span::styled(
                format!("Envoi de {file_name}..."),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
            ReceiptState::Uploaded(receipt) => Line::from(Span::styled(
                receipt.file_name.clone(),
                Style::default().fg(Color::Green),
            )),
            ReceiptState::Failed(message) => Line::from(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            )),
        };

        Paragraph::new(line).render(inner, buf);
    }

    fn render_inner(&mut self, area: Rect, buf: &mut Buffer) {
        let layout = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ]);
        let [title_area, body_area, footer_area] = layout.areas(area);

        Paragraph::new(Line::from(Span::styled(
            "Envoyer une note de frais",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .block(Block::default().borders(Borders::BOTTOM))
        .render(title_area, buf);

        let columns =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(body_area);

        let field_heights = [
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
        ];
        let left = Layout::vertical(field_heights).split(columns[0]);
        let right = Layout::vertical(field_heights).split(columns[1]);

        (&self.expense_type).render(left[0], buf);
        (&self.name).render(left[1], buf);
        (&self.date).render(left[2], buf);
        (&self.amount).render(left[3], buf);
        (&self.vat).render(right[0], buf);
        (&self.pct).render(right[1], buf);
        (&self.commentary).render(right[2], buf);
        self.render_receipt_box(right[3], buf);

        let footer = if self.submitting {
            Line::from(Span::styled(
                "Envoi en cours...",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(vec![
                Span::styled("Tab", Style::default().fg(Color::Yellow)),
                Span::raw(": champ suivant | "),
                Span::styled("Ctrl+F", Style::default().fg(Color::Yellow)),
                Span::raw(": justificatif | "),
                Span::styled("Ctrl+S", Style::default().fg(Color::Yellow)),
                Span::raw(": envoyer | "),
                Span::styled("Esc", Style::default().fg(Color::Yellow)),
                Span::raw(": annuler"),
            ])
        };
        Paragraph::new(footer)
            .style(Style::default().fg(Color::Gray))
            .render(footer_area, buf);

        if let Some(picker) = &mut self.picker {
            let popup = Layout::horizontal([
                Constraint::Percentage(20),
                Constraint::Percentage(60),
                Constraint::Percentage(20),
            ])
            .split(area)[1];
            picker.render(popup, buf);
        }
    }
}

impl Widget for &mut NewBillScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.render_inner(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::{MOCK_CREATE_FILE_URL, MOCK_CREATE_KEY};

    const EMAIL: &str = "employee@test.tld";

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str(screen: &mut NewBillScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn uploaded_receipt() -> PendingReceipt {
        PendingReceipt {
            bill_id: MOCK_CREATE_KEY.to_string(),
            file_url: MOCK_CREATE_FILE_URL.to_string(),
            file_name: "justificatif.jpg".to_string(),
        }
    }

    fn fill_form(screen: &mut NewBillScreen) {
        // Focus starts on the category select: keep "Transports".
        screen.handle_key(key(KeyCode::Tab));
        type_str(screen, "Vol Paris-Montréal");
        screen.handle_key(key(KeyCode::Tab));
        type_str(screen, "2021-03-01");
        screen.handle_key(key(KeyCode::Tab));
        type_str(screen, "42");
        screen.handle_key(key(KeyCode::Tab));
        type_str(screen, "10");
        screen.handle_key(key(KeyCode::Tab));
        type_str(screen, "10");
        screen.handle_key(key(KeyCode::Tab));
        type_str(screen, "séminaire billed");
    }

    #[test]
    fn test_submit_assembles_form_session_and_receipt() {
        let mut screen = NewBillScreen::new(EMAIL);
        fill_form(&mut screen);
        screen.on_receipt_uploaded(uploaded_receipt());

        let action = screen.handle_key(ctrl('s'));

        let NewBillAction::Submit(bill) = action else {
            panic!("expected a submission, got {action:?}");
        };
        assert_eq!(bill.email, EMAIL);
        assert_eq!(bill.expense_type, "Transports");
        assert_eq!(bill.name, "Vol Paris-Montréal");
        assert_eq!(bill.amount, 42);
        assert_eq!(bill.date, "2021-03-01");
        assert_eq!(bill.vat, "10");
        assert_eq!(bill.pct, 10);
        assert_eq!(bill.commentary, "séminaire billed");
        assert_eq!(bill.file_url.as_deref(), Some(MOCK_CREATE_FILE_URL));
        assert_eq!(bill.file_name.as_deref(), Some("justificatif.jpg"));
        assert_eq!(bill.id.as_str(), MOCK_CREATE_KEY);
        assert_eq!(bill.status, BillStatus::Pending);
    }

    #[test]
    fn test_submit_is_gated_while_outstanding() {
        let mut screen = NewBillScreen::new(EMAIL);
        fill_form(&mut screen);

        assert!(matches!(screen.handle_key(ctrl('s')), NewBillAction::Submit(_)));
        assert!(screen.is_submitting());
        assert_eq!(screen.handle_key(ctrl('s')), NewBillAction::None);
    }

    #[test]
    fn test_empty_pct_defaults_to_twenty() {
        let mut screen = NewBillScreen::new(EMAIL);

        let NewBillAction::Submit(bill) = screen.handle_key(ctrl('s')) else {
            panic!("expected a submission");
        };
        assert_eq!(bill.pct, 20);
        assert_eq!(bill.amount, 0);
        assert_eq!(bill.file_url, None);
        assert_eq!(bill.status, BillStatus::Pending);
    }

    #[test]
    fn test_picked_file_starts_upload() {
        let mut screen = NewBillScreen::new(EMAIL);

        let action = screen.receipt_picked(PathBuf::from("/tmp/justificatif.png"));

        assert_eq!(
            action,
            NewBillAction::UploadReceipt(PathBuf::from("/tmp/justificatif.png"))
        );
        assert_eq!(
            *screen.receipt(),
            ReceiptState::Uploading {
                file_name: "justificatif.png".to_string()
            }
        );
    }

    #[test]
    fn test_failed_upload_clears_selection_and_shows_message() {
        let mut screen = NewBillScreen::new(EMAIL);
        screen.receipt_picked(PathBuf::from("justificatif.svg"));

        screen.on_receipt_failed("Bad file format. Please choose .jpg, .jpeg or .png file.");

        assert_eq!(
            *screen.receipt(),
            ReceiptState::Failed(
                "Bad file format. Please choose .jpg, .jpeg or .png file.".to_string()
            )
        );
        let NewBillAction::Submit(bill) = screen.handle_key(ctrl('s')) else {
            panic!("expected a submission");
        };
        assert_eq!(bill.file_url, None);
        assert_eq!(bill.file_name, None);
    }

    #[test]
    fn test_successful_upload_captures_store_response() {
        let mut screen = NewBillScreen::new(EMAIL);
        screen.receipt_picked(PathBuf::from("justificatif.jpg"));

        screen.on_receipt_uploaded(uploaded_receipt());

        let ReceiptState::Uploaded(receipt) = screen.receipt() else {
            panic!("expected an uploaded receipt");
        };
        assert_eq!(receipt.bill_id, MOCK_CREATE_KEY);
        assert_eq!(receipt.file_url, MOCK_CREATE_FILE_URL);
        assert_eq!(receipt.file_name, "justificatif.jpg");
    }

    #[test]
    fn test_submit_result_navigates_on_both_arms() {
        let mut screen = NewBillScreen::new(EMAIL);

        let ok: Result<Bill, StoreError> = Ok(Bill::default());
        assert_eq!(screen.on_submit_result(&ok), NewBillAction::NavigateToBills);

        let err: Result<Bill, StoreError> = Err(StoreError::server(500));
        assert_eq!(screen.on_submit_result(&err), NewBillAction::NavigateToBills);
    }

    #[test]
    fn test_escape_cancels_the_form() {
        let mut screen = NewBillScreen::new(EMAIL);
        assert_eq!(screen.handle_key(key(KeyCode::Esc)), NewBillAction::Cancel);
    }

    #[test]
    fn test_category_cycles_with_arrows() {
        let mut screen = NewBillScreen::new(EMAIL);

        screen.handle_key(key(KeyCode::Right));
        let NewBillAction::Submit(bill) = screen.handle_key(ctrl('s')) else {
            panic!("expected a submission");
        };
        assert_eq!(bill.expense_type, "Restaurants et bars");
    }
}
