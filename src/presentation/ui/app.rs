//! Main application orchestrator.

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::application::{
    BillRow, FetchBillsUseCase, SubmitBillUseCase, UploadReceiptUseCase,
};
use crate::domain::entities::{Bill, PendingReceipt, SessionUser};
use crate::domain::errors::StoreError;
use crate::domain::ports::BillStorePort;
use crate::presentation::events::{EventHandler, EventResult};
use crate::presentation::ui::{BillsAction, BillsScreen, NewBillAction, NewBillScreen};

/// Logical routes the client can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The bill list.
    Bills,
    /// The new-bill form.
    NewBill,
}

#[derive(Debug)]
enum Action {
    BillsLoaded(Vec<BillRow>),
    BillsLoadFailed(String),
    ReceiptUploaded(PendingReceipt),
    ReceiptFailed(String),
    BillSubmitted(Result<Bill, StoreError>),
}

enum CurrentScreen {
    Bills(BillsScreen),
    NewBill(Box<NewBillScreen>),
}

/// Application orchestrator: routes, screens, and store-call completions.
pub struct App {
    screen: CurrentScreen,
    should_exit: bool,
    session: SessionUser,
    fetch_bills: FetchBillsUseCase,
    upload_receipt: UploadReceiptUseCase,
    submit_bill: SubmitBillUseCase,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    /// Wires the application together.
    ///
    /// The store implementation is injected here; production passes the
    /// HTTP client, tests pass a mock.
    #[must_use]
    pub fn new(store: Arc<dyn BillStorePort>, session: SessionUser) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        Self {
            screen: CurrentScreen::Bills(BillsScreen::loading()),
            should_exit: false,
            session,
            fetch_bills: FetchBillsUseCase::new(store.clone()),
            upload_receipt: UploadReceiptUseCase::new(store.clone()),
            submit_bill: SubmitBillUseCase::new(store),
            action_tx,
            action_rx,
        }
    }

    /// Runs the event loop until the user quits.
    ///
    /// # Errors
    /// Returns error if terminal drawing fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        info!(user = %self.session.email, "Starting session");
        self.navigate(Route::Bills);

        let mut terminal_events = EventStream::new();
        terminal.draw(|frame| self.render(frame))?;

        while !self.should_exit {
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    terminal.draw(|frame| self.render(frame))?;
                }

                Some(Ok(event)) = terminal_events.next() => {
                    if self.handle_terminal_event(&event) == EventResult::Exit {
                        self.should_exit = true;
                    }
                    terminal.draw(|frame| self.render(frame))?;
                }
            }
        }

        info!("Application exiting normally");
        Ok(())
    }

    /// Replaces the displayed screen for the given route.
    fn navigate(&mut self, route: Route) {
        debug!(?route, "Navigating");
        match route {
            Route::Bills => {
                self.screen = CurrentScreen::Bills(BillsScreen::loading());
                self.spawn_fetch_bills();
            }
            Route::NewBill => {
                self.screen =
                    CurrentScreen::NewBill(Box::new(NewBillScreen::new(self.session.email.clone())));
            }
        }
    }

    fn spawn_fetch_bills(&self) {
        let use_case = self.fetch_bills.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = match use_case.execute().await {
                Ok(rows) => Action::BillsLoaded(rows),
                Err(e) => Action::BillsLoadFailed(e.to_string()),
            };
            let _ = tx.send(action);
        });
    }

    fn spawn_upload_receipt(&self, path: std::path::PathBuf) {
        let use_case = self.upload_receipt.clone();
        let email = self.session.email.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let action = match use_case.execute(&path, &email).await {
                Ok(receipt) => Action::ReceiptUploaded(receipt),
                Err(e) => Action::ReceiptFailed(e.to_string()),
            };
            let _ = tx.send(action);
        });
    }

    fn spawn_submit_bill(&self, bill: Bill) {
        let use_case = self.submit_bill.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(Action::BillSubmitted(use_case.execute(bill).await));
        });
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::BillsLoaded(rows) => {
                if let CurrentScreen::Bills(screen) = &mut self.screen {
                    screen.set_loaded(rows);
                }
            }
            Action::BillsLoadFailed(message) => {
                if let CurrentScreen::Bills(screen) = &mut self.screen {
                    screen.set_error(message);
                }
            }
            Action::ReceiptUploaded(receipt) => {
                if let CurrentScreen::NewBill(screen) = &mut self.screen {
                    screen.on_receipt_uploaded(receipt);
                }
            }
            Action::ReceiptFailed(message) => {
                if let CurrentScreen::NewBill(screen) = &mut self.screen {
                    screen.on_receipt_failed(message);
                }
            }
            Action::BillSubmitted(result) => {
                if let CurrentScreen::NewBill(screen) = &mut self.screen {
                    if screen.on_submit_result(&result) == NewBillAction::NavigateToBills {
                        self.navigate(Route::Bills);
                    }
                }
            }
        }
    }

    fn handle_terminal_event(&mut self, event: &Event) -> EventResult {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(*key),
            _ => EventResult::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if EventHandler::is_quit_event(&key) {
            return EventResult::Exit;
        }

        match &mut self.screen {
            CurrentScreen::Bills(screen) => match screen.handle_key(key) {
                BillsAction::Quit => return EventResult::Exit,
                BillsAction::NewBill => self.navigate(Route::NewBill),
                BillsAction::Refresh => self.navigate(Route::Bills),
                BillsAction::OpenExternal(url) => Self::open_external(&url),
                BillsAction::None => {}
            },
            CurrentScreen::NewBill(screen) => match screen.handle_key(key) {
                NewBillAction::Cancel | NewBillAction::NavigateToBills => {
                    self.navigate(Route::Bills);
                }
                NewBillAction::UploadReceipt(path) => self.spawn_upload_receipt(path),
                NewBillAction::Submit(bill) => self.spawn_submit_bill(bill),
                NewBillAction::None => {}
            },
        }

        EventResult::Continue
    }

    fn open_external(url: &str) {
        debug!(url = %url, "Opening receipt in system viewer");
        if let Err(e) = opener::open(url) {
            warn!(error = %e, "Failed to open receipt externally");
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        match &mut self.screen {
            CurrentScreen::Bills(screen) => frame.render_widget(screen, frame.area()),
            CurrentScreen::NewBill(screen) => frame.render_widget(&mut **screen, frame.area()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UserRole;
    use crate::domain::ports::mocks::MockBillStore;
    use crate::presentation::ui::bills_screen::BillsState;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn make_app() -> App {
        let store = Arc::new(MockBillStore::new());
        let session = SessionUser::new(UserRole::Employee, "employee@test.tld");
        App::new(store, session)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_new_bill_key_swaps_to_form_route() {
        let mut app = make_app();
        app.navigate(Route::Bills);

        app.handle_key(key(KeyCode::Char('n')));

        assert!(matches!(app.screen, CurrentScreen::NewBill(_)));
    }

    #[tokio::test]
    async fn test_form_escape_returns_to_bill_list() {
        let mut app = make_app();
        app.navigate(Route::NewBill);

        app.handle_key(key(KeyCode::Esc));

        assert!(matches!(app.screen, CurrentScreen::Bills(_)));
    }

    #[tokio::test]
    async fn test_list_failure_renders_server_error_text() {
        let mut app = make_app();
        app.navigate(Route::Bills);

        app.handle_action(Action::BillsLoadFailed("Erreur 404".to_string()));

        let CurrentScreen::Bills(screen) = &app.screen else {
            panic!("expected the bill list");
        };
        assert_eq!(*screen.state(), BillsState::Failed("Erreur 404".to_string()));
    }

    #[tokio::test]
    async fn test_failed_submission_still_navigates_to_bill_list() {
        let mut app = make_app();
        app.navigate(Route::NewBill);

        app.handle_action(Action::BillSubmitted(Err(StoreError::server(500))));

        assert!(matches!(app.screen, CurrentScreen::Bills(_)));
    }

    #[tokio::test]
    async fn test_successful_submission_navigates_to_bill_list() {
        let mut app = make_app();
        app.navigate(Route::NewBill);

        app.handle_action(Action::BillSubmitted(Ok(Bill::default())));

        assert!(matches!(app.screen, CurrentScreen::Bills(_)));
    }

    #[tokio::test]
    async fn test_ctrl_c_exits_from_any_screen() {
        let mut app = make_app();
        app.navigate(Route::NewBill);

        let result = app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        assert_eq!(result, EventResult::Exit);
    }
}
