//! Receipt preview modal.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Centered modal showing the receipt attached to a bill.
///
/// A terminal cannot render the image inline, so the modal presents the
/// file identity at constrained width and offers to open it in the system
/// viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptModal {
    file_url: String,
    file_name: String,
}

impl ReceiptModal {
    /// Creates a modal for the given receipt.
    #[must_use]
    pub fn new(file_url: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            file_url: file_url.into(),
            file_name: file_name.into(),
        }
    }

    /// URL of the previewed file.
    #[must_use]
    pub fn file_url(&self) -> &str {
        &self.file_url
    }

    fn centered(area: Rect) -> Rect {
        let vertical = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(9),
            Constraint::Fill(1),
        ]);
        let [_, center, _] = vertical.areas(area);

        let horizontal = Layout::horizontal([
            Constraint::Percentage(15),
            Constraint::Percentage(70),
            Constraint::Percentage(15),
        ]);
        let [_, content, _] = horizontal.areas(center);
        content
    }
}

impl Widget for &ReceiptModal {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let content_area = ReceiptModal::centered(area);

        Clear.render(content_area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Justificatif ")
            .title_style(Style::default().add_modifier(Modifier::BOLD));

        let inner = block.inner(content_area);
        block.render(content_area, buf);

        let name = if self.file_name.is_empty() {
            "(sans nom)"
        } else {
            self.file_name.as_str()
        };

        let lines = vec![
            Line::from(Span::styled(name, Style::default().fg(Color::White))),
            Line::default(),
            Line::from(Span::styled(
                self.file_url.clone(),
                Style::default().fg(Color::Blue),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("o", Style::default().fg(Color::Yellow)),
                Span::raw(": ouvrir | "),
                Span::styled("Esc", Style::default().fg(Color::Yellow)),
                Span::raw(": fermer"),
            ]),
        ];

        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(inner, buf);
    }
}
