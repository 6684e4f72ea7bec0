//! Cycling select widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// A select field cycling through a fixed option list.
#[derive(Debug, Clone)]
pub struct SelectInput {
    options: Vec<String>,
    selected: usize,
    focused: bool,
    label: String,
}

impl SelectInput {
    /// Creates a select over the given options; the first is preselected.
    #[must_use]
    pub fn new(label: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            options,
            selected: 0,
            focused: false,
            label: label.into(),
        }
    }

    /// Sets focus state.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Returns the selected option.
    #[must_use]
    pub fn value(&self) -> &str {
        self.options
            .get(self.selected)
            .map_or("", String::as_str)
    }

    /// Selects the option equal to `value`, if present.
    pub fn set_value(&mut self, value: &str) {
        if let Some(index) = self.options.iter().position(|o| o == value) {
            self.selected = index;
        }
    }

    /// Cycles to the next option.
    pub fn next(&mut self) {
        if !self.options.is_empty() {
            self.selected = (self.selected + 1) % self.options.len();
        }
    }

    /// Cycles to the previous option.
    pub fn previous(&mut self) {
        if !self.options.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.options.len() - 1);
        }
    }
}

impl Widget for &SelectInput {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(self.label.as_str());

        let inner = block.inner(area);
        block.render(area, buf);

        let arrows_style = if self.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let line = Line::from(vec![
            Span::styled("< ", arrows_style),
            Span::styled(self.value().to_string(), Style::default().fg(Color::White)),
            Span::styled(" >", arrows_style),
        ]);
        Paragraph::new(line).render(inner, buf);
    }
}
