//! Receipt file picker widget.

use std::cmp::Ordering;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, StatefulWidget, Widget},
};

use crate::domain::entities::ReceiptFile;

/// Outcome of a key press inside the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilePickerAction {
    /// A file was picked.
    Pick(PathBuf),
    /// The picker was dismissed.
    Close,
    /// Nothing to report.
    None,
}

#[derive(Debug, Clone)]
struct DirEntry {
    path: PathBuf,
    is_dir: bool,
    name: String,
}

/// Embedded directory browser for picking a receipt file.
///
/// Any file can be selected; files outside the receipt allow-list are
/// dimmed so the user sees the constraint before the upload refuses them.
pub struct FilePicker {
    current_dir: PathBuf,
    entries: Vec<DirEntry>,
    state: ListState,
    show_hidden: bool,
}

impl FilePicker {
    /// Creates a picker rooted at the working directory.
    #[must_use]
    pub fn new() -> Self {
        let root = env::current_dir().unwrap_or_else(|_| {
            env::var("HOME").map_or_else(|_| PathBuf::from("/"), PathBuf::from)
        });
        let mut picker = Self {
            current_dir: root.clone(),
            entries: Vec::new(),
            state: ListState::default(),
            show_hidden: false,
        };
        picker.load_entries(&root);
        picker
    }

    fn load_entries(&mut self, path: &Path) {
        self.entries.clear();

        if let Some(parent) = path.parent() {
            self.entries.push(DirEntry {
                path: parent.to_path_buf(),
                is_dir: true,
                name: "..".to_string(),
            });
        }

        if let Ok(read_dir) = fs::read_dir(path) {
            let mut entries: Vec<DirEntry> = read_dir
                .filter_map(Result::ok)
                .filter(|entry| {
                    if self.show_hidden {
                        return true;
                    }
                    !entry
                        .path()
                        .file_name()
                        .is_some_and(|s| s.to_string_lossy().starts_with('.'))
                })
                .map(|entry| {
                    let path = entry.path();
                    let is_dir = path.is_dir();
                    let name = path
                        .file_name()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .to_string();
                    DirEntry { path, is_dir, name }
                })
                .collect();

            entries.sort_by(|a, b| match (a.is_dir, b.is_dir) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => a.name.cmp(&b.name),
            });

            self.entries.extend(entries);
        }

        self.state
            .select(if self.entries.is_empty() { None } else { Some(0) });
    }

    /// Shows or hides dotfiles.
    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        let path = self.current_dir.clone();
        self.load_entries(&path);
    }

    /// Handles a key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> FilePickerAction {
        match key.code {
            KeyCode::Esc => FilePickerAction::Close,
            KeyCode::Up | KeyCode::Char('k') => {
                self.previous();
                FilePickerAction::None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.next();
                FilePickerAction::None
            }
            KeyCode::Char('H') => {
                self.toggle_hidden();
                FilePickerAction::None
            }
            KeyCode::Backspace => {
                self.enter_parent();
                FilePickerAction::None
            }
            KeyCode::Enter => match self.selected_entry().cloned() {
                Some(entry) if entry.name == ".." => {
                    self.enter_parent();
                    FilePickerAction::None
                }
                Some(entry) if entry.is_dir => {
                    self.current_dir.clone_from(&entry.path);
                    self.load_entries(&entry.path);
                    FilePickerAction::None
                }
                Some(entry) => FilePickerAction::Pick(entry.path),
                None => FilePickerAction::None,
            },
            _ => FilePickerAction::None,
        }
    }

    fn enter_parent(&mut self) {
        let parent = self
            .current_dir
            .parent()
            .map_or_else(|| self.current_dir.clone(), Path::to_path_buf);
        self.current_dir = parent.clone();
        self.load_entries(&parent);
    }

    fn next(&mut self) {
        let i = match self.state.selected() {
            Some(i) if i >= self.entries.len().saturating_sub(1) => 0,
            Some(i) => i + 1,
            None => 0,
        };
        self.state.select(Some(i));
    }

    fn previous(&mut self) {
        let i = match self.state.selected() {
            Some(0) | None => self.entries.len().saturating_sub(1),
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    fn selected_entry(&self) -> Option<&DirEntry> {
        self.state.selected().and_then(|i| self.entries.get(i))
    }

    /// Renders the picker over the given area.
    pub fn render(&mut self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Justificatif - choisir un fichier ")
            .title_style(Style::default().add_modifier(Modifier::BOLD));

        let inner_area = block.inner(area);

        let layout =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner_area);
        let list_area = layout[0];
        let footer_area = layout[1];

        block.render(area, buf);

        let items: Vec<ListItem> = self
            .entries
            .iter()
            .map(|entry| {
                let style = if entry.is_dir {
                    Style::default().fg(Color::Blue)
                } else if ReceiptFile::from_path(&entry.path).is_ok() {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(entry.name.clone()).style(style)
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");

        StatefulWidget::render(list, list_area, buf, &mut self.state);

        let footer = Line::from(vec![
            Span::raw(" [Esc] Annuler | [Entrée] Choisir | "),
            Span::styled("jpg, jpeg, png", Style::default().fg(Color::Yellow)),
        ])
        .style(Style::default().fg(Color::Gray));

        Widget::render(footer, footer_area, buf);
    }
}

impl Default for FilePicker {
    fn default() -> Self {
        Self::new()
    }
}
