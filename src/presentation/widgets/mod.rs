//! Reusable UI widgets.

mod file_picker;
mod input;
mod select;

pub use file_picker::{FilePicker, FilePickerAction};
pub use input::TextInput;
pub use select::SelectInput;
