//! Small pure services shared by use cases and screens.

pub mod format;

pub use format::format_display_date;
