//! Billfold - a terminal client for employee expense reports.
//!
//! This crate provides a terminal-based front-end for an expense-report
//! ("note de frais") API: listing submitted bills, previewing attached
//! receipts, and submitting new bills with a receipt upload.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and formatting services.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "billfold";
