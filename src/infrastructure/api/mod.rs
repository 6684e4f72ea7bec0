//! Bill store API adapter.

mod client;
mod dto;

pub use client::BilledApiClient;
