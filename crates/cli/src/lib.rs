//! The pustaka search screen.
//!
//! - [`controller`]: the state machine behind the screen
//! - [`worker`]: runs fetches off the UI thread
//! - [`tui`]: interactive terminal adapter
//! - [`plain`]: one-shot search for scripts and pipes
//! - [`logging`]: subscriber setup for both modes

pub mod controller;
pub mod logging;
pub mod plain;
pub mod tui;
pub mod worker;

pub use controller::{Controller, FetchTicket, Phase, ResultRow, ScreenView};
pub use worker::{FetchOutcome, Worker};
