//! # hwstatus Bot
//!
//! Polls the homework statuses API and relays review status changes to a
//! Telegram chat.
//!
//! This is the main binary crate: it wires configuration, the API client
//! and the Telegram notifier into a single poll loop.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod bot;
pub mod error;
pub mod notifier;
pub mod poll_loop;
pub mod telegram;

pub use bot::*;
pub use error::*;
pub use notifier::*;
pub use poll_loop::*;
pub use telegram::*;
