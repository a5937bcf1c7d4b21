//! # hwstatus API
//!
//! Talks to the homework statuses endpoint and turns its payload into a
//! chat message.
//!
//! The pipeline is [`StatusSource::fetch_statuses`] → [`validate`] →
//! [`extract`]. Each step returns a [`hwstatus_common::Result`] so the
//! caller decides what a failure means.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod extractor;
pub mod traits;
pub mod validator;
pub mod verdict;

pub use client::*;
pub use extractor::*;
pub use traits::*;
pub use validator::*;
pub use verdict::*;
