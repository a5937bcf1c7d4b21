//! # hwstatus Config
//!
//! Configuration for the homework status bot.
//!
//! Everything is read once from the process environment (optionally
//! seeded from a `.env` file), validated, and handed to the rest of the
//! workspace as an immutable [`Config`] value.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
