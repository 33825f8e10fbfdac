//! # Parlance
//!
//! Command-line host for the Parlance localization engine.
//!
//! The binary loads configuration, installs logging, builds a
//! [`parlance_i18n::Registry`] and runs one command against it.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod error;
pub mod logging;

pub use cli::*;
pub use error::*;
pub use logging::*;
