//! # Parlance Config
//!
//! Typed configuration for the Parlance localization engine.
//!
//! This crate provides configuration loading from TOML with environment
//! overrides and validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod error;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use error::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
