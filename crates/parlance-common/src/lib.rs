//! # Parlance Common
//!
//! Shared types and test helpers for the Parlance workspace.
//!
//! This crate provides the locale code newtype used by every other crate,
//! plus (behind the `testing` feature) fixtures for writing translation
//! catalogs to disk.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod types;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use types::*;
