//! Core contracts and static data for fakedata.
//!
//! This crate defines the field specifier grammar, the embedded value pools,
//! and the error type shared by the generator engine and the CLI.

pub mod data;
pub mod error;
pub mod spec;

pub use error::{Error, Result};
pub use spec::FieldSpec;
