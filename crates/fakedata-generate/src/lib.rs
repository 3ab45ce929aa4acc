//! Fake data generation engine.
//!
//! Column specifiers (`name=key:options`) resolve against a
//! [`GeneratorRegistry`] into [`Columns`], which the [`GenerationEngine`]
//! turns into formatted rows. Templates expose the same generators as
//! handlebars helpers through [`RowTemplate`].

pub mod columns;
pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod output;
pub mod params;
pub mod template;

pub use columns::{Column, Columns, resolve_columns};
pub use engine::{GenerationEngine, generate_row};
pub use errors::{ColumnErrors, GenerationError};
pub use generators::{Generator, GeneratorKind, GeneratorRegistry};
pub use model::{GenerateOptions, GenerationReport, RowLimit};
pub use output::{Formatter, OutputFormat};
pub use template::{RowTemplate, SharedRng, helper_name};
