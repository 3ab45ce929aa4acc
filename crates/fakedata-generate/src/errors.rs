use std::fmt;

use thiserror::Error;

use crate::params::OptionsError;

/// Errors emitted by the generator registry, resolver and renderers.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("unknown generator: {0}")]
    UnknownGenerator(String),
    #[error("invalid options '{options}' for generator '{generator}': {source}")]
    InvalidOptions {
        generator: String,
        options: String,
        #[source]
        source: OptionsError,
    },
    #[error(transparent)]
    Specifier(#[from] fakedata_core::Error),
    #[error("{0}")]
    Columns(ColumnErrors),
    #[error("template syntax error: {0}")]
    TemplateSyntax(#[from] handlebars::TemplateError),
    #[error("template execution error: {0}")]
    TemplateRender(#[from] handlebars::RenderError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Every per-token failure collected while resolving a set of columns.
#[derive(Debug)]
pub struct ColumnErrors(pub Vec<GenerationError>);

impl ColumnErrors {
    pub fn errors(&self) -> &[GenerationError] {
        &self.0
    }
}

impl fmt::Display for ColumnErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, err) in self.0.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}
