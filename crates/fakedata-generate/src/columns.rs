use std::fmt;

use fakedata_core::FieldSpec;
use rand::RngCore;

use crate::errors::{ColumnErrors, GenerationError};
use crate::generators::{BoundFn, GeneratorRegistry};

/// One requested output field bound to its value function.
pub struct Column {
    pub name: String,
    pub key: String,
    pub options: String,
    bound: BoundFn,
}

impl Column {
    pub fn new(spec: FieldSpec, bound: BoundFn) -> Self {
        Self {
            name: spec.name,
            key: spec.key,
            options: spec.options,
            bound,
        }
    }

    /// Draw a fresh value.
    pub fn generate(&self, rng: &mut dyn RngCore) -> String {
        (self.bound)(rng)
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Ordered, resolved columns.
#[derive(Debug, Default)]
pub struct Columns(Vec<Column>);

impl Columns {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.0.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.0.iter().map(|column| column.name.as_str()).collect()
    }

    pub fn as_slice(&self) -> &[Column] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Columns {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Resolve every specifier token against the registry.
///
/// All tokens are checked before failing so that one run reports every bad
/// specifier. No columns are returned unless all of them resolve.
pub fn resolve_columns<S: AsRef<str>>(
    registry: &GeneratorRegistry,
    tokens: &[S],
) -> Result<Columns, GenerationError> {
    let mut columns = Vec::with_capacity(tokens.len());
    let mut errors = Vec::new();

    for token in tokens {
        match resolve_column(registry, token.as_ref()) {
            Ok(column) => columns.push(column),
            Err(err) => errors.push(err),
        }
    }

    if !errors.is_empty() {
        return Err(GenerationError::Columns(ColumnErrors(errors)));
    }

    tracing::debug!(columns = columns.len(), "columns resolved");
    Ok(Columns(columns))
}

fn resolve_column(registry: &GeneratorRegistry, token: &str) -> Result<Column, GenerationError> {
    let spec = FieldSpec::parse(token)?;
    let bound = registry.resolve(&spec.key, &spec.options)?;
    Ok(Column::new(spec, bound))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_default_to_key() {
        let registry = GeneratorRegistry::new();
        let columns = resolve_columns(&registry, &["email", "login=username"]).expect("resolve");
        assert_eq!(columns.names(), vec!["email", "login"]);
        let keys: Vec<&str> = columns.iter().map(|column| column.key.as_str()).collect();
        assert_eq!(keys, vec!["email", "username"]);
    }

    #[test]
    fn collects_every_failure() {
        let registry = GeneratorRegistry::new();
        let err = resolve_columns(&registry, &["nope", "int:9,1", "email", "=x"]).unwrap_err();
        let GenerationError::Columns(errors) = err else {
            panic!("expected aggregated column errors");
        };
        assert_eq!(errors.errors().len(), 3);
        assert!(matches!(
            errors.errors()[0],
            GenerationError::UnknownGenerator(ref key) if key == "nope"
        ));
        assert!(matches!(
            errors.errors()[1],
            GenerationError::InvalidOptions { ref generator, .. } if generator == "int"
        ));
        assert!(matches!(errors.errors()[2], GenerationError::Specifier(_)));
    }
}
