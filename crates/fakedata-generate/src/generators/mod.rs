use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rand::{Rng, RngCore};

use crate::errors::GenerationError;
use crate::params::OptionsError;

pub mod network;
pub mod primitives;
pub mod semantic;

/// A bound, zero-option value function produced by resolving a generator.
pub type BoundFn = Box<dyn Fn(&mut dyn RngCore) -> String + Send + Sync>;

/// A generator that needs no options.
pub trait SimpleGenerator: Send + Sync {
    fn generate(&self, rng: &mut dyn RngCore) -> String;
}

/// A generator configured by an options string at bind time.
///
/// All parsing and I/O happens in `bind`; the returned function only draws
/// values.
pub trait ParametricGenerator: Send + Sync {
    fn bind(&self, options: &str) -> Result<BoundFn, OptionsError>;
}

/// The two mutually exclusive shapes a generator can take.
#[derive(Clone)]
pub enum GeneratorKind {
    Simple(Arc<dyn SimpleGenerator>),
    Parametric(Arc<dyn ParametricGenerator>),
}

/// A named, described registry entry.
#[derive(Clone)]
pub struct Generator {
    name: &'static str,
    description: &'static str,
    kind: GeneratorKind,
}

impl Generator {
    pub fn simple(
        name: &'static str,
        description: &'static str,
        generator: Arc<dyn SimpleGenerator>,
    ) -> Self {
        Self {
            name,
            description,
            kind: GeneratorKind::Simple(generator),
        }
    }

    pub fn parametric(
        name: &'static str,
        description: &'static str,
        generator: Arc<dyn ParametricGenerator>,
    ) -> Self {
        Self {
            name,
            description,
            kind: GeneratorKind::Parametric(generator),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn kind(&self) -> &GeneratorKind {
        &self.kind
    }

    pub fn is_parametric(&self) -> bool {
        matches!(self.kind, GeneratorKind::Parametric(_))
    }

    /// Bind this generator against a raw options string.
    ///
    /// Simple generators accept only an empty options string.
    pub fn bind(&self, options: &str) -> Result<BoundFn, GenerationError> {
        let bound = match &self.kind {
            GeneratorKind::Simple(generator) => {
                if options.trim().is_empty() {
                    let generator = Arc::clone(generator);
                    Ok(Box::new(move |rng: &mut dyn RngCore| generator.generate(rng)) as BoundFn)
                } else {
                    Err(OptionsError::Unexpected)
                }
            }
            GeneratorKind::Parametric(generator) => generator.bind(options),
        };

        bound.map_err(|source| GenerationError::InvalidOptions {
            generator: self.name.to_string(),
            options: options.to_string(),
            source,
        })
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("name", &self.name)
            .field("parametric", &self.is_parametric())
            .finish()
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.name, self.description)
    }
}

/// Immutable name → generator mapping, built once per process.
#[derive(Debug, Clone)]
pub struct GeneratorRegistry {
    generators: BTreeMap<&'static str, Generator>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            generators: BTreeMap::new(),
        };
        primitives::register(&mut registry);
        semantic::register(&mut registry);
        network::register(&mut registry);
        registry
    }

    /// Register a generator. Names are wiring constants, so a duplicate is a
    /// programming error.
    pub fn register(&mut self, generator: Generator) {
        let previous = self.generators.insert(generator.name, generator);
        debug_assert!(previous.is_none(), "duplicate generator name");
    }

    /// All generators, sorted by name.
    pub fn generators(&self) -> impl Iterator<Item = &Generator> {
        self.generators.values()
    }

    /// Only the generators that accept options, sorted by name.
    pub fn with_options(&self) -> impl Iterator<Item = &Generator> {
        self.generators().filter(|generator| generator.is_parametric())
    }

    pub fn generator(&self, name: &str) -> Option<&Generator> {
        self.generators.get(name)
    }

    pub fn generator_names(&self) -> Vec<&'static str> {
        self.generators.keys().copied().collect()
    }

    /// Look up `name` and bind it against `options`.
    pub fn resolve(&self, name: &str, options: &str) -> Result<BoundFn, GenerationError> {
        let generator = self
            .generator(name)
            .ok_or_else(|| GenerationError::UnknownGenerator(name.to_string()))?;
        generator.bind(options)
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Uniform pick over a fixed list of values.
pub struct ListGenerator {
    values: &'static [&'static str],
}

impl ListGenerator {
    pub fn new(values: &'static [&'static str]) -> Self {
        debug_assert!(!values.is_empty());
        Self { values }
    }
}

impl SimpleGenerator for ListGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> String {
        pick(self.values, rng).to_string()
    }
}

/// Two generators joined by a separator.
pub struct JoinedGenerator {
    left: Arc<dyn SimpleGenerator>,
    separator: &'static str,
    right: Arc<dyn SimpleGenerator>,
}

impl JoinedGenerator {
    pub fn new(
        left: Arc<dyn SimpleGenerator>,
        separator: &'static str,
        right: Arc<dyn SimpleGenerator>,
    ) -> Self {
        Self {
            left,
            separator,
            right,
        }
    }
}

impl SimpleGenerator for JoinedGenerator {
    fn generate(&self, rng: &mut dyn RngCore) -> String {
        let left = self.left.generate(rng);
        let right = self.right.generate(rng);
        format!("{left}{}{right}", self.separator)
    }
}

/// Any plain function can serve as a simple generator.
impl<F> SimpleGenerator for F
where
    F: Fn(&mut dyn RngCore) -> String + Send + Sync,
{
    fn generate(&self, rng: &mut dyn RngCore) -> String {
        self(rng)
    }
}

/// Uniform pick from a non-empty slice.
pub(crate) fn pick<'a, T>(values: &'a [T], rng: &mut dyn RngCore) -> &'a T {
    &values[rng.random_range(0..values.len())]
}
