//! Row templates rendered with handlebars.
//!
//! Every simple generator becomes a zero-argument helper and every
//! parametric generator a variadic one, named by dropping the dots of the key
//! and upper-camel-casing the words (`domain.tld` becomes `DomainTld`):
//!
//! ```text
//! {{#each (Loop 2 5)}}{{Name}} <{{Email}}> {{Int 18 65}}{{#if (Odd @index)}} *{{/if}}
//! {{/each}}
//! ```

use std::io::Write;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use handlebars::{
    Context, Handlebars, Helper, HelperDef, RenderContext, RenderError, ScopedJson, no_escape,
};
use heck::ToUpperCamelCase;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde_json::Value;
use tracing::{debug, info};

use crate::engine::{emit, flush};
use crate::errors::GenerationError;
use crate::generators::{Generator, GeneratorKind, GeneratorRegistry, SimpleGenerator};
use crate::model::{GenerationReport, RowLimit};

const TEMPLATE_NAME: &str = "row";

/// Random source shared by every template helper.
pub type SharedRng = Arc<Mutex<ChaCha8Rng>>;

/// Template helper name for a generator key.
pub fn helper_name(key: &str) -> String {
    key.to_upper_camel_case()
}

/// A compiled template plus the helpers it may call.
pub struct RowTemplate {
    handlebars: Handlebars<'static>,
}

impl RowTemplate {
    /// Register the helpers and parse `source`.
    ///
    /// Syntax errors surface here; references to unknown names only fail
    /// when the template is rendered.
    pub fn compile(
        generators: &GeneratorRegistry,
        rng: SharedRng,
        source: &str,
    ) -> Result<Self, GenerationError> {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(no_escape);

        for generator in generators.generators() {
            let name = helper_name(generator.name());
            let helper: Box<dyn HelperDef + Send + Sync> = match generator.kind() {
                GeneratorKind::Simple(simple) => Box::new(SimpleHelper {
                    name: generator.name(),
                    generator: Arc::clone(simple),
                    rng: Arc::clone(&rng),
                }),
                GeneratorKind::Parametric(_) => Box::new(ParametricHelper {
                    generator: generator.clone(),
                    rng: Arc::clone(&rng),
                }),
            };
            handlebars.register_helper(&name, helper);
        }

        handlebars.register_helper("Loop", Box::new(LoopHelper { rng }));
        handlebars.register_helper("Odd", Box::new(ParityHelper { odd: true }));
        handlebars.register_helper("Even", Box::new(ParityHelper { odd: false }));

        handlebars.register_template_string(TEMPLATE_NAME, source)?;
        debug!(bytes = source.len(), "template compiled");
        Ok(Self { handlebars })
    }

    /// Render one independent pass.
    pub fn render(&self) -> Result<String, GenerationError> {
        Ok(self.handlebars.render(TEMPLATE_NAME, &Value::Null)?)
    }

    /// Render `limit` passes into `out`.
    ///
    /// The first failing pass stops the run, in stream mode too.
    pub fn run<W: Write>(
        &self,
        limit: RowLimit,
        out: &mut W,
    ) -> Result<GenerationReport, GenerationError> {
        let start = Instant::now();
        let stream = limit.is_stream();
        let mut report = GenerationReport::default();
        let mut remaining = match limit {
            RowLimit::Rows(rows) => Some(rows),
            RowLimit::Stream => None,
        };

        info!(limit = ?limit, "template rendering started");

        while remaining.is_none_or(|rows| rows > 0) {
            let rendered = self.render()?;
            if !emit(out, &rendered, stream, &mut report)? {
                break;
            }
            report.rows_written += 1;
            if let Some(rows) = remaining.as_mut() {
                *rows -= 1;
            }
        }

        if !report.output_closed {
            flush(out, &mut report)?;
        }

        info!(
            passes = report.rows_written,
            output_closed = report.output_closed,
            duration_ms = start.elapsed().as_millis() as u64,
            "template rendering finished"
        );
        Ok(report)
    }
}

struct SimpleHelper {
    name: &'static str,
    generator: Arc<dyn SimpleGenerator>,
    rng: SharedRng,
}

impl HelperDef for SimpleHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        if !h.params().is_empty() {
            return Err(RenderError::new(format!(
                "{} takes no arguments",
                helper_name(self.name)
            )));
        }
        let mut rng = lock(&self.rng)?;
        let value = self.generator.generate(&mut *rng);
        Ok(ScopedJson::Derived(Value::String(value)))
    }
}

struct ParametricHelper {
    generator: Generator,
    rng: SharedRng,
}

impl HelperDef for ParametricHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let mut options = Vec::with_capacity(h.params().len());
        for param in h.params() {
            options.push(option_text(self.generator.name(), param.value())?);
        }

        let bound = self
            .generator
            .bind(&options.join(","))
            .map_err(|err| RenderError::new(err.to_string()))?;
        let mut rng = lock(&self.rng)?;
        let value = bound(&mut *rng);
        Ok(ScopedJson::Derived(Value::String(value)))
    }
}

/// `Loop n` yields `[0, n)`; `Loop min max` draws the count from
/// `[min, max)`.
struct LoopHelper {
    rng: SharedRng,
}

impl HelperDef for LoopHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let count = match h.params().as_slice() {
            [n] => count_param("Loop", n.value())?,
            [min, max] => {
                let min = count_param("Loop", min.value())?;
                let max = count_param("Loop", max.value())?;
                if min > max {
                    return Err(RenderError::new(format!(
                        "Loop: min ({min}) is greater than max ({max})"
                    )));
                }
                if min == max {
                    min
                } else {
                    lock(&self.rng)?.random_range(min..max)
                }
            }
            _ => {
                return Err(RenderError::new(
                    "Loop expects one or two integer arguments",
                ));
            }
        };

        let indexes = (0..count).map(Value::from).collect();
        Ok(ScopedJson::Derived(Value::Array(indexes)))
    }
}

struct ParityHelper {
    odd: bool,
}

impl HelperDef for ParityHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'reg, 'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'reg, 'rc>, RenderError> {
        let name = if self.odd { "Odd" } else { "Even" };
        let value = match h.params().as_slice() {
            [value] => value.value().as_i64(),
            _ => None,
        }
        .ok_or_else(|| RenderError::new(format!("{name} expects one integer argument")))?;

        let odd = value % 2 != 0;
        Ok(ScopedJson::Derived(Value::Bool(odd == self.odd)))
    }
}

fn option_text(generator: &str, value: &Value) -> Result<String, RenderError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => Err(RenderError::new(format!(
            "{}: arguments must be strings or numbers",
            helper_name(generator)
        ))),
    }
}

fn count_param(helper: &str, value: &Value) -> Result<u64, RenderError> {
    value.as_u64().ok_or_else(|| {
        RenderError::new(format!(
            "{helper}: expected a non-negative integer, got {value}"
        ))
    })
}

fn lock(rng: &SharedRng) -> Result<MutexGuard<'_, ChaCha8Rng>, RenderError> {
    rng.lock()
        .map_err(|_| RenderError::new("random source poisoned"))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn compile(source: &str) -> Result<RowTemplate, GenerationError> {
        let rng = Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(31)));
        RowTemplate::compile(&GeneratorRegistry::new(), rng, source)
    }

    #[test]
    fn helper_names_drop_dots_and_camel_case() {
        assert_eq!(helper_name("domain.tld"), "DomainTld");
        assert_eq!(helper_name("mac.address"), "MacAddress");
        assert_eq!(helper_name("product.category"), "ProductCategory");
        assert_eq!(helper_name("int"), "Int");
    }

    #[test]
    fn loop_renders_fixed_count_with_parity() {
        let template =
            compile("{{#each (Loop 4)}}{{#if (Even @index)}}e{{else}}o{{/if}}{{/each}}")
                .expect("compile");
        assert_eq!(template.render().expect("render"), "eoeo");
    }

    #[test]
    fn loop_with_equal_bounds_uses_min() {
        let template = compile("{{#each (Loop 3 3)}}{{this}}{{/each}}").expect("compile");
        assert_eq!(template.render().expect("render"), "012");
    }

    #[test]
    fn loop_random_count_stays_below_max() {
        let template = compile("{{#each (Loop 1 4)}}x{{/each}}").expect("compile");
        for _ in 0..200 {
            let len = template.render().expect("render").len();
            assert!((1..4).contains(&len), "{len}");
        }
    }

    #[test]
    fn loop_rejects_inverted_bounds() {
        let template = compile("{{#each (Loop 5 2)}}x{{/each}}").expect("compile");
        assert!(matches!(
            template.render(),
            Err(GenerationError::TemplateRender(_))
        ));
    }

    #[test]
    fn values_are_not_html_escaped() {
        let template = compile("{{Enum \"<a&b>\"}}").expect("compile");
        assert_eq!(template.render().expect("render"), "<a&b>");
    }

    #[test]
    fn simple_helper_rejects_arguments() {
        let template = compile("{{Name 3}}").expect("compile");
        assert!(template.render().is_err());
    }

    #[test]
    fn parametric_errors_surface_as_render_errors() {
        let template = compile("{{Int 9 1}}").expect("compile");
        let err = template.render().unwrap_err();
        assert!(err.to_string().contains("greater than"), "{err}");
    }
}
