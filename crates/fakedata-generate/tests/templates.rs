use std::sync::{Arc, Mutex};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use fakedata_generate::errors::GenerationError;
use fakedata_generate::{GeneratorRegistry, RowLimit, RowTemplate, SharedRng, helper_name};

fn shared_rng(seed: u64) -> SharedRng {
    Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed)))
}

fn compile(source: &str, seed: u64) -> Result<RowTemplate, GenerationError> {
    RowTemplate::compile(&GeneratorRegistry::new(), shared_rng(seed), source)
}

#[test]
fn int_helper_stays_in_range() {
    let template = compile("{{ Int 12 15 }}", 1).expect("compile");
    for _ in 0..1_000 {
        let value: i64 = template.render().expect("render").parse().expect("integer");
        assert!((12..=15).contains(&value), "{value}");
    }
}

#[test]
fn every_generator_has_a_helper() {
    let registry = GeneratorRegistry::new();
    for generator in registry.generators() {
        let source = if generator.is_parametric() {
            match generator.name() {
                "file" => format!(
                    "{{{{File \"{}/tests/fixtures/palette.txt\"}}}}",
                    env!("CARGO_MANIFEST_DIR")
                ),
                name => format!("{{{{{} }}}}", helper_name(name)),
            }
        } else {
            format!("{{{{{}}}}}", helper_name(generator.name()))
        };
        let template = RowTemplate::compile(&registry, shared_rng(2), &source).expect("compile");
        let value = template.render().expect("render");
        assert!(!value.is_empty(), "{source}");
    }
}

#[test]
fn quoted_arguments_are_passed_through() {
    let template = compile("{{Enum \"a\" \"b\"}}-{{Date \"2016-01-01\" \"2016-02-01\"}}", 3)
        .expect("compile");
    for _ in 0..200 {
        let value = template.render().expect("render");
        assert!(
            value.starts_with("a-2016-01-") || value.starts_with("b-2016-01-"),
            "{value}"
        );
    }
}

#[test]
fn loop_with_names_and_parity() {
    let source = "{{#each (Loop 3)}}{{@index}}:{{#if (Odd @index)}}odd{{else}}even{{/if}};{{/each}}";
    let template = compile(source, 4).expect("compile");
    assert_eq!(template.render().expect("render"), "0:even;1:odd;2:even;");
}

#[test]
fn undefined_helper_fails_at_render() {
    let template = compile("{{ NoSuchThing }}", 5).expect("syntax is fine");
    assert!(matches!(
        template.render(),
        Err(GenerationError::TemplateRender(_))
    ));
}

#[test]
fn malformed_template_fails_to_compile() {
    assert!(matches!(
        compile("{{#each (Loop 2)}}x", 6),
        Err(GenerationError::TemplateSyntax(_))
    ));
}

#[test]
fn run_repeats_passes_and_is_deterministic() {
    let render = |seed| {
        let template = compile("{{Name}} <{{Email}}>\n", seed).expect("compile");
        let mut out = Vec::new();
        let report = template.run(RowLimit::Rows(4), &mut out).expect("run");
        assert_eq!(report.rows_written, 4);
        String::from_utf8(out).expect("utf8")
    };
    let first = render(7);
    assert_eq!(first.lines().count(), 4);
    assert_eq!(first, render(7));
}

#[test]
fn stream_stops_at_first_render_error() {
    let template = compile("x{{Int 9 1}}\n", 8).expect("compile");
    let mut out = Vec::new();
    let result = template.run(RowLimit::Stream, &mut out);
    assert!(matches!(result, Err(GenerationError::TemplateRender(_))));
    assert!(out.is_empty());
}
