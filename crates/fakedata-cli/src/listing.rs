use std::fmt::Write as _;
use std::io::{self, Write};

use fakedata_generate::generators::Generator;
use fakedata_generate::helper_name;
use rand::RngCore;

use crate::CliError;

const EXAMPLE_COUNT: usize = 5;

/// One line per generator: the name padded to the longest name plus two,
/// then the description.
pub fn write_generator_list<'a, W, I>(out: &mut W, generators: I) -> Result<(), CliError>
where
    W: Write,
    I: IntoIterator<Item = &'a Generator>,
{
    let generators: Vec<&Generator> = generators.into_iter().collect();
    let width = generators
        .iter()
        .map(|generator| generator.name().len())
        .max()
        .unwrap_or(0)
        + 2;

    let mut text = String::new();
    for generator in generators {
        let _ = writeln!(
            text,
            "{:<width$}{}",
            generator.name(),
            generator.description()
        );
    }
    write_text(out, &text)
}

/// Description, template helper name and a few values drawn with default
/// options.
pub fn write_generator_help<W: Write>(
    out: &mut W,
    generator: &Generator,
    rng: &mut dyn RngCore,
) -> Result<(), CliError> {
    let bound = generator.bind("")?;

    let mut text = String::new();
    let _ = writeln!(text, "Description: {}", generator.description());
    let _ = writeln!(text, "Template helper: {}", helper_name(generator.name()));
    let _ = writeln!(text, "\nExample:\n");
    for _ in 0..EXAMPLE_COUNT {
        let _ = writeln!(text, "{}", bound(rng));
    }
    write_text(out, &text)
}

/// A reader that stops early (`fakedata -G | head`) is not an error.
fn write_text<W: Write>(out: &mut W, text: &str) -> Result<(), CliError> {
    match out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("output closed by reader");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}
