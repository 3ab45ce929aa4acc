mod listing;
mod logging;
mod settings;

use std::io::{self, BufWriter, IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};

use clap::{ArgAction, CommandFactory, Parser};
use fakedata_generate::{
    GenerateOptions, GenerationEngine, GenerationError, GeneratorRegistry, OutputFormat, RowLimit,
    RowTemplate, resolve_columns,
};
use listing::{write_generator_help, write_generator_list};
use logging::init_logging;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use settings::{Settings, SettingsError, load_settings};
use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_LIMIT: u64 = 10;
const DEFAULT_SEPARATOR: &str = " ";
const DEFAULT_TABLE: &str = "TABLE";

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("unable to read template '{path}': {source}")]
    TemplateRead {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("logging setup failed: {0}")]
    Logging(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "fakedata",
    version,
    about = "Generate fake data from field specifiers or templates",
    override_usage = "fakedata [OPTIONS] [SPECIFIER]...\n       fakedata [OPTIONS] --template <PATH>\n       <template> | fakedata [OPTIONS]"
)]
struct Cli {
    /// Fields to generate, as [name=]generator[:options].
    #[arg(value_name = "SPECIFIER")]
    specifiers: Vec<String>,
    /// Number of rows (or template passes) to produce. [default: 10]
    #[arg(short, long, value_name = "N")]
    limit: Option<u64>,
    /// Output format: column, csv, tab, sql or ndjson. [default: column]
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<OutputFormat>,
    /// Separator for the column format. [default: " "]
    #[arg(short, long, value_name = "SEP")]
    separator: Option<String>,
    /// Table name for the sql format. [default: TABLE]
    #[arg(short, long, value_name = "NAME")]
    table: Option<String>,
    /// Write a header row first (column, csv and tab formats).
    #[arg(short = 'H', long)]
    header: bool,
    /// Produce rows until the reader goes away or the process is stopped.
    #[arg(short = 'S', long)]
    stream: bool,
    /// Render this template instead of specifiers.
    #[arg(short = 'T', long, value_name = "PATH")]
    template: Option<PathBuf>,
    /// List every generator.
    #[arg(short = 'G', long)]
    generators: bool,
    /// List generators that accept options.
    #[arg(short = 'c', long)]
    generators_with_options: bool,
    /// Describe one generator and show example values.
    #[arg(short, long, value_name = "NAME")]
    generator: Option<String>,
    /// Seed for the random source; runs with the same seed repeat.
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
    /// TOML file with defaults for limit, format, separator, table and seed.
    #[arg(long, env = "FAKEDATA_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,
    /// More log output on stderr (-v info, -vv debug).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    /// Log as JSON lines.
    #[arg(long)]
    log_json: bool,
}

/// Flags merged over settings-file values over built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RunConfig {
    limit: RowLimit,
    format: OutputFormat,
    separator: String,
    table: String,
    header: bool,
    seed: u64,
}

impl RunConfig {
    fn resolve(cli: &Cli, settings: Settings) -> Result<Self, CliError> {
        let format = match (cli.format, settings.format) {
            (Some(format), _) => format,
            (None, Some(name)) => name.parse().map_err(CliError::InvalidConfig)?,
            (None, None) => OutputFormat::Column,
        };
        let limit = if cli.stream {
            RowLimit::Stream
        } else {
            RowLimit::Rows(cli.limit.or(settings.limit).unwrap_or(DEFAULT_LIMIT))
        };

        Ok(Self {
            limit,
            format,
            separator: cli
                .separator
                .clone()
                .or(settings.separator)
                .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string()),
            table: cli
                .table
                .clone()
                .or(settings.table)
                .unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            header: cli.header,
            seed: cli.seed.or(settings.seed).unwrap_or_else(rand::random),
        })
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_logging(cli.verbose, cli.log_json) {
        eprintln!("fakedata: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fakedata: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let registry = GeneratorRegistry::new();
    let stdout = io::stdout();

    if cli.generators {
        return write_generator_list(&mut stdout.lock(), registry.generators());
    }
    if cli.generators_with_options {
        return write_generator_list(&mut stdout.lock(), registry.with_options());
    }

    let settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    let config = RunConfig::resolve(&cli, settings)?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    info!(seed = config.seed, "random source seeded");

    if let Some(name) = &cli.generator {
        let generator = registry
            .generator(name)
            .ok_or_else(|| GenerationError::UnknownGenerator(name.clone()))?;
        return write_generator_help(&mut stdout.lock(), generator, &mut rng);
    }

    if let Some(source) = find_template(&cli)? {
        if !cli.specifiers.is_empty() {
            warn!(
                specifiers = cli.specifiers.len(),
                "template given, ignoring specifiers"
            );
        }
        let template = RowTemplate::compile(&registry, Arc::new(Mutex::new(rng)), &source)?;
        template.run(config.limit, &mut BufWriter::new(stdout.lock()))?;
        return Ok(());
    }

    if cli.specifiers.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let columns = resolve_columns(&registry, cli.specifiers.as_slice())?;
    let formatter = config.format.formatter(&config.separator, &config.table);
    let engine = GenerationEngine::new(GenerateOptions {
        limit: config.limit,
        header: config.header,
    });
    info!(format = %config.format, "column mode");
    let mut out = BufWriter::new(stdout.lock());
    engine.run(&columns, formatter.as_ref(), &mut rng, &mut out)?;
    Ok(())
}

/// The `--template` file, otherwise stdin when it is piped and no specifiers
/// were given. An empty template counts as none.
fn find_template(cli: &Cli) -> Result<Option<String>, CliError> {
    let source = if let Some(path) = &cli.template {
        std::fs::read_to_string(path).map_err(|source| CliError::TemplateRead {
            path: path.display().to_string(),
            source,
        })?
    } else if cli.specifiers.is_empty() && !io::stdin().is_terminal() {
        let mut source = String::new();
        io::stdin()
            .read_to_string(&mut source)
            .map_err(|source| CliError::TemplateRead {
                path: "<stdin>".to_string(),
                source,
            })?;
        source
    } else {
        return Ok(None);
    };

    if source.trim().is_empty() {
        return Ok(None);
    }
    Ok(Some(source))
}
