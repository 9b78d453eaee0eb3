//! swagview - Entry point
//!
//! Loads a Swagger 2.0 document and writes its HTML documentation page, or
//! prints the example payload of a single definition.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use tracing::{error, info};

use swagview_config::{ConfigLoader, LogFormat, LoggingConfig, SwagviewConfig};
use swagview_docs::{example_json, DocsViewer, Reference, SwaggerDocument};
use swagview_telemetry::{init_logging, LogConfig};

/// Version of the swagview binary.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Config file picked up from the working directory when `--config` is absent.
const DEFAULT_CONFIG_FILE: &str = "swagview.toml";

/// Command-line arguments.
#[derive(Debug, PartialEq, Eq)]
struct Args {
    /// Path to configuration file.
    config: Option<PathBuf>,
    /// Where to write the rendered page. Stdout when absent.
    output: Option<PathBuf>,
    /// Definition whose example should be printed instead of the page.
    reference: Option<String>,
    /// Swagger document to load.
    document: PathBuf,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Run(Args),
    Help,
    Version,
}

impl Args {
    fn parse() -> Command {
        match Self::parse_from(std::env::args().skip(1)) {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                eprintln!("Use --help for usage information");
                std::process::exit(1);
            }
        }
    }

    fn parse_from<I>(args: I) -> Result<Command, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut config = None;
        let mut output = None;
        let mut reference = None;
        let mut document = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    config = Some(PathBuf::from(value_of(&arg, args.next())?));
                }
                "--output" | "-o" => {
                    output = Some(PathBuf::from(value_of(&arg, args.next())?));
                }
                "--ref" | "-r" => {
                    reference = Some(value_of(&arg, args.next())?);
                }
                "--help" | "-h" => return Ok(Command::Help),
                "--version" | "-v" => return Ok(Command::Version),
                other if other.starts_with('-') => {
                    return Err(format!("Unknown argument: {other}"));
                }
                other => {
                    if document.is_some() {
                        return Err(format!("Unexpected argument: {other}"));
                    }
                    document = Some(PathBuf::from(other));
                }
            }
        }

        let document = document.ok_or_else(|| "Missing <DOCUMENT> argument".to_string())?;

        Ok(Command::Run(Self {
            config,
            output,
            reference,
            document,
        }))
    }
}

fn value_of(flag: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("Missing value for {flag}"))
}

fn print_help() {
    println!(
        r"swagview - Swagger 2.0 documentation viewer

USAGE:
    swagview [OPTIONS] <DOCUMENT>

ARGS:
    <DOCUMENT>             Swagger 2.0 document (.json, .yaml or .yml)

OPTIONS:
    -c, --config <PATH>    Path to configuration file (TOML or JSON)
    -o, --output <PATH>    Write the HTML page to PATH instead of stdout
    -r, --ref <NAME>       Print the example payload of definition NAME
    -h, --help             Print help information
    -v, --version          Print version information

ENVIRONMENT VARIABLES:
    SWAGVIEW__LOGGING__LEVEL        Log level or filter (default: warn)
    SWAGVIEW__LOGGING__FORMAT       json or pretty (default: pretty)
    SWAGVIEW__RESOLVER__MAX_DEPTH   Nested definitions expanded per path (default: 32)
    SWAGVIEW__RESOLVER__MAX_NODES   Definitions expanded per example (default: 10000)
    SWAGVIEW__RESOLVER__REF_PREFIX  Pointer prefix of definitions (default: #/definitions/)
    SWAGVIEW__RENDER__JSON_INDENT   Indent width of examples (default: 4)
    SWAGVIEW__RENDER__PAGE_TITLE    Page title override

EXAMPLES:
    # Render a page
    swagview api.swagger.json --output api.html

    # Inspect one definition
    swagview api.swagger.json --ref das_dota2GetFeFightAnalysisReply
"
    );
}

fn main() {
    let args = match Args::parse() {
        Command::Run(args) => args,
        Command::Help => {
            print_help();
            return;
        }
        Command::Version => {
            println!("swagview {VERSION}");
            return;
        }
    };

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("swagview: {e:#}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&log_config(&config.logging)) {
        eprintln!("swagview: {e}");
        std::process::exit(1);
    }

    let stdout = io::stdout();
    if let Err(e) = execute(&args, &config, &mut stdout.lock()) {
        if config.logging.enabled {
            error!(error = %format!("{e:#}"), "swagview failed");
        } else {
            eprintln!("swagview: {e:#}");
        }
        std::process::exit(1);
    }
}

fn load_config(args: &Args) -> anyhow::Result<SwagviewConfig> {
    let loader = ConfigLoader::new().with_defaults().with_dotenv()?;
    let loader = match &args.config {
        Some(path) => loader
            .with_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => loader.with_optional_file(DEFAULT_CONFIG_FILE)?,
    };

    Ok(loader.with_env_prefix("SWAGVIEW").load()?)
}

fn log_config(logging: &LoggingConfig) -> LogConfig {
    LogConfig {
        enabled: logging.enabled,
        level: logging.level.clone(),
        json_format: logging.format == LogFormat::Json,
        ansi: logging.ansi_enabled,
        file_line_info: logging.include_location,
        ..LogConfig::default()
    }
}

fn execute(args: &Args, config: &SwagviewConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let document = SwaggerDocument::from_path(&args.document)
        .with_context(|| format!("Failed to load {}", args.document.display()))?;

    let mut viewer = DocsViewer::new()
        .with_options(config.resolver.to_options())
        .with_json_indent(config.render.json_indent);
    if let Some(title) = &config.render.page_title {
        viewer = viewer.with_page_title(title);
    }
    viewer.load_document(document);

    if let Some(name) = &args.reference {
        let reference = Reference::new(format!("{}{name}", config.resolver.ref_prefix));
        let text = match viewer.resolve_ref(&reference) {
            Some(example) => example_json(&example, config.render.json_indent)?,
            None => "null".to_string(),
        };
        writeln!(out, "{text}")?;
        return Ok(());
    }

    let html = viewer
        .render()
        .ok_or_else(|| anyhow!("no document loaded"))??;

    match &args.output {
        Some(path) => {
            fs::write(path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(output = %path.display(), bytes = html.len(), "Wrote documentation page");
        }
        None => out.write_all(html.as_bytes())?,
    }

    Ok(())
}
