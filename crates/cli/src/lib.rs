use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use storage::Storage;
use tracing_subscriber::EnvFilter;
use viewer_core::{
    DocumentDimensions, InMemorySizer, InMemoryWindow, Size, Viewport, ViewportCallbacks,
    ViewportConfig,
};

mod script;

pub use script::{Extent, Script, SizerReport, Step, StepReport};

const LOG_ENV: &str = "VIEWPORT_LOG";

#[derive(Debug, Parser)]
#[command(name = "viewport-cli")]
#[command(about = "Headless document viewport driver")]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Report which scrollbars a document needs in a window.
    Scrollbars {
        #[arg(long, value_name = "WxH", value_parser = parse_extent)]
        window: Size,
        #[arg(long, value_name = "WxH", value_parser = parse_extent)]
        document: Size,
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,
        #[arg(long, default_value_t = 0.0)]
        scrollbar_width: f64,
        #[arg(long, default_value_t = 0.0)]
        toolbar_height: f64,
    },
    /// Replay a JSON session script and print one JSON report per step.
    Simulate {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Inspect or create the stored viewport configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Print CLI version.
    Version,
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print the effective configuration as JSON.
    Show(ConfigSource),
    /// Write the default configuration to the data directory.
    Init {
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
        /// Overwrite an existing configuration.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Args)]
struct ConfigSource {
    /// Read this config file instead of the stored one.
    #[arg(long, value_name = "FILE", conflicts_with = "root")]
    config: Option<PathBuf>,
    /// Data directory holding `viewport.json`.
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ScrollbarsOutput {
    horizontal: bool,
    vertical: bool,
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    init_tracing();

    match cli.command {
        Commands::Scrollbars { window, document, zoom, scrollbar_width, toolbar_height } => {
            let config = ViewportConfig::default()
                .with_scrollbar_width(scrollbar_width)
                .with_top_toolbar_height(toolbar_height);
            run_scrollbars(window, document, zoom, config)
        }
        Commands::Simulate { script, config } => {
            let config = match config {
                Some(path) => load_config_file(&path)?,
                None => ViewportConfig::default(),
            };
            run_simulate(&script, config)
        }
        Commands::Config(ConfigCommand::Show(source)) => run_config_show(&source),
        Commands::Config(ConfigCommand::Init { root, force }) => {
            run_config_init(root.as_deref(), force)
        }
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    // A subscriber may already be installed when `run` is called more than once.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run_scrollbars(window: Size, document: Size, zoom: f64, config: ViewportConfig) -> Result<()> {
    if !(zoom.is_finite() && zoom > 0.0) {
        anyhow::bail!("--zoom must be a positive number, got {zoom}");
    }

    let mut viewport = new_viewport(window, config)?;
    viewport.set_document_dimensions(DocumentDimensions::new(document.width, document.height));

    let needs = viewport.document_needs_scrollbars(zoom);
    let payload = ScrollbarsOutput { horizontal: needs.horizontal, vertical: needs.vertical };

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

fn run_simulate(path: &Path, config: ViewportConfig) -> Result<()> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    let script: Script = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse script {}", path.display()))?;

    let window = Size::new(script.window.width, script.window.height);
    let mut viewport = new_viewport(window, config)?;

    if let Some(document) = script.document() {
        viewport.set_document_dimensions(document);
    }

    println!("{}", serde_json::to_string(&StepReport::capture(0, "load", &viewport))?);

    for (index, step) in script.steps.iter().enumerate() {
        tracing::debug!(step = index + 1, op = step.name(), "applying script step");
        step.apply(&mut viewport)
            .with_context(|| format!("script step {} ({}) failed", index + 1, step.name()))?;

        let report = StepReport::capture(index + 1, step.name(), &viewport);
        println!("{}", serde_json::to_string(&report)?);
    }

    Ok(())
}

fn run_config_show(source: &ConfigSource) -> Result<()> {
    let config = match (&source.config, &source.root) {
        (Some(path), _) => load_config_file(path)?,
        (None, root) => storage_at(root.as_deref())?
            .load_config()
            .context("failed to load stored viewport config")?,
    };

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn run_config_init(root: Option<&Path>, force: bool) -> Result<()> {
    let storage = storage_at(root)?;
    let path = storage.config_path();

    if path.exists() && !force {
        anyhow::bail!("config already exists: {} (use --force to overwrite)", path.display());
    }

    storage
        .save_config(&ViewportConfig::default())
        .with_context(|| format!("failed to write {}", path.display()))?;

    println!("{}", path.display());
    Ok(())
}

fn new_viewport(
    window: Size,
    config: ViewportConfig,
) -> Result<Viewport<InMemoryWindow, InMemorySizer>> {
    Viewport::new(
        InMemoryWindow::new(window.width, window.height),
        InMemorySizer::new(),
        config,
        ViewportCallbacks::new(),
    )
    .context("invalid viewport config")
}

fn load_config_file(path: &Path) -> Result<ViewportConfig> {
    storage::load_config_file(path)
        .with_context(|| format!("failed to load config {}", path.display()))
}

fn storage_at(root: Option<&Path>) -> Result<Storage> {
    match root {
        Some(root) => Ok(Storage::with_root(root)),
        None => Storage::from_default_project().context("failed to locate data directory"),
    }
}

fn parse_extent(value: &str) -> std::result::Result<Size, String> {
    let (width, height) =
        value.split_once(['x', 'X']).ok_or_else(|| format!("expected WxH, got `{value}`"))?;

    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite() && *number >= 0.0)
            .ok_or_else(|| format!("invalid dimension `{part}` in `{value}`"))
    };

    Ok(Size::new(parse(width)?, parse(height)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_extents() {
        assert_eq!(parse_extent("100x100.5"), Ok(Size::new(100.0, 100.5)));
        assert_eq!(parse_extent("640X480"), Ok(Size::new(640.0, 480.0)));
        assert!(parse_extent("100").is_err());
        assert!(parse_extent("-1x5").is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;

        Cli::command().debug_assert();
    }
}
