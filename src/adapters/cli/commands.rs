//! CLI Command Handlers
//!
//! Implementation of all CLI commands for trendcards.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::adapters::coingecko::{CoinGeckoClient, CoinGeckoConfig};
use crate::adapters::logo::ProxiedImageLoader;
use crate::application::TrendingDashboard;
use crate::config::{load_or_default, Config, MAX_COLUMNS};
use crate::domain::ViewState;
use crate::render::{CardGrid, CardRenderer, ExportOptions, FontSet, ImageExporter};

/// trendcards - CoinGecko trending tokens as terminal cards and share images
#[derive(Parser, Debug)]
#[command(
    name = "trendcards",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Trending tokens on CoinGecko as cards and shareable images",
    long_about = "trendcards fetches the tokens currently trending on CoinGecko, joins them \
                  with their market data and 7-day sparkline, prints them as a card grid \
                  and exports any card as a 1200x630 PNG."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (default: config/trendcards.toml if present)
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the trending tokens as a card grid
    List(ListCmd),

    /// Export token cards as PNG images
    Export(ExportCmd),

    /// Show or open a token's CoinGecko page
    Open(OpenCmd),
}

/// Print the card grid
#[derive(Parser, Debug)]
pub struct ListCmd {
    /// Cards per row, 1-6 (overrides config)
    #[arg(long, value_name = "N", value_parser = parse_columns)]
    pub columns: Option<usize>,

    /// Output format (text, json)
    #[arg(short, long, value_name = "FORMAT", default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,
}

/// Export cards as images
#[derive(Parser, Debug)]
pub struct ExportCmd {
    /// Token ids or symbols to export
    #[arg(value_name = "ID|SYMBOL", required_unless_present = "all")]
    pub tokens: Vec<String>,

    /// Export every trending token
    #[arg(long, conflicts_with = "tokens")]
    pub all: bool,

    /// Output directory (overrides config)
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,
}

/// Token page link
#[derive(Parser, Debug)]
pub struct OpenCmd {
    /// Token id or symbol
    #[arg(value_name = "ID|SYMBOL")]
    pub token: String,

    /// Open the page with the system browser
    #[arg(long)]
    pub launch: bool,
}

fn parse_columns(value: &str) -> Result<usize, String> {
    let columns: usize = value
        .parse()
        .map_err(|_| format!("`{}` is not a number", value))?;
    if columns == 0 || columns > MAX_COLUMNS {
        return Err(format!("columns must be 1-{}", MAX_COLUMNS));
    }
    Ok(columns)
}

/// Execute the CLI command
pub async fn execute(app: CliApp) -> Result<()> {
    // Initialize logging based on flags
    init_logging(app.verbose, app.debug)?;

    let config = load_or_default(app.config.as_deref())
        .context("Failed to load configuration")?;

    match app.command {
        Command::List(cmd) => list_command(cmd, &config).await,
        Command::Export(cmd) => export_command(cmd, &config).await,
        Command::Open(cmd) => open_command(cmd, &config).await,
    }
}

/// Initialize logging system
pub fn init_logging(verbose: bool, debug: bool) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

fn build_source(config: &Config) -> Result<CoinGeckoClient> {
    CoinGeckoClient::with_config(CoinGeckoConfig {
        base_url: config.api.get_base_url(),
        timeout: config.api.timeout(),
    })
    .context("Failed to create CoinGecko client")
}

/// Load the trending list; the error state becomes the command's error
async fn load_dashboard(config: &Config) -> Result<TrendingDashboard<CoinGeckoClient>> {
    let mut dashboard = TrendingDashboard::new(build_source(config)?, config.api.site_url.clone());

    dashboard.load().await;
    if let ViewState::Error(message) = dashboard.state() {
        bail!("{}", message);
    }
    if dashboard.snapshot().is_none() {
        bail!("Unexpected state after load: {}", dashboard.state().name());
    }
    Ok(dashboard)
}

/// Handle list command
async fn list_command(cmd: ListCmd, config: &Config) -> Result<()> {
    let color = config.display.color && !cmd.no_color;
    if !color {
        colored::control::set_override(false);
    }

    let dashboard = load_dashboard(config).await?;

    match cmd.format.as_str() {
        "json" => {
            let snapshot = dashboard.snapshot().context("No data loaded")?;
            println!("{}", serde_json::to_string_pretty(snapshot)?);
        }
        _ => {
            let columns = cmd.columns.unwrap_or(config.display.columns);
            let renderer = CardRenderer::new(config.display.card_width, config.api.site_url.clone())
                .with_color(color);
            println!("{}", CardGrid::new(renderer, columns).render(dashboard.tokens()));
        }
    }

    Ok(())
}

/// Handle export command
async fn export_command(cmd: ExportCmd, config: &Config) -> Result<()> {
    let dashboard = load_dashboard(config).await?;

    let tokens = if cmd.all {
        dashboard.tokens().iter().collect()
    } else {
        let (found, missing) = dashboard.select(&cmd.tokens);
        for query in &missing {
            tracing::warn!("{} is not trending right now, skipped", query);
            eprintln!("{} {} is not in the trending list", "Skipped:".yellow(), query);
        }
        if found.is_empty() {
            bail!("None of the requested tokens are trending: {}", missing.join(", "));
        }
        found
    };

    let loader = ProxiedImageLoader::new(config.export.logo_timeout())
        .context("Failed to create image loader")?
        .with_proxy(config.export.get_image_proxy());
    let fonts = FontSet::load(
        config.export.get_font_path().as_deref(),
        config.export.get_bold_font_path().as_deref(),
        config.export.get_italic_font_path().as_deref(),
    );
    let options = ExportOptions {
        output_dir: cmd.out.unwrap_or_else(|| config.export.output_dir()),
        caption: config.export.caption.clone(),
    };
    let mut exporter = ImageExporter::new(loader, fonts, options);

    let mut failures = 0usize;
    for token in tokens {
        match exporter.export(token).await {
            Ok(path) => println!("{} {}", "✓".green(), path.display()),
            Err(e) => {
                failures += 1;
                tracing::error!("Export of {} failed: {}", token.id, e);
                eprintln!("{} {}: {}", "✗".red(), token.symbol, e);
            }
        }
    }

    if failures > 0 {
        bail!("{} export(s) failed", failures);
    }
    Ok(())
}

/// Handle open command
async fn open_command(cmd: OpenCmd, config: &Config) -> Result<()> {
    let dashboard = load_dashboard(config).await?;

    let token = dashboard
        .find(&cmd.token)
        .with_context(|| format!("{} is not in the trending list", cmd.token))?;
    let url = dashboard.profile_url(token);
    println!("{}", url);

    if cmd.launch {
        launch_url(&url).with_context(|| format!("Failed to open {}", url))?;
    }
    Ok(())
}

/// Hand `url` to the platform opener
fn launch_url(url: &str) -> Result<()> {
    use std::process::Command as Process;

    let status = if cfg!(target_os = "macos") {
        Process::new("open").arg(url).status()?
    } else if cfg!(target_os = "windows") {
        Process::new("cmd").args(["/C", "start", "", url]).status()?
    } else {
        Process::new("xdg-open").arg(url).status()?
    };

    if !status.success() {
        bail!("opener exited with {}", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_app_parse_list() {
        let args = vec!["trendcards", "list"];
        let app = CliApp::try_parse_from(args).unwrap();

        match app.command {
            Command::List(cmd) => {
                assert_eq!(cmd.format, "text");
                assert!(cmd.columns.is_none());
                assert!(!cmd.no_color);
            }
            _ => panic!("Expected List command"),
        }
        assert!(app.config.is_none());
    }

    #[test]
    fn test_cli_app_parse_list_options() {
        let args = vec!["trendcards", "list", "--columns", "2", "--format", "json", "--no-color"];
        let app = CliApp::try_parse_from(args).unwrap();

        match app.command {
            Command::List(cmd) => {
                assert_eq!(cmd.columns, Some(2));
                assert_eq!(cmd.format, "json");
                assert!(cmd.no_color);
            }
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_cli_app_rejects_columns_out_of_range() {
        for columns in ["0", "7", "50", "three"] {
            let args = vec!["trendcards", "list", "--columns", columns];
            assert!(CliApp::try_parse_from(args).is_err(), "--columns {} accepted", columns);
        }

        let args = vec!["trendcards", "list", "--columns", "6"];
        match CliApp::try_parse_from(args).unwrap().command {
            Command::List(cmd) => assert_eq!(cmd.columns, Some(MAX_COLUMNS)),
            _ => panic!("Expected List command"),
        }
    }

    #[test]
    fn test_cli_app_rejects_unknown_format() {
        let args = vec!["trendcards", "list", "--format", "table"];
        assert!(CliApp::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_app_parse_export() {
        let args = vec!["trendcards", "export", "btc", "pepe", "--out", "/tmp/cards"];
        let app = CliApp::try_parse_from(args).unwrap();

        match app.command {
            Command::Export(cmd) => {
                assert_eq!(cmd.tokens, vec!["btc", "pepe"]);
                assert!(!cmd.all);
                assert_eq!(cmd.out, Some(PathBuf::from("/tmp/cards")));
            }
            _ => panic!("Expected Export command"),
        }
    }

    #[test]
    fn test_cli_app_parse_export_all() {
        let args = vec!["trendcards", "export", "--all"];
        let app = CliApp::try_parse_from(args).unwrap();

        match app.command {
            Command::Export(cmd) => {
                assert!(cmd.all);
                assert!(cmd.tokens.is_empty());
            }
            _ => panic!("Expected Export command"),
        }
    }

    #[test]
    fn test_cli_app_export_requires_tokens_or_all() {
        let args = vec!["trendcards", "export"];
        assert!(CliApp::try_parse_from(args).is_err());
    }

    #[test]
    fn test_cli_app_parse_open_with_global_flags() {
        let args = vec!["trendcards", "open", "pepe", "--launch", "-v", "-c", "my.toml"];
        let app = CliApp::try_parse_from(args).unwrap();

        assert!(app.verbose);
        assert!(!app.debug);
        assert_eq!(app.config, Some(PathBuf::from("my.toml")));
        match app.command {
            Command::Open(cmd) => {
                assert_eq!(cmd.token, "pepe");
                assert!(cmd.launch);
            }
            _ => panic!("Expected Open command"),
        }
    }
}
