//! `nf-content`: fetch, inspect and check the site's content document from a terminal.

use anyhow::{Context, bail, ensure};
use clap::{Parser, Subcommand};
use nf_content::{
    ConfiguredSource, ConsumerState, ContentConsumer, ContentLoadError, ContentSource,
    ContentStore, FileContentSource, HttpContentSource,
};
use nf_domain::config::{ContentConfig, LoggingConfig, SiteConfig};
use nf_domain::fallback::SiteSummary;
use nf_logger::{Logger, parse_level};
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "nf-content", version, about = "Load and preview the site content document")]
pub struct Cli {
    /// Configuration file (TOML, JSON or YAML). Defaults to `nf-site.*` if present.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Content location overriding the configuration: an `http(s)://` URL or a local file.
    #[arg(short, long, global = true)]
    pub source: Option<String>,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the document and print the site summary with fallbacks applied.
    Fetch {
        /// Print the summary as JSON.
        #[arg(long)]
        json: bool,
        /// On failure, print the built-in fallback summary instead of exiting with an error.
        #[arg(long)]
        fallback: bool,
    },
    /// Print the raw JSON value at a JSON pointer, e.g. `/site/brandName`.
    Inspect { pointer: String },
    /// Mount several consumers on one store and verify a single fetch served them all.
    Check {
        #[arg(short = 'n', long, default_value_t = 4)]
        consumers: usize,
    },
}

/// Initializes console (and optional file) logging from the `logging` section.
///
/// # Errors
/// Fails on an unknown level name, an invalid filter, or a second initialization.
pub fn init_logging(config: &LoggingConfig, verbose: bool) -> anyhow::Result<Logger> {
    let mut builder = Logger::builder(env!("CARGO_PKG_NAME"))
        .level(parse_level(&config.level)?)
        .verbose(verbose)
        .json(config.json);
    if let Some(filter) = &config.filter {
        builder = builder.filter(filter.clone());
    }
    if let Some(dir) = &config.directory {
        builder = builder.directory(dir);
    }
    Ok(builder.init()?)
}

/// Picks the content source: an explicit override, else the configuration.
///
/// # Errors
/// Fails only if the HTTP client cannot be built.
pub fn select_source(
    config: &ContentConfig,
    source: Option<&str>,
) -> Result<ConfiguredSource, ContentLoadError> {
    match source {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            HttpContentSource::with_config(url, config).build().map(ConfiguredSource::Http)
        },
        Some(path) => Ok(ConfiguredSource::File(FileContentSource::new(path))),
        None => ConfiguredSource::from_config(config),
    }
}

/// Runs one command, writing its report to `out`.
///
/// # Errors
/// Returns the load failure (with the source location as context) or an I/O error on `out`.
pub async fn run(cli: &Cli, config: &SiteConfig, out: &mut impl Write) -> anyhow::Result<()> {
    let source = select_source(&config.content, cli.source.as_deref())
        .context("Failed to set up the content source")?;
    let store = ContentStore::new(source);

    match &cli.command {
        Command::Fetch { json, fallback } => fetch(&store, *json, *fallback, out).await,
        Command::Inspect { pointer } => inspect(&store, pointer, out).await,
        Command::Check { consumers } => check(&store, *consumers, out).await,
    }
}

async fn fetch<S: ContentSource>(
    store: &ContentStore<S>,
    json: bool,
    fallback: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut consumer = ContentConsumer::mount(store);

    let summary = match consumer.settled().await {
        ConsumerState::Resolved(doc) => SiteSummary::resolve(Some(&doc)),
        ConsumerState::Failed(err) if fallback => {
            warn!(error = %err, "Content unavailable, using built-in fallbacks");
            SiteSummary::resolve(None)
        },
        ConsumerState::Failed(err) => {
            let location = store.source().location();
            return Err(anyhow::Error::new(err)
                .context(format!("Failed to load content from {location}")));
        },
        ConsumerState::Loading => bail!("Content load did not complete"),
    };

    if json {
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
    } else {
        write_summary(&summary, out)?;
    }
    Ok(())
}

fn write_summary(summary: &SiteSummary, out: &mut impl Write) -> std::io::Result<()> {
    let m = &summary.metrics;
    writeln!(out, "{}: {}", summary.brand_name, summary.tagline)?;
    writeln!(out, "Contact: {}", summary.contact_email)?;
    writeln!(out, "Hero: {} / {}", summary.hero_title, summary.hero_subtitle)?;
    writeln!(out, "Call to action: {} ({})", summary.cta_label, summary.cta_href)?;
    writeln!(out, "{}", summary.impact_headline)?;
    writeln!(out, "  Children supported: {}", m.children_supported)?;
    writeln!(out, "  Families reached:   {}", m.families_reached)?;
    writeln!(out, "  Volunteers:         {}", m.volunteers)?;
    writeln!(out, "  Communities:        {}", m.communities)?;
    writeln!(
        out,
        "Programs: {}, events: {}, donation methods: {}, board members: {}",
        summary.programs, summary.events, summary.donation_methods, summary.board_members
    )
}

async fn inspect<S: ContentSource>(
    store: &ContentStore<S>,
    pointer: &str,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let doc = store
        .get_content()
        .await
        .with_context(|| format!("Failed to load content from {}", store.source().location()))?;

    let value = doc.pointer(pointer).with_context(|| format!("No value at '{pointer}'"))?;
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

async fn check<S: ContentSource>(
    store: &ContentStore<S>,
    consumers: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    ensure!(consumers > 0, "At least one consumer is required");

    let mut mounted: Vec<_> = (0..consumers).map(|_| ContentConsumer::mount(store)).collect();
    let mut resolved = 0usize;
    let mut failure = None;
    for consumer in &mut mounted {
        match consumer.settled().await {
            ConsumerState::Resolved(_) => resolved += 1,
            ConsumerState::Failed(err) => failure = Some(err),
            ConsumerState::Loading => {},
        }
    }

    let fetches = store.fetch_count();
    info!(consumers, resolved, fetches, "Consumer check finished");
    writeln!(out, "{resolved}/{consumers} consumers resolved from {fetches} fetch(es)")?;

    if let Some(err) = failure {
        return Err(anyhow::Error::new(err).context("Consumers failed to resolve"));
    }
    ensure!(fetches == 1, "Expected a single fetch, saw {fetches}");
    Ok(())
}
