//! Store media CLI - List a Shopify store's product images and library files.
//!
//! # Usage
//!
//! ```bash
//! # Print all media as JSON, newest first
//! store-media list
//!
//! # Product images only, pretty printed
//! store-media list --skip-files --pretty
//!
//! # Counts by kind and source
//! store-media summary
//! ```
//!
//! # Commands
//!
//! - `list` - Print the merged media list as JSON
//! - `summary` - Print media counts
//!
//! Logs go to stderr so `list` output can be piped. Set `LOG_FORMAT=json`
//! for structured logs and `RUST_LOG` to change verbosity.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Args, Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use store_media_admin::config::StoreMediaConfig;
use store_media_admin::error::{AppError, set_sentry_store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::media::FetchOverrides;

mod commands;

#[derive(Parser)]
#[command(name = "store-media")]
#[command(author, version, about = "List a Shopify store's media")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the merged media list as JSON
    List {
        #[command(flatten)]
        fetch: FetchArgs,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print media counts by kind and source
    Summary {
        #[command(flatten)]
        fetch: FetchArgs,
    },
}

#[derive(Args)]
struct FetchArgs {
    /// Records requested per page from each source (overrides `MEDIA_PAGE_SIZE`)
    #[arg(long, value_parser = clap::value_parser!(i64).range(1..=250))]
    page_size: Option<i64>,

    /// Pages followed per source (overrides `MEDIA_MAX_PAGES`)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_pages: Option<u32>,

    /// Skip the file library and list product images only
    #[arg(long)]
    skip_files: bool,

    /// Print an empty list instead of failing when product images cannot be fetched
    #[arg(long)]
    lenient: bool,
}

impl FetchArgs {
    const fn overrides(&self) -> FetchOverrides {
        FetchOverrides {
            page_size: self.page_size,
            max_pages: self.max_pages,
            skip_files: self.skip_files,
        }
    }
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StoreMediaConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    set_sentry_store(&config.shopify.store);
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR => sentry_tracing::EventFilter::Event,
        tracing::Level::WARN | tracing::Level::INFO => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Initialize tracing with `EnvFilter`, writing to stderr.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "store_media_admin=info,store_media_cli=info".into());

    let is_json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration before tracing so Sentry can be initialized first
    let config = StoreMediaConfig::from_env();
    let sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing();

    let result = match config {
        Ok(config) => run(cli, config).await,
        Err(e) => Err(AppError::from(e)),
    };

    if let Err(e) = result {
        e.report();
        // Flush pending Sentry events; process::exit skips destructors
        drop(sentry_guard);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli, mut config: StoreMediaConfig) -> Result<(), AppError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::List { fetch, pretty } => {
            fetch.overrides().apply(&mut config);
            commands::media::list(&config, fetch.lenient, pretty, &mut out).await
        }
        Commands::Summary { fetch } => {
            fetch.overrides().apply(&mut config);
            commands::media::summary(&config, fetch.lenient, &mut out).await
        }
    }
}
