//! seokit command line front end
//!
//! The binary in `main.rs` only parses arguments and calls [`run`]; the
//! commands, the text rendering and the interactive shell live here so they
//! can be tested without spawning the binary.

pub mod render;
pub mod schema;
pub mod shell;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;

use seokit_core::fetch::{DEFAULT_RELAY_ENDPOINT, PageFetcher, ReqwestTransport, Transport};
use seokit_core::{
    AnalysisRequest, AuthorityEstimator, HistoryEntry, KeywordScorer, SeasonClock, SeoChecker,
};

use crate::schema::SchemaArgs;

#[derive(Debug, Parser)]
#[command(
    name = "seokit",
    version,
    about = "seokit: on-page SEO checks, Persian keyword scores and schema.org markup",
    after_help = "Developed by Pon Datalab"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch a page and run the SEO checklist
    Check(CheckArgs),
    /// Estimate search volume and difficulty for a keyword
    Keyword(KeywordArgs),
    /// Print schema.org JSON-LD markup
    Schema(SchemaArgs),
    /// Interactive session with history
    Shell(ShellArgs),
}

/// Options shared by every command that talks to the network
#[derive(Debug, Clone, Args)]
pub struct NetworkArgs {
    /// Fetch relay endpoint
    #[arg(long, env = "SEOKIT_RELAY_URL", default_value = DEFAULT_RELAY_ENDPOINT)]
    pub relay_url: String,

    /// Skip the relay and go straight to the public proxies
    #[arg(long)]
    pub no_relay: bool,

    /// Use local estimates only, never query ranking or keyword providers
    #[arg(long)]
    pub offline: bool,

    /// Seed for the backlink estimate, for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Date source for seasonal keyword boosts: local, utc or +HH:MM
    #[arg(long, env = "SEOKIT_TIMEZONE", default_value = "local")]
    pub timezone: SeasonClock,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Page to check; `https://` is added when no scheme is given
    pub url: String,

    #[command(flatten)]
    pub network: NetworkArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct KeywordArgs {
    /// Keyword or phrase to score
    pub text: String,

    #[command(flatten)]
    pub network: NetworkArgs,

    /// Print the metrics as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct ShellArgs {
    #[command(flatten)]
    pub network: NetworkArgs,
}

/// Everything a command needs to run checks and score keywords
#[derive(Clone)]
pub struct Services {
    checker: SeoChecker,
    scorer: KeywordScorer,
    seed: Option<u64>,
}

impl Services {
    pub fn new(network: &NetworkArgs) -> Result<Self> {
        let transport: Arc<dyn Transport> =
            Arc::new(ReqwestTransport::new().context("failed to build HTTP client")?);
        Ok(Self::with_transport(transport, network))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, network: &NetworkArgs) -> Self {
        let relay = (!network.no_relay).then(|| network.relay_url.clone());
        let fetcher = PageFetcher::new(transport.clone()).with_relay(relay);

        let (authority, scorer) = if network.offline {
            (AuthorityEstimator::offline(), KeywordScorer::offline())
        } else {
            (
                AuthorityEstimator::new(transport.clone()),
                KeywordScorer::new(transport),
            )
        };

        Self {
            checker: SeoChecker::new(fetcher, authority),
            scorer: scorer.with_clock(network.timezone),
            seed: network.seed,
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Check one page and wrap the report for the history
    pub async fn check_page(&self, input: &str) -> Result<HistoryEntry> {
        let request = AnalysisRequest::new(input);
        let mut rng = self.rng();
        let report = self
            .checker
            .check(&request, &mut rng)
            .await
            .with_context(|| format!("failed to check {input}"))?;
        Ok(HistoryEntry::Page {
            input: input.to_string(),
            report,
        })
    }

    /// Score one keyword and wrap the metrics for the history
    pub async fn score_keyword(&self, input: &str) -> Result<HistoryEntry> {
        let metrics = self.scorer.score_keyword(input).await?;
        Ok(HistoryEntry::Keyword {
            input: input.to_string(),
            metrics,
        })
    }
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("seokit=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Check(args) => {
            let services = Services::new(&args.network)?;
            let entry = services.check_page(&args.url).await?;
            print_entry(&entry, args.json)
        }
        Command::Keyword(args) => {
            let services = Services::new(&args.network)?;
            let entry = services.score_keyword(&args.text).await?;
            print_entry(&entry, args.json)
        }
        Command::Schema(args) => {
            println!("{}", schema::render(&args)?);
            Ok(())
        }
        Command::Shell(args) => {
            let services = Services::new(&args.network)?;
            shell::run_shell(services).await
        }
    }
}

fn print_entry(entry: &HistoryEntry, json: bool) -> Result<()> {
    if json {
        let value = match entry {
            HistoryEntry::Page { report, .. } => serde_json::to_string_pretty(report)?,
            HistoryEntry::Keyword { metrics, .. } => serde_json::to_string_pretty(metrics)?,
        };
        println!("{value}");
    } else {
        print!("{}", render::render_entry(entry));
    }
    Ok(())
}
