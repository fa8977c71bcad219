//! Portal-Mirror main entry point
//!
//! Command-line interface: takes a portal starting URL and a destination
//! directory, mirrors every reachable file, and prints each file's full
//! derived path on success.

use clap::Parser;
use portal_mirror::config::CrawlConfig;
use portal_mirror::crawler::run_mirror;
use portal_mirror::output::{write_file_list, write_summary};
use tracing_subscriber::EnvFilter;

/// Portal-Mirror: a document portal mirroring crawler
///
/// Crawls the folder hierarchy of a document-management portal starting from
/// the given URL and downloads every discovered file into the destination
/// directory, mirroring the portal's folder structure.
#[derive(Parser, Debug)]
#[command(name = "portal-mirror")]
#[command(version)]
#[command(about = "Mirror a document portal's folder tree to disk", long_about = None)]
struct Cli {
    /// Portal URL to start crawling from (may carry a FolderID parameter)
    #[arg(value_name = "URL")]
    url: String,

    /// Directory to mirror downloaded files into
    #[arg(value_name = "DESTINATION")]
    destination: String,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Maximum number of concurrently in-flight requests
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = CrawlConfig::new(&cli.url, &cli.destination)?;
    if let Some(concurrency) = cli.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout_secs(timeout);
    }

    tracing::info!("Mirroring {} into {}", cli.url, cli.destination);
    let session = run_mirror(config).await?;

    let tree = session.tree();
    let files = session.files();

    let mut stdout = std::io::stdout().lock();
    write_file_list(&tree, &files, &mut stdout)?;

    if !cli.quiet {
        let mut stderr = std::io::stderr().lock();
        write_summary(&session.stats(), &mut stderr)?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("portal_mirror=info,warn"),
            1 => EnvFilter::new("portal_mirror=debug,info"),
            2 => EnvFilter::new("portal_mirror=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
