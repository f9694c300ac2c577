use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};

use mamuro_indexer::config::{Credentials, ZincConfig, validate_prefixed_env};
use mamuro_indexer::{BulkIndexClient, CorpusWalker, FlushReport, IndexerError};

#[derive(Parser, Debug)]
#[command(
    name = "indexer",
    about = "Index a maildir-style email corpus into ZincSearch"
)]
struct Args {
    /// Root of the corpus, laid out as <root>/<name>/<category>/<file>.
    directory: PathBuf,

    /// Parser threads (defaults to the number of CPUs).
    #[arg(long)]
    workers: Option<usize>,

    /// Target index, overriding ZINC_INDEX.
    #[arg(long)]
    index: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match run(args).await {
        Ok(report) if report.is_success() => {
            info!("indexing finished: {} records indexed", report.indexed);
            ExitCode::SUCCESS
        }
        Ok(report) => {
            error!(
                "indexing finished with {} failed chunk(s); {} of {} documents were not indexed",
                report.failed_chunks, report.failed_documents, report.documents
            );
            ExitCode::FAILURE
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<FlushReport, IndexerError> {
    validate_prefixed_env(env::vars_os())?;

    let mut config = ZincConfig::from_env()?;
    if let Some(index) = args.index {
        config.index = index;
    }

    let credentials = Credentials::from_env();
    if credentials.username.is_empty() {
        warn!("ZINC_FIRST_ADMIN_USER is not set; submitting with empty credentials");
    }

    let walker = args.workers.map(CorpusWalker::new).unwrap_or_default();
    let client = Arc::new(BulkIndexClient::new(config, credentials)?);

    info!("starting indexer");
    info!(
        "walking directory: {} (index '{}', {} workers)",
        args.directory.display(),
        client.config().index,
        walker.workers()
    );

    let root = args.directory;
    let ingest_client = Arc::clone(&client);
    let stats =
        tokio::task::spawn_blocking(move || walker.ingest(&root, &ingest_client)).await??;

    info!(
        "mails read successfully: {} documents from {} files ({} skipped)",
        stats.documents, stats.files, stats.skipped
    );

    Ok(client.flush().await)
}
