//! Corpus traversal and the per-file parse pipeline.
//!
//! Paths are gathered with `walkdir` first; a traversal failure aborts the run
//! before anything is parsed. The collected files are then read, parsed and
//! assembled on a rayon pool. A file that cannot be read or that sits outside
//! the `root/<name>/<category>/<file>` layout is logged and skipped.

use crate::error::IndexerError;
use crate::ingest::parser::parse_message_bytes;
use crate::ingest::path::{self, LayoutError};
use crate::search::{BulkIndexClient, EmailDocument};
use log::{debug, error, info, trace, warn};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;
use walkdir::WalkDir;

/// Reasons a single file is left out of the batch.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Counts for one pass over the corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Non-directory entries found by the walk.
    pub files: usize,
    /// Documents produced.
    pub documents: usize,
    /// Files skipped because of a read or layout error.
    pub skipped: usize,
}

/// Walks a maildir-style corpus and turns each file into an [`EmailDocument`].
#[derive(Debug, Clone)]
pub struct CorpusWalker {
    workers: usize,
}

impl CorpusWalker {
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Every non-directory entry below `root`, in file-name order.
    ///
    /// Symlinks are not followed; a link is returned as a file and resolved
    /// when it is read.
    pub fn collect_files(&self, root: &Path) -> Result<Vec<PathBuf>, IndexerError> {
        let mut files = Vec::new();

        for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|source| {
                error!("error walking directory {}: {}", root.display(), source);
                IndexerError::Traversal {
                    root: root.to_path_buf(),
                    source,
                }
            })?;

            if entry.file_type().is_dir() {
                continue;
            }
            files.push(entry.into_path());
        }

        Ok(files)
    }

    /// Read, parse and assemble every file under `root`.
    ///
    /// Output order matches the walk order regardless of how work was spread
    /// across the pool.
    pub fn parse_corpus(
        &self,
        root: &Path,
    ) -> Result<(Vec<EmailDocument>, IngestStats), IndexerError> {
        let files = self.collect_files(root)?;
        info!(
            "parsing {} files from {} with {} threads",
            files.len(),
            root.display(),
            self.workers
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .build()?;

        let skipped = AtomicUsize::new(0);
        let documents: Vec<EmailDocument> = pool.install(|| {
            files
                .par_iter()
                .filter_map(|path| match process_file(root, path) {
                    Ok(document) => Some(document),
                    Err(err) => {
                        skipped.fetch_add(1, Ordering::Relaxed);
                        warn!("skipping file: {err}");
                        None
                    }
                })
                .collect()
        });

        let stats = IngestStats {
            files: files.len(),
            documents: documents.len(),
            skipped: skipped.load(Ordering::Relaxed),
        };
        info!(
            "parsing complete: {} documents, {} skipped",
            stats.documents, stats.skipped
        );

        Ok((documents, stats))
    }

    /// Parse the corpus and hand every document to `client`.
    pub fn ingest(
        &self,
        root: &Path,
        client: &BulkIndexClient,
    ) -> Result<IngestStats, IndexerError> {
        let (documents, stats) = self.parse_corpus(root)?;
        client.enqueue_all(documents);
        debug!("{} documents pending submission", client.pending());
        Ok(stats)
    }
}

impl Default for CorpusWalker {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

/// Turn one file into a document.
pub fn process_file(root: &Path, file: &Path) -> Result<EmailDocument, FileError> {
    let meta = path::resolve(root, file)?;
    let raw = fs::read(file).map_err(|source| FileError::Read {
        path: file.to_path_buf(),
        source,
    })?;
    trace!("read {} ({} bytes)", file.display(), raw.len());
    Ok(EmailDocument::assemble(parse_message_bytes(&raw), meta))
}
