//! Corpus ingestion: traversal, line-based message parsing and path metadata.

pub mod parser;
pub mod path;
pub mod walker;

pub use parser::{ParsedMessage, parse_message};
pub use path::{LayoutError, PathMetadata};
pub use walker::{CorpusWalker, FileError, IngestStats};
