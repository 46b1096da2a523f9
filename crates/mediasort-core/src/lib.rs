pub mod classify;
pub mod date;
pub mod metadata;
pub mod mover;
pub mod scan;

use std::path::PathBuf;

use anyhow::bail;
use tracing::debug;

pub use classify::{ExtensionSets, FileClassifier, MediaCategory};
pub use date::Granularity;
pub use metadata::{ExifMetadataReader, MetadataReader, TagMap};
pub use mover::{FsMover, MoveRequest, Mover};
pub use scan::{DestinationPolicy, Scanner, TraversalContext};

#[derive(Debug, Clone)]
pub struct SortOptions {
    /// Folder to take files from.
    pub source: PathBuf,
    /// Fixed destination root; `None` sorts each branch into itself.
    pub target: Option<PathBuf>,
    /// `None` = top folder only, `Some(0)` = unlimited, `Some(n)` = n deep.
    pub recurse: Option<u32>,
    pub group: Granularity,
    pub simulate: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortReport {
    pub moved: u64,
    pub skipped: u64,
    pub failed: u64,
}

/// Run one full sorting pass over the source tree.
pub fn run(options: &SortOptions) -> anyhow::Result<SortReport> {
    if !options.source.is_dir() {
        bail!("source {} is not a directory", options.source.display());
    }

    let policy = match &options.target {
        Some(target) => DestinationPolicy::Single(target.clone()),
        None => DestinationPolicy::PerBranch,
    };
    debug!(
        "sorting {} by {} ({:?}, recursion {:?}, simulate {})",
        options.source.display(),
        options.group.name(),
        policy,
        options.recurse,
        options.simulate
    );

    let classifier = FileClassifier::new(ExtensionSets::default())?;
    let reader = ExifMetadataReader;
    let mut mover = FsMover::new(options.simulate);
    let mut scanner = Scanner::new(
        &classifier,
        &reader,
        &mut mover,
        options.group,
        options.recurse,
        policy,
    );
    Ok(scanner.scan(&options.source))
}
