use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::{debug, error, warn};

use crate::classify::{FileClassifier, MediaCategory};
use crate::date::{resolve, Granularity};
use crate::metadata::MetadataReader;
use crate::mover::{MoveRequest, Mover};
use crate::SortReport;

const VIDEO_SUBFOLDER: &str = "video";
const OTHER_SUBFOLDER: &str = "other";

/// Where resolved files end up.
#[derive(Debug, Clone)]
pub enum DestinationPolicy {
    /// Everything funnels into one fixed root.
    Single(PathBuf),
    /// Each subtree writes back into its own folder.
    PerBranch,
}

/// State for one directory level. Passed by value on every descent so
/// sibling branches can never see each other's output root.
#[derive(Debug, Clone)]
pub struct TraversalContext {
    pub source: PathBuf,
    pub output: PathBuf,
    pub depth: u32,
}

/// Walks a source tree, classifies entries and hands resolved files to
/// the mover.
pub struct Scanner<'a> {
    classifier: &'a FileClassifier,
    metadata: &'a dyn MetadataReader,
    mover: &'a mut dyn Mover,
    group: Granularity,
    /// `None` = stay in the top folder, `Some(0)` = unlimited descent,
    /// `Some(n)` = descend up to n folders deep.
    recursion: Option<u32>,
    policy: DestinationPolicy,
    stats: SortReport,
}

impl<'a> Scanner<'a> {
    pub fn new(
        classifier: &'a FileClassifier,
        metadata: &'a dyn MetadataReader,
        mover: &'a mut dyn Mover,
        group: Granularity,
        recursion: Option<u32>,
        policy: DestinationPolicy,
    ) -> Self {
        Self {
            classifier,
            metadata,
            mover,
            group,
            recursion,
            policy,
            stats: SortReport::default(),
        }
    }

    pub fn scan(&mut self, source: &Path) -> SortReport {
        let output = match &self.policy {
            DestinationPolicy::Single(root) => root.clone(),
            DestinationPolicy::PerBranch => source.to_path_buf(),
        };
        self.scan_dir(TraversalContext {
            source: source.to_path_buf(),
            output,
            depth: 1,
        });
        self.stats
    }

    fn scan_dir(&mut self, ctx: TraversalContext) {
        let entries = match fs::read_dir(&ctx.source) {
            Ok(entries) => entries,
            Err(err) => {
                warn!("cannot read {}: {}", ctx.source.display(), err);
                return;
            }
        };

        // Lexical order keeps runs repeatable regardless of what the
        // filesystem hands back.
        let mut names = Vec::new();
        for entry in entries {
            match entry {
                Ok(entry) => match entry.file_name().into_string() {
                    Ok(name) => names.push(name),
                    Err(raw) => warn!(
                        "skipping non-unicode name {:?} in {}",
                        raw,
                        ctx.source.display()
                    ),
                },
                Err(err) => warn!("unreadable entry in {}: {}", ctx.source.display(), err),
            }
        }
        names.sort();

        for name in &names {
            self.scan_entry(name, &ctx);
        }
    }

    fn scan_entry(&mut self, name: &str, ctx: &TraversalContext) {
        let path = ctx.source.join(name);
        match self.classifier.classify(name, path.is_dir()) {
            MediaCategory::Directory => self.maybe_recurse(name, ctx),
            MediaCategory::PhotoCandidate => self.sort_photo(name, ctx),
            MediaCategory::Video => self.sort_by_filename(name, ctx, Some(VIDEO_SUBFOLDER)),
            MediaCategory::OtherMedia => self.sort_by_filename(name, ctx, Some(OTHER_SUBFOLDER)),
            MediaCategory::Unsupported => {
                warn!("{}: file not supported, skipping", path.display());
                self.stats.skipped += 1;
            }
        }
    }

    fn maybe_recurse(&mut self, name: &str, ctx: &TraversalContext) {
        let Some(limit) = self.recursion else {
            return;
        };
        let subdir = ctx.source.join(name);
        if limit != 0 && limit < ctx.depth {
            debug!("recursion limit {} reached, not entering {}", limit, subdir.display());
            return;
        }
        let output = match &self.policy {
            DestinationPolicy::Single(root) => root.clone(),
            DestinationPolicy::PerBranch => subdir.clone(),
        };
        self.scan_dir(TraversalContext {
            source: subdir,
            output,
            depth: ctx.depth + 1,
        });
    }

    /// Photos try embedded metadata first and only then fall back to the
    /// filename conventions, landing next to the other-media files.
    fn sort_photo(&mut self, name: &str, ctx: &TraversalContext) {
        let path = ctx.source.join(name);
        let tags = match self.metadata.read_tags(&path) {
            Ok(tags) => tags,
            Err(err) => {
                warn!("{}: cannot read metadata: {:#}, skipping", path.display(), err);
                self.stats.skipped += 1;
                return;
            }
        };

        match tags {
            Some(tags) => match resolve::from_metadata(&tags) {
                Ok(Some(date)) => {
                    self.dispatch_move(name, ctx, date, None);
                    return;
                }
                Ok(None) => debug!("{}: no capture date in metadata", path.display()),
                Err(err) => warn!("{}: {:#}", path.display(), err),
            },
            None => debug!("{}: no embedded metadata", path.display()),
        }

        self.sort_by_filename(name, ctx, Some(OTHER_SUBFOLDER));
    }

    fn sort_by_filename(&mut self, name: &str, ctx: &TraversalContext, category: Option<&str>) {
        match resolve::from_any_convention(name) {
            Ok(Some(date)) => self.dispatch_move(name, ctx, date, category),
            Ok(None) => {
                warn!("{}: no date found, skipping", ctx.source.join(name).display());
                self.stats.skipped += 1;
            }
            Err(err) => {
                warn!("{}: {:#}, skipping", ctx.source.join(name).display(), err);
                self.stats.skipped += 1;
            }
        }
    }

    fn dispatch_move(
        &mut self,
        name: &str,
        ctx: &TraversalContext,
        date: NaiveDateTime,
        category: Option<&str>,
    ) {
        let request = MoveRequest {
            source_dir: ctx.source.clone(),
            filename: name.to_string(),
            dest_root: ctx.output.clone(),
            subfolder: self.group.folder_name(date),
            category_subfolder: category.map(|c| c.to_string()),
        };
        match self.mover.move_file(&request) {
            Ok(()) => self.stats.moved += 1,
            Err(err) => {
                error!("{}: move failed: {:#}", request.source_path().display(), err);
                self.stats.failed += 1;
            }
        }
    }
}
