use std::collections::HashSet;
use std::path::Path;

use anyhow::bail;

/// Category assigned to a directory entry, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCategory {
    /// Photo formats that may carry an embedded capture date.
    PhotoCandidate,
    Video,
    OtherMedia,
    Unsupported,
    Directory,
}

/// Extension sets driving classification. These are configuration, not
/// logic: new formats are added here, never inside `classify`.
#[derive(Debug, Clone)]
pub struct ExtensionSets {
    pub photo: Vec<String>,
    pub video: Vec<String>,
    pub other: Vec<String>,
}

impl Default for ExtensionSets {
    fn default() -> Self {
        Self {
            photo: ["jpg", "jpeg", "bmp"].map(String::from).to_vec(),
            video: ["mpg", "mov", "avi", "mpeg", "mp4"].map(String::from).to_vec(),
            other: ["tiff", "tif", "png"].map(String::from).to_vec(),
        }
    }
}

/// Classifies entries by extension against disjoint extension sets.
#[derive(Debug, Clone)]
pub struct FileClassifier {
    sets: ExtensionSets,
}

impl FileClassifier {
    /// Build a classifier. Sets are lowercased, then rejected if any
    /// extension appears in more than one of them, so every name maps to
    /// exactly one category for the rest of the run.
    pub fn new(mut sets: ExtensionSets) -> anyhow::Result<Self> {
        for set in [&mut sets.photo, &mut sets.video, &mut sets.other] {
            for ext in set.iter_mut() {
                *ext = ext.to_ascii_lowercase();
            }
        }
        let mut seen = HashSet::new();
        for ext in sets.photo.iter().chain(&sets.video).chain(&sets.other) {
            if !seen.insert(ext.as_str()) {
                bail!("extension {:?} appears in more than one category set", ext);
            }
        }
        Ok(Self { sets })
    }

    /// Category for a directory entry. Directories are reported as such
    /// before any extension check so they can never be mistaken for a
    /// movable file, whatever they are named.
    pub fn classify(&self, name: &str, is_dir: bool) -> MediaCategory {
        if is_dir {
            return MediaCategory::Directory;
        }
        let Some(ext) = Path::new(name).extension().and_then(|e| e.to_str()) else {
            return MediaCategory::Unsupported;
        };
        let ext = ext.to_ascii_lowercase();
        if self.sets.photo.contains(&ext) {
            MediaCategory::PhotoCandidate
        } else if self.sets.video.contains(&ext) {
            MediaCategory::Video
        } else if self.sets.other.contains(&ext) {
            MediaCategory::OtherMedia
        } else {
            MediaCategory::Unsupported
        }
    }
}
