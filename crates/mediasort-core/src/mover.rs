use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use tracing::{debug, info};

/// Everything the mover needs to place one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    /// Directory the file currently lives in.
    pub source_dir: PathBuf,
    pub filename: String,
    /// Destination root for this branch of the tree.
    pub dest_root: PathBuf,
    /// Date-derived folder name under the root.
    pub subfolder: String,
    /// Extra category level under the date folder ("video", "other").
    pub category_subfolder: Option<String>,
}

impl MoveRequest {
    pub fn source_path(&self) -> PathBuf {
        self.source_dir.join(&self.filename)
    }

    pub fn dest_dir(&self) -> PathBuf {
        let dir = self.dest_root.join(&self.subfolder);
        match &self.category_subfolder {
            Some(sub) => dir.join(sub),
            None => dir,
        }
    }

    pub fn dest_path(&self) -> PathBuf {
        self.dest_dir().join(&self.filename)
    }
}

/// Capability that creates destination folders and relocates files.
pub trait Mover {
    fn move_file(&mut self, request: &MoveRequest) -> anyhow::Result<()>;
}

/// The real filesystem mover. In simulate mode nothing on disk changes;
/// every decision is only logged.
#[derive(Debug, Clone)]
pub struct FsMover {
    simulate: bool,
}

impl FsMover {
    pub fn new(simulate: bool) -> Self {
        Self { simulate }
    }
}

impl Mover for FsMover {
    fn move_file(&mut self, request: &MoveRequest) -> anyhow::Result<()> {
        let source = request.source_path();
        let dest = request.dest_path();

        if self.simulate {
            info!("simulation: {}: moving to {}", source.display(), dest.display());
            return Ok(());
        }

        let dest_dir = request.dest_dir();
        if !dest_dir.exists() {
            fs::create_dir_all(&dest_dir)
                .with_context(|| format!("creating {}", dest_dir.display()))?;
            debug!("created folder {}", dest_dir.display());
        }

        // Prefer an atomic rename; fall back to copy+remove when the
        // destination sits on another filesystem.
        if fs::rename(&source, &dest).is_err() {
            fs::copy(&source, &dest)
                .with_context(|| format!("copying {} to {}", source.display(), dest.display()))?;
            fs::remove_file(&source)
                .with_context(|| format!("removing {} after copy", source.display()))?;
        }
        info!("{}: moving to {}", source.display(), dest.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn request(dir: &std::path::Path, filename: &str, category: Option<&str>) -> MoveRequest {
        MoveRequest {
            source_dir: dir.to_path_buf(),
            filename: filename.to_string(),
            dest_root: dir.join("target"),
            subfolder: "2019-06".to_string(),
            category_subfolder: category.map(|c| c.to_string()),
        }
    }

    #[test]
    fn test_move_creates_folders_and_relocates() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("IMG_20190610_190809.JPG");
        fs::write(&src, b"image bytes").unwrap();

        let req = request(dir.path(), "IMG_20190610_190809.JPG", None);
        FsMover::new(false).move_file(&req).unwrap();

        assert!(!src.exists());
        let moved = dir.path().join("target/2019-06/IMG_20190610_190809.JPG");
        assert!(moved.exists());
        assert_eq!(fs::read(&moved).unwrap(), b"image bytes");
    }

    #[test]
    fn test_category_subfolder_in_destination() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("clip.mp4");
        fs::write(&src, b"video").unwrap();

        let req = request(dir.path(), "clip.mp4", Some("video"));
        FsMover::new(false).move_file(&req).unwrap();

        assert!(dir.path().join("target/2019-06/video/clip.mp4").exists());
    }

    #[test]
    fn test_simulate_touches_nothing() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("clip.mp4");
        fs::write(&src, b"video").unwrap();

        let req = request(dir.path(), "clip.mp4", Some("video"));
        FsMover::new(true).move_file(&req).unwrap();

        assert!(src.exists());
        assert!(!dir.path().join("target").exists());
    }

    #[test]
    fn test_missing_source_is_an_error() {
        let dir = tempdir().unwrap();
        let req = request(dir.path(), "gone.mp4", None);
        assert!(FsMover::new(false).move_file(&req).is_err());
    }
}
