use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use exif::{In, Reader};

/// Tag-name to display-value mapping extracted from a media file.
pub type TagMap = HashMap<String, String>;

/// Capability to pull embedded metadata out of a file.
///
/// `Ok(None)` means the file carries no metadata block at all, which is
/// normal for screenshots and downloads. `Err` means the file itself could
/// not be read.
pub trait MetadataReader {
    fn read_tags(&self, path: &Path) -> anyhow::Result<Option<TagMap>>;
}

/// EXIF-backed metadata reader.
pub struct ExifMetadataReader;

impl MetadataReader for ExifMetadataReader {
    fn read_tags(&self, path: &Path) -> anyhow::Result<Option<TagMap>> {
        let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
        let exif = match Reader::new().read_from_container(&mut BufReader::new(file)) {
            Ok(exif) => exif,
            Err(_) => return Ok(None),
        };
        let mut tags = TagMap::new();
        for field in exif.fields() {
            // Thumbnail IFDs repeat the primary image's tags; skip them.
            if field.ifd_num == In::PRIMARY {
                tags.insert(field.tag.to_string(), field.display_value().to_string());
            }
        }
        Ok(Some(tags))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_no_exif_block_is_absence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("plain.jpg");
        File::create(&path).unwrap().write_all(b"not really a jpeg").unwrap();

        let tags = ExifMetadataReader.read_tags(&path).unwrap();
        assert!(tags.is_none());
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.jpg");
        assert!(ExifMetadataReader.read_tags(&path).is_err());
    }
}
