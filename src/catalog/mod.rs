mod exif;
mod folder;

pub use folder::{is_raw_file, path_uuid, FolderCatalog};

use crate::error::{PhotoIndexError, Result};
use photo_index_common::{Catalog, PhotoInfo};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// JSONカタログ（`osxphotos query --json` の出力）
///
/// レコードは配列の順に列挙する。
#[derive(Debug, Clone, Default)]
pub struct JsonCatalog {
    photos: Vec<PhotoInfo>,
}

impl JsonCatalog {
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(PhotoIndexError::FileNotFound(path.display().to_string()));
        }

        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let photos: Vec<PhotoInfo> = serde_json::from_reader(reader)?;
        tracing::debug!(path = %path.display(), count = photos.len(), "json catalog loaded");

        Ok(Self { photos })
    }

    pub fn from_photos(photos: Vec<PhotoInfo>) -> Self {
        Self { photos }
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

impl Catalog for JsonCatalog {
    type Photo = PhotoInfo;

    fn photos(&self) -> Box<dyn Iterator<Item = &PhotoInfo> + '_> {
        Box::new(self.photos.iter())
    }
}
