//! フォルダカタログ
//!
//! 写真ライブラリの代わりに、フォルダ内の画像ファイルを写真レコードとして列挙する。

use super::exif;
use crate::error::{PhotoIndexError, Result};
use indicatif::{ParallelProgressIterator, ProgressBar};
use photo_index_common::{Catalog, PhotoInfo};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "heic", "heif", "tif", "tiff", "gif", "webp"];

const RAW_EXTENSIONS: &[&str] = &["cr2", "cr3", "nef", "arw", "dng", "raf", "orf", "rw2", "pef", "srw"];

/// 識別子の長さ（SHA-256の16進表記の先頭）
const UUID_LEN: usize = 32;

#[derive(Debug, Clone)]
pub struct FolderCatalog {
    photos: Vec<PhotoInfo>,
}

impl FolderCatalog {
    /// フォルダをスキャンして写真レコードを作る
    ///
    /// メタデータは並列に読むが、レコードは相対パス順に並べる。
    pub fn scan(root: &Path, recursive: bool, progress: &ProgressBar) -> Result<Self> {
        if !root.is_dir() {
            return Err(PhotoIndexError::FolderNotFound(root.display().to_string()));
        }

        let mut paths: Vec<PathBuf> = WalkDir::new(root)
            .max_depth(if recursive { usize::MAX } else { 1 })
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|path| is_photo_file(path))
            .collect();
        paths.sort();

        progress.set_length(paths.len() as u64);
        let photos = paths
            .par_iter()
            .progress_with(progress.clone())
            .map(|path| read_photo(root, path))
            .collect::<Vec<_>>();

        tracing::debug!(root = %root.display(), count = photos.len(), "folder scanned");

        Ok(Self { photos })
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }
}

impl Catalog for FolderCatalog {
    type Photo = PhotoInfo;

    fn photos(&self) -> Box<dyn Iterator<Item = &PhotoInfo> + '_> {
        Box::new(self.photos.iter())
    }
}

fn lowercase_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

fn is_photo_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(true);
    if hidden {
        return false;
    }

    match lowercase_extension(path) {
        Some(ext) => IMAGE_EXTENSIONS.contains(&ext.as_str()) || RAW_EXTENSIONS.contains(&ext.as_str()),
        None => false,
    }
}

pub fn is_raw_file(path: &Path) -> bool {
    lowercase_extension(path)
        .map(|ext| RAW_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// ルートからの相対パス（`/` 区切り）
fn relative_key(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// 相対パスから安定した識別子を作る
pub fn path_uuid(relative: &str) -> String {
    let digest = hex::encode(Sha256::digest(relative.as_bytes()));
    digest[..UUID_LEN].to_string()
}

fn read_photo(root: &Path, path: &Path) -> PhotoInfo {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string());
    let (width, height) = match image::image_dimensions(path) {
        Ok((w, h)) => (Some(w), Some(h)),
        Err(_) => (None, None),
    };

    PhotoInfo {
        uuid: path_uuid(&relative_key(root, path)),
        original_filename: file_name.clone(),
        filename: file_name,
        width,
        height,
        original_filesize: std::fs::metadata(path).ok().map(|m| m.len()),
        has_raw: Some(is_raw_file(path)),
        date: exif::capture_time(path).map(|dt| dt.to_rfc3339()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photo_index_common::PhotoRecord;
    use std::fs;
    use tempfile::tempdir;

    fn write_png(path: &Path, width: u32, height: u32) {
        image::RgbImage::new(width, height).save(path).unwrap();
    }

    #[test]
    fn test_is_photo_file() {
        assert!(is_photo_file(Path::new("a/IMG_0001.JPG")));
        assert!(is_photo_file(Path::new("a/IMG_0001.heic")));
        assert!(is_photo_file(Path::new("a/IMG_0001.CR2")));
        assert!(!is_photo_file(Path::new("a/notes.txt")));
        assert!(!is_photo_file(Path::new("a/._IMG_0001.JPG")));
        assert!(!is_photo_file(Path::new("a/README")));
    }

    #[test]
    fn test_is_raw_file() {
        assert!(is_raw_file(Path::new("x.NEF")));
        assert!(is_raw_file(Path::new("x.dng")));
        assert!(!is_raw_file(Path::new("x.jpg")));
    }

    #[test]
    fn test_path_uuid_is_stable() {
        assert_eq!(path_uuid("2020/a.jpg"), path_uuid("2020/a.jpg"));
        assert_ne!(path_uuid("2020/a.jpg"), path_uuid("2021/a.jpg"));
        assert_eq!(path_uuid("a.jpg").len(), UUID_LEN);
    }

    #[test]
    fn test_relative_key_uses_forward_slashes() {
        let root = Path::new("/photos");
        assert_eq!(relative_key(root, &root.join("2020").join("a.jpg")), "2020/a.jpg");
    }

    #[test]
    fn test_scan_missing_folder() {
        let result = FolderCatalog::scan(Path::new("/nonexistent/folder"), false, &ProgressBar::hidden());
        assert!(matches!(result, Err(PhotoIndexError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_reads_metadata() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_png(&dir.path().join("b.png"), 4, 3);
        fs::write(dir.path().join("a.CR2"), b"raw bytes").unwrap();
        fs::write(dir.path().join("notes.txt"), b"text").unwrap();

        let catalog = FolderCatalog::scan(dir.path(), false, &ProgressBar::hidden()).unwrap();
        let photos: Vec<&PhotoInfo> = catalog.photos().collect();
        assert_eq!(photos.len(), 2);

        let raw = photos[0];
        assert_eq!(raw.original_filename.as_deref(), Some("a.CR2"));
        assert_eq!(raw.is_raw(), Some(true));
        assert_eq!(raw.original_filesize(), Some(9));
        assert_eq!(raw.width(), None);

        let png = photos[1];
        assert_eq!(png.original_filename.as_deref(), Some("b.png"));
        assert_eq!(png.width(), Some(4));
        assert_eq!(png.height(), Some(3));
        assert_eq!(png.is_raw(), Some(false));
        assert_eq!(png.uuid, path_uuid("b.png"));
    }

    #[test]
    fn test_scan_advances_progress() {
        let dir = tempdir().expect("Failed to create temp dir");
        for name in ["a.png", "b.png", "c.png"] {
            write_png(&dir.path().join(name), 2, 2);
        }
        fs::write(dir.path().join("skip.txt"), b"text").unwrap();

        let progress = ProgressBar::hidden();
        let catalog = FolderCatalog::scan(dir.path(), false, &progress).unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(progress.length(), Some(3));
        assert_eq!(progress.position(), 3);
    }

    #[test]
    fn test_scan_recursive() {
        let dir = tempdir().expect("Failed to create temp dir");
        let nested = dir.path().join("2020");
        fs::create_dir_all(&nested).unwrap();
        write_png(&dir.path().join("top.png"), 1, 1);
        write_png(&nested.join("deep.png"), 1, 1);

        let flat = FolderCatalog::scan(dir.path(), false, &ProgressBar::hidden()).unwrap();
        assert_eq!(flat.len(), 1);

        let deep = FolderCatalog::scan(dir.path(), true, &ProgressBar::hidden()).unwrap();
        assert_eq!(deep.len(), 2);
        let uuids: Vec<&str> = deep.photos().map(|p| p.uuid.as_str()).collect();
        assert!(uuids.contains(&path_uuid("2020/deep.png").as_str()));
    }
}
