//! 検索テスト
//!
//! build で書き出したインデックスをファイル名で引けることを検証

use photo_index::catalog::JsonCatalog;
use photo_index::lookup::IndexLookup;
use photo_index::output::read_collisions;
use photo_index::runner::{run_build, BuildSettings};
use photo_index_common::PhotoInfo;
use tempfile::tempdir;

fn photo(uuid: &str, filename: &str, width: u32) -> PhotoInfo {
    PhotoInfo {
        original_filename: Some(filename.to_string()),
        width: Some(width),
        height: Some(width),
        ..PhotoInfo::new(uuid)
    }
}

/// 生成直後のインデックスを検索
#[test]
fn test_lookup_after_build() {
    let dir = tempdir().expect("Failed to create temp dir");
    let settings = BuildSettings {
        template: "{original_name}{ext}".into(),
        jpeg_ext: None,
        index_path: dir.path().join("filename-index.json"),
        collisions_path: dir.path().join("filename-collisions.json"),
        pretty: false,
    };
    let catalog = JsonCatalog::from_photos(vec![
        photo("small", "a.jpg", 10),
        photo("large", "a.jpg", 20),
        photo("only", "b.jpg", 5),
    ]);

    run_build(&catalog, &settings).unwrap();

    let mut lookup = IndexLookup::new(&settings.index_path);
    assert_eq!(lookup.lookup("a.jpg").unwrap(), Some("large".to_string()));
    assert_eq!(lookup.lookup("b.jpg").unwrap(), Some("only".to_string()));
    assert_eq!(lookup.lookup("c.jpg").unwrap(), None);
    assert_eq!(lookup.len(), 2);

    let collisions = read_collisions(&settings.collisions_path).unwrap();
    assert_eq!(collisions.get("a.jpg").map(|ids| ids.len()), Some(2));
    assert!(collisions.get("b.jpg").is_none());
}

/// 作り直したインデックスを読み直す
#[test]
fn test_lookup_sees_rebuild() {
    let dir = tempdir().expect("Failed to create temp dir");
    let settings = BuildSettings {
        template: "{uuid}{ext}".into(),
        jpeg_ext: None,
        index_path: dir.path().join("filename-index.json"),
        collisions_path: dir.path().join("filename-collisions.json"),
        pretty: true,
    };

    run_build(&JsonCatalog::from_photos(vec![photo("one", "a.png", 1)]), &settings).unwrap();
    let mut lookup = IndexLookup::new(&settings.index_path);
    assert_eq!(lookup.lookup("one.png").unwrap(), Some("one".to_string()));

    run_build(&JsonCatalog::from_photos(vec![photo("two", "a.png", 1)]), &settings).unwrap();
    lookup.reload().unwrap();
    assert_eq!(lookup.lookup("one.png").unwrap(), None);
    assert_eq!(lookup.lookup("two.png").unwrap(), Some("two".to_string()));
}
