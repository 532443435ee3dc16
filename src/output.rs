//! インデックス/衝突一覧のJSON入出力
//!
//! どちらも文字列キーのフラットなJSONオブジェクト。

use crate::error::Result;
use indexmap::IndexMap;
use photo_index_common::{FilenameIndex, IndexStats};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// 親ディレクトリを作ってからJSONを書き出す
pub fn write_json_map<T: Serialize>(path: &Path, value: &T, pretty: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writer.flush()?;
    Ok(())
}

/// インデックスと衝突一覧を書き出す
pub fn write_index(result: &FilenameIndex, index_path: &Path, collisions_path: &Path, pretty: bool) -> Result<()> {
    write_json_map(index_path, &result.index, pretty)?;
    write_json_map(collisions_path, &result.collisions, pretty)?;
    Ok(())
}

/// JSONマップを読み込み。ファイルがなければ空
pub fn read_json_map<V: DeserializeOwned>(path: &Path) -> Result<IndexMap<String, V>> {
    if !path.exists() {
        return Ok(IndexMap::new());
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

pub fn read_index(path: &Path) -> Result<IndexMap<String, String>> {
    read_json_map(path)
}

pub fn read_collisions(path: &Path) -> Result<IndexMap<String, Vec<String>>> {
    read_json_map(path)
}

/// 書き出し後の集計行
pub fn summary_line(stats: &IndexStats) -> String {
    format!(
        "[index] wrote {} keys ({} with collisions, max {})",
        stats.keys, stats.colliding_keys, stats.max_collision
    )
}
