//! エクスポート済みファイル名 → 識別子 の検索
//!
//! インデックスファイルは初回検索時に読み込み、
//! 更新日時が変わっていれば読み直す。

use crate::error::Result;
use crate::output::read_index;
use indexmap::IndexMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

#[derive(Debug)]
pub struct IndexLookup {
    path: PathBuf,
    cache: Option<IndexMap<String, String>>,
    last_modified: Option<SystemTime>,
}

impl IndexLookup {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: None,
            last_modified: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ファイル名に対応する識別子
    pub fn lookup(&mut self, exported_filename: &str) -> Result<Option<String>> {
        self.load(false)?;
        Ok(self
            .cache
            .as_ref()
            .and_then(|index| index.get(exported_filename))
            .cloned())
    }

    /// 更新日時に関係なく読み直す
    pub fn reload(&mut self) -> Result<()> {
        self.load(true)
    }

    pub fn len(&self) -> usize {
        self.cache.as_ref().map(|index| index.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn load(&mut self, force: bool) -> Result<()> {
        let modified = match std::fs::metadata(&self.path) {
            Ok(meta) => Some(meta.modified()?),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                // インデックス未生成は空として扱う
                self.cache = Some(IndexMap::new());
                self.last_modified = None;
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        if !force && self.cache.is_some() && modified == self.last_modified {
            return Ok(());
        }

        let index = read_index(&self.path)?;
        tracing::debug!(path = %self.path.display(), keys = index.len(), "index loaded");
        self.cache = Some(index);
        self.last_modified = modified;
        Ok(())
    }
}
