//! ファイル名インデックスの生成
//!
//! 写真レコード列を先頭から1回だけ畳み込み、
//! ファイル名キー → 採用レコードの識別子 のインデックスと、
//! 同じキーに描画された全識別子の衝突一覧を作る。
//!
//! - 採用は `QualityScore` が厳密に大きい場合のみ入れ替える（同点は先着優先）
//! - 衝突一覧は発見順で重複なし
//! - 描画結果が空のレコードはどちらにも現れない

use crate::key::{render_key, JpegExt, TemplateRenderer};
use crate::quality::QualityScore;
use crate::types::{Catalog, PhotoRecord};
use indexmap::{IndexMap, IndexSet};

/// 既定のファイル名テンプレート
pub const DEFAULT_TEMPLATE: &str = "{created.utc.strftime,%Y%m%dT%H%M%S%fZ}-{original_name}{ext}";

/// キー生成の設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOptions {
    pub template: String,
    pub jpeg_ext: Option<JpegExt>,
}

impl IndexOptions {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            jpeg_ext: None,
        }
    }

    pub fn with_jpeg_ext(mut self, jpeg_ext: Option<JpegExt>) -> Self {
        self.jpeg_ext = jpeg_ext;
        self
    }
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

/// インデックス生成器
///
/// 1回の実行ごとに新しく作る。状態は `finish` まで外に出ない。
#[derive(Debug)]
pub struct IndexBuilder {
    options: IndexOptions,
    winners: IndexMap<String, QualityScore>,
    collisions: IndexMap<String, IndexSet<String>>,
    records: usize,
    skipped: usize,
}

impl IndexBuilder {
    pub fn new(options: IndexOptions) -> Self {
        Self {
            options,
            winners: IndexMap::new(),
            collisions: IndexMap::new(),
            records: 0,
            skipped: 0,
        }
    }

    /// レコード1件を取り込む
    pub fn observe<R, T>(&mut self, record: &R, renderer: &T)
    where
        R: PhotoRecord + ?Sized,
        T: TemplateRenderer<R> + ?Sized,
    {
        self.records += 1;

        let key = render_key(record, renderer, &self.options.template, self.options.jpeg_ext);
        if key.is_empty() {
            self.skipped += 1;
            return;
        }

        let score = QualityScore::of(record);
        match self.winners.get_mut(&key) {
            None => {
                self.winners.insert(key, score);
            }
            Some(incumbent) => {
                let uuid = record.uuid();
                // 同じ識別子の再出現だけでは衝突にしない
                if let Some(ids) = self.collisions.get_mut(&key) {
                    ids.insert(uuid.to_string());
                } else if incumbent.identifier != uuid {
                    tracing::debug!(key = %key, incumbent = %incumbent.identifier, uuid, "filename collision");
                    let mut ids = IndexSet::new();
                    ids.insert(incumbent.identifier.clone());
                    ids.insert(uuid.to_string());
                    self.collisions.insert(key.clone(), ids);
                }

                if score > *incumbent {
                    *incumbent = score;
                }
            }
        }
    }

    pub fn finish(self) -> FilenameIndex {
        let index = self
            .winners
            .into_iter()
            .map(|(key, score)| (key, score.identifier))
            .collect();

        FilenameIndex {
            index,
            collisions: self.collisions,
            records: self.records,
            skipped: self.skipped,
        }
    }
}

/// 生成結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilenameIndex {
    /// ファイル名キー → 採用レコードの識別子
    pub index: IndexMap<String, String>,
    /// ファイル名キー → 描画された全識別子（発見順）
    pub collisions: IndexMap<String, IndexSet<String>>,
    records: usize,
    skipped: usize,
}

impl FilenameIndex {
    pub fn winner(&self, key: &str) -> Option<&str> {
        self.index.get(key).map(String::as_str)
    }

    pub fn collisions_for(&self, key: &str) -> Option<&IndexSet<String>> {
        self.collisions.get(key)
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            records: self.records,
            skipped: self.skipped,
            keys: self.index.len(),
            colliding_keys: self.collisions.values().filter(|ids| !ids.is_empty()).count(),
            max_collision: self.collisions.values().map(|ids| ids.len()).max().unwrap_or(1),
        }
    }
}

/// 集計（衝突がなければ `max_collision` は1）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IndexStats {
    pub records: usize,
    pub skipped: usize,
    pub keys: usize,
    pub colliding_keys: usize,
    pub max_collision: usize,
}

/// レコード列からインデックスを生成
pub fn build_index<I, T>(records: I, renderer: &T, options: IndexOptions) -> FilenameIndex
where
    I: IntoIterator,
    I::Item: PhotoRecord,
    T: TemplateRenderer<I::Item> + ?Sized,
{
    let mut builder = IndexBuilder::new(options);
    for record in records {
        builder.observe(&record, renderer);
    }
    builder.finish()
}

/// カタログの全写真からインデックスを生成
pub fn build_index_from_catalog<C, T>(catalog: &C, renderer: &T, options: IndexOptions) -> FilenameIndex
where
    C: Catalog + ?Sized,
    T: TemplateRenderer<C::Photo> + ?Sized,
{
    let mut builder = IndexBuilder::new(options);
    for photo in catalog.photos() {
        builder.observe(photo, renderer);
    }
    builder.finish()
}
