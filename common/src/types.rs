//! 写真レコードの型定義
//!
//! インデックス生成器が参照する写真の属性と、写真を列挙するカタログ:
//! - PhotoRecord: 識別子・サイズ・RAWフラグへのアクセサ
//! - PhotoInfo: JSONカタログ/フォルダカタログ共通の具体的なレコード
//! - Catalog: 写真レコードの列挙元

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// インデックス生成に必要な写真の属性
///
/// 識別子以外はすべて欠損しうる。欠損値の扱いは `QualityScore` 側で決める。
pub trait PhotoRecord {
    /// ライブラリ内で一意かつ安定な識別子
    fn uuid(&self) -> &str;

    fn width(&self) -> Option<u32> {
        None
    }

    fn height(&self) -> Option<u32> {
        None
    }

    /// ディスク上のバイト数
    fn original_filesize(&self) -> Option<u64> {
        None
    }

    /// RAW形式かどうか
    fn is_raw(&self) -> Option<bool> {
        None
    }
}

impl<T: PhotoRecord + ?Sized> PhotoRecord for &T {
    fn uuid(&self) -> &str {
        (**self).uuid()
    }

    fn width(&self) -> Option<u32> {
        (**self).width()
    }

    fn height(&self) -> Option<u32> {
        (**self).height()
    }

    fn original_filesize(&self) -> Option<u64> {
        (**self).original_filesize()
    }

    fn is_raw(&self) -> Option<bool> {
        (**self).is_raw()
    }
}

/// 写真レコード（`osxphotos query --json` 互換のフィールド名）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoInfo {
    pub uuid: String,

    /// 取り込み時の元ファイル名
    #[serde(default)]
    pub original_filename: Option<String>,

    /// ライブラリ内の現在のファイル名
    #[serde(default)]
    pub filename: Option<String>,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,

    #[serde(default)]
    pub original_filesize: Option<u64>,

    #[serde(default)]
    pub has_raw: Option<bool>,

    /// 作成日時（RFC 3339）
    #[serde(default)]
    pub date: Option<String>,
}

impl PhotoInfo {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            ..Default::default()
        }
    }

    /// 作成日時をパース。不正な値は欠損として扱う
    pub fn created(&self) -> Option<DateTime<FixedOffset>> {
        self.date
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
    }

    /// 元ファイル名（なければ現在のファイル名）
    pub fn source_filename(&self) -> Option<&str> {
        self.original_filename
            .as_deref()
            .or(self.filename.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// 元ファイル名の拡張子を除いた部分
    pub fn original_stem(&self) -> Option<&str> {
        self.source_filename()
            .and_then(|name| Path::new(name).file_stem())
            .and_then(|stem| stem.to_str())
    }

    /// 現在のファイル名の拡張子を除いた部分
    pub fn current_stem(&self) -> Option<&str> {
        self.filename
            .as_deref()
            .filter(|name| !name.is_empty())
            .and_then(|name| Path::new(name).file_stem())
            .and_then(|stem| stem.to_str())
            .or_else(|| self.original_stem())
    }

    /// 元ファイル名の拡張子（ドットなし、大文字小文字はそのまま）
    pub fn original_extension(&self) -> Option<&str> {
        self.source_filename()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
    }
}

impl PhotoRecord for PhotoInfo {
    fn uuid(&self) -> &str {
        &self.uuid
    }

    fn width(&self) -> Option<u32> {
        self.width
    }

    fn height(&self) -> Option<u32> {
        self.height
    }

    fn original_filesize(&self) -> Option<u64> {
        self.original_filesize
    }

    fn is_raw(&self) -> Option<bool> {
        self.has_raw
    }
}

/// 写真レコードの列挙元
///
/// 列挙順は1回の列挙の中で安定していればよい。
pub trait Catalog {
    type Photo: PhotoRecord;

    fn photos(&self) -> Box<dyn Iterator<Item = &Self::Photo> + '_>;
}
