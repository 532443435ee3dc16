//! ファイル名キーの生成
//!
//! テンプレートで写真を描画した最初の候補をキーとし、
//! 必要に応じてJPEG系の拡張子を統一する。

use crate::error::Error;
use crate::types::PhotoRecord;
use serde::{Deserialize, Serialize};

/// 拡張子統一の対象となるJPEG系拡張子（大文字小文字は区別しない）
pub const JPEG_FAMILY: &[&str] = &["jpg", "jpeg"];

/// テンプレート描画の境界
///
/// `render(record, template)` は0個以上の候補を返す。
/// クロージャもそのまま渡せる。
pub trait TemplateRenderer<R: ?Sized> {
    fn render(&self, record: &R, template: &str) -> Vec<String>;
}

impl<R: ?Sized, F> TemplateRenderer<R> for F
where
    F: Fn(&R, &str) -> Vec<String>,
{
    fn render(&self, record: &R, template: &str) -> Vec<String> {
        self(record, template)
    }
}

/// JPEG系キーの統一先拡張子
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JpegExt {
    #[serde(rename = "jpg")]
    Jpg,
    #[serde(rename = "jpeg")]
    Jpeg,
    #[serde(rename = "JPG")]
    UpperJpg,
    #[serde(rename = "JPEG")]
    UpperJpeg,
}

impl JpegExt {
    pub fn as_str(&self) -> &'static str {
        match self {
            JpegExt::Jpg => "jpg",
            JpegExt::Jpeg => "jpeg",
            JpegExt::UpperJpg => "JPG",
            JpegExt::UpperJpeg => "JPEG",
        }
    }
}

impl std::str::FromStr for JpegExt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jpg" => Ok(JpegExt::Jpg),
            "jpeg" => Ok(JpegExt::Jpeg),
            "JPG" => Ok(JpegExt::UpperJpg),
            "JPEG" => Ok(JpegExt::UpperJpeg),
            _ => Err(Error::UnknownJpegExt(s.to_string())),
        }
    }
}

impl std::fmt::Display for JpegExt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 最後の `.` 以降がJPEG系拡張子かどうか
pub fn is_jpeg_family(key: &str) -> bool {
    match key.rfind('.') {
        Some(dot) => {
            let ext = &key[dot + 1..];
            JPEG_FAMILY.iter().any(|candidate| ext.eq_ignore_ascii_case(candidate))
        }
        None => false,
    }
}

/// JPEG系キーの拡張子を `ext` に置き換える。それ以外のキーはそのまま
pub fn normalize_extension(key: &str, ext: JpegExt) -> String {
    match key.rfind('.') {
        Some(dot) if is_jpeg_family(key) => format!("{}.{}", &key[..dot], ext),
        _ => key.to_string(),
    }
}

/// 写真1件のファイル名キーを生成
///
/// 描画結果が空（候補なし・空文字列）の場合は空文字列を返す。
/// 呼び出し側は空キーのレコードを読み飛ばす。
pub fn render_key<R, T>(record: &R, renderer: &T, template: &str, jpeg_ext: Option<JpegExt>) -> String
where
    R: PhotoRecord + ?Sized,
    T: TemplateRenderer<R> + ?Sized,
{
    let key = renderer
        .render(record, template)
        .into_iter()
        .next()
        .unwrap_or_default();

    match jpeg_ext {
        Some(ext) if !key.is_empty() => normalize_extension(&key, ext),
        _ => key,
    }
}
