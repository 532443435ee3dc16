//! 同名キー競合時の優先度

use crate::types::PhotoRecord;

/// 競合するレコードの順位付けに使う全順序キー
///
/// フィールド順に辞書式比較し、大きい方を優先する。
/// 識別子は順序を全順序にするためだけに最後に置く。
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualityScore {
    pub pixel_area: u64,
    pub byte_size: u64,
    /// RAWは0、それ以外は1
    pub format_preference: u8,
    pub identifier: String,
}

impl QualityScore {
    /// 欠損した属性は0（RAWフラグは非RAW）として扱う
    pub fn of<R: PhotoRecord + ?Sized>(record: &R) -> Self {
        let pixel_area = match (record.width(), record.height()) {
            (Some(w), Some(h)) => u64::from(w) * u64::from(h),
            _ => 0,
        };
        let format_preference = if record.is_raw().unwrap_or(false) { 0 } else { 1 };

        Self {
            pixel_area,
            byte_size: record.original_filesize().unwrap_or(0),
            format_preference,
            identifier: record.uuid().to_string(),
        }
    }
}
