//! エラー型定義

use thiserror::Error;

/// インデックス生成器のエラー
///
/// 生成そのものは失敗しない。テンプレートと拡張子指定の検証だけがエラーを返す。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("unknown jpeg extension: {0:?} (use jpg, jpeg, JPG or JPEG)")]
    UnknownJpegExt(String),

    #[error("template error: {0}")]
    Template(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
