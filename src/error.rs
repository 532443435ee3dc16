use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotoIndexError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("JPEG拡張子が不正です: {0}（jpg/jpeg/JPG/JPEG のいずれか）")]
    InvalidJpegExt(String),

    #[error("カタログが指定されていません。`--json` または `--folder` を指定してください")]
    MissingCatalog,

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] photo_index_common::Error),
}

pub type Result<T> = std::result::Result<T, PhotoIndexError>;
