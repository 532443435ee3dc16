use crate::error::{PhotoIndexError, Result};
use photo_index_common::{JpegExt, Template, DEFAULT_TEMPLATE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_TEMPLATE: &str = "FILENAME_TEMPLATE";
pub const ENV_JPEG_EXT: &str = "JPEG_EXT";
pub const ENV_INDEX_PATH: &str = "LIB_INDEX_PATH";

const INDEX_FILE_NAME: &str = "filename-index.json";
const COLLISIONS_FILE_NAME: &str = "filename-collisions.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub template: String,
    pub jpeg_ext: Option<JpegExt>,
    pub index_path: PathBuf,
    pub collisions_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    /// 設定ファイル → 環境変数 の順に読み込む
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// 設定ファイルを読み込み。なければデフォルト
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PhotoIndexError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("photo-index").join("config.json"))
    }

    fn default_config() -> Self {
        let library = PathBuf::from("data").join("library");
        Self {
            template: DEFAULT_TEMPLATE.into(),
            jpeg_ext: None,
            index_path: library.join(INDEX_FILE_NAME),
            collisions_path: library.join(COLLISIONS_FILE_NAME),
        }
    }

    /// 環境変数で上書き（前後の引用符は除去、空値は無視）
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| {
            lookup(name)
                .map(|value| sanitize(&value).to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(template) = read(ENV_TEMPLATE) {
            self.template = template;
        }
        if let Some(ext) = read(ENV_JPEG_EXT) {
            self.jpeg_ext = Some(parse_jpeg_ext(&ext)?);
        }
        if let Some(path) = read(ENV_INDEX_PATH) {
            // 衝突一覧はインデックスと同じディレクトリに置く
            let index_path = PathBuf::from(path);
            self.collisions_path = index_path.with_file_name(COLLISIONS_FILE_NAME);
            self.index_path = index_path;
        }
        Ok(())
    }

    pub fn set_template(&mut self, template: String) -> Result<()> {
        Template::parse(&template)?;
        self.template = template;
        self.save()
    }

    pub fn set_jpeg_ext(&mut self, ext: &str) -> Result<()> {
        self.jpeg_ext = Some(parse_jpeg_ext(ext)?);
        self.save()
    }
}

/// 先頭と末尾の引用符を1つずつ取り除く
pub fn sanitize(value: &str) -> &str {
    let value = value
        .strip_prefix('"')
        .or_else(|| value.strip_prefix('\''))
        .unwrap_or(value);
    value
        .strip_suffix('"')
        .or_else(|| value.strip_suffix('\''))
        .unwrap_or(value)
}

pub fn parse_jpeg_ext(value: &str) -> Result<JpegExt> {
    value
        .parse()
        .map_err(|_| PhotoIndexError::InvalidJpegExt(value.to_string()))
}
