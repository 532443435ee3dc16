//! build コマンドの本体
//!
//! 設定・CLI引数から実行設定を決め、カタログからインデックスを生成して書き出す。

use crate::config::{parse_jpeg_ext, Config};
use crate::error::Result;
use crate::output::write_index;
use photo_index_common::{build_index_from_catalog, Catalog, FilenameIndex, IndexOptions, JpegExt, PhotoInfo, Template};
use std::path::PathBuf;

/// 1回の build の実行設定
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSettings {
    pub template: String,
    pub jpeg_ext: Option<JpegExt>,
    pub index_path: PathBuf,
    pub collisions_path: PathBuf,
    pub pretty: bool,
}

impl BuildSettings {
    /// CLI引数 > 設定（環境変数込み）の優先順で決める
    pub fn resolve(
        config: &Config,
        template: Option<String>,
        jpeg_ext: Option<&str>,
        output: Option<PathBuf>,
        collisions: Option<PathBuf>,
        pretty: bool,
    ) -> Result<Self> {
        let jpeg_ext = match jpeg_ext {
            Some(ext) => Some(parse_jpeg_ext(ext)?),
            None => config.jpeg_ext,
        };

        Ok(Self {
            template: template.unwrap_or_else(|| config.template.clone()),
            jpeg_ext,
            index_path: output.unwrap_or_else(|| config.index_path.clone()),
            collisions_path: collisions.unwrap_or_else(|| config.collisions_path.clone()),
            pretty,
        })
    }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions::new(self.template.clone()).with_jpeg_ext(self.jpeg_ext)
    }
}

/// インデックスを生成して2つのJSONファイルに書き出す
///
/// テンプレートはレコードを読む前に検証する。
pub fn run_build<C>(catalog: &C, settings: &BuildSettings) -> Result<FilenameIndex>
where
    C: Catalog<Photo = PhotoInfo> + ?Sized,
{
    let template = Template::parse(&settings.template)?;
    let result = build_index_from_catalog(catalog, &template, settings.index_options());

    let stats = result.stats();
    tracing::info!(
        records = stats.records,
        skipped = stats.skipped,
        keys = stats.keys,
        colliding = stats.colliding_keys,
        "index built"
    );

    write_index(&result, &settings.index_path, &settings.collisions_path, settings.pretty)?;
    Ok(result)
}
