use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use photo_index::catalog::{FolderCatalog, JsonCatalog};
use photo_index::cli::{Cli, Commands};
use photo_index::config::{Config, ENV_INDEX_PATH, ENV_JPEG_EXT, ENV_TEMPLATE};
use photo_index::error::PhotoIndexError;
use photo_index::lookup::IndexLookup;
use photo_index::output::{read_collisions, summary_line};
use photo_index::runner::{run_build, BuildSettings};
use photo_index::logging;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);
    let config = Config::load().context("設定の読み込みに失敗しました")?;

    match cli.command {
        Commands::Build { json, folder, recursive, output, collisions, template, jpeg_ext, pretty } => {
            println!("🗂  photo-index - インデックス生成\n");

            let settings = BuildSettings::resolve(&config, template, jpeg_ext.as_deref(), output, collisions, pretty)?;

            let result = match (json, folder) {
                (Some(path), _) => {
                    println!("[1/2] JSONカタログを読み込み中...");
                    let catalog = JsonCatalog::open(&path)?;
                    println!("✔ {}件の写真を検出\n", catalog.len());
                    println!("[2/2] インデックスを生成中...");
                    run_build(&catalog, &settings)
                }
                (None, Some(root)) => {
                    println!("[1/2] フォルダをスキャン中...");
                    let progress = ProgressBar::new(0);
                    progress.set_style(progress_style());
                    let catalog = FolderCatalog::scan(&root, recursive, &progress)?;
                    progress.finish_and_clear();
                    println!("✔ {}枚の写真を検出\n", catalog.len());
                    println!("[2/2] インデックスを生成中...");
                    run_build(&catalog, &settings)
                }
                (None, None) => Err(PhotoIndexError::MissingCatalog),
            };

            // 成否にかかわらず使用したテンプレートを残す
            tracing::info!(template = %settings.template, "template in use");
            if let Some(ext) = settings.jpeg_ext {
                tracing::info!(jpeg_ext = %ext, "jpeg extension");
            }

            let result = result.with_context(|| {
                format!("インデックスの生成に失敗しました: {}", settings.index_path.display())
            })?;

            println!("✔ インデックス: {}", settings.index_path.display());
            println!("✔ 衝突一覧: {}", settings.collisions_path.display());
            println!("{}", summary_line(&result.stats()));
        }

        Commands::Lookup { filename, index, collisions } => {
            let index_path = index.unwrap_or_else(|| config.index_path.clone());
            let collisions_path = collisions.unwrap_or_else(|| config.collisions_path.clone());

            let mut lookup = IndexLookup::new(&index_path);
            let uuid = lookup
                .lookup(&filename)
                .with_context(|| format!("インデックスを読み込めません: {}", lookup.path().display()))?;

            warn_collision(&filename, &collisions_path)?;

            match uuid {
                Some(uuid) => println!("{}", uuid),
                None => bail!("インデックスに見つかりません: {}", filename),
            }
        }

        Commands::Config { set_template, set_jpeg_ext, show } => {
            let mut config = config;

            if let Some(template) = set_template {
                config.set_template(template)?;
                println!("✔ テンプレートを設定しました");
            }

            if let Some(ext) = set_jpeg_ext {
                config.set_jpeg_ext(&ext)?;
                println!("✔ JPEG拡張子を設定しました");
            }

            if show {
                println!("設定:");
                println!("  設定ファイル: {}", Config::config_path()?.display());
                println!("  テンプレート: {}", config.template);
                println!(
                    "  JPEG拡張子: {}",
                    config.jpeg_ext.map(|e| e.to_string()).unwrap_or_else(|| "未設定".into())
                );
                println!("  インデックス: {}", config.index_path.display());
                println!("  衝突一覧: {}", config.collisions_path.display());
                println!(
                    "  環境変数: {} / {} / {}",
                    ENV_TEMPLATE, ENV_JPEG_EXT, ENV_INDEX_PATH
                );
            }
        }
    }

    Ok(())
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

/// 衝突一覧に載っているファイル名なら警告
fn warn_collision(filename: &str, collisions_path: &Path) -> anyhow::Result<()> {
    let collisions = read_collisions(collisions_path)
        .with_context(|| format!("衝突一覧を読み込めません: {}", collisions_path.display()))?;

    if let Some(uuids) = collisions.get(filename).filter(|uuids| uuids.len() > 1) {
        tracing::warn!("filename collision for {}: {}", filename, uuids.join(","));
    }
    Ok(())
}
