use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "photo-index")]
#[command(about = "エクスポートファイル名 → 写真識別子 のインデックス生成ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// カタログからインデックスと衝突一覧を生成
    Build {
        /// `osxphotos query --json` の出力ファイル
        #[arg(long, conflicts_with = "folder", required_unless_present = "folder")]
        json: Option<PathBuf>,

        /// 画像フォルダ
        #[arg(long)]
        folder: Option<PathBuf>,

        /// サブフォルダも再帰的にスキャン
        #[arg(short = 'r', long, requires = "folder")]
        recursive: bool,

        /// インデックスの出力先（デフォルト: 設定値）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 衝突一覧の出力先（デフォルト: 設定値）
        #[arg(short, long)]
        collisions: Option<PathBuf>,

        /// ファイル名テンプレート
        #[arg(short, long)]
        template: Option<String>,

        /// JPEG系拡張子の統一先 (jpg/jpeg/JPG/JPEG)
        #[arg(long)]
        jpeg_ext: Option<String>,

        /// JSONを整形して出力
        #[arg(long)]
        pretty: bool,
    },

    /// エクスポート済みファイル名から識別子を検索
    Lookup {
        /// エクスポート済みファイル名
        #[arg(required = true)]
        filename: String,

        /// インデックスファイル（デフォルト: 設定値）
        #[arg(short, long)]
        index: Option<PathBuf>,

        /// 衝突一覧ファイル（デフォルト: 設定値）
        #[arg(short, long)]
        collisions: Option<PathBuf>,
    },

    /// 設定を表示/編集
    Config {
        /// テンプレートを設定
        #[arg(long)]
        set_template: Option<String>,

        /// JPEG系拡張子の統一先を設定
        #[arg(long)]
        set_jpeg_ext: Option<String>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_build_json() {
        let cli = Cli::try_parse_from([
            "photo-index", "build", "--json", "photos.json", "--jpeg-ext", "jpg", "--pretty",
        ])
        .unwrap();

        match cli.command {
            Commands::Build { json, folder, jpeg_ext, pretty, output, .. } => {
                assert_eq!(json, Some(PathBuf::from("photos.json")));
                assert_eq!(folder, None);
                assert_eq!(jpeg_ext.as_deref(), Some("jpg"));
                assert!(pretty);
                assert!(output.is_none());
            }
            _ => panic!("build expected"),
        }
    }

    #[test]
    fn test_build_requires_one_catalog() {
        assert!(Cli::try_parse_from(["photo-index", "build"]).is_err());
        assert!(Cli::try_parse_from([
            "photo-index", "build", "--json", "a.json", "--folder", "photos",
        ])
        .is_err());
    }

    #[test]
    fn test_recursive_requires_folder() {
        assert!(Cli::try_parse_from(["photo-index", "build", "--json", "a.json", "-r"]).is_err());
        assert!(Cli::try_parse_from(["photo-index", "build", "--folder", "photos", "-r"]).is_ok());
    }

    #[test]
    fn test_parse_lookup_verbose() {
        let cli = Cli::try_parse_from(["photo-index", "lookup", "a.jpg", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Lookup { ref filename, .. } if filename == "a.jpg"));
    }
}
