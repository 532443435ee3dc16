//! Photo Index Common Library
//!
//! エクスポートファイル名 → 写真識別子 のインデックス生成器と、
//! そのためのレコード型・テンプレート描画

pub mod types;
pub mod error;
pub mod key;
pub mod quality;
pub mod index;
pub mod template;

pub use types::{Catalog, PhotoInfo, PhotoRecord};
pub use error::{Error, Result};
pub use key::{render_key, JpegExt, TemplateRenderer};
pub use quality::QualityScore;
pub use index::{build_index, build_index_from_catalog, FilenameIndex, IndexBuilder, IndexOptions, IndexStats, DEFAULT_TEMPLATE};
pub use template::Template;
