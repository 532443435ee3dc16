//! ファイル名テンプレート
//!
//! osxphotos のテンプレート記法のうち、エクスポート名に使う最小限を扱う。
//!
//! | フィールド | 内容 |
//! |---|---|
//! | `{original_name}` | 元ファイル名（拡張子なし） |
//! | `{name}` | 現在のファイル名（拡張子なし） |
//! | `{ext}` | `.` + 元ファイルの拡張子 |
//! | `{uuid}` | 識別子 |
//! | `{created.strftime,FMT}` | 作成日時（記録時のオフセット） |
//! | `{created.utc.strftime,FMT}` | 作成日時（UTC） |
//! | `{created.year}` `{created.mm}` `{created.dd}` | 年・月・日 |
//!
//! 値がないフィールドは空文字列になる。

use crate::error::{Error, Result};
use crate::key::TemplateRenderer;
use crate::types::PhotoInfo;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, FixedOffset, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FIELD_RE: Regex = Regex::new(r"\{[^{}]*\}").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Field {
    OriginalName,
    Name,
    Ext,
    Uuid,
    Strftime { utc: bool, format: String },
    Year,
    Month,
    Day,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

/// パース済みテンプレート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Err(Error::Template("template is empty".into()));
        }

        let mut segments = Vec::new();
        let mut last = 0;

        for found in FIELD_RE.find_iter(source) {
            push_literal(&mut segments, &source[last..found.start()])?;
            let body = &source[found.start() + 1..found.end() - 1];
            segments.push(Segment::Field(parse_field(body)?));
            last = found.end();
        }
        push_literal(&mut segments, &source[last..])?;

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// 写真1件を描画。結果が空なら候補なし
    pub fn render_photo(&self, photo: &PhotoInfo) -> Vec<String> {
        let created = photo.created();
        let mut out = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => render_field(&mut out, field, photo, created.as_ref()),
            }
        }

        if out.is_empty() {
            Vec::new()
        } else {
            vec![out]
        }
    }
}

impl TemplateRenderer<PhotoInfo> for Template {
    fn render(&self, record: &PhotoInfo, template: &str) -> Vec<String> {
        if template == self.source {
            return self.render_photo(record);
        }
        match Template::parse(template) {
            Ok(other) => other.render_photo(record),
            Err(err) => {
                tracing::warn!(template, error = %err, "template could not be parsed");
                Vec::new()
            }
        }
    }
}

/// `photos.iter()` のような参照の列もそのまま描画できる
impl<'a> TemplateRenderer<&'a PhotoInfo> for Template {
    fn render(&self, record: &&'a PhotoInfo, template: &str) -> Vec<String> {
        TemplateRenderer::<PhotoInfo>::render(self, *record, template)
    }
}

fn push_literal(segments: &mut Vec<Segment>, text: &str) -> Result<()> {
    if text.contains('{') || text.contains('}') {
        return Err(Error::Template(format!("unbalanced brace in {:?}", text)));
    }
    if !text.is_empty() {
        segments.push(Segment::Literal(text.to_string()));
    }
    Ok(())
}

fn parse_field(body: &str) -> Result<Field> {
    let field = match body {
        "original_name" => Field::OriginalName,
        "name" => Field::Name,
        "ext" => Field::Ext,
        "uuid" => Field::Uuid,
        "created.year" => Field::Year,
        "created.mm" => Field::Month,
        "created.dd" => Field::Day,
        _ => {
            let (utc, format) = if let Some(format) = body.strip_prefix("created.utc.strftime,") {
                (true, format)
            } else if let Some(format) = body.strip_prefix("created.strftime,") {
                (false, format)
            } else {
                return Err(Error::Template(format!("unknown field {{{}}}", body)));
            };
            Field::Strftime {
                utc,
                format: python_strftime(format)?,
            }
        }
    };
    Ok(field)
}

/// Python の `strftime` 書式を chrono 用に変換
///
/// `%f` は Python ではマイクロ秒6桁、chrono ではナノ秒9桁なので `%6f` にする。
fn python_strftime(format: &str) -> Result<String> {
    if format.is_empty() {
        return Err(Error::Template("strftime format is empty".into()));
    }

    let mut converted = String::with_capacity(format.len() + 4);
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            converted.push(c);
            continue;
        }
        match chars.next() {
            Some('f') => converted.push_str("%6f"),
            Some(next) => {
                converted.push('%');
                converted.push(next);
            }
            None => converted.push('%'),
        }
    }

    if StrftimeItems::new(&converted).any(|item| matches!(item, Item::Error)) {
        return Err(Error::Template(format!("invalid strftime format {:?}", format)));
    }
    Ok(converted)
}

fn render_field(out: &mut String, field: &Field, photo: &PhotoInfo, created: Option<&DateTime<FixedOffset>>) {
    match field {
        Field::OriginalName => out.push_str(photo.original_stem().unwrap_or_default()),
        Field::Name => out.push_str(photo.current_stem().unwrap_or_default()),
        Field::Ext => {
            if let Some(ext) = photo.original_extension() {
                out.push('.');
                out.push_str(ext);
            }
        }
        Field::Uuid => out.push_str(&photo.uuid),
        Field::Strftime { utc, format } => {
            if let Some(created) = created {
                let text = if *utc {
                    created.with_timezone(&Utc).format(format).to_string()
                } else {
                    created.format(format).to_string()
                };
                out.push_str(&text);
            }
        }
        Field::Year => {
            if let Some(created) = created {
                out.push_str(&format!("{:04}", created.year()));
            }
        }
        Field::Month => {
            if let Some(created) = created {
                out.push_str(&format!("{:02}", created.month()));
            }
        }
        Field::Day => {
            if let Some(created) = created {
                out.push_str(&format!("{:02}", created.day()));
            }
        }
    }
}
